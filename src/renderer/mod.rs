//! Rendering module
//!
//! The scene is painted through the [`Canvas`] trait so the same frame logic
//! drives the browser's 2D context and the headless command recorder.

pub mod canvas;
#[cfg(target_arch = "wasm32")]
pub mod canvas2d;
pub mod scene;
pub mod shapes;

pub use canvas::{Canvas, CommandList, DrawCommand, Rgba};
#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2d;
pub use scene::render;
