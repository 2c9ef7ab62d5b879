//! Canvas 2D backend (browser)

use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::canvas::{Canvas, Rgba, css_rgba};

/// Paints world units onto an HTML canvas, scaled by the device pixel ratio
pub struct Canvas2d {
    ctx: CanvasRenderingContext2d,
    /// Skin images by index; `None` where loading failed
    skins: Vec<Option<HtmlImageElement>>,
}

impl Canvas2d {
    /// Wrap the canvas' 2D context. Returns None if the browser refuses one.
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            skins: Vec::new(),
        })
    }

    /// Size the backing store for the world resolution at `dpr` and map
    /// world units onto it
    pub fn configure(&self, canvas: &HtmlCanvasElement, world: Vec2, dpr: f64) {
        canvas.set_width((world.x as f64 * dpr).round() as u32);
        canvas.set_height((world.y as f64 * dpr).round() as u32);
        if let Err(e) = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0) {
            log::warn!("set_transform failed: {e:?}");
        }
    }

    pub fn set_skin_image(&mut self, index: usize, image: Option<HtmlImageElement>) {
        if index >= self.skins.len() {
            self.skins.resize(index + 1, None);
        }
        self.skins[index] = image;
    }

    fn fill_current_path(&self, color: Rgba) {
        self.ctx.set_fill_style_str(&css_rgba(color));
        self.ctx.fill();
    }
}

impl Canvas for Canvas2d {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_ok()
        {
            self.fill_current_path(color);
        }
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Rgba) {
        self.ctx.begin_path();
        if self
            .ctx
            .ellipse(
                center.x as f64,
                center.y as f64,
                radii.x as f64,
                radii.y as f64,
                0.0,
                0.0,
                TAU,
            )
            .is_ok()
        {
            self.fill_current_path(color);
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.fill_current_path(color);
    }

    fn radial_glow(&mut self, center: Vec2, inner_radius: f32, outer_radius: f32, inner: Rgba, outer: Rgba) {
        let (x, y) = (center.x as f64, center.y as f64);
        let Ok(gradient) =
            self.ctx
                .create_radial_gradient(x, y, inner_radius as f64, x, y, outer_radius as f64)
        else {
            return;
        };
        let _ = gradient.add_color_stop(0.0, &css_rgba(inner));
        let _ = gradient.add_color_stop(1.0, &css_rgba(outer));
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.begin_path();
        if self.ctx.arc(x, y, outer_radius as f64, 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
    }

    fn draw_skin(&mut self, skin: usize, center: Vec2, size: Vec2) {
        let Some(Some(image)) = self.skins.get(skin) else {
            return;
        };
        let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            (center.x - size.x / 2.0) as f64,
            (center.y - size.y / 2.0) as f64,
            size.x as f64,
            size.y as f64,
        );
    }
}
