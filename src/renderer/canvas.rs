//! Drawing capability the renderer paints through
//!
//! Backends only need filled primitives, a radial glow, scaled images and a
//! global alpha. All coordinates are in world units.

use glam::Vec2;

/// Linear RGBA, 0..1
pub type Rgba = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Rgba;

    pub const STAR: Rgba = [0.627, 0.863, 1.0, 0.06];
    pub const METEOR_ROCK: Rgba = [0.482, 0.435, 0.384, 1.0];
    pub const METEOR_GLOW: Rgba = [1.0, 0.784, 0.471, 0.12];
    pub const TRANSPARENT: Rgba = [0.0, 0.0, 0.0, 0.0];
    pub const PLAYER_SHADOW: Rgba = [0.0, 0.0, 0.0, 0.36];
    /// Player drawn without a skin image
    pub const PLAYER_FALLBACK: Rgba = [0.486, 1.0, 0.773, 1.0];
}

/// Format a color for CSS-style backends
pub fn css_rgba(color: Rgba) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({},{},{},{})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

/// Minimal 2D drawing surface
pub trait Canvas {
    /// Clear the whole world rectangle
    fn clear(&mut self, width: f32, height: f32);
    /// Opacity multiplier applied to everything drawn until the next call
    fn set_alpha(&mut self, alpha: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Rgba);
    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba);
    /// Disc of `outer_radius` shaded from `inner` at `inner_radius` to `outer` at the rim
    fn radial_glow(&mut self, center: Vec2, inner_radius: f32, outer_radius: f32, inner: Rgba, outer: Rgba);
    /// Draw skin image `skin` centred on `center`, stretched to `size`
    fn draw_skin(&mut self, skin: usize, center: Vec2, size: Vec2);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    Alpha(f32),
    Circle { center: Vec2, radius: f32, color: Rgba },
    Ellipse { center: Vec2, radii: Vec2, color: Rgba },
    Polygon { points: Vec<Vec2>, color: Rgba },
    Glow { center: Vec2, inner_radius: f32, outer_radius: f32, inner: Rgba, outer: Rgba },
    Skin { skin: usize, center: Vec2, size: Vec2 },
}

/// Canvas that records commands instead of painting
///
/// Used headless on native and to inspect frames in tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandList {
    pub commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Canvas for CommandList {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::Alpha(alpha));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::Ellipse { center, radii, color });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn radial_glow(&mut self, center: Vec2, inner_radius: f32, outer_radius: f32, inner: Rgba, outer: Rgba) {
        self.commands.push(DrawCommand::Glow {
            center,
            inner_radius,
            outer_radius,
            inner,
            outer,
        });
    }

    fn draw_skin(&mut self, skin: usize, center: Vec2, size: Vec2) {
        self.commands.push(DrawCommand::Skin { skin, center, size });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_rgba() {
        assert_eq!(css_rgba([1.0, 0.0, 0.5, 0.25]), "rgba(255,0,128,0.25)");
        assert_eq!(css_rgba([2.0, -1.0, 0.0, 3.0]), "rgba(255,0,0,1)");
    }

    #[test]
    fn test_clear_starts_new_frame() {
        let mut list = CommandList::new();
        list.fill_circle(Vec2::ZERO, 1.0, colors::STAR);
        list.clear(10.0, 10.0);
        assert_eq!(list.commands, vec![DrawCommand::Clear { width: 10.0, height: 10.0 }]);
    }
}
