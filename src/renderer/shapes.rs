//! Shape generation for 2D primitives

use glam::Vec2;

/// Rock outline in units of meteor size, before rotation
const ROCK_OUTLINE: [Vec2; 5] = [
    Vec2::new(-0.5, -0.2),
    Vec2::new(-0.2, -0.6),
    Vec2::new(0.6, -0.1),
    Vec2::new(0.3, 0.5),
    Vec2::new(-0.4, 0.6),
];

/// Number of background stars
pub const STAR_COUNT: u32 = 80;

/// World-space outline of a meteor rotated by `angle`
pub fn meteor_outline(center: Vec2, size: f32, angle: f32) -> [Vec2; 5] {
    let rotation = Vec2::from_angle(angle);
    ROCK_OUTLINE.map(|p| center + rotation.rotate(p * size))
}

/// Position and radius of star `index` at `time_ms`
///
/// Fixed pseudo-random layout; every third star is still and the others drift
/// right at two speeds, wrapping around the world.
pub fn star(index: u32, time_ms: f64, world: Vec2) -> (Vec2, f32) {
    let i = index as f64;
    let drift = time_ms * 0.02 * (index % 3) as f64;
    let x = (i * 47.0 * 1.2 + drift) % world.x as f64;
    let y = ((index * 97) as f64 % world.y as f64) * 1.02;
    let radius = if index % 7 == 0 {
        1.6
    } else if index % 5 == 0 {
        1.0
    } else {
        0.6
    };
    (Vec2::new(x as f32, y as f32), radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_meteor_outline_unrotated() {
        let outline = meteor_outline(Vec2::new(100.0, 50.0), 10.0, 0.0);
        assert!((outline[0] - Vec2::new(95.0, 48.0)).length() < 1e-4);
        assert!((outline[2] - Vec2::new(106.0, 49.0)).length() < 1e-4);
    }

    #[test]
    fn test_meteor_outline_quarter_turn() {
        let outline = meteor_outline(Vec2::ZERO, 10.0, FRAC_PI_2);
        // (6, -1) rotated 90 degrees is (1, 6)
        assert!((outline[2] - Vec2::new(1.0, 6.0)).length() < 1e-4);
    }

    #[test]
    fn test_star_layout() {
        let world = Vec2::new(540.0, 960.0);
        let (pos, radius) = star(0, 0.0, world);
        assert_eq!(pos, Vec2::ZERO);
        assert_eq!(radius, 1.6);

        let (pos, radius) = star(5, 0.0, world);
        assert!((pos.x - 282.0).abs() < 1e-3);
        assert!((pos.y - 485.0 * 1.02).abs() < 1e-3);
        assert_eq!(radius, 1.0);
    }

    #[test]
    fn test_stars_drift_and_wrap() {
        let world = Vec2::new(540.0, 960.0);
        // Index 3 never drifts
        assert_eq!(star(3, 0.0, world), star(3, 100_000.0, world));
        // Index 1 drifts and stays inside the world
        let (moved, _) = star(1, 10_000.0, world);
        assert!(moved.x >= 0.0 && moved.x < 540.0);
        assert_ne!(moved, star(1, 0.0, world).0);
    }
}
