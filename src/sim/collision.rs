//! Collision detection between the player and meteors
//!
//! Both shapes are approximated as circles. A cheap per-axis rejection runs
//! first since there are many meteors and one player, then a Euclidean test
//! against a slightly shrunk threshold so sprite padding doesn't register.

use glam::Vec2;

use super::state::{Obstacle, Player};
use crate::consts::COLLISION_LENIENCY;

/// Check whether two circles overlap
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    let delta = (b - a).abs();

    // Axis-aligned rejection
    if delta.x > reach || delta.y > reach {
        return false;
    }

    delta.length() < reach * COLLISION_LENIENCY
}

/// Check whether a meteor hits the player
#[inline]
pub fn player_hit_by(player: &Player, obstacle: &Obstacle) -> bool {
    circles_overlap(player.pos, player.radius(), obstacle.pos, obstacle.radius())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_hit() {
        // Distance 30 < 0.95 * 60 = 57
        assert!(circles_overlap(
            Vec2::new(100.0, 100.0),
            40.0,
            Vec2::new(130.0, 100.0),
            20.0
        ));
    }

    #[test]
    fn test_overlap_miss_far() {
        assert!(!circles_overlap(
            Vec2::new(100.0, 100.0),
            40.0,
            Vec2::new(300.0, 100.0),
            20.0
        ));
    }

    #[test]
    fn test_leniency_band() {
        // Distance 58 is inside the summed radii (60) but outside 0.95 * 60
        assert!(!circles_overlap(
            Vec2::ZERO,
            40.0,
            Vec2::new(58.0, 0.0),
            20.0
        ));
        assert!(circles_overlap(Vec2::ZERO, 40.0, Vec2::new(56.0, 0.0), 20.0));
    }

    #[test]
    fn test_diagonal_passes_axis_check_but_misses() {
        // 50 on each axis passes the box test but the distance is ~70.7
        assert!(!circles_overlap(
            Vec2::ZERO,
            40.0,
            Vec2::new(50.0, 50.0),
            20.0
        ));
    }

    #[test]
    fn test_player_hit_by_uses_half_extents() {
        let player = Player {
            pos: Vec2::new(100.0, 100.0),
            width: 80.0,
            height: 80.0,
            invuln_ms: 0.0,
            skin: 0,
        };
        let obstacle = Obstacle {
            pos: Vec2::new(130.0, 100.0),
            size: 40.0,
            speed: 1.0,
            angle: 0.0,
            spin: 0.0,
        };
        assert!(player_hit_by(&player, &obstacle));
    }
}
