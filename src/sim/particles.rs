//! Particle bursts and their lifecycle

use glam::Vec2;

use super::state::{GameState, Particle, ParticleColor};
use crate::consts::{PARTICLE_GRAVITY, REFERENCE_FRAME_MS};
use crate::rand_range;

/// Emit `count` particles at `pos` with randomized velocity and lifetime
pub fn emit_burst(state: &mut GameState, pos: Vec2, color: ParticleColor, count: usize) {
    let tuning = &state.tuning;
    let rng = &mut state.rng;
    state.particles.reserve(count);
    for _ in 0..count {
        let vel = Vec2::new(
            rand_range(rng, -tuning.particle_spread, tuning.particle_spread),
            rand_range(rng, tuning.particle_min_vy, tuning.particle_max_vy),
        );
        state.particles.push(Particle {
            pos,
            vel,
            age_ms: 0.0,
            life_ms: rand_range(rng, tuning.particle_min_life, tuning.particle_max_life),
            color,
        });
    }
}

/// Age, cull and integrate every particle
pub fn update_particles(particles: &mut Vec<Particle>, dt_ms: f32) {
    let frames = dt_ms / REFERENCE_FRAME_MS;
    particles.retain_mut(|p| {
        p.age_ms += dt_ms;
        if p.is_expired() {
            return false;
        }
        p.pos += p.vel * frames;
        p.vel.y += PARTICLE_GRAVITY * frames;
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscore::BestScore;
    use crate::tuning::Tuning;

    fn particle(life_ms: f32) -> Particle {
        Particle {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::new(1.0, -2.0),
            age_ms: 0.0,
            life_ms,
            color: ParticleColor::Impact,
        }
    }

    #[test]
    fn test_burst_count_and_ranges() {
        let mut state = GameState::new(11, Tuning::default(), BestScore::default());
        emit_burst(&mut state, Vec2::new(50.0, 60.0), ParticleColor::Celebration, 40);
        assert_eq!(state.particles.len(), 40);
        for p in &state.particles {
            assert_eq!(p.pos, Vec2::new(50.0, 60.0));
            assert!(p.vel.x >= -3.0 && p.vel.x < 3.0);
            assert!(p.vel.y >= -5.0 && p.vel.y < 1.0);
            assert!(p.life_ms >= 400.0 && p.life_ms < 1000.0);
            assert_eq!(p.age_ms, 0.0);
        }
    }

    #[test]
    fn test_age_equal_to_life_is_retained_for_one_step() {
        let mut particles = vec![particle(500.0)];

        update_particles(&mut particles, 500.0);
        assert_eq!(particles.len(), 1);
        assert_eq!(particles[0].age_ms, 500.0);

        update_particles(&mut particles, 1.0);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_motion_and_gravity() {
        let mut particles = vec![particle(1000.0)];
        update_particles(&mut particles, 16.0);
        let p = &particles[0];
        assert_eq!(p.pos, Vec2::new(11.0, 8.0));
        assert!((p.vel.y - (-2.0 + 0.06)).abs() < 1e-6);
    }

    #[test]
    fn test_expired_particle_does_not_move() {
        let mut particles = vec![particle(100.0), particle(1000.0)];
        update_particles(&mut particles, 200.0);
        assert_eq!(particles.len(), 1);
        assert_eq!(particles[0].life_ms, 1000.0);
    }
}
