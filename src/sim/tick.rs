//! Per-frame simulation step
//!
//! Driven once per display refresh with the elapsed wall time. The elapsed
//! time is applied as-is: a long gap (backgrounded tab) produces a visible
//! jump rather than being clamped.

use glam::Vec2;

use super::collision::player_hit_by;
use super::particles::{emit_burst, update_particles};
use super::session::{end, update_end_screen};
use super::spawn::{spawn_interval, update_spawner};
use super::state::{GameEvent, GameState, ParticleColor};
use crate::consts::*;

/// Movement intents sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl TickInput {
    /// Unit-less direction from the held keys (opposing keys cancel)
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance the game state by `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    if state.paused {
        return;
    }
    let dt_ms = dt_ms.max(0.0);
    let frames = dt_ms / REFERENCE_FRAME_MS;
    state.time_ms += dt_ms as f64;

    update_end_screen(state, dt_ms);

    // Spawning runs on the start screen too so the background stays busy
    update_spawner(state, dt_ms);

    // Player
    let player = &mut state.player;
    player.pos += input.direction() * PLAYER_MOVE_SPEED * frames;
    player.clamp_to_world(&state.tuning);
    player.invuln_ms = (player.invuln_ms - dt_ms).max(0.0);

    if !update_obstacles(state, frames) {
        // Round ended mid-scan; the rest of this tick is skipped
        return;
    }

    update_particles(&mut state.particles, dt_ms);

    state.spawn_interval_ms = spawn_interval(&state.tuning, state.score);
}

/// Move meteors, retire the ones that fell off, and resolve player hits
///
/// Returns false if the round ended during the scan.
fn update_obstacles(state: &mut GameState, frames: f32) -> bool {
    let world_height = state.tuning.world_height;

    // Reverse scan so swap_remove never skips an unvisited meteor
    for i in (0..state.obstacles.len()).rev() {
        let speedup = 1.0 + state.score as f32 * SCORE_SPEEDUP;
        let obstacle = &mut state.obstacles[i];
        obstacle.pos.y += obstacle.speed * frames * speedup;
        obstacle.angle += obstacle.spin * frames;

        if obstacle.has_exited(world_height) {
            state.obstacles.swap_remove(i);
            if state.is_scoring() {
                state.score += 1;
                state.emit(GameEvent::ScoreChanged(state.score));
            }
            continue;
        }

        if !state.is_scoring() || state.player.is_invulnerable() {
            continue;
        }

        if player_hit_by(&state.player, &state.obstacles[i]) {
            state.lives = state.lives.saturating_sub(1);
            state.player.invuln_ms = state.tuning.invulnerability_ms;
            let at = state.player.pos;
            state.emit(GameEvent::LivesChanged(state.lives));
            state.emit(GameEvent::PlayerHit(at));
            emit_burst(state, at, ParticleColor::Impact, IMPACT_BURST);
            log::debug!("Player hit, {} lives left", state.lives);

            if state.lives == 0 {
                end(state);
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscore::BestScore;
    use crate::sim::session::{reset, toggle_pause};
    use crate::sim::state::{GamePhase, Obstacle};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn running_state() -> GameState {
        let mut state = GameState::new(12345, Tuning::default(), BestScore::default());
        reset(&mut state);
        state.drain_events();
        state
    }

    fn meteor(x: f32, y: f32, size: f32) -> Obstacle {
        Obstacle {
            pos: Vec2::new(x, y),
            size,
            speed: 0.0,
            angle: 0.0,
            spin: 0.0,
        }
    }

    #[test]
    fn test_player_moves_frame_rate_independent() {
        let mut a = running_state();
        let mut b = running_state();
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        let start = a.player.pos;

        tick(&mut a, &input, 32.0);
        tick(&mut b, &input, 16.0);
        tick(&mut b, &input, 16.0);

        assert_eq!(a.player.pos.x, start.x - 16.0);
        assert!((a.player.pos.x - b.player.pos.x).abs() < 1e-4);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let input = TickInput {
            left: true,
            right: true,
            up: true,
            down: false,
        };
        assert_eq!(input.direction(), Vec2::new(0.0, -1.0));
    }

    proptest! {
        #[test]
        fn player_stays_in_bounds(
            steps in proptest::collection::vec((0u8..16, 0.0f32..5000.0), 1..40)
        ) {
            let mut state = running_state();
            for (keys, dt) in steps {
                let input = TickInput {
                    left: keys & 1 != 0,
                    right: keys & 2 != 0,
                    up: keys & 4 != 0,
                    down: keys & 8 != 0,
                };
                tick(&mut state, &input, dt);
                if state.phase != GamePhase::Running {
                    reset(&mut state);
                }
                let p = &state.player;
                prop_assert!(p.pos.x >= p.width / 2.0 + 8.0 && p.pos.x <= 540.0 - p.width / 2.0 - 8.0);
                prop_assert!(p.pos.y >= p.height / 2.0 + 24.0 && p.pos.y <= 960.0 - p.height / 2.0 - 8.0);
            }
        }
    }

    #[test]
    fn test_invulnerability_counts_down_to_zero() {
        let mut state = running_state();
        state.player.invuln_ms = 100.0;
        tick(&mut state, &TickInput::default(), 60.0);
        assert_eq!(state.player.invuln_ms, 40.0);
        tick(&mut state, &TickInput::default(), 60.0);
        assert_eq!(state.player.invuln_ms, 0.0);
    }

    #[test]
    fn test_meteor_fall_scales_with_score() {
        let mut state = running_state();
        state.score = 500;
        let mut m = meteor(50.0, 100.0, 30.0);
        m.speed = 2.0;
        m.spin = 0.01;
        state.obstacles.push(m);

        tick(&mut state, &TickInput::default(), 16.0);

        // 2.0 * 1 frame * (1 + 500 * 0.002)
        assert!((state.obstacles[0].pos.y - 104.0).abs() < 1e-4);
        assert!((state.obstacles[0].angle - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_exit_scores_while_running() {
        let mut state = running_state();
        state.obstacles.push(meteor(50.0, 960.0 + 200.0 + 15.0 + 1.0, 30.0));
        state.obstacles.push(meteor(400.0, 960.0 + 200.0 + 15.0 + 1.0, 30.0));
        state.obstacles.push(meteor(50.0, 300.0, 30.0));

        tick(&mut state, &TickInput::default(), 0.0);

        assert_eq!(state.score, 2);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::ScoreChanged(1), GameEvent::ScoreChanged(2)]
        );
    }

    #[test]
    fn test_exit_does_not_score_on_start_screen() {
        let mut state = GameState::new(9, Tuning::default(), BestScore::default());
        state.obstacles.clear();
        state.obstacles.push(meteor(50.0, 2000.0, 30.0));

        tick(&mut state, &TickInput::default(), 0.0);

        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_start_screen_meteors_never_hit() {
        let mut state = GameState::new(9, Tuning::default(), BestScore::default());
        state.obstacles.clear();
        let at = state.player.pos;
        state.obstacles.push(meteor(at.x, at.y, 60.0));

        tick(&mut state, &TickInput::default(), 16.0);

        assert_eq!(state.lives, 3);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_hit_costs_life_and_grants_immunity() {
        let mut state = running_state();
        let at = state.player.pos;
        state.obstacles.push(meteor(at.x, at.y, 60.0));

        tick(&mut state, &TickInput::default(), 16.0);

        assert_eq!(state.lives, 2);
        assert_eq!(state.player.invuln_ms, 1200.0);
        assert_eq!(state.particles.len(), IMPACT_BURST);
        assert_eq!(state.score, 0);
        let events = state.drain_events();
        assert_eq!(events[0], GameEvent::LivesChanged(2));
        assert_eq!(events[1], GameEvent::PlayerHit(at));

        // Still overlapping, but immune now
        tick(&mut state, &TickInput::default(), 16.0);
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_last_life_ends_round_in_same_tick() {
        let mut state = running_state();
        state.lives = 1;
        let at = state.player.pos;
        state.obstacles.push(meteor(at.x, at.y, 60.0));
        state.obstacles.push(meteor(at.x, at.y, 60.0));

        tick(&mut state, &TickInput::default(), 16.0);

        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.lives, 0);
        // One impact burst only, then the celebration
        assert_eq!(state.particles.len(), IMPACT_BURST + CELEBRATION_BURST);
        let hits = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::PlayerHit(_)))
            .count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_end_skips_particles_for_that_tick() {
        let mut state = running_state();
        state.lives = 1;
        let at = state.player.pos;
        state.obstacles.push(meteor(at.x, at.y, 60.0));

        tick(&mut state, &TickInput::default(), 16.0);

        assert!(state.particles.iter().all(|p| p.age_ms == 0.0));
    }

    #[test]
    fn test_spawn_interval_follows_score() {
        let mut state = running_state();
        state.obstacles.clear();
        for _ in 0..100 {
            state.obstacles.push(meteor(50.0, 5000.0, 30.0));
        }
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.score, 100);
        assert_eq!(state.spawn_interval_ms, 500.0);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut state = running_state();
        let mut m = meteor(50.0, 100.0, 30.0);
        m.speed = 3.0;
        state.obstacles.push(m);
        toggle_pause(&mut state);

        let input = TickInput {
            right: true,
            ..Default::default()
        };
        let before = state.player.pos;
        tick(&mut state, &input, 500.0);

        assert_eq!(state.player.pos, before);
        assert_eq!(state.obstacles[0].pos.y, 100.0);
        assert_eq!(state.spawn_timer_ms, 0.0);
    }

    #[test]
    fn test_large_dt_is_not_clamped() {
        let mut state = running_state();
        let mut m = meteor(50.0, 0.0, 30.0);
        m.speed = 1.0;
        state.obstacles.push(m);

        tick(&mut state, &TickInput::default(), 1600.0);

        assert!((state.obstacles[0].pos.y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = GameState::new(777, Tuning::default(), BestScore::default());
        let mut b = GameState::new(777, Tuning::default(), BestScore::default());
        reset(&mut a);
        reset(&mut b);
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut a, &input, 16.7);
            tick(&mut b, &input, 16.7);
        }
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
    }
}
