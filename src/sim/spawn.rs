//! Meteor spawning and difficulty curve

use glam::Vec2;
use std::f32::consts::TAU;

use super::state::{GameState, Obstacle};
use crate::consts::SPAWN_INTERVAL_PER_POINT;
use crate::rand_range;
use crate::tuning::Tuning;

/// Spawn interval (ms) for a given score
///
/// Shrinks by 2 ms per point and plateaus at the floor.
pub fn spawn_interval(tuning: &Tuning, score: u64) -> f32 {
    let reduced = tuning.spawn_interval_base - score as f32 * SPAWN_INTERVAL_PER_POINT;
    reduced.max(tuning.spawn_interval_floor)
}

/// Create a meteor with randomized size, position, speed and spin
///
/// Start-screen meteors may already be partway through their fall so the
/// demo never looks empty; scored meteors start fully above the screen.
pub fn new_obstacle(state: &mut GameState, pre_start: bool) -> Obstacle {
    let tuning = &state.tuning;
    let rng = &mut state.rng;

    let size = rand_range(rng, tuning.meteor_min_size, tuning.meteor_max_size);
    let x = rand_range(rng, size / 2.0, tuning.world_width - size / 2.0);
    let y = if pre_start {
        rand_range(rng, -tuning.world_height, -tuning.prestart_top_gap)
    } else {
        -size
    };

    Obstacle {
        pos: Vec2::new(x, y),
        size,
        speed: rand_range(rng, tuning.meteor_min_speed, tuning.meteor_max_speed),
        angle: rand_range(rng, 0.0, TAU),
        spin: rand_range(rng, -tuning.meteor_max_spin, tuning.meteor_max_spin),
    }
}

/// Add one meteor to the field
pub fn spawn_obstacle(state: &mut GameState, pre_start: bool) {
    let obstacle = new_obstacle(state, pre_start);
    state.obstacles.push(obstacle);
}

/// Advance the spawn accumulator, spawning when it passes the interval
///
/// Returns true if a meteor was spawned.
pub fn update_spawner(state: &mut GameState, dt_ms: f32) -> bool {
    state.spawn_timer_ms += dt_ms;
    let interval = spawn_interval(&state.tuning, state.score);
    if state.spawn_timer_ms > interval {
        let pre_start = state.is_pre_start();
        spawn_obstacle(state, pre_start);
        state.spawn_timer_ms = 0.0;
        return true;
    }
    false
}

/// Scatter every live meteor horizontally
pub fn shuffle_obstacles(state: &mut GameState) {
    let width = state.tuning.world_width;
    for obstacle in &mut state.obstacles {
        obstacle.pos.x = rand_range(&mut state.rng, 0.0, width);
    }
}
