//! Session flow: start, end, pause and player-facing controls

use glam::Vec2;

use super::particles::emit_burst;
use super::spawn::shuffle_obstacles;
use super::state::{GameEvent, GamePhase, GameState, ParticleColor};
use crate::assets::SkinSet;
use crate::consts::{CELEBRATION_BURST, END_SCREEN_DELAY_MS};

/// Begin a fresh scored round
///
/// Clears the field, restores lives and difficulty. The player keeps its
/// position and skin.
pub fn reset(state: &mut GameState) {
    state.obstacles.clear();
    state.particles.clear();
    state.score = 0;
    state.lives = state.tuning.initial_lives;
    state.spawn_interval_ms = state.tuning.spawn_interval_base;
    state.spawn_timer_ms = 0.0;
    state.end_timer_ms = 0.0;
    state.phase = GamePhase::Running;
    if state.paused {
        state.paused = false;
        state.emit(GameEvent::PauseChanged(false));
    }

    state.emit(GameEvent::ScoreChanged(state.score));
    state.emit(GameEvent::LivesChanged(state.lives));
    state.emit(GameEvent::BestChanged(state.best.value()));

    log::info!("Round started (lives: {})", state.lives);
}

/// Finish the current round
///
/// Returns true if the score set a new best.
pub fn end(state: &mut GameState) -> bool {
    state.phase = GamePhase::Ended;
    state.paused = false;
    state.end_timer_ms = END_SCREEN_DELAY_MS;

    let center = state.tuning.world_center();
    emit_burst(state, center, ParticleColor::Celebration, CELEBRATION_BURST);

    let new_best = state.best.record(state.score);
    if new_best {
        state.emit(GameEvent::BestChanged(state.best.value()));
    }
    state.emit(GameEvent::GameOver {
        score: state.score,
        new_best,
    });

    log::info!(
        "Round over: score {} (best {}{})",
        state.score,
        state.best.value(),
        if new_best { ", new record" } else { "" }
    );
    new_best
}

/// Count down the end-of-round display and return to the start screen
pub(crate) fn update_end_screen(state: &mut GameState, dt_ms: f32) {
    if state.phase != GamePhase::Ended {
        return;
    }
    state.end_timer_ms = (state.end_timer_ms - dt_ms).max(0.0);
    if state.end_timer_ms == 0.0 {
        state.phase = GamePhase::PreStart;
        state.emit(GameEvent::StartScreenShown);
    }
}

/// Toggle pause while a round is running
///
/// Returns the new paused flag. Outside of a round this is a no-op.
pub fn toggle_pause(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Running {
        return state.paused;
    }
    state.paused = !state.paused;
    state.emit(GameEvent::PauseChanged(state.paused));
    log::debug!("Paused: {}", state.paused);
    state.paused
}

/// Move the player directly to a pointer position (clamped to the world)
pub fn drag_player_to(state: &mut GameState, pos: Vec2) {
    state.player.pos = pos;
    state.player.clamp_to_world(&state.tuning);
}

/// Switch the player skin if that image loaded
///
/// Returns true if the selection changed.
pub fn select_skin(state: &mut GameState, index: usize, skins: &SkinSet) -> bool {
    if skins.get(index).is_none() {
        log::debug!("Skin {index} unavailable, keeping {}", state.player.skin);
        return false;
    }
    state.player.skin = index;
    true
}

/// Scatter the meteors horizontally
pub fn shuffle(state: &mut GameState) {
    shuffle_obstacles(state);
}
