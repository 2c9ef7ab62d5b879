//! Frame painting
//!
//! Reads the game state and issues draw calls; never mutates it. Time for
//! animation (the invulnerability blink) is passed in so identical inputs
//! produce identical frames.

use glam::Vec2;

use super::canvas::{Canvas, colors};
use super::shapes::{STAR_COUNT, meteor_outline, star};
use crate::assets::SkinSet;
use crate::settings::Settings;
use crate::sim::{GameState, Obstacle, Particle, Player};

/// Particle dot radius
const PARTICLE_RADIUS: f32 = 3.0;
/// Blink period divisor for the invulnerability flash (ms)
const BLINK_RATE_MS: f64 = 80.0;
/// Steady alpha used instead of blinking when reduced motion is on
const REDUCED_MOTION_ALPHA: f32 = 0.6;

/// Paint one frame
pub fn render(
    canvas: &mut impl Canvas,
    state: &GameState,
    skins: &SkinSet,
    settings: &Settings,
    now_ms: f64,
) {
    let world = Vec2::new(state.tuning.world_width, state.tuning.world_height);
    canvas.clear(world.x, world.y);

    if settings.starfield {
        draw_starfield(canvas, state.time_ms, world);
    }

    for obstacle in &state.obstacles {
        draw_obstacle(canvas, obstacle);
    }

    for particle in &state.particles {
        draw_particle(canvas, particle);
    }
    canvas.set_alpha(1.0);

    draw_player(canvas, &state.player, skins, settings, now_ms);
}

fn draw_starfield(canvas: &mut impl Canvas, time_ms: f64, world: Vec2) {
    for i in 0..STAR_COUNT {
        let (pos, radius) = star(i, time_ms, world);
        canvas.fill_circle(pos, radius, colors::STAR);
    }
}

fn draw_obstacle(canvas: &mut impl Canvas, obstacle: &Obstacle) {
    let size = obstacle.size;
    canvas.radial_glow(
        obstacle.pos,
        size * 0.1,
        size * 0.9,
        colors::METEOR_GLOW,
        colors::TRANSPARENT,
    );
    let outline = meteor_outline(obstacle.pos, size, obstacle.angle);
    canvas.fill_polygon(&outline, colors::METEOR_ROCK);
}

fn draw_particle(canvas: &mut impl Canvas, particle: &Particle) {
    let [r, g, b] = particle.color.rgb();
    canvas.set_alpha(particle.alpha());
    canvas.fill_circle(particle.pos, PARTICLE_RADIUS, [r, g, b, 1.0]);
}

/// Alpha for the player sprite this frame
pub fn player_alpha(player: &Player, settings: &Settings, now_ms: f64) -> f32 {
    if !player.is_invulnerable() {
        return 1.0;
    }
    if settings.reduced_motion {
        return REDUCED_MOTION_ALPHA;
    }
    (0.5 + 0.5 * (now_ms / BLINK_RATE_MS).sin()) as f32
}

fn draw_player(
    canvas: &mut impl Canvas,
    player: &Player,
    skins: &SkinSet,
    settings: &Settings,
    now_ms: f64,
) {
    let alpha = player_alpha(player, settings, now_ms);
    canvas.set_alpha(alpha);

    let shadow_center = player.pos + Vec2::new(0.0, player.height * 0.42);
    let shadow_radii = Vec2::new(player.width * 0.5, player.height * 0.18);
    canvas.fill_ellipse(shadow_center, shadow_radii, colors::PLAYER_SHADOW);

    match skins.get(player.skin) {
        Some(info) => {
            let (w, h) = info.fitted(player.width, player.height);
            canvas.draw_skin(player.skin, player.pos, Vec2::new(w, h));
        }
        None => canvas.fill_circle(player.pos, player.width / 2.0, colors::PLAYER_FALLBACK),
    }

    if alpha != 1.0 {
        canvas.set_alpha(1.0);
    }
}
