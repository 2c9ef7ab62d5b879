//! Space Dodge - a portrait arcade game about dodging meteors
//!
//! Core modules:
//! - `sim`: Simulation (spawning, movement, collisions, session flow)
//! - `renderer`: Canvas-agnostic frame painting
//! - `platform`: Browser/native platform abstraction (storage)
//! - `tuning`: Data-driven game balance
//! - `assets`: Player skin table

pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscore;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use assets::{SkinInfo, SkinSet};
pub use highscore::BestScore;
pub use settings::Settings;
pub use tuning::Tuning;

use rand::Rng;

/// Game configuration constants
///
/// These are tuned feel parameters that are not exposed through [`Tuning`].
pub mod consts {
    /// Reference frame duration (ms) that per-frame speeds are expressed in
    pub const REFERENCE_FRAME_MS: f32 = 16.0;

    /// Player movement per reference frame
    pub const PLAYER_MOVE_SPEED: f32 = 8.0;
    /// Keep-out margins for the player sprite. The top margin reserves HUD space.
    pub const PLAYER_MARGIN_SIDE: f32 = 8.0;
    pub const PLAYER_MARGIN_TOP: f32 = 24.0;
    pub const PLAYER_MARGIN_BOTTOM: f32 = 8.0;

    /// Fraction of the summed radii that counts as a hit
    pub const COLLISION_LENIENCY: f32 = 0.95;
    /// How far below the world an obstacle's top must travel before removal
    pub const EXIT_MARGIN: f32 = 200.0;
    /// Obstacle speed gain per point of score
    pub const SCORE_SPEEDUP: f32 = 0.002;
    /// Spawn interval reduction (ms) per point of score
    pub const SPAWN_INTERVAL_PER_POINT: f32 = 2.0;

    /// Downward acceleration applied to particles per reference frame
    pub const PARTICLE_GRAVITY: f32 = 0.06;
    pub const IMPACT_BURST: usize = 20;
    pub const CELEBRATION_BURST: usize = 40;

    /// Delay between game over and the start screen reappearing
    pub const END_SCREEN_DELAY_MS: f32 = 300.0;
    /// Meteors seeded on the start screen
    pub const PREFILL_OBSTACLES: usize = 10;
}

/// Uniform random value in `[min, max)`
///
/// Degenerate or inverted ranges are tolerated: `min == max` yields `min`.
#[inline]
pub fn rand_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

/// Clamp `v` into `[lo, hi]`
///
/// Unlike [`f32::clamp`] this never panics; if `lo > hi` the lower bound wins.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.min(hi).max(lo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_rand_range_bounds() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let v = rand_range(&mut rng, 28.0, 110.0);
            assert!((28.0..110.0).contains(&v));
        }
        assert_eq!(rand_range(&mut rng, 5.0, 5.0), 5.0);
    }

    #[test]
    fn test_clamp_inverted_range() {
        assert_eq!(clamp(3.0, 0.0, 10.0), 3.0);
        assert_eq!(clamp(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(30.0, 0.0, 10.0), 10.0);
        // lo wins when the range is empty
        assert_eq!(clamp(5.0, 8.0, 2.0), 8.0);
    }
}
