//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - Seeded RNG only
//! - Elapsed time passed in by the caller
//! - Display side effects surface as drained [`GameEvent`]s

pub mod collision;
pub mod particles;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, player_hit_by};
pub use particles::{emit_burst, update_particles};
pub use session::{drag_player_to, end, reset, select_skin, shuffle, toggle_pause};
pub use spawn::{new_obstacle, spawn_interval, spawn_obstacle};
pub use state::{
    GameEvent, GamePhase, GameState, Obstacle, Particle, ParticleColor, Player,
};
pub use tick::{TickInput, tick};
