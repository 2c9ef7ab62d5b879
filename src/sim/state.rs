//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::highscore::BestScore;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen: meteors drift past as decoration, nothing is scored
    PreStart,
    /// Scored play
    Running,
    /// Round just ended; start screen reappears once the end timer elapses
    Ended,
}

/// Notifications for the HUD and audio, emitted on the tick the value changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ScoreChanged(u64),
    LivesChanged(u32),
    BestChanged(u64),
    /// Player was struck at this position
    PlayerHit(Vec2),
    GameOver { score: u64, new_best: bool },
    /// End-of-round delay elapsed
    StartScreenShown,
    PauseChanged(bool),
}

impl GameEvent {
    /// Whether this event marks a freshly set best score that should be persisted
    pub fn is_new_best(&self) -> bool {
        matches!(self, GameEvent::GameOver { new_best: true, .. })
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Sprite centre
    pub pos: Vec2,
    /// Full sprite extents
    pub width: f32,
    pub height: f32,
    /// Remaining immunity (ms); blinks while > 0
    pub invuln_ms: f32,
    /// Selected skin index
    pub skin: usize,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.world_width / 2.0, tuning.world_height * 0.75),
            width: tuning.player_size,
            height: tuning.player_size,
            invuln_ms: 0.0,
            skin: 0,
        }
    }

    /// Collision radius: half of the larger extent
    pub fn radius(&self) -> f32 {
        self.width.max(self.height) / 2.0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_ms > 0.0
    }

    /// Smallest and largest allowed centre positions
    pub fn bounds(&self, tuning: &Tuning) -> (Vec2, Vec2) {
        let min = Vec2::new(
            self.width / 2.0 + PLAYER_MARGIN_SIDE,
            self.height / 2.0 + PLAYER_MARGIN_TOP,
        );
        let max = Vec2::new(
            tuning.world_width - self.width / 2.0 - PLAYER_MARGIN_SIDE,
            tuning.world_height - self.height / 2.0 - PLAYER_MARGIN_BOTTOM,
        );
        (min, max)
    }

    /// Keep the full sprite inside the world
    pub fn clamp_to_world(&mut self, tuning: &Tuning) {
        let (min, max) = self.bounds(tuning);
        self.pos.x = crate::clamp(self.pos.x, min.x, max.x);
        self.pos.y = crate::clamp(self.pos.y, min.y, max.y);
    }
}

/// A falling meteor
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Centre
    pub pos: Vec2,
    /// Diameter
    pub size: f32,
    /// Fall speed per reference frame
    pub speed: f32,
    /// Rotation (radians)
    pub angle: f32,
    /// Angular rate per reference frame
    pub spin: f32,
}

impl Obstacle {
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Whether the top edge has passed the removal line below the world
    pub fn has_exited(&self, world_height: f32) -> bool {
        self.pos.y - self.radius() > world_height + EXIT_MARGIN
    }
}

/// Particle color tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    /// Player hit sparks
    Impact,
    /// Game over burst
    Celebration,
}

impl ParticleColor {
    /// RGB in 0..1
    pub fn rgb(&self) -> [f32; 3] {
        match self {
            ParticleColor::Impact => [1.0, 0.420, 0.420],      // #ff6b6b
            ParticleColor::Celebration => [1.0, 0.820, 0.400], // #ffd166
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    /// Velocity per reference frame
    pub vel: Vec2,
    pub age_ms: f32,
    pub life_ms: f32,
    pub color: ParticleColor,
}

impl Particle {
    /// Strictly past its lifetime; `age == life` still lives
    pub fn is_expired(&self) -> bool {
        self.age_ms > self.life_ms
    }

    /// Fade factor for rendering
    pub fn alpha(&self) -> f32 {
        if self.life_ms <= 0.0 {
            return 0.0;
        }
        crate::clamp(1.0 - self.age_ms / self.life_ms, 0.0, 1.0)
    }
}

/// Complete session state
///
/// Mutated only by [`super::tick`] and the session operations; the renderer
/// takes it by shared reference.
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Orthogonal to `phase`; only set while running
    pub paused: bool,
    pub score: u64,
    pub lives: u32,
    pub best: BestScore,
    /// Current spawn interval (ms), derived from score
    pub spawn_interval_ms: f32,
    /// Time since the last spawn (ms)
    pub spawn_timer_ms: f32,
    /// Remaining end-of-round delay (ms)
    pub end_timer_ms: f32,
    /// Total simulated time (ms), drives the starfield drift
    pub time_ms: f64,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<Particle>,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a session on the start screen with ambient meteors already falling
    pub fn new(seed: u64, tuning: Tuning, best: BestScore) -> Self {
        let mut state = Self {
            player: Player::new(&tuning),
            phase: GamePhase::PreStart,
            paused: false,
            score: 0,
            lives: tuning.initial_lives,
            best,
            spawn_interval_ms: tuning.spawn_interval_base,
            spawn_timer_ms: 0.0,
            end_timer_ms: 0.0,
            time_ms: 0.0,
            obstacles: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        };

        for _ in 0..PREFILL_OBSTACLES {
            super::spawn::spawn_obstacle(&mut state, true);
        }

        state
    }

    /// Whether obstacles score, collide and cost lives right now
    pub fn is_scoring(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Start screen or end-of-round display: meteors are decoration only
    pub fn is_pre_start(&self) -> bool {
        !self.is_scoring()
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_prefills_ambient_meteors() {
        let state = GameState::new(1, Tuning::default(), BestScore::default());
        assert_eq!(state.phase, GamePhase::PreStart);
        assert_eq!(state.obstacles.len(), PREFILL_OBSTACLES);
        // Seeded above the visible area
        assert!(state.obstacles.iter().all(|o| o.pos.y < 0.0));
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_player_radius_uses_larger_extent() {
        let mut player = Player::new(&Tuning::default());
        player.width = 60.0;
        player.height = 90.0;
        assert_eq!(player.radius(), 45.0);
    }

    #[test]
    fn test_obstacle_exit_boundary() {
        let mut obstacle = Obstacle {
            pos: Vec2::new(100.0, 0.0),
            size: 40.0,
            speed: 1.0,
            angle: 0.0,
            spin: 0.0,
        };
        obstacle.pos.y = 960.0 + 200.0 + 20.0;
        assert!(!obstacle.has_exited(960.0));
        obstacle.pos.y += 0.01;
        assert!(obstacle.has_exited(960.0));
    }

    #[test]
    fn test_particle_alpha_fades() {
        let mut particle = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            age_ms: 0.0,
            life_ms: 400.0,
            color: ParticleColor::Impact,
        };
        assert_eq!(particle.alpha(), 1.0);
        particle.age_ms = 100.0;
        assert!((particle.alpha() - 0.75).abs() < 1e-6);
        particle.age_ms = 500.0;
        assert_eq!(particle.alpha(), 0.0);
    }
}
