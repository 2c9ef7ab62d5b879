//! Data-driven game balance
//!
//! Every value here can be overridden from a JSON document; missing fields
//! keep their defaults.

use serde::{Deserialize, Serialize};

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Logical world width (simulation units, independent of display pixels)
    pub world_width: f32,
    /// Logical world height
    pub world_height: f32,
    /// Player sprite extents (square)
    pub player_size: f32,

    /// Meteor diameter range
    pub meteor_min_size: f32,
    pub meteor_max_size: f32,
    /// Meteor fall speed range, units per reference frame
    pub meteor_min_speed: f32,
    pub meteor_max_speed: f32,
    /// Maximum absolute spin, radians per reference frame
    pub meteor_max_spin: f32,
    /// Pre-start meteors spawn at most this far above the top edge
    pub prestart_top_gap: f32,

    /// Spawn interval at score zero (ms)
    pub spawn_interval_base: f32,
    /// Spawn interval never drops below this (ms)
    pub spawn_interval_floor: f32,

    pub initial_lives: u32,
    /// Immunity after a hit (ms)
    pub invulnerability_ms: f32,

    /// Particle lifetime range (ms)
    pub particle_min_life: f32,
    pub particle_max_life: f32,
    /// Horizontal particle velocity is sampled in `[-particle_spread, particle_spread)`
    pub particle_spread: f32,
    /// Vertical particle velocity range (negative is up)
    pub particle_min_vy: f32,
    pub particle_max_vy: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: 540.0,
            world_height: 960.0,
            player_size: 80.0,

            meteor_min_size: 28.0,
            meteor_max_size: 110.0,
            meteor_min_speed: 1.2,
            meteor_max_speed: 5.2,
            meteor_max_spin: 0.02,
            prestart_top_gap: 40.0,

            spawn_interval_base: 700.0,
            spawn_interval_floor: 160.0,

            initial_lives: 3,
            invulnerability_ms: 1200.0,

            particle_min_life: 400.0,
            particle_max_life: 1000.0,
            particle_spread: 3.0,
            particle_min_vy: -5.0,
            particle_max_vy: 1.0,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::normalized)
    }

    /// Parse overrides, falling back to defaults if the document is invalid
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Invalid tuning JSON ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Repair inverted ranges so sampling never runs backwards
    pub fn normalized(mut self) -> Self {
        fn order(lo: &mut f32, hi: &mut f32) {
            if *lo > *hi {
                std::mem::swap(lo, hi);
            }
        }
        order(&mut self.meteor_min_size, &mut self.meteor_max_size);
        order(&mut self.meteor_min_speed, &mut self.meteor_max_speed);
        order(&mut self.particle_min_life, &mut self.particle_max_life);
        order(&mut self.particle_min_vy, &mut self.particle_max_vy);
        self.meteor_max_spin = self.meteor_max_spin.abs();
        self.spawn_interval_floor = self.spawn_interval_floor.max(0.0);
        self.spawn_interval_base = self.spawn_interval_base.max(self.spawn_interval_floor);
        self.initial_lives = self.initial_lives.max(1);
        self
    }

    /// Centre of the world
    pub fn world_center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.world_width / 2.0, self.world_height / 2.0)
    }
}
