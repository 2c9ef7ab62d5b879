//! Best score tracking
//!
//! A single integer persisted as a decimal string under `sd_best`.

use serde::{Deserialize, Serialize};

use crate::platform::KeyValueStore;

/// The best score seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    value: u64,
}

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "sd_best";

    pub fn new(value: u64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Record a finished round's score
    ///
    /// Returns true if it beat the previous best. Ties don't count.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.value {
            self.value = score;
            return true;
        }
        false
    }

    /// Parse a stored value, treating anything unusable as zero
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(value) = raw.parse::<u64>() {
            return Self::new(value);
        }
        // Tolerate "12.0" style values written by other clients
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Self::new(v as u64),
            _ => {
                log::warn!("Unreadable best score {raw:?}, starting from 0");
                Self::default()
            }
        }
    }

    /// Load from storage, defaulting to zero if absent or corrupt
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(raw) => {
                let best = Self::parse(&raw);
                log::info!("Loaded best score {}", best.value);
                best
            }
            None => {
                log::info!("No best score found, starting fresh");
                Self::default()
            }
        }
    }

    /// Persist to storage; failures are logged and otherwise ignored
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match store.set(Self::STORAGE_KEY, &self.value.to_string()) {
            Ok(()) => log::info!("Best score saved ({})", self.value),
            Err(e) => log::warn!("Failed to save best score: {e}"),
        }
    }
}
