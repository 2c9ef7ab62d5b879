//! Player preferences
//!
//! Persisted separately from the best score, as JSON.

use serde::{Deserialize, Serialize};

use crate::platform::{KeyValueStore, StorageError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sound effects on hit / game over
    pub sfx: bool,
    /// Master volume (0.0 - 1.0)
    pub volume: f32,
    /// Last selected player skin
    pub skin: usize,
    /// Render the drifting starfield
    pub starfield: bool,
    /// Replace the invulnerability blink with a steady fade
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sfx: true,
            volume: 0.8,
            skin: 0,
            starfield: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "space_dodge_settings";

    /// Load settings, falling back to defaults if absent or unreadable
    pub fn load(store: &dyn KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {e}"),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings; failures are logged
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        let result = serde_json::to_string(self)
            .map_err(StorageError::from)
            .and_then(|json| store.set(Self::STORAGE_KEY, &json));
        match result {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {e}"),
        }
    }

    /// Effective output gain for sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.sfx { self.volume.clamp(0.0, 1.0) } else { 0.0 }
    }
}
