//! Audio system using Web Audio API
//!
//! Short procedural beeps, no sound files.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Meteor struck the player
    Hit,
    /// Round over without a record
    GameOver,
    /// Round over with a new best
    HighScore,
}

impl SoundEffect {
    /// Sound to play for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PlayerHit(_) => Some(SoundEffect::Hit),
            GameEvent::GameOver { new_best: true, .. } => Some(SoundEffect::HighScore),
            GameEvent::GameOver { new_best: false, .. } => Some(SoundEffect::GameOver),
            _ => None,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: settings.effective_volume(),
        }
    }

    /// Resume audio context (required after user gesture on mobile)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        match effect {
            SoundEffect::Hit => self.beep(ctx, 180.0, 0.04, 0.0),
            SoundEffect::GameOver => {
                for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                    self.beep(ctx, *freq, 0.3, i as f64 * 0.2);
                }
            }
            SoundEffect::HighScore => {
                for (i, freq) in [500.0, 600.0, 700.0, 800.0, 1000.0].iter().enumerate() {
                    self.beep(ctx, *freq, 0.25, i as f64 * 0.08);
                }
            }
        }
    }

    /// Create an oscillator routed through a gain node
    fn create_osc(&self, ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Sine blip with a fast attack and exponential release
    fn beep(&self, ctx: &AudioContext, freq: f32, duration: f64, delay: f64) {
        let Some((osc, gain)) = self.create_osc(ctx, freq) else {
            return;
        };
        let t = ctx.current_time() + delay;
        let peak = (0.04 * self.volume).max(0.0002);

        gain.gain().set_value_at_time(0.0001, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(peak, t + 0.01)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.0001, t + duration)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + duration + 0.02).ok();
    }
}
