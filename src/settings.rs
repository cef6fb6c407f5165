//! Generator settings and tuning
//!
//! Persisted in LocalStorage on the web build; native builds always start
//! from the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What a double-jump capable player can cross in one bound
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpEnvelope {
    /// Horizontal reach between two standing points (px)
    pub max_horizontal: f32,
    /// Height of a single jump (px)
    pub single_jump_height: f32,
    /// Upper bound on the combined double jump (px)
    pub double_jump_cap: f32,
    /// Longest drop still counted as a deliberate move (px)
    pub max_fall: f32,
}

impl Default for JumpEnvelope {
    fn default() -> Self {
        Self {
            max_horizontal: MAX_JUMP_DISTANCE,
            single_jump_height: SINGLE_JUMP_HEIGHT,
            double_jump_cap: DOUBLE_JUMP_CAP,
            max_fall: MAX_FALL_DISTANCE,
        }
    }
}

impl JumpEnvelope {
    /// Highest rise reachable with a double jump
    pub fn max_rise(&self) -> f32 {
        (self.single_jump_height * 2.0).min(self.double_jump_cap)
    }
}

/// Level generator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Reachability envelope used by the validator
    pub envelope: JumpEnvelope,
    /// Generation attempts before falling back (never above the hard bound)
    pub max_attempts: u32,
    /// Idle gap that marks a fresh play session (ms)
    pub idle_reset_ms: f64,
    /// Clearance between placed platforms (px)
    pub placement_margin: f32,
    /// Allow a second pattern to be appended to the first
    pub hybrid_patterns: bool,
    /// Run the randomized transformation pass
    pub transforms: bool,

    // === Debug ===
    /// Show the generation diagnostics panel
    pub show_diagnostics: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            envelope: JumpEnvelope::default(),
            max_attempts: MAX_GENERATION_ATTEMPTS,
            idle_reset_ms: IDLE_RESET_MS,
            placement_margin: PLACEMENT_MARGIN,
            hybrid_patterns: true,
            transforms: true,
            show_diagnostics: false,
        }
    }
}

impl GeneratorSettings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "stick_leap_generator";

    /// Attempt budget actually used by the orchestrator
    pub fn effective_attempts(&self) -> u32 {
        self.max_attempts.clamp(1, MAX_GENERATION_ATTEMPTS)
    }

    /// Margin actually used for placement checks (negative values are ignored)
    pub fn effective_margin(&self) -> f32 {
        self.placement_margin.max(0.0)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded generator settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored generator settings: {}", e),
                }
            }
        }

        log::info!("Using default generator settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Generator settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_jump_is_capped() {
        let envelope = JumpEnvelope::default();
        assert_eq!(envelope.max_rise(), 150.0);

        let low = JumpEnvelope {
            single_jump_height: 50.0,
            ..Default::default()
        };
        assert_eq!(low.max_rise(), 100.0);
    }

    #[test]
    fn test_attempts_never_exceed_hard_bound() {
        let settings = GeneratorSettings {
            max_attempts: 50,
            ..Default::default()
        };
        assert_eq!(settings.effective_attempts(), MAX_GENERATION_ATTEMPTS);

        let settings = GeneratorSettings {
            max_attempts: 0,
            ..Default::default()
        };
        assert_eq!(settings.effective_attempts(), 1);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = GeneratorSettings::from_json(r#"{"max_attempts": 4, "transforms": false}"#)
            .expect("valid settings json");
        assert_eq!(settings.max_attempts, 4);
        assert!(!settings.transforms);
        assert!(settings.hybrid_patterns);
        assert_eq!(settings.envelope, JumpEnvelope::default());
    }

    #[test]
    fn test_json_round_trip_preserves_envelope() {
        let mut settings = GeneratorSettings::default();
        settings.envelope.max_horizontal = 200.0;
        let json = settings.to_json().expect("serializable");
        assert_eq!(GeneratorSettings::from_json(&json).expect("parse"), settings);
    }

    #[test]
    fn test_native_storage_falls_back_to_defaults() {
        let custom = GeneratorSettings {
            transforms: false,
            ..GeneratorSettings::default()
        };
        custom.save();
        assert_eq!(GeneratorSettings::load(), GeneratorSettings::default());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(GeneratorSettings::from_json("{not json").is_err());
    }
}
