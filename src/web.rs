//! wasm-bindgen boundary for the JavaScript game loop
//!
//! The JS side owns physics and rendering. It asks this module for level
//! descriptors as JSON strings and reads the last report for the debug panel.

use wasm_bindgen::prelude::*;

use crate::levelgen::{GenerationReport, GenerationSession, tutorial_level};
use crate::platform;
use crate::settings::GeneratorSettings;

/// Generator handle held by the page for the lifetime of a game
#[wasm_bindgen]
pub struct LevelGenerator {
    session: GenerationSession,
    last_report: Option<GenerationReport>,
}

#[wasm_bindgen]
impl LevelGenerator {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> LevelGenerator {
        let settings = GeneratorSettings::load();
        log::info!("Level generator ready with seed: {}", seed);
        Self {
            session: GenerationSession::new(seed, settings),
            last_report: None,
        }
    }

    /// Level descriptor JSON for `level_number`, clocked by `Date.now()`
    pub fn generate(&mut self, level_number: u32) -> Result<String, JsError> {
        let generated = self.session.generate_level(level_number, platform::now_ms());
        let json = generated.level.to_json()?;
        self.last_report = Some(generated.report);
        Ok(json)
    }

    /// Report for the most recent `generate` call, `"null"` before the first
    pub fn last_report(&self) -> Result<String, JsError> {
        match &self.last_report {
            Some(report) => Ok(report.to_json()?),
            None => Ok("null".to_string()),
        }
    }

    /// Tutorial level descriptor by zero-based index
    pub fn tutorial(&self, index: usize) -> Result<Option<String>, JsError> {
        match tutorial_level(index) {
            Some(level) => Ok(Some(level.to_json()?)),
            None => Ok(None),
        }
    }

    #[wasm_bindgen(js_name = resetSession)]
    pub fn reset_session(&mut self) {
        self.session.reset();
        self.last_report = None;
        log::info!("Generation session reset");
    }

    /// Current generator settings as JSON
    pub fn settings(&self) -> Result<String, JsError> {
        Ok(self.session.settings().to_json()?)
    }

    /// Replace the generator settings and persist them to LocalStorage
    #[wasm_bindgen(js_name = setSettings)]
    pub fn set_settings(&mut self, json: &str) -> Result<(), JsError> {
        let settings = GeneratorSettings::from_json(json)?;
        settings.save();
        self.session.apply_settings(settings);
        Ok(())
    }

    #[wasm_bindgen(getter, js_name = showDiagnostics)]
    pub fn show_diagnostics(&self) -> bool {
        self.session.settings().show_diagnostics
    }
}
