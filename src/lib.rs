//! Stick Leap - A stickman platformer with procedurally generated levels
//!
//! Core modules:
//! - `levelgen`: Level generation, completability validation, fallback levels
//! - `settings`: Data-driven generator configuration (LocalStorage on web)
//! - `palette`: Category to canvas colour mapping for the renderer
//! - `platform`: Browser/native platform abstraction (clock)
//! - `web`: wasm-bindgen boundary consumed by the JavaScript game loop

pub mod levelgen;
pub mod palette;
pub mod platform;
pub mod settings;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use levelgen::{
    GeneratedLevel, GenerationReport, GenerationSession, Level, Platform, PlatformCategory,
    generate_fallback_level, is_level_completable,
};
pub use settings::{GeneratorSettings, JumpEnvelope};

/// Game configuration constants
pub mod consts {
    /// Logical world size (the canvas scales this to the window)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Every platform is exactly this tall
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    /// Top edge of ground platforms
    pub const GROUND_Y: f32 = 580.0;
    /// Highest top edge any platform may be moved to
    pub const WORLD_TOP_Y: f32 = 40.0;

    /// Player spawn point (top-left of the stickman)
    pub const SPAWN_X: f32 = 50.0;
    pub const SPAWN_Y: f32 = 500.0;
    /// Starting ground slab under the spawn point
    pub const START_PLATFORM_WIDTH: f32 = 120.0;

    /// Generators stop advancing past this x, leaving room for the goal
    pub const PATTERN_X_LIMIT: f32 = 600.0;
    /// Where the first half of a hybrid level hands over to the second pattern
    pub const HYBRID_SPLIT_X: f32 = 380.0;

    /// Hard bound on generation attempts before the fallback level is used
    pub const MAX_GENERATION_ATTEMPTS: u32 = 10;
    /// Wall-clock gap after which a generation counts as a fresh session (ms)
    pub const IDLE_RESET_MS: f64 = 2000.0;
    /// Default clearance kept between freshly placed platforms (px)
    pub const PLACEMENT_MARGIN: f32 = 10.0;

    /// Jump envelope defaults (double-jump capable player)
    pub const MAX_JUMP_DISTANCE: f32 = 180.0;
    pub const SINGLE_JUMP_HEIGHT: f32 = 80.0;
    pub const DOUBLE_JUMP_CAP: f32 = 150.0;
    pub const MAX_FALL_DISTANCE: f32 = 450.0;

    /// Visited-set bucket size for the reachability search (px)
    pub const REACHABILITY_GRID: f32 = 20.0;
}

/// Clamp a value into `[min, max]`, tolerating an inverted range by
/// collapsing onto `min`.
#[inline]
pub fn clamp_span(value: f32, min: f32, max: f32) -> f32 {
    if max < min { min } else { value.clamp(min, max) }
}
