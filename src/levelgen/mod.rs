//! Procedural level generation
//!
//! Everything in this module is deterministic for a given seed:
//! - All randomness flows through one seeded [`LevelRng`]
//! - Platforms are kept in placement order
//! - The clock only enters through explicit `now_ms` arguments
//! - No rendering or browser dependencies

pub mod campaign;
pub mod difficulty;
pub mod fallback;
pub mod features;
pub mod geometry;
pub mod layout;
pub mod level;
pub mod patterns;
pub mod platform;
pub mod rng;
pub mod selection;
pub mod session;
pub mod transform;
pub mod traps;
pub mod validator;

pub use campaign::{tutorial_len, tutorial_level};
pub use difficulty::DifficultyParams;
pub use fallback::generate_fallback_level;
pub use features::{InjectedFeatures, RouteKind};
pub use level::Level;
pub use patterns::PatternKind;
pub use platform::{LandingEffect, Motion, Platform, PlatformCategory};
pub use rng::LevelRng;
pub use session::{GeneratedLevel, GenerationPhase, GenerationReport, GenerationSession};
pub use transform::TransformKind;
pub use validator::{CompletabilityCheck, ReachabilityValidator, is_level_completable};
