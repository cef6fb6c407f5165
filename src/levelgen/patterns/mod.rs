//! Pattern generators
//!
//! Each pattern lays out a chain of platforms following one geometric motif.
//! All of them share the same contract: start near `ctx.origin`, never place
//! more than `ctx.max_platforms` main-path platforms, stop once the cursor
//! passes `ctx.x_limit`, and write only through the [`Layout`] so placement
//! conflicts are nudged or skipped.

mod branching;
mod linear;
mod pyramid;
mod scattered;
mod spiral;
mod tower;
mod valley;
mod zigzag;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use branching::Branching;
pub use linear::Linear;
pub use pyramid::Pyramid;
pub use scattered::Scattered;
pub use spiral::Spiral;
pub use tower::Tower;
pub use valley::Valley;
pub use zigzag::Zigzag;

use super::difficulty::DifficultyParams;
use super::layout::Layout;
use super::rng::LevelRng;
use crate::clamp_span;
use crate::consts::*;

/// Lowest top edge a pattern platform may sit at (the ground is below)
pub const PATTERN_FLOOR_Y: f32 = 550.0;
/// Widest edge-to-edge step a pattern takes along its main path
pub const MAX_STEP_GAP: f32 = 125.0;
/// Steepest climb between consecutive main-path platforms
pub const MAX_STEP_RISE: f32 = 130.0;

/// Per-generation randomisation knobs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleParams {
    /// Randomisation intensity in `[0, 1]`
    pub shuffle_factor: f32,
    /// Discrete variant; each pattern reduces it modulo its own variant count
    pub sub_style: u8,
}

impl StyleParams {
    pub fn roll(rng: &mut LevelRng) -> Self {
        Self {
            shuffle_factor: rng.float(),
            sub_style: rng.index(u8::MAX as usize) as u8,
        }
    }
}

/// Everything a pattern needs to lay out its platforms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationContext {
    pub level_number: u32,
    /// Top-right corner of the platform the pattern grows from
    pub origin: Vec2,
    /// Patterns stop advancing once their cursor passes this x
    pub x_limit: f32,
    /// Highest allowed top edge
    pub ceiling_y: f32,
    /// Main-path platform budget
    pub max_platforms: usize,
    pub difficulty: DifficultyParams,
    pub style: StyleParams,
}

impl GenerationContext {
    pub fn new(level_number: u32, style: StyleParams) -> Self {
        let difficulty = DifficultyParams::for_level(level_number);
        Self {
            level_number: level_number.max(1),
            origin: Vec2::new(START_PLATFORM_WIDTH, GROUND_Y),
            x_limit: PATTERN_X_LIMIT,
            ceiling_y: difficulty.ceiling_y(),
            max_platforms: difficulty.max_platforms,
            difficulty,
            style,
        }
    }

    pub fn shuffle(&self) -> f32 {
        self.style.shuffle_factor.clamp(0.0, 1.0)
    }

    /// Sub-style reduced to one of `variants` choices
    pub fn variant(&self, variants: u8) -> u8 {
        if variants == 0 { 0 } else { self.style.sub_style % variants }
    }

    /// Keep a top edge between the ceiling and the pattern floor
    pub fn clamp_y(&self, y: f32) -> f32 {
        clamp_span(y, self.ceiling_y, PATTERN_FLOOR_Y)
    }

    /// Standard platform width for this level
    pub fn platform_width(&self, rng: &mut LevelRng) -> f32 {
        self.difficulty.min_platform_size + rng.range(0.0, self.difficulty.size_variation)
    }

    /// Edge-to-edge step: the level's gap with up to `jitter` either way,
    /// kept within `[floor, MAX_STEP_GAP]`
    pub fn gap(&self, rng: &mut LevelRng, jitter: f32, floor: f32) -> f32 {
        clamp_span(
            self.difficulty.base_gap * 0.75 + rng.spread(jitter / 2.0),
            floor,
            MAX_STEP_GAP,
        )
    }
}

/// A named geometric layout algorithm
pub trait PatternGenerator {
    fn generate(&self, ctx: &GenerationContext, rng: &mut LevelRng, layout: &mut Layout);
}

/// The eight patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Linear,
    Zigzag,
    Tower,
    Valley,
    Scattered,
    Spiral,
    Branching,
    Pyramid,
}

impl PatternKind {
    pub const ALL: [PatternKind; 8] = [
        PatternKind::Linear,
        PatternKind::Zigzag,
        PatternKind::Tower,
        PatternKind::Valley,
        PatternKind::Scattered,
        PatternKind::Spiral,
        PatternKind::Branching,
        PatternKind::Pyramid,
    ];

    /// Relative selection weight
    pub fn weight(&self) -> f32 {
        match self {
            PatternKind::Linear => 1.0,
            PatternKind::Zigzag => 1.5,
            PatternKind::Tower => 1.2,
            PatternKind::Valley => 1.0,
            PatternKind::Scattered => 0.8,
            PatternKind::Spiral => 1.3,
            PatternKind::Branching => 1.1,
            PatternKind::Pyramid => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Linear => "linear",
            PatternKind::Zigzag => "zigzag",
            PatternKind::Tower => "tower",
            PatternKind::Valley => "valley",
            PatternKind::Scattered => "scattered",
            PatternKind::Spiral => "spiral",
            PatternKind::Branching => "branching",
            PatternKind::Pyramid => "pyramid",
        }
    }

    pub fn generator(&self) -> &'static dyn PatternGenerator {
        match self {
            PatternKind::Linear => &Linear,
            PatternKind::Zigzag => &Zigzag,
            PatternKind::Tower => &Tower,
            PatternKind::Valley => &Valley,
            PatternKind::Scattered => &Scattered,
            PatternKind::Spiral => &Spiral,
            PatternKind::Branching => &Branching,
            PatternKind::Pyramid => &Pyramid,
        }
    }

    pub fn generate(&self, ctx: &GenerationContext, rng: &mut LevelRng, layout: &mut Layout) {
        self.generator().generate(ctx, rng, layout);
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
