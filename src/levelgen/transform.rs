//! Randomised post-processing of a finished layout
//!
//! Every change is tentative: it is clamped to the world, checked against the
//! rest of the layout, and dropped if it would overlap anything.

use serde::{Deserialize, Serialize};

use super::layout::Layout;
use super::rng::LevelRng;

pub const VERTICAL_SHUFFLE: f32 = 80.0;
pub const HORIZONTAL_JITTER: f32 = 60.0;
pub const SIZE_VARIATION: f32 = 50.0;
pub const MIN_TRANSFORMED_WIDTH: f32 = 35.0;
pub const MAX_TRANSFORMED_WIDTH: f32 = 130.0;
pub const WAVE_AMPLITUDE: f32 = 40.0;
pub const WAVE_FREQUENCY: f32 = 0.8;

pub const MICRO_JITTER: f32 = 20.0;
pub const MICRO_JITTER_CHANCE: f32 = 0.3;

/// The four whole-layout transforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    VerticalShuffle,
    HorizontalJitter,
    SizeVariation,
    WaveWarp,
}

impl TransformKind {
    pub const ALL: [TransformKind; 4] = [
        TransformKind::VerticalShuffle,
        TransformKind::HorizontalJitter,
        TransformKind::SizeVariation,
        TransformKind::WaveWarp,
    ];

    pub fn random(rng: &mut LevelRng) -> Self {
        Self::ALL[rng.index(Self::ALL.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransformKind::VerticalShuffle => "vertical_shuffle",
            TransformKind::HorizontalJitter => "horizontal_jitter",
            TransformKind::SizeVariation => "size_variation",
            TransformKind::WaveWarp => "wave_warp",
        }
    }
}

/// Apply `kind` to every non-anchor platform, each with probability
/// `shuffle_factor`. Returns how many platforms actually changed.
pub fn apply_transform(
    kind: TransformKind,
    shuffle_factor: f32,
    rng: &mut LevelRng,
    layout: &mut Layout,
) -> usize {
    let shuffle_factor = shuffle_factor.clamp(0.0, 1.0);
    let mut changed = 0;

    for index in 0..layout.len() {
        if layout.is_anchor(index) || !rng.chance(shuffle_factor) {
            continue;
        }
        let Some(mut candidate) = layout.get(index).cloned() else {
            continue;
        };

        match kind {
            TransformKind::VerticalShuffle => candidate.shift(0.0, rng.spread(VERTICAL_SHUFFLE)),
            TransformKind::HorizontalJitter => candidate.shift(rng.spread(HORIZONTAL_JITTER), 0.0),
            TransformKind::SizeVariation => {
                if !candidate.category.is_resizable() {
                    continue;
                }
                candidate.width = (candidate.width + rng.spread(SIZE_VARIATION))
                    .clamp(MIN_TRANSFORMED_WIDTH, MAX_TRANSFORMED_WIDTH);
            }
            TransformKind::WaveWarp => {
                let offset = (index as f32 * WAVE_FREQUENCY).sin() * WAVE_AMPLITUDE * shuffle_factor;
                candidate.shift(0.0, offset);
            }
        }
        candidate.clamp_to_world();

        if layout.try_replace(index, candidate) {
            changed += 1;
        }
    }
    changed
}

/// Small ±20 px nudges on both axes for 30% of the non-anchor platforms
pub fn apply_micro_jitter(rng: &mut LevelRng, layout: &mut Layout) -> usize {
    let mut changed = 0;
    for index in 0..layout.len() {
        if layout.is_anchor(index) || !rng.chance(MICRO_JITTER_CHANCE) {
            continue;
        }
        let Some(mut candidate) = layout.get(index).cloned() else {
            continue;
        };
        candidate.shift(rng.spread(MICRO_JITTER), rng.spread(MICRO_JITTER));
        candidate.clamp_to_world();

        if layout.try_replace(index, candidate) {
            changed += 1;
        }
    }
    changed
}
