//! Seeded random source for level generation

use rand::distr::weighted::WeightedIndex;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Thin wrapper over a PCG stream with helpers that never panic on
/// degenerate ranges
#[derive(Debug, Clone)]
pub struct LevelRng(Pcg32);

impl LevelRng {
    pub fn new(seed: u64) -> Self {
        Self(Pcg32::seed_from_u64(seed))
    }

    /// Uniform in `[0, 1)`
    pub fn float(&mut self) -> f32 {
        self.0.random::<f32>()
    }

    /// Uniform in `[min, max)`; returns `min` when the range is empty
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            min
        } else {
            min + self.float() * (max - min)
        }
    }

    /// Uniform in `[-spread, spread)`
    pub fn spread(&mut self, spread: f32) -> f32 {
        self.range(-spread, spread)
    }

    pub fn chance(&mut self, probability: f32) -> bool {
        self.float() < probability
    }

    /// +1.0 or -1.0 with equal odds
    pub fn sign(&mut self) -> f32 {
        if self.chance(0.5) { 1.0 } else { -1.0 }
    }

    /// Uniform index in `[0, len)`; 0 for empty collections
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            self.0.random_range(0..len)
        }
    }

    /// Index drawn proportionally to `weights`; `None` when every weight is zero
    pub fn weighted_index(&mut self, weights: &[f32]) -> Option<usize> {
        let dist = WeightedIndex::new(weights.iter().map(|w| w.max(0.0))).ok()?;
        Some(self.0.sample(&dist))
    }
}
