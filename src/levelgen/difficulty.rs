//! Difficulty scaling by level number
//!
//! Every knob is a pure function of the level number and is clamped to a
//! floor or ceiling so late levels stay playable.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Topmost y any generated platform may occupy, however hard the level
pub const MIN_CEILING_Y: f32 = 80.0;
/// Cap on the per-level platform budget
pub const MAX_PLATFORM_BUDGET: usize = 16;

/// Generation parameters derived from the level number
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyParams {
    /// Typical horizontal step between consecutive platforms
    pub base_gap: f32,
    /// How far above the ground platforms may climb
    pub max_platform_height: f32,
    /// Base probability of a death trap next to a platform
    pub death_trap_chance: f32,
    /// Random extra width on top of the minimum size
    pub size_variation: f32,
    pub min_platform_size: f32,
    /// Platform budget for the pattern generators
    pub max_platforms: usize,
}

impl DifficultyParams {
    pub fn for_level(level_number: u32) -> Self {
        let n = level_number.max(1);
        let nf = n as f32;
        Self {
            base_gap: 70.0 + (nf * 8.0).min(100.0),
            max_platform_height: 120.0 + (nf * 20.0).min(450.0),
            death_trap_chance: (nf * 0.06).min(0.35),
            size_variation: (70.0 - nf * 2.0).max(30.0),
            min_platform_size: (90.0 - nf * 3.0).max(40.0),
            max_platforms: (6 + (n / 2) as usize).min(MAX_PLATFORM_BUDGET),
        }
    }

    /// Highest top edge a pattern may place a platform at
    pub fn ceiling_y(&self) -> f32 {
        (GROUND_Y - self.max_platform_height).max(MIN_CEILING_Y)
    }
}

/// Top edge of the generated goal platform; rises slowly with level
pub fn goal_height(level_number: u32) -> f32 {
    (340.0 - level_number.max(1) as f32 * 6.0).max(100.0)
}

/// Probability that a second pattern is appended (20% rising to 50%)
pub fn hybrid_chance(level_number: u32) -> f32 {
    (0.2 + level_number.saturating_sub(1) as f32 * 0.03).min(0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_level_one_values() {
        let params = DifficultyParams::for_level(1);
        assert_eq!(params.base_gap, 78.0);
        assert_eq!(params.min_platform_size, 87.0);
        assert_eq!(params.max_platforms, 6);
        assert_eq!(params.ceiling_y(), 440.0);
        assert_eq!(goal_height(1), 334.0);
    }

    #[test]
    fn test_level_zero_is_treated_as_one() {
        assert_eq!(DifficultyParams::for_level(0), DifficultyParams::for_level(1));
    }

    #[test]
    fn test_clamps_hold_far_out() {
        let params = DifficultyParams::for_level(1000);
        assert_eq!(params.base_gap, 170.0);
        assert_eq!(params.death_trap_chance, 0.35);
        assert_eq!(params.size_variation, 30.0);
        assert_eq!(params.min_platform_size, 40.0);
        assert_eq!(params.max_platforms, MAX_PLATFORM_BUDGET);
        assert_eq!(params.ceiling_y(), MIN_CEILING_Y);
        assert_eq!(goal_height(1000), 100.0);
        assert_eq!(hybrid_chance(1000), 0.5);
        assert_eq!(hybrid_chance(1), 0.2);
    }

    proptest! {
        #[test]
        fn difficulty_is_monotonic(a in 1u32..200, b in 1u32..200) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let easy = DifficultyParams::for_level(lo);
            let hard = DifficultyParams::for_level(hi);
            prop_assert!(easy.base_gap <= hard.base_gap);
            prop_assert!(easy.death_trap_chance <= hard.death_trap_chance);
            prop_assert!(easy.min_platform_size >= hard.min_platform_size);
            prop_assert!(easy.size_variation >= hard.size_variation);
            prop_assert!(easy.ceiling_y() >= hard.ceiling_y());
            prop_assert!(goal_height(lo) >= goal_height(hi));
            prop_assert!(hybrid_chance(lo) <= hybrid_chance(hi));
        }
    }
}
