//! Stepped pyramid

use super::{GenerationContext, MAX_STEP_GAP, PatternGenerator};
use crate::levelgen::layout::Layout;
use crate::levelgen::platform::{Platform, PlatformCategory};
use crate::levelgen::rng::LevelRng;
use crate::levelgen::traps::{TrapRule, TrapSpot, place_near};

/// Platforms on the bottom tier; each tier up has one fewer, down to one
const BASE_TIER_PLATFORMS: usize = 3;

/// Tiers of shrinking platform count and width. Each tier starts further
/// right so the peak ends near the pattern limit; the sub-style picks an
/// even or a jittered offset. Traps get likelier the higher the tier.
pub struct Pyramid;

impl Pyramid {
    fn trap_rule(tier: usize) -> TrapRule {
        TrapRule::new(0.2 + 0.2 * tier as f32, 2)
    }
}

impl PatternGenerator for Pyramid {
    fn generate(&self, ctx: &GenerationContext, rng: &mut LevelRng, layout: &mut Layout) {
        let shuffle = ctx.shuffle();
        let footprint = 100.0 + shuffle * 60.0;
        let centred = ctx.variant(2) == 0;
        let tiers = 3 + (shuffle * 2.0) as usize;
        let tier_offset = (ctx.x_limit - ctx.origin.x).max(0.0) / tiers as f32;

        let mut y = ctx.clamp_y(ctx.origin.y - 60.0);
        let mut placed_count = 0;

        for tier in 0..tiers {
            if placed_count >= ctx.max_platforms {
                break;
            }
            let offset = if centred {
                tier_offset
            } else {
                tier_offset * rng.range(0.7, 1.1)
            };
            let mut cursor_x = ctx.origin.x + tier as f32 * offset;
            if cursor_x >= ctx.x_limit {
                break;
            }

            let per_tier = BASE_TIER_PLATFORMS.saturating_sub(tier).max(1);
            let gap = (footprint / (per_tier + 1) as f32).min(MAX_STEP_GAP);
            let width = (ctx.difficulty.min_platform_size - tier as f32 * 10.0).max(30.0);

            for _ in 0..per_tier {
                if cursor_x >= ctx.x_limit || placed_count >= ctx.max_platforms {
                    break;
                }
                let candidate = Platform::new(
                    cursor_x + gap + rng.spread(10.0),
                    y,
                    width,
                    PlatformCategory::Normal,
                );
                let Some(placed) = layout.place(candidate) else {
                    cursor_x += 40.0;
                    continue;
                };
                cursor_x = placed.right();
                placed_count += 1;

                if Self::trap_rule(tier).roll(ctx.level_number, &ctx.difficulty, rng) {
                    place_near(layout, &placed, TrapSpot::Under(0.5), 10.0);
                }
            }

            y = ctx.clamp_y(y - 60.0 - rng.range(0.0, 40.0));
        }
    }
}
