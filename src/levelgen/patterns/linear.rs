//! Monotonic ascent

use glam::Vec2;

use super::{GenerationContext, MAX_STEP_RISE, PatternGenerator};
use crate::levelgen::layout::Layout;
use crate::levelgen::platform::{Platform, PlatformCategory};
use crate::levelgen::rng::LevelRng;
use crate::levelgen::traps::{TrapRule, TrapSpot, place_near};

const TRAPS: TrapRule = TrapRule::new(0.4, 1);

/// Each step climbs; the sub-style picks a steady, accelerating or
/// alternating big/small climb.
pub struct Linear;

impl PatternGenerator for Linear {
    fn generate(&self, ctx: &GenerationContext, rng: &mut LevelRng, layout: &mut Layout) {
        let shuffle = ctx.shuffle();
        let level = ctx.level_number as f32;
        let climb_style = ctx.variant(3);
        // 70%..130% of the nominal climb, fixed for the whole run
        let step_scale = 0.7 + rng.float() * 0.6;
        let width_variation = ctx.difficulty.size_variation * (0.5 + shuffle * 0.5);

        let mut cursor = ctx.origin;
        for i in 0..ctx.max_platforms {
            if cursor.x >= ctx.x_limit {
                break;
            }

            let gap = ctx.gap(rng, shuffle * 60.0, 40.0);
            let rise = match climb_style {
                0 => 40.0 + rng.range(0.0, 40.0) + level * 5.0,
                1 => 30.0 + i as f32 * 10.0 + rng.range(0.0, 30.0) + level * 4.0,
                _ => {
                    let base = if i % 2 == 0 { 60.0 } else { 25.0 };
                    base + rng.range(0.0, 35.0) + level * 5.0
                }
            };
            let rise = (rise * step_scale).min(MAX_STEP_RISE);
            let width = ctx.difficulty.min_platform_size + rng.range(0.0, width_variation);

            let candidate = Platform::new(
                cursor.x + gap,
                ctx.clamp_y(cursor.y - rise),
                width,
                PlatformCategory::Normal,
            );
            let Some(placed) = layout.place(candidate) else {
                cursor.x += 40.0;
                continue;
            };
            cursor = Vec2::new(placed.right(), placed.y);

            if TRAPS.roll(ctx.level_number, &ctx.difficulty, rng) {
                let roll = rng.float();
                let spot = if roll < 0.4 {
                    TrapSpot::After
                } else if roll < 0.7 {
                    TrapSpot::Under(0.3)
                } else {
                    TrapSpot::Before
                };
                place_near(layout, &placed, spot, rng.range(15.0, 25.0));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::levelgen::patterns::StyleParams;

    #[test]
    fn test_linear_climbs() {
        for seed in 0..20 {
            let mut rng = LevelRng::new(seed);
            let ctx = GenerationContext::new(4, StyleParams::roll(&mut rng));
            let mut layout = Layout::new(PLACEMENT_MARGIN);
            Linear.generate(&ctx, &mut rng, &mut layout);

            let path = layout.of_category(PlatformCategory::Normal);
            assert!(path.len() >= 2);
            for pair in path.windows(2) {
                assert!(pair[1].y <= pair[0].y, "descended: {pair:?}");
                assert!(pair[1].x > pair[0].right());
            }
        }
    }
}
