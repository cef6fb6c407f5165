//! Descent into a valley, then a climb out

use glam::Vec2;

use super::{GenerationContext, MAX_STEP_RISE, PatternGenerator};
use crate::levelgen::layout::Layout;
use crate::levelgen::platform::{Platform, PlatformCategory};
use crate::levelgen::rng::LevelRng;
use crate::levelgen::traps::{TrapRule, TrapSpot, place_near};

const TRAPS: TrapRule = TrapRule::new(0.7, 2);

/// V-shaped run. The first platform is a raised rim; the midpoint shifts by
/// up to 15% of the run so the valley is asymmetric, and traps gather at the
/// bottom.
pub struct Valley;

impl PatternGenerator for Valley {
    fn generate(&self, ctx: &GenerationContext, rng: &mut LevelRng, layout: &mut Layout) {
        let depth = 80.0 + ctx.shuffle() * 100.0;
        let asymmetry = rng.spread(0.15);
        // Progress is measured against how many platforms actually fit
        let step = ctx.gap(rng, 0.0, 45.0)
            + ctx.difficulty.min_platform_size
            + ctx.difficulty.size_variation / 2.0;
        let expected = ((ctx.x_limit - ctx.origin.x) / step)
            .ceil()
            .clamp(1.0, ctx.max_platforms.max(1) as f32);

        let mut cursor = ctx.origin;
        for i in 0..ctx.max_platforms {
            if cursor.x >= ctx.x_limit {
                break;
            }

            let gap = ctx.gap(rng, 35.0, 45.0);
            let progress = i as f32 / expected + asymmetry;
            let y = if i == 0 {
                cursor.y - depth.min(MAX_STEP_RISE)
            } else if progress < 0.5 {
                // Steepest a quarter of the way in
                let descent = 1.0 - (progress - 0.25).abs() * 2.0;
                cursor.y + (20.0 + rng.range(0.0, 25.0)) * (1.0 + descent)
            } else {
                let ascent = (progress - 0.5) * 2.0;
                cursor.y - ((40.0 + rng.range(0.0, 40.0)) * (1.0 + ascent * 0.5)).min(MAX_STEP_RISE)
            };

            let width = ctx.platform_width(rng);
            let candidate = Platform::new(
                cursor.x + gap,
                ctx.clamp_y(y),
                width,
                PlatformCategory::Normal,
            );
            let Some(placed) = layout.place(candidate) else {
                cursor.x += 40.0;
                continue;
            };
            cursor = Vec2::new(placed.right(), placed.y);

            let at_bottom = progress > 0.3 && progress < 0.7;
            if at_bottom && TRAPS.roll(ctx.level_number, &ctx.difficulty, rng) {
                let spot = TrapSpot::Under(rng.range(0.0, 0.7));
                place_near(layout, &placed, spot, rng.range(12.0, 20.0));
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
    fn test_valley_dips_below_its_rim() {
        let mut dipped = 0;
        for seed in 0..20 {
            let mut rng = LevelRng::new(seed);
            let ctx = GenerationContext::new(16, StyleParams::roll(&mut rng));
            let mut layout = Layout::new(PLACEMENT_MARGIN);
            Valley.generate(&ctx, &mut rng, &mut layout);

            let path = layout.of_category(PlatformCategory::Normal);
            let rim = path[0].y;
            if path.iter().skip(1).any(|p| p.y > rim) {
                dipped += 1;
            }
        }
        assert!(dipped > 10);
    }
}
