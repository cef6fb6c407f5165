//! Alternating ascent and descent

use glam::Vec2;

use super::{GenerationContext, PATTERN_FLOOR_Y, PatternGenerator};
use crate::levelgen::layout::Layout;
use crate::levelgen::platform::{Platform, PlatformCategory};
use crate::levelgen::rng::LevelRng;
use crate::levelgen::traps::{TrapRule, TrapSpot, place_near};

const TRAPS: TrapRule = TrapRule::new(0.6, 2);

/// Flips between climbing and dropping every `frequency` platforms.
/// Amplitude grows with the shuffle factor.
pub struct Zigzag;

impl PatternGenerator for Zigzag {
    fn generate(&self, ctx: &GenerationContext, rng: &mut LevelRng, layout: &mut Layout) {
        let amplitude = 50.0 + ctx.shuffle() * 40.0;
        let frequency = if ctx.variant(2) == 0 { 2 } else { 3 };
        let mut going_up = rng.chance(0.5);

        let mut cursor = ctx.origin;
        for i in 0..ctx.max_platforms {
            if cursor.x >= ctx.x_limit {
                break;
            }
            if i > 0 && i % frequency == 0 {
                going_up = !going_up;
            }

            let gap = ctx.gap(rng, 30.0, 50.0);
            let mut y = if going_up {
                cursor.y - amplitude - rng.range(0.0, 40.0)
            } else {
                cursor.y + amplitude * 0.7 + rng.range(0.0, 30.0)
            };
            // Bounce off the ceiling and the floor
            if y <= ctx.ceiling_y {
                going_up = false;
            } else if y >= PATTERN_FLOOR_Y {
                going_up = true;
            }
            y = ctx.clamp_y(y);

            let width = ctx.platform_width(rng);
            let candidate = Platform::new(cursor.x + gap, y, width, PlatformCategory::Normal);
            let Some(placed) = layout.place(candidate) else {
                cursor.x += 40.0;
                continue;
            };
            cursor = Vec2::new(placed.right(), placed.y);

            if TRAPS.roll(ctx.level_number, &ctx.difficulty, rng) {
                let spot = if rng.chance(0.5) {
                    TrapSpot::Before
                } else {
                    TrapSpot::Under(0.9)
                };
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
    fn test_zigzag_changes_direction() {
        let mut saw_turn = false;
        for seed in 0..20 {
            let mut rng = LevelRng::new(seed);
            let ctx = GenerationContext::new(12, StyleParams::roll(&mut rng));
            let mut layout = Layout::new(PLACEMENT_MARGIN);
            Zigzag.generate(&ctx, &mut rng, &mut layout);

            let ys: Vec<f32> = layout
                .of_category(PlatformCategory::Normal)
                .iter()
                .map(|p| p.y)
                .collect();
            let ups = ys.windows(2).any(|w| w[1] < w[0]);
            let downs = ys.windows(2).any(|w| w[1] > w[0]);
            saw_turn |= ups && downs;
        }
        assert!(saw_turn);
    }
}
