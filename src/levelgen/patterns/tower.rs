//! Steep vertical climb

use glam::Vec2;

use super::{GenerationContext, PatternGenerator};
use crate::levelgen::layout::Layout;
use crate::levelgen::platform::{Platform, PlatformCategory};
use crate::levelgen::rng::LevelRng;
use crate::levelgen::traps::{TrapRule, TrapSpot, place_near};

const TRAPS: TrapRule = TrapRule::new(0.5, 3);
/// Towers stop short of the goal column
const TOWER_X_MARGIN: f32 = 100.0;

/// Platforms stacked almost on top of each other. The sub-style picks a
/// straight, leaning or spiralling tower; stepping stones hang below.
pub struct Tower;

impl PatternGenerator for Tower {
    fn generate(&self, ctx: &GenerationContext, rng: &mut LevelRng, layout: &mut Layout) {
        let shuffle = ctx.shuffle();
        let style = ctx.variant(3);
        let lean = rng.spread(shuffle * 20.0);
        let x_limit = ctx.x_limit - TOWER_X_MARGIN;

        // The tower cursor tracks the left edge, not the right
        let mut cursor = ctx.origin;
        for i in 0..ctx.max_platforms {
            if cursor.x >= x_limit {
                break;
            }

            let gap = ctx.gap(rng, 30.0, 30.0);
            let dx = match style {
                0 => gap * 0.3,
                1 => gap * 0.4 + lean,
                _ => gap * 0.5 + (i as f32 * 0.8).sin() * 30.0,
            };
            let climb = 70.0 + rng.range(0.0, 40.0) + shuffle * 20.0;
            let width = (ctx.difficulty.min_platform_size * 0.8
                + rng.range(0.0, ctx.difficulty.size_variation * 0.6))
            .max(40.0);

            let candidate = Platform::new(
                cursor.x + dx,
                ctx.clamp_y(cursor.y - climb),
                width,
                PlatformCategory::Normal,
            );
            let Some(placed) = layout.place(candidate) else {
                cursor.x += 40.0;
                continue;
            };
            cursor = Vec2::new(placed.x, placed.y);

            if i > 0 && rng.chance(0.4 + shuffle * 0.3) {
                let stone = Platform::new(
                    placed.x + rng.spread(30.0),
                    placed.y + 35.0 + rng.range(0.0, 15.0),
                    rng.range(25.0, 40.0),
                    PlatformCategory::Normal,
                );
                layout.place(stone);
            }

            if TRAPS.roll(ctx.level_number, &ctx.difficulty, rng) {
                place_near(layout, &placed, TrapSpot::Under(0.5), 10.0);
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
    fn test_tower_is_tall_and_narrow() {
        let mut rng = LevelRng::new(5);
        let ctx = GenerationContext::new(20, StyleParams::roll(&mut rng));
        let mut layout = Layout::new(PLACEMENT_MARGIN);
        Tower.generate(&ctx, &mut rng, &mut layout);

        let path = layout.of_category(PlatformCategory::Normal);
        let top = path.iter().map(|p| p.y).fold(f32::MAX, f32::min);
        assert!(path.len() >= 4);
        assert!(top <= 300.0, "tower topped out at {top}");
    }
}
