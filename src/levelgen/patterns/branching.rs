//! Main ascending path with side branches

use glam::Vec2;

use super::{GenerationContext, PatternGenerator};
use crate::clamp_span;
use crate::consts::*;
use crate::levelgen::layout::Layout;
use crate::levelgen::platform::{Platform, PlatformCategory};
use crate::levelgen::rng::LevelRng;
use crate::levelgen::traps::{TrapRule, TrapSpot, place_near};

const MAIN_TRAPS: TrapRule = TrapRule::new(0.3, 2);
/// Branches are where exploration pays off, so they stay nearly clean
const BRANCH_TRAPS: TrapRule = TrapRule::new(0.1, 4);
/// Main path stops this far short of the pattern limit
const MAIN_X_MARGIN: f32 = 100.0;
/// Main path never climbs above this
const MAIN_CEILING_Y: f32 = 200.0;
const BRANCH_X_LIMIT: f32 = WORLD_WIDTH - 150.0;

/// Upward branch first, then downward (screen y grows downward)
const BRANCH_DIRECTIONS: [f32; 2] = [-1.0, 1.0];

/// Seventy percent of the budget goes to a climbing main path; at two branch
/// points (early or late, by sub-style) an upper and a lower branch fork off.
pub struct Branching;

impl Branching {
    fn branch(ctx: &GenerationContext, rng: &mut LevelRng, layout: &mut Layout, host: &Platform) {
        let shuffle = ctx.shuffle();
        let length = if shuffle > 0.66 { 3 } else { 2 };

        for dir in BRANCH_DIRECTIONS {
            let mut x = host.x + 30.0 + rng.range(0.0, 20.0);
            let mut y = host.y + dir * (50.0 + shuffle * 30.0);

            for _ in 0..length {
                if x >= BRANCH_X_LIMIT {
                    break;
                }
                x += 60.0 + rng.range(0.0, 40.0);
                y = ctx.clamp_y(y + dir * (20.0 + rng.range(0.0, 25.0)));

                let width = (ctx.difficulty.min_platform_size * rng.range(0.7, 0.9)).max(35.0);
                let Some(placed) = layout.place(Platform::new(x, y, width, PlatformCategory::Normal))
                else {
                    continue;
                };
                if BRANCH_TRAPS.roll(ctx.level_number, &ctx.difficulty, rng) {
                    place_near(layout, &placed, TrapSpot::After, 10.0);
                }
            }
        }
    }
}

impl PatternGenerator for Branching {
    fn generate(&self, ctx: &GenerationContext, rng: &mut LevelRng, layout: &mut Layout) {
        let main_count = ((ctx.max_platforms as f32 * 0.7) as usize).max(1);
        let branch_points = if ctx.variant(2) == 0 {
            [main_count / 4, main_count / 2]
        } else {
            [main_count / 2, main_count * 3 / 4]
        };
        let x_limit = ctx.x_limit - MAIN_X_MARGIN;
        let ceiling = ctx.ceiling_y.max(MAIN_CEILING_Y);

        let mut cursor = ctx.origin;
        for i in 0..main_count {
            if cursor.x >= x_limit {
                break;
            }

            let gap = ctx.gap(rng, 35.0, 50.0);
            let y = clamp_span(
                cursor.y - 40.0 - rng.range(0.0, 30.0),
                ceiling,
                super::PATTERN_FLOOR_Y,
            );
            let width = ctx.platform_width(rng);
            let Some(placed) = layout.place(Platform::new(
                cursor.x + gap,
                y,
                width,
                PlatformCategory::Normal,
            )) else {
                cursor.x += 40.0;
                continue;
            };
            cursor = Vec2::new(placed.right(), placed.y);

            if branch_points.contains(&i) {
                Self::branch(ctx, rng, layout, &placed);
            }

            if MAIN_TRAPS.roll(ctx.level_number, &ctx.difficulty, rng) {
                place_near(layout, &placed, TrapSpot::Under(rng.float()), 12.0);
            }
        }
    }
}
