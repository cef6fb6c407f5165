//! Ascending spiral around a randomised centre

use std::f32::consts::{FRAC_PI_3, FRAC_PI_6, PI};

use glam::Vec2;

use super::{GenerationContext, PatternGenerator};
use crate::clamp_span;
use crate::levelgen::layout::Layout;
use crate::levelgen::platform::{Platform, PlatformCategory};
use crate::levelgen::rng::LevelRng;
use crate::levelgen::traps::{TrapRule, TrapSpot, place_near};

const TRAPS: TrapRule = TrapRule::new(0.4, 3);
const MAX_RADIUS: f32 = 200.0;
const MIN_RADIUS: f32 = 20.0;

pub struct Spiral;

impl PatternGenerator for Spiral {
    fn generate(&self, ctx: &GenerationContext, rng: &mut LevelRng, layout: &mut Layout) {
        let shuffle = ctx.shuffle();
        let mut angle = rng.range(0.0, PI);
        let radius = (70.0 + ctx.level_number as f32 * 5.0 + shuffle * 40.0).min(MAX_RADIUS);
        let tightness = 10.0 + shuffle * 15.0;
        let lift = 15.0 + shuffle * 10.0;
        let turn = rng.sign();

        let span = (ctx.x_limit - ctx.origin.x).max(0.0);
        let centre = Vec2::new(
            ctx.origin.x + span * 0.4 + rng.range(0.0, 80.0),
            ctx.clamp_y(380.0 + rng.range(0.0, 80.0)),
        );
        let left = ctx.origin.x + 30.0;
        let right = ctx.x_limit + 50.0;

        let mut last_x = ctx.origin.x;
        for i in 0..ctx.max_platforms {
            if last_x >= ctx.x_limit {
                break;
            }

            // 60 to 90 degrees per step
            angle += (FRAC_PI_3 + rng.range(0.0, FRAC_PI_6)) * turn;
            let r = (radius - i as f32 * tightness).max(MIN_RADIUS);
            let x = centre.x + angle.cos() * r;
            let y = centre.y - angle.sin() * r - i as f32 * lift;
            last_x = clamp_span(x, left, right);

            // Narrower with every turn
            let width = (ctx.difficulty.min_platform_size - i as f32 * 5.0).max(35.0);
            let candidate =
                Platform::new(last_x, ctx.clamp_y(y), width, PlatformCategory::Normal);
            let Some(placed) = layout.place(candidate) else {
                continue;
            };

            if TRAPS.roll(ctx.level_number, &ctx.difficulty, rng) {
                let spot = if rng.chance(0.5) {
                    TrapSpot::After
                } else {
                    TrapSpot::Before
                };
                place_near(layout, &placed, spot, rng.range(12.0, 20.0));
            }
        }
    }
}
