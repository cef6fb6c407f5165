//! Clustered free-form placement with bridges

use std::f32::consts::TAU;

use glam::Vec2;

use super::{GenerationContext, PatternGenerator};
use crate::clamp_span;
use crate::levelgen::layout::Layout;
use crate::levelgen::platform::{Platform, PlatformCategory};
use crate::levelgen::rng::LevelRng;
use crate::levelgen::traps::{TrapRule, TrapSpot, place_near};

const TRAPS: TrapRule = TrapRule::new(0.4, 1);
/// Consecutive points further apart than this get a bridge between them
const BRIDGE_DISTANCE: f32 = 140.0;
const BRIDGE_HEIGHT: f32 = 120.0;

/// Points spread angularly around one to three cluster centres, sorted left
/// to right. Far-apart neighbours are joined by a bridge platform.
pub struct Scattered;

impl Scattered {
    fn points(ctx: &GenerationContext, rng: &mut LevelRng) -> Vec<Vec2> {
        let clusters = (ctx.level_number / 3 + 1).min(3) as usize;
        let spread = 100.0 + ctx.shuffle() * 150.0;
        // Horizontal or vertical emphasis
        let (sx, sy) = if ctx.variant(2) == 0 { (1.5, 0.7) } else { (0.7, 1.5) };
        let per_cluster = (ctx.max_platforms / clusters).max(1);

        let left = ctx.origin.x + 30.0;
        let right = ctx.x_limit + 50.0;
        let first_centre = ctx.origin.x + 80.0;
        let last_centre = ctx.x_limit - 50.0;

        let mut points = Vec::with_capacity(clusters * per_cluster);
        for cluster in 0..clusters {
            let t = cluster as f32 / (clusters.max(2) - 1) as f32;
            let centre = Vec2::new(
                first_centre + t * (last_centre - first_centre),
                ctx.clamp_y(rng.range(250.0, 450.0)),
            );
            for i in 0..per_cluster {
                let angle = i as f32 / per_cluster as f32 * TAU;
                let radius = 40.0 + rng.range(0.0, spread * 0.5);
                let x = centre.x + angle.cos() * radius * sx + rng.spread(20.0);
                let y = centre.y + angle.sin() * radius * sy + rng.spread(20.0);
                points.push(Vec2::new(clamp_span(x, left, right), ctx.clamp_y(y)));
            }
        }

        points.sort_by(|a, b| a.x.total_cmp(&b.x));
        points
    }
}

impl Scattered {
    /// Stepping stone between two points that are too far apart to jump
    fn bridge(prev: Vec2, point: Vec2, rng: &mut LevelRng) -> Option<Platform> {
        let far = (point.x - prev.x).abs() > BRIDGE_DISTANCE
            || (point.y - prev.y).abs() > BRIDGE_HEIGHT;
        if !far {
            return None;
        }
        let mid = (point + prev) / 2.0;
        Some(Platform::new(
            mid.x + rng.spread(20.0),
            mid.y + rng.spread(20.0),
            rng.range(40.0, 70.0),
            PlatformCategory::Normal,
        ))
    }

    fn place_points(
        ctx: &GenerationContext,
        points: &[Vec2],
        rng: &mut LevelRng,
        layout: &mut Layout,
    ) {
        for (i, point) in points.iter().enumerate() {
            let mut width = ctx.platform_width(rng);
            if ctx.level_number > 5 && rng.chance(0.3) {
                width = (width * 0.6).max(30.0);
            }
            let placed = layout.place(Platform::new(
                point.x,
                point.y,
                width,
                PlatformCategory::Normal,
            ));

            let prev = i.checked_sub(1).map(|j| points[j]);
            if let Some(bridge) = prev.and_then(|prev| Self::bridge(prev, *point, rng)) {
                layout.place(bridge);
            }

            let Some(placed) = placed else {
                continue;
            };
            if TRAPS.roll(ctx.level_number, &ctx.difficulty, rng) {
                let spot = match prev {
                    Some(prev) if rng.chance(0.5) => TrapSpot::Between(prev.x, prev.y),
                    _ => TrapSpot::Under(rng.float()),
                };
                place_near(layout, &placed, spot, 12.0);
            }
        }
    }
}

impl PatternGenerator for Scattered {
    fn generate(&self, ctx: &GenerationContext, rng: &mut LevelRng, layout: &mut Layout) {
        let points = Self::points(ctx, rng);
        Self::place_points(ctx, &points, rng, layout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::levelgen::patterns::StyleParams;

    #[test]
    fn test_points_are_sorted_and_bounded() {
        for seed in 0..20 {
            let mut rng = LevelRng::new(seed);
            let ctx = GenerationContext::new(9, StyleParams::roll(&mut rng));
            let points = Scattered::points(&ctx, &mut rng);
            assert!(!points.is_empty());
            assert!(points.windows(2).all(|w| w[0].x <= w[1].x));
            for p in &points {
                assert!(p.x >= ctx.origin.x + 30.0 && p.x <= ctx.x_limit + 50.0);
                assert!(p.y >= ctx.ceiling_y && p.y <= 550.0);
            }
        }
    }

    fn style() -> StyleParams {
        StyleParams {
            shuffle_factor: 0.5,
            sub_style: 0,
        }
    }

    #[test]
    fn test_bridge_only_for_far_neighbours() {
        let mut rng = LevelRng::new(1);
        let near = Scattered::bridge(Vec2::new(200.0, 400.0), Vec2::new(320.0, 330.0), &mut rng);
        assert_eq!(near, None);

        let wide = Scattered::bridge(Vec2::new(150.0, 500.0), Vec2::new(550.0, 500.0), &mut rng)
            .expect("wide gap gets a bridge");
        assert!((330.0..=370.0).contains(&wide.x));

        let tall = Scattered::bridge(Vec2::new(300.0, 520.0), Vec2::new(360.0, 300.0), &mut rng)
            .expect("tall gap gets a bridge");
        assert!(tall.y > 300.0 && tall.y < 520.0);
    }

    #[test]
    fn test_bridges_fill_wide_gaps() {
        for seed in 0..20 {
            let mut rng = LevelRng::new(seed);
            let ctx = GenerationContext::new(1, style());
            let mut layout = Layout::new(PLACEMENT_MARGIN);
            let points = [Vec2::new(150.0, 500.0), Vec2::new(550.0, 500.0)];
            Scattered::place_points(&ctx, &points, &mut rng, &mut layout);

            let normals = layout.of_category(PlatformCategory::Normal);
            assert_eq!(normals.len(), 3);
            assert!(
                normals.iter().any(|p| p.x > 300.0 && p.right() < 550.0),
                "no bridge between the points: {normals:?}"
            );
        }
    }

    #[test]
    fn test_close_points_get_no_bridge() {
        let mut rng = LevelRng::new(4);
        let ctx = GenerationContext::new(1, style());
        let mut layout = Layout::new(PLACEMENT_MARGIN);
        let points = [Vec2::new(150.0, 500.0), Vec2::new(270.0, 400.0)];
        Scattered::place_points(&ctx, &points, &mut rng, &mut layout);
        assert!(layout.count(PlatformCategory::Normal) <= 2);
    }

    #[test]
    fn test_generated_layout_stays_within_budget() {
        let mut rng = LevelRng::new(3);
        let ctx = GenerationContext::new(9, StyleParams::roll(&mut rng));
        let mut layout = Layout::new(PLACEMENT_MARGIN);
        Scattered.generate(&ctx, &mut rng, &mut layout);
        let placed = layout.count(PlatformCategory::Normal);
        assert!(placed >= 2);
        assert!(placed <= 2 * ctx.max_platforms);
    }
}
