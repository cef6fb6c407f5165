//! Feature injectors run after the pattern generators
//!
//! Alternative routes, moving platforms and ground filler. Each injector is
//! gated by level number and a probability and writes through the same
//! [`Layout`] placement rules as the patterns.

use serde::{Deserialize, Serialize};

use super::difficulty::{DifficultyParams, MIN_CEILING_Y};
use super::layout::Layout;
use super::platform::{Platform, PlatformCategory};
use super::rng::LevelRng;
use super::traps::{TrapRule, TrapSpot, place_near};
use crate::clamp_span;
use crate::consts::*;

const UPPER_TRAPS: TrapRule = TrapRule::new(0.3, 3);
/// Lower routes are longer but safer
const LOWER_TRAPS: TrapRule = TrapRule::new(0.15, 5);
const GROUND_TRAPS: TrapRule = TrapRule::new(0.3, 4);

/// Which kind of alternative route was added
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    Upper,
    Lower,
    Secret,
}

/// What the injectors added to a layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectedFeatures {
    pub route: Option<RouteKind>,
    pub moving_platforms: usize,
    pub ground_segments: usize,
}

/// Run every injector in order
pub fn inject(
    level_number: u32,
    params: &DifficultyParams,
    rng: &mut LevelRng,
    layout: &mut Layout,
) -> InjectedFeatures {
    InjectedFeatures {
        route: add_alternative_route(level_number, params, rng, layout),
        moving_platforms: add_moving_platforms(level_number, params, rng, layout),
        ground_segments: add_ground_segments(level_number, params, rng, layout),
    }
}

/// Branch an upper, lower or secret route off the existing path
/// (level 3 onward, half the time, needs at least three path platforms)
pub fn add_alternative_route(
    level_number: u32,
    params: &DifficultyParams,
    rng: &mut LevelRng,
    layout: &mut Layout,
) -> Option<RouteKind> {
    if level_number <= 2 || !rng.chance(0.5) {
        return None;
    }
    let path = layout.of_category(PlatformCategory::Normal);
    if path.len() < 3 {
        return None;
    }

    let kind = [RouteKind::Upper, RouteKind::Lower, RouteKind::Secret][rng.index(3)];
    let placed = match kind {
        RouteKind::Upper => upper_route(level_number, params, rng, layout, &path),
        RouteKind::Lower => lower_route(level_number, params, rng, layout, &path),
        RouteKind::Secret => secret_route(level_number, rng, layout, &path),
    };
    (placed > 0).then_some(kind)
}

fn branch_point(path: &[Platform], fraction: f32) -> &Platform {
    let index = ((path.len() as f32 * fraction) as usize).min(path.len() - 1);
    &path[index]
}

fn upper_route(
    level_number: u32,
    params: &DifficultyParams,
    rng: &mut LevelRng,
    layout: &mut Layout,
    path: &[Platform],
) -> usize {
    let start = branch_point(path, 0.3);
    let mut x = start.x + 40.0;
    let mut y = start.y - 100.0 - rng.range(0.0, 40.0);
    let width = (params.min_platform_size * 0.8).max(50.0);
    let mut placed_count = 0;

    for _ in 0..4 {
        if x >= 680.0 {
            break;
        }
        x += 70.0 + rng.range(0.0, 50.0);
        // Slight downward tendency
        y = clamp_span(y + (rng.float() - 0.3) * 40.0, MIN_CEILING_Y, 400.0);

        let Some(placed) = layout.place(Platform::new(x, y, width, PlatformCategory::Normal))
        else {
            continue;
        };
        placed_count += 1;

        if UPPER_TRAPS.roll(level_number, params, rng) {
            place_near(layout, &placed, TrapSpot::After, 12.0);
        }
        if rng.chance(0.4) {
            let bonus = Platform::new(placed.x - 25.0, placed.y + 35.0, 20.0, PlatformCategory::Bonus);
            layout.place(bonus);
        }
    }
    placed_count
}

fn lower_route(
    level_number: u32,
    params: &DifficultyParams,
    rng: &mut LevelRng,
    layout: &mut Layout,
    path: &[Platform],
) -> usize {
    let start = branch_point(path, 0.4);
    let mut x = start.x + 30.0;
    let mut y = start.y + 80.0 + rng.range(0.0, 40.0);
    let width = (params.min_platform_size * 0.9).max(60.0);
    let mut placed_count = 0;

    for _ in 0..3 {
        if x >= 650.0 {
            break;
        }
        x += 80.0 + rng.range(0.0, 40.0);
        // Upward tendency so the route rejoins the main path
        y = clamp_span(y + (rng.float() - 0.7) * 30.0, 200.0, 550.0);

        let Some(placed) = layout.place(Platform::new(x, y, width, PlatformCategory::Normal))
        else {
            continue;
        };
        placed_count += 1;

        if LOWER_TRAPS.roll(level_number, params, rng) {
            place_near(layout, &placed, TrapSpot::Under(rng.float()), 10.0);
        }
    }
    placed_count
}

/// Small dark platforms forming a shortcut from early in the path to late
/// in it, from level 4 on
fn secret_route(
    level_number: u32,
    rng: &mut LevelRng,
    layout: &mut Layout,
    path: &[Platform],
) -> usize {
    if level_number < 4 {
        return 0;
    }
    let entry = branch_point(path, 0.6);
    let exit = branch_point(path, 0.8);

    let hidden = Platform::new(
        entry.x - 60.0 + rng.range(0.0, 40.0),
        entry.y - 60.0 - rng.range(0.0, 40.0),
        30.0,
        PlatformCategory::Secret,
    );
    let shortcut = Platform::new(exit.x - 40.0, exit.y - 40.0, 40.0, PlatformCategory::Secret);
    let middle = Platform::new(
        (hidden.x + shortcut.x) / 2.0,
        (hidden.y + shortcut.y) / 2.0 - 30.0,
        25.0,
        PlatformCategory::Secret,
    );

    let mut placed_count = 0;
    for platform in [hidden, shortcut] {
        if layout.place(platform).is_some() {
            placed_count += 1;
        }
    }
    if let Some(middle) = layout.place(middle) {
        placed_count += 1;
        // High risk, high reward
        if rng.chance(0.6) {
            layout.place_trap(middle.x + 30.0, middle.y + 25.0, 15.0);
        }
    }
    placed_count
}

/// Oscillating platforms, 30% of the time from level 6 on: one per eight
/// levels, at most two, so none appear before level 8
pub fn add_moving_platforms(
    level_number: u32,
    params: &DifficultyParams,
    rng: &mut LevelRng,
    layout: &mut Layout,
) -> usize {
    if level_number <= 5 || !rng.chance(0.3) {
        return 0;
    }
    let count = (level_number / 8).min(2);
    let width = (params.min_platform_size * 0.8).max(60.0);

    let mut placed_count = 0;
    for _ in 0..count {
        let platform = Platform::moving(
            250.0 + rng.range(0.0, 300.0),
            200.0 + rng.range(0.0, 200.0),
            width,
            rng.range(1.0, 3.0),
            rng.sign(),
            rng.range(80.0, 120.0),
        );
        if layout.place(platform).is_some() {
            placed_count += 1;
        }
    }
    placed_count
}

/// One or two short ground slabs in the middle of the floor, from level 3 on
pub fn add_ground_segments(
    level_number: u32,
    params: &DifficultyParams,
    rng: &mut LevelRng,
    layout: &mut Layout,
) -> usize {
    if level_number <= 2 {
        return 0;
    }

    let mut placed_count = 0;
    for _ in 0..1 + rng.index(2) {
        let x = 200.0 + rng.range(0.0, 300.0);
        let width = rng.range(40.0, 80.0);
        if !layout.place_exact(Platform::new(x, GROUND_Y, width, PlatformCategory::Ground)) {
            continue;
        }
        placed_count += 1;

        if GROUND_TRAPS.roll(level_number, params, rng) {
            layout.place_trap(x + width / 2.0 - 8.0, GROUND_Y - PLATFORM_HEIGHT, 16.0);
        }
    }
    placed_count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_layout() -> Layout {
        let mut layout = Layout::new(PLACEMENT_MARGIN);
        for (x, y) in [(180.0, 500.0), (320.0, 430.0), (460.0, 360.0), (600.0, 300.0)] {
            layout
                .place(Platform::new(x, y, 80.0, PlatformCategory::Normal))
                .expect("free space");
        }
        layout
    }

    #[test]
    fn test_no_features_on_early_levels() {
        let params = DifficultyParams::for_level(2);
        for seed in 0..50 {
            let mut rng = LevelRng::new(seed);
            let mut layout = path_layout();
            let features = inject(2, &params, &mut rng, &mut layout);
            assert_eq!(features, InjectedFeatures::default());
            assert_eq!(layout.len(), 5);
        }
    }

    #[test]
    fn test_route_needs_a_path() {
        let params = DifficultyParams::for_level(8);
        for seed in 0..50 {
            let mut rng = LevelRng::new(seed);
            let mut layout = Layout::new(PLACEMENT_MARGIN);
            assert_eq!(add_alternative_route(8, &params, &mut rng, &mut layout), None);
        }
    }

    #[test]
    fn test_routes_appear_on_later_levels() {
        let params = DifficultyParams::for_level(8);
        let mut kinds = std::collections::HashSet::new();
        for seed in 0..100 {
            let mut rng = LevelRng::new(seed);
            let mut layout = path_layout();
            if let Some(kind) = add_alternative_route(8, &params, &mut rng, &mut layout) {
                kinds.insert(kind);
                assert!(layout.len() > 5);
            }
        }
        assert_eq!(kinds.len(), 3);
    }

    #[test]
    fn test_secret_route_uses_secret_platforms() {
        let mut rng = LevelRng::new(4);
        let mut layout = path_layout();
        let path = layout.of_category(PlatformCategory::Normal);
        assert!(secret_route(6, &mut rng, &mut layout, &path) > 0);
        assert!(layout.count(PlatformCategory::Secret) > 0);
        assert_eq!(secret_route(3, &mut rng, &mut layout, &path), 0);
    }

    #[test]
    fn test_moving_platforms_only_from_level_eight() {
        let params = DifficultyParams::for_level(7);
        for seed in 0..50 {
            let mut rng = LevelRng::new(seed);
            let mut layout = path_layout();
            assert_eq!(add_moving_platforms(7, &params, &mut rng, &mut layout), 0);
        }

        let params = DifficultyParams::for_level(16);
        let mut total = 0;
        for seed in 0..50 {
            let mut rng = LevelRng::new(seed);
            let mut layout = path_layout();
            let added = add_moving_platforms(16, &params, &mut rng, &mut layout);
            assert!(added <= 2);
            assert_eq!(layout.count(PlatformCategory::Moving), added);
            total += added;
        }
        assert!(total > 0);
    }

    #[test]
    fn test_ground_segments_sit_on_the_floor() {
        let params = DifficultyParams::for_level(10);
        for seed in 0..30 {
            let mut rng = LevelRng::new(seed);
            let mut layout = path_layout();
            let added = add_ground_segments(10, &params, &mut rng, &mut layout);
            assert!(added <= 2);
            let grounds = layout.of_category(PlatformCategory::Ground);
            assert_eq!(grounds.len(), 1 + added);
            assert!(grounds.iter().all(|g| g.y == GROUND_Y));
        }
    }
}
