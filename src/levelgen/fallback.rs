//! The guaranteed-completable level used when generation keeps failing

use glam::Vec2;

use super::level::Level;
use super::platform::{Platform, PlatformCategory};
use crate::consts::*;

/// Fixed stepping-stone route from the spawn slab to the goal
const STEPS: [(f32, f32); 4] = [(200.0, 520.0), (400.0, 460.0), (600.0, 400.0), (520.0, 320.0)];
const STEP_WIDTH: f32 = 100.0;
const TRAP_WIDTH: f32 = 30.0;
const GOAL_X: f32 = 650.0;

/// Goal top for the fallback level: 10 px higher per level, at most 100 px
pub fn fallback_goal_y(level_number: u32) -> f32 {
    300.0 - (level_number as f32 * 10.0).min(100.0)
}

/// Pure function of `level_number`: the same input always yields the same
/// platforms. Hazards appear from level 3 and level 5.
pub fn generate_fallback_level(level_number: u32) -> Level {
    let mut platforms = Vec::with_capacity(8);
    platforms.push(Platform::new(
        0.0,
        GROUND_Y,
        START_PLATFORM_WIDTH,
        PlatformCategory::Ground,
    ));
    platforms.extend(
        STEPS
            .iter()
            .map(|&(x, y)| Platform::new(x, y, STEP_WIDTH, PlatformCategory::Normal)),
    );

    if level_number > 2 {
        platforms.push(Platform::new(350.0, 480.0, TRAP_WIDTH, PlatformCategory::DeathTrap));
    }
    if level_number > 4 {
        platforms.push(Platform::new(550.0, 420.0, TRAP_WIDTH, PlatformCategory::DeathTrap));
    }

    let goal = Vec2::new(GOAL_X, fallback_goal_y(level_number));
    platforms.push(Platform::new(goal.x, goal.y, STEP_WIDTH, PlatformCategory::Goal));

    Level::new(platforms, goal)
}
