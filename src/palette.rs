//! Canvas colours for each platform category
//!
//! Presentation only. Generation and validation work on
//! [`PlatformCategory`] and never look at these strings.

use crate::levelgen::PlatformCategory;

pub const GROUND: &str = "#8B4513";
pub const NORMAL: &str = "#009600";
pub const OBSTACLE: &str = "#960000";
pub const DEATH_TRAP: &str = "#FF0000";
pub const MOVING: &str = "#00FFFF";
pub const BONUS: &str = "#00FF00";
pub const SECRET: &str = "#006600";
pub const GOAL: &str = "#FFD700";

/// Fill colour the renderer uses for `category`
pub fn color(category: PlatformCategory) -> &'static str {
    match category {
        PlatformCategory::Ground => GROUND,
        PlatformCategory::Normal => NORMAL,
        PlatformCategory::Obstacle => OBSTACLE,
        PlatformCategory::DeathTrap => DEATH_TRAP,
        PlatformCategory::Moving => MOVING,
        PlatformCategory::Bonus => BONUS,
        PlatformCategory::Secret => SECRET,
        PlatformCategory::Goal => GOAL,
    }
}
