//! Hand-authored opening levels
//!
//! The tutorial runs before procedural generation takes over: open ground,
//! small gaps, higher jumps, then obstacles.

use glam::Vec2;

use super::level::Level;
use super::platform::Platform;
use super::platform::PlatformCategory::{self, Goal, Ground, Normal, Obstacle};
use crate::consts::*;

type Blueprint = &'static [(f32, f32, f32, PlatformCategory)];

const OPEN_GROUND: Blueprint = &[
    (0.0, 580.0, 800.0, Ground),
    (200.0, 520.0, 120.0, Normal),
    (400.0, 460.0, 120.0, Normal),
    (600.0, 420.0, 120.0, Goal),
];

const SMALL_GAPS: Blueprint = &[
    (0.0, 580.0, 150.0, Ground),
    (200.0, 580.0, 100.0, Ground),
    (350.0, 580.0, 150.0, Ground),
    (550.0, 580.0, 250.0, Ground),
    (250.0, 520.0, 80.0, Normal),
    (450.0, 460.0, 80.0, Normal),
    (650.0, 420.0, 100.0, Goal),
];

const HIGHER_JUMPS: Blueprint = &[
    (0.0, 580.0, 800.0, Ground),
    (150.0, 480.0, 80.0, Normal),
    (300.0, 380.0, 80.0, Normal),
    (500.0, 280.0, 80.0, Normal),
    (650.0, 350.0, 100.0, Goal),
];

const OBSTACLES: Blueprint = &[
    (0.0, 580.0, 800.0, Ground),
    (150.0, 520.0, 100.0, Normal),
    (200.0, 480.0, 40.0, Obstacle),
    (350.0, 460.0, 100.0, Normal),
    (400.0, 420.0, 40.0, Obstacle),
    (550.0, 400.0, 100.0, Normal),
    (700.0, 360.0, 80.0, Goal),
];

const TUTORIAL: [Blueprint; 4] = [OPEN_GROUND, SMALL_GAPS, HIGHER_JUMPS, OBSTACLES];

/// Number of tutorial levels
pub fn tutorial_len() -> usize {
    TUTORIAL.len()
}

/// Tutorial level by zero-based index
pub fn tutorial_level(index: usize) -> Option<Level> {
    let blueprint = TUTORIAL.get(index)?;
    let platforms: Vec<Platform> = blueprint
        .iter()
        .map(|&(x, y, width, category)| Platform::new(x, y, width, category))
        .collect();
    let goal = platforms
        .iter()
        .find(|p| p.category == Goal)
        .map(|p| Vec2::new(p.x, p.y))
        .unwrap_or(Vec2::new(SPAWN_X, SPAWN_Y));
    Some(Level::new(platforms, goal))
}
