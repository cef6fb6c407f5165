//! The level descriptor handed to the game loop

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::platform::{Platform, PlatformCategory};
use crate::consts::*;
use crate::palette;

/// A generated (or hand-authored) level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Stable order; re-validation of the same list gives the same answer
    pub platforms: Vec<Platform>,
    /// Player spawn (top-left of the stickman)
    pub spawn: Vec2,
    /// Top-left of the goal platform
    pub goal: Vec2,
}

/// Platform as the JavaScript renderer reads it
#[derive(Serialize)]
struct PlatformView<'a> {
    #[serde(flatten)]
    platform: &'a Platform,
    color: &'static str,
}

#[derive(Serialize)]
struct LevelView<'a> {
    platforms: Vec<PlatformView<'a>>,
    spawn: Vec2,
    goal: Vec2,
}

impl Level {
    /// A level with the standard spawn point
    pub fn new(platforms: Vec<Platform>, goal: Vec2) -> Self {
        Self {
            platforms,
            spawn: Vec2::new(SPAWN_X, SPAWN_Y),
            goal,
        }
    }

    pub fn goal_platform(&self) -> Option<&Platform> {
        self.platforms
            .iter()
            .find(|p| p.category == PlatformCategory::Goal)
    }

    /// Ground platform under the spawn point, else the first ground platform
    pub fn start_platform(&self) -> Option<&Platform> {
        let grounds = || {
            self.platforms
                .iter()
                .filter(|p| p.category == PlatformCategory::Ground)
        };
        grounds()
            .find(|p| self.spawn.x >= p.x && self.spawn.x <= p.right())
            .or_else(|| grounds().next())
    }

    pub fn count(&self, category: PlatformCategory) -> usize {
        self.platforms.iter().filter(|p| p.category == category).count()
    }

    /// Serialise for the renderer, with each platform's fill colour attached
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let view = LevelView {
            platforms: self
                .platforms
                .iter()
                .map(|platform| PlatformView {
                    platform,
                    color: palette::color(platform.category),
                })
                .collect(),
            spawn: self.spawn,
            goal: self.goal,
        };
        serde_json::to_string(&view)
    }
}
