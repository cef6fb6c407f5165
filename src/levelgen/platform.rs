//! Platform records and their categories
//!
//! A platform is an axis-aligned rectangle in the 800×600 logical space with
//! its top-left corner at `(x, y)`. The category alone decides how the
//! renderer draws it and what happens when the player lands on it.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What a platform is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformCategory {
    /// Ground slabs, including the spawn platform
    Ground,
    /// Regular traversable platform
    Normal,
    /// Solid block that gets in the way but is safe to stand on
    Obstacle,
    /// Hazard: touching it respawns the player
    DeathTrap,
    /// Oscillates horizontally around its anchor
    Moving,
    /// Small reward platform that grants an extra jump
    Bonus,
    /// Hidden shortcut platform
    Secret,
    /// Reaching it completes the level
    Goal,
}

/// Effect the physics layer applies when the player lands on a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingEffect {
    None,
    CompleteLevel,
    Respawn,
    /// Jumps reset to three instead of two
    ExtraJump,
}

impl PlatformCategory {
    pub const ALL: [PlatformCategory; 8] = [
        PlatformCategory::Ground,
        PlatformCategory::Normal,
        PlatformCategory::Obstacle,
        PlatformCategory::DeathTrap,
        PlatformCategory::Moving,
        PlatformCategory::Bonus,
        PlatformCategory::Secret,
        PlatformCategory::Goal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformCategory::Ground => "ground",
            PlatformCategory::Normal => "normal",
            PlatformCategory::Obstacle => "obstacle",
            PlatformCategory::DeathTrap => "death_trap",
            PlatformCategory::Moving => "moving",
            PlatformCategory::Bonus => "bonus",
            PlatformCategory::Secret => "secret",
            PlatformCategory::Goal => "goal",
        }
    }

    pub fn is_hazard(&self) -> bool {
        *self == PlatformCategory::DeathTrap
    }

    /// Can be landed on as a waypoint
    pub fn is_traversable(&self) -> bool {
        !self.is_hazard()
    }

    /// Eligible for the size-variation transform
    pub fn is_resizable(&self) -> bool {
        matches!(
            self,
            PlatformCategory::Ground
                | PlatformCategory::Normal
                | PlatformCategory::Moving
                | PlatformCategory::Secret
        )
    }

    pub fn landing_effect(&self) -> LandingEffect {
        match self {
            PlatformCategory::Goal => LandingEffect::CompleteLevel,
            PlatformCategory::DeathTrap => LandingEffect::Respawn,
            PlatformCategory::Bonus => LandingEffect::ExtraJump,
            _ => LandingEffect::None,
        }
    }
}

/// Oscillation parameters, present only on moving platforms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// Pixels per simulation tick
    pub speed: f32,
    /// +1.0 (right) or -1.0 (left)
    pub direction: f32,
    /// Maximum distance from the anchor
    pub range: f32,
    /// Anchor x the platform oscillates around
    pub origin_x: f32,
}

/// Axis-aligned bounds (right/bottom exclusive)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn expanded(self, margin: f32) -> Self {
        Self {
            left: self.left - margin,
            top: self.top - margin,
            right: self.right + margin,
            bottom: self.bottom + margin,
        }
    }

    /// Strict intersection; rectangles that only share an edge don't count
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

/// A platform entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub category: PlatformCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion: Option<Motion>,
}

/// Narrowest platform the generator will emit
pub const MIN_PLATFORM_WIDTH: f32 = 1.0;

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, category: PlatformCategory) -> Self {
        Self {
            x,
            y,
            width: width.max(MIN_PLATFORM_WIDTH),
            height: PLATFORM_HEIGHT,
            category,
            motion: None,
        }
    }

    /// A moving platform anchored at its current x
    pub fn moving(x: f32, y: f32, width: f32, speed: f32, direction: f32, range: f32) -> Self {
        Self {
            motion: Some(Motion {
                speed,
                direction: if direction < 0.0 { -1.0 } else { 1.0 },
                range,
                origin_x: x,
            }),
            ..Self::new(x, y, width, PlatformCategory::Moving)
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Space the platform can occupy, including a moving platform's full travel
    pub fn bounds(&self) -> Rect {
        let (left, right) = match self.motion {
            Some(motion) => (
                self.x.min(motion.origin_x - motion.range),
                self.right().max(motion.origin_x + motion.range + self.width),
            ),
            None => (self.x, self.right()),
        };
        Rect {
            left,
            top: self.y,
            right,
            bottom: self.y + self.height,
        }
    }

    /// Move the platform, carrying a moving platform's anchor along
    pub fn shift(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
        if let Some(motion) = self.motion.as_mut() {
            motion.origin_x += dx;
        }
    }

    /// Keep the platform inside the logical world
    pub fn clamp_to_world(&mut self) {
        let max_x = (WORLD_WIDTH - self.width).max(0.0);
        let dx = self.x.clamp(0.0, max_x) - self.x;
        let dy = self.y.clamp(WORLD_TOP_Y, GROUND_Y) - self.y;
        if dx != 0.0 || dy != 0.0 {
            self.shift(dx, dy);
        }
    }

    /// Advance a moving platform by one simulation tick
    pub fn advance(&mut self) {
        let Some(motion) = self.motion.as_mut() else {
            return;
        };
        self.x += motion.speed * motion.direction;

        if (self.x - motion.origin_x).abs() >= motion.range {
            motion.direction = -motion.direction;
            // Snap to the exact bound to prevent drift
            if self.x > motion.origin_x {
                self.x = motion.origin_x + motion.range;
            } else {
                self.x = motion.origin_x - motion.range;
            }
        }
    }
}
