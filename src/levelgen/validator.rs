//! Reachability check: can the goal be reached from spawn?
//!
//! Breadth-first search over standing points. Every traversable platform
//! contributes three samples (left, middle and right thirds of its top edge);
//! death traps are never nodes, and a sample whose player-sized probe box
//! touches a trap is discarded. One point reaches another when the horizontal
//! distance, the rise, and the drop all fit the [`JumpEnvelope`].

use std::collections::{HashSet, VecDeque};

use glam::Vec2;

use super::level::Level;
use super::platform::{Platform, Rect};
use crate::consts::*;
use crate::settings::JumpEnvelope;

/// Player probe used to discard samples next to hazards
const PROBE_HALF_WIDTH: f32 = 10.0;
const PROBE_HEIGHT: f32 = 40.0;

/// Anything that can certify a level as finishable
pub trait CompletabilityCheck {
    fn is_completable(&self, level: &Level) -> bool;
}

/// Standing points sampled on a platform's top edge
pub fn sample_points(platform: &Platform) -> [Vec2; 3] {
    let w = platform.width;
    [
        Vec2::new(platform.x + w / 6.0, platform.y),
        Vec2::new(platform.x + w / 2.0, platform.y),
        Vec2::new(platform.x + w * 5.0 / 6.0, platform.y),
    ]
}

fn probe(point: Vec2) -> Rect {
    Rect {
        left: point.x - PROBE_HALF_WIDTH,
        top: point.y - PROBE_HEIGHT,
        right: point.x + PROBE_HALF_WIDTH,
        bottom: point.y,
    }
}

/// Grid cell used to dedupe visited points
fn cell(point: Vec2) -> (i32, i32) {
    (
        (point.x / REACHABILITY_GRID).floor() as i32,
        (point.y / REACHABILITY_GRID).floor() as i32,
    )
}

/// BFS validator parameterised by the jump envelope
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReachabilityValidator {
    pub envelope: JumpEnvelope,
}

impl ReachabilityValidator {
    pub fn new(envelope: JumpEnvelope) -> Self {
        Self { envelope }
    }

    /// Can a player standing at `from` land at `to` in one bound?
    pub fn can_reach(&self, from: Vec2, to: Vec2) -> bool {
        let dx = (to.x - from.x).abs();
        let rise = from.y - to.y;
        dx <= self.envelope.max_horizontal
            && rise <= self.envelope.max_rise()
            && -rise <= self.envelope.max_fall
    }

    /// Standing points usable as waypoints
    fn nodes(level: &Level) -> Vec<Vec2> {
        let hazards: Vec<Rect> = level
            .platforms
            .iter()
            .filter(|p| p.category.is_hazard())
            .map(Platform::bounds)
            .collect();

        level
            .platforms
            .iter()
            .filter(|p| p.category.is_traversable())
            .flat_map(sample_points)
            .filter(|point| {
                let body = probe(*point);
                hazards.iter().all(|trap| !body.intersects(trap))
            })
            .collect()
    }

    fn start_points(level: &Level) -> Vec<Vec2> {
        let mut starts: Vec<Vec2> = level
            .start_platform()
            .map(|p| sample_points(p).to_vec())
            .unwrap_or_default();
        starts.push(level.spawn);
        starts
    }

    fn goal_points(level: &Level) -> Vec<Vec2> {
        match level.goal_platform() {
            Some(goal) => sample_points(goal).to_vec(),
            None => vec![level.goal],
        }
    }
}

impl CompletabilityCheck for ReachabilityValidator {
    fn is_completable(&self, level: &Level) -> bool {
        let nodes = Self::nodes(level);
        let goals = Self::goal_points(level);

        let mut visited = HashSet::new();
        let mut queue: VecDeque<Vec2> = Self::start_points(level).into();

        while let Some(current) = queue.pop_front() {
            if !visited.insert(cell(current)) {
                continue;
            }
            if goals.iter().any(|goal| self.can_reach(current, *goal)) {
                return true;
            }
            for next in &nodes {
                if !visited.contains(&cell(*next)) && self.can_reach(current, *next) {
                    queue.push_back(*next);
                }
            }
        }
        false
    }
}

/// Validate with the default jump envelope
pub fn is_level_completable(level: &Level) -> bool {
    ReachabilityValidator::default().is_completable(level)
}
