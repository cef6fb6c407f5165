//! Platform list under construction
//!
//! Every generator, injector and transform writes through a [`Layout`], so
//! the placement rules (nudge-or-skip, traps flush against hosts) live in
//! exactly one place.

use super::geometry::{
    DEFAULT_PLACEMENT_ATTEMPTS, is_valid_placement, overlaps, required_clearance,
    try_place_with_adjustment,
};
use super::platform::{Platform, PlatformCategory};
use crate::consts::*;

#[derive(Debug, Clone)]
pub struct Layout {
    platforms: Vec<Platform>,
    margin: f32,
}

impl Layout {
    /// An empty layout holding only the spawn ground slab
    pub fn new(margin: f32) -> Self {
        Self {
            platforms: vec![Self::start_platform()],
            margin,
        }
    }

    pub fn start_platform() -> Platform {
        Platform::new(0.0, GROUND_Y, START_PLATFORM_WIDTH, PlatformCategory::Ground)
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Platform> {
        self.platforms.get(index)
    }

    pub fn into_platforms(self) -> Vec<Platform> {
        self.platforms
    }

    pub fn count(&self, category: PlatformCategory) -> usize {
        self.platforms.iter().filter(|p| p.category == category).count()
    }

    /// Place `candidate`, nudging it if it collides. Returns the platform
    /// actually placed, or `None` if it was skipped.
    pub fn place(&mut self, candidate: Platform) -> Option<Platform> {
        let placed = try_place_with_adjustment(
            &candidate,
            &self.platforms,
            self.margin,
            DEFAULT_PLACEMENT_ATTEMPTS,
        )?;
        self.platforms.push(placed.clone());
        Some(placed)
    }

    /// Place `candidate` exactly where it is (after clamping), or not at all
    pub fn place_exact(&mut self, mut candidate: Platform) -> bool {
        candidate.clamp_to_world();
        if !is_valid_placement(&candidate, &self.platforms, self.margin) {
            return false;
        }
        self.platforms.push(candidate);
        true
    }

    /// Death traps are never nudged; a trap that would overlap is dropped
    pub fn place_trap(&mut self, x: f32, y: f32, width: f32) -> bool {
        self.place_exact(Platform::new(x, y, width, PlatformCategory::DeathTrap))
    }

    /// The spawn slab and the goal never move or disappear
    pub fn is_anchor(&self, index: usize) -> bool {
        index == 0
            || self
                .platforms
                .get(index)
                .is_some_and(|p| p.category == PlatformCategory::Goal)
    }

    /// Traversable platform reaching furthest to the right
    pub fn rightmost_traversable(&self) -> Option<&Platform> {
        self.platforms
            .iter()
            .filter(|p| p.category.is_traversable())
            .max_by(|a, b| a.right().total_cmp(&b.right()))
    }

    /// Copies of the platforms of `category`, in placement order
    pub fn of_category(&self, category: PlatformCategory) -> Vec<Platform> {
        self.platforms
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect()
    }

    /// Would `candidate` fit if it replaced the platform at `index`?
    pub fn fits_except(&self, index: usize, candidate: &Platform) -> bool {
        self.platforms.iter().enumerate().all(|(i, other)| {
            i == index
                || !overlaps(
                    candidate,
                    other,
                    required_clearance(candidate, other, self.margin),
                )
        })
    }

    /// Swap in `candidate` at `index` if it keeps clear of everything else
    pub fn try_replace(&mut self, index: usize, candidate: Platform) -> bool {
        if index >= self.platforms.len() || !self.fits_except(index, &candidate) {
            return false;
        }
        self.platforms[index] = candidate;
        true
    }

    /// Install the goal platform as given, dropping every non-anchor
    /// platform it would collide with
    pub fn place_goal(&mut self, goal: Platform) -> usize {
        let margin = self.margin;
        let before = self.platforms.len();
        let mut index = 0;
        self.platforms.retain(|p| {
            let keep = index == 0 || !overlaps(&goal, p, required_clearance(&goal, p, margin));
            index += 1;
            keep
        });
        let removed = before - self.platforms.len();
        self.platforms.push(goal);
        removed
    }
}
