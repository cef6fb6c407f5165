//! Spatial predicates shared by generation, transformation, and validation

use super::platform::{Platform, PlatformCategory};

/// Nudge directions tried, in order, when a candidate collides
const NUDGES: [(f32, f32); 8] = [
    (1.0, 0.0),   // right
    (-1.0, 0.0),  // left
    (0.0, -1.0),  // up
    (0.0, 1.0),   // down
    (1.0, -1.0),  // up-right
    (-1.0, -1.0), // up-left
    (1.0, 1.0),   // down-right
    (-1.0, 1.0),  // down-left
];

/// Distance of the first nudge ring; later rings step further out
pub const NUDGE_STEP: f32 = 25.0;

/// Default nudge budget for `try_place_with_adjustment`
pub const DEFAULT_PLACEMENT_ATTEMPTS: usize = 16;

/// True iff `a`'s bounds grown by `margin` intersect `b`'s bounds
pub fn overlaps(a: &Platform, b: &Platform, margin: f32) -> bool {
    a.bounds().expanded(margin).intersects(&b.bounds())
}

/// Clearance two platforms must keep. A death trap may sit flush against
/// the platform it guards, so pairs involving a trap only forbid true overlap.
pub fn required_clearance(a: &Platform, b: &Platform, margin: f32) -> f32 {
    if a.category == PlatformCategory::DeathTrap || b.category == PlatformCategory::DeathTrap {
        0.0
    } else {
        margin
    }
}

/// True iff `candidate` keeps the required clearance from every platform
pub fn is_valid_placement(candidate: &Platform, existing: &[Platform], margin: f32) -> bool {
    existing
        .iter()
        .all(|other| !overlaps(candidate, other, required_clearance(candidate, other, margin)))
}

/// Try the candidate as-is, then nudged right, left, up, down and
/// diagonally in growing rings. Each nudge is clamped to the world.
/// Returns `None` when nothing fits; callers skip the platform.
pub fn try_place_with_adjustment(
    candidate: &Platform,
    existing: &[Platform],
    margin: f32,
    max_attempts: usize,
) -> Option<Platform> {
    let mut placed = candidate.clone();
    placed.clamp_to_world();
    if is_valid_placement(&placed, existing, margin) {
        return Some(placed);
    }

    for attempt in 0..max_attempts {
        let ring = (attempt / NUDGES.len() + 1) as f32;
        let (dx, dy) = NUDGES[attempt % NUDGES.len()];

        let mut nudged = candidate.clone();
        nudged.shift(dx * NUDGE_STEP * ring, dy * NUDGE_STEP * ring);
        nudged.clamp_to_world();
        if is_valid_placement(&nudged, existing, margin) {
            return Some(nudged);
        }
    }

    None
}
