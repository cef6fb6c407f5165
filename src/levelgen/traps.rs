//! Death-trap placement next to freshly generated platforms

use super::difficulty::DifficultyParams;
use super::layout::Layout;
use super::platform::Platform;
use super::rng::LevelRng;

/// Gap kept between a trap and the platform it guards
const TRAP_OFFSET_Y: f32 = 25.0;

/// Where a trap goes relative to its host platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrapSpot {
    /// Just past the right edge
    After,
    /// Hanging under the host, centred at this fraction of its width
    Under(f32),
    /// Just before the left edge
    Before,
    /// Midway between the host and an earlier point `(x, y)`
    Between(f32, f32),
}

/// How eagerly a pattern seeds traps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapRule {
    /// Scales the level's base trap chance
    pub multiplier: f32,
    /// No traps up to and including this level
    pub after_level: u32,
}

impl TrapRule {
    pub const fn new(multiplier: f32, after_level: u32) -> Self {
        Self {
            multiplier,
            after_level,
        }
    }

    pub fn roll(&self, level_number: u32, params: &DifficultyParams, rng: &mut LevelRng) -> bool {
        level_number > self.after_level
            && rng.chance(params.death_trap_chance * self.multiplier)
    }
}

/// Drop a trap of `width` at `spot` around `host`; skipped if it would overlap
pub fn place_near(layout: &mut Layout, host: &Platform, spot: TrapSpot, width: f32) -> bool {
    let (x, y) = match spot {
        TrapSpot::After => (host.right() + 10.0, host.y + TRAP_OFFSET_Y),
        TrapSpot::Under(fraction) => (
            host.x + host.width * fraction.clamp(0.0, 1.0) - width / 2.0,
            host.y + TRAP_OFFSET_Y,
        ),
        TrapSpot::Before => (host.x - width - 10.0, host.y + TRAP_OFFSET_Y),
        TrapSpot::Between(other_x, other_y) => (
            (host.x + other_x) / 2.0,
            host.y.max(other_y) + TRAP_OFFSET_Y,
        ),
    };
    layout.place_trap(x, y, width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLACEMENT_MARGIN;
    use crate::levelgen::platform::PlatformCategory;

    #[test]
    fn test_rule_respects_level_floor() {
        let params = DifficultyParams::for_level(20);
        let rule = TrapRule::new(10.0, 3);
        let mut rng = LevelRng::new(1);
        assert!(!rule.roll(3, &params, &mut rng));
        assert!(rule.roll(4, &params, &mut rng));
    }

    #[test]
    fn test_spots_sit_below_the_host() {
        let mut layout = Layout::new(PLACEMENT_MARGIN);
        let host = layout
            .place(Platform::new(300.0, 300.0, 80.0, PlatformCategory::Normal))
            .expect("free space");

        assert!(place_near(&mut layout, &host, TrapSpot::After, 12.0));
        assert!(place_near(&mut layout, &host, TrapSpot::Before, 12.0));
        assert!(place_near(&mut layout, &host, TrapSpot::Under(0.5), 12.0));

        let traps = layout.of_category(PlatformCategory::DeathTrap);
        assert_eq!(traps.len(), 3);
        assert!(traps.iter().all(|t| t.y == 325.0));
        assert_eq!(traps[0].x, 390.0);
        assert_eq!(traps[1].x, 278.0);
        assert_eq!(traps[2].x, 334.0);
    }

    #[test]
    fn test_overlapping_trap_is_skipped() {
        let mut layout = Layout::new(PLACEMENT_MARGIN);
        let host = layout
            .place(Platform::new(300.0, 300.0, 80.0, PlatformCategory::Normal))
            .expect("free space");
        assert!(place_near(&mut layout, &host, TrapSpot::Under(0.5), 12.0));
        assert!(!place_near(&mut layout, &host, TrapSpot::Under(0.5), 12.0));
    }
}
