//! Level orchestrator
//!
//! A [`GenerationSession`] owns every piece of state that survives between
//! levels: the seeded RNG, the pattern recency memory and the timestamp of
//! the last generation. Callers create one per game and pass the clock in,
//! so the idle-reset rule is explicit and testable.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::{goal_height, hybrid_chance};
use super::fallback::generate_fallback_level;
use super::features::{self, InjectedFeatures};
use super::layout::Layout;
use super::level::Level;
use super::patterns::{GenerationContext, PatternKind, StyleParams};
use super::platform::{Platform, PlatformCategory};
use super::rng::LevelRng;
use super::selection::PatternSelector;
use super::transform::{TransformKind, apply_micro_jitter, apply_transform};
use super::validator::{CompletabilityCheck, ReachabilityValidator};
use crate::clamp_span;
use crate::consts::*;
use crate::platform;
use crate::settings::GeneratorSettings;

/// Orchestrator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationPhase {
    /// Inside the generate/validate/retry loop
    Generating,
    /// Idle; the last level has been handed out
    Done,
}

/// Diagnostics for the debug panel; no bearing on gameplay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub level_number: u32,
    /// Patterns used by the accepted attempt (two for hybrid levels)
    pub patterns: Vec<PatternKind>,
    pub transform: Option<TransformKind>,
    pub shuffle_factor: f32,
    pub features: InjectedFeatures,
    /// Generation attempts made, including the accepted one
    pub attempts: u32,
    pub is_fallback: bool,
}

impl GenerationReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn pattern_names(&self) -> String {
        if self.patterns.is_empty() {
            return "fallback".to_string();
        }
        self.patterns
            .iter()
            .map(PatternKind::as_str)
            .collect::<Vec<_>>()
            .join("+")
    }
}

/// A level together with how it was made
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedLevel {
    pub level: Level,
    pub report: GenerationReport,
}

/// Generation state carried from one level to the next
#[derive(Debug, Clone)]
pub struct GenerationSession<V = ReachabilityValidator> {
    settings: GeneratorSettings,
    rng: LevelRng,
    selector: PatternSelector,
    last_generation_ms: Option<f64>,
    phase: GenerationPhase,
    validator: V,
}

impl GenerationSession {
    /// Session validating with the envelope from `settings`
    pub fn new(seed: u64, settings: GeneratorSettings) -> Self {
        let validator = ReachabilityValidator::new(settings.envelope);
        Self::with_validator(seed, settings, validator)
    }

    /// Swap in new settings; the validator follows the new jump envelope.
    /// Pattern memory and the session clock carry over.
    pub fn apply_settings(&mut self, settings: GeneratorSettings) {
        self.validator = ReachabilityValidator::new(settings.envelope);
        self.settings = settings;
    }
}

impl<V: CompletabilityCheck> GenerationSession<V> {
    pub fn with_validator(seed: u64, settings: GeneratorSettings, validator: V) -> Self {
        Self {
            settings,
            rng: LevelRng::new(seed),
            selector: PatternSelector::new(),
            last_generation_ms: None,
            phase: GenerationPhase::Done,
            validator,
        }
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn phase(&self) -> GenerationPhase {
        self.phase
    }

    pub fn selector(&self) -> &PatternSelector {
        &self.selector
    }

    pub fn last_generation_ms(&self) -> Option<f64> {
        self.last_generation_ms
    }

    /// Forget the recency memory and the last timestamp
    pub fn reset(&mut self) {
        self.selector.reset();
        self.last_generation_ms = None;
    }

    /// Level 1, the first call, or a long idle gap all start a new session
    pub(crate) fn is_fresh_session(&self, level_number: u32, now_ms: f64) -> bool {
        level_number <= 1
            || self
                .last_generation_ms
                .is_none_or(|last| now_ms - last > self.settings.idle_reset_ms)
    }

    /// Generate level `level_number` using the wall clock for the idle rule
    pub fn generate_level_now(&mut self, level_number: u32) -> GeneratedLevel {
        self.generate_level(level_number, platform::now_ms())
    }

    /// Generate a completable level. Tries up to the attempt budget and falls
    /// back to the fixed level if every attempt fails validation.
    pub fn generate_level(&mut self, level_number: u32, now_ms: f64) -> GeneratedLevel {
        let level_number = level_number.max(1);
        if self.is_fresh_session(level_number, now_ms) {
            log::debug!("Fresh session at level {}, clearing pattern memory", level_number);
            self.selector.reset();
        }

        self.phase = GenerationPhase::Generating;
        let max_attempts = self.settings.effective_attempts();
        let mut accepted = None;

        for attempt in 1..=max_attempts {
            let mut candidate = self.attempt(level_number);
            candidate.report.attempts = attempt;
            if self.validator.is_completable(&candidate.level) {
                accepted = Some(candidate);
                break;
            }
            log::debug!(
                "Level {} attempt {} ({}) failed validation",
                level_number,
                attempt,
                candidate.report.pattern_names()
            );
        }

        let generated = accepted.unwrap_or_else(|| {
            log::warn!(
                "Level {}: no completable layout in {} attempts, using fallback",
                level_number,
                max_attempts
            );
            GeneratedLevel {
                level: generate_fallback_level(level_number),
                report: GenerationReport {
                    level_number,
                    patterns: Vec::new(),
                    transform: None,
                    shuffle_factor: 0.0,
                    features: InjectedFeatures::default(),
                    attempts: max_attempts,
                    is_fallback: true,
                },
            }
        });

        let report = &generated.report;
        log::info!(
            "Level {}: {} platforms, pattern {}, transform {}, shuffle {:.2}, attempts {}, fallback {}",
            level_number,
            generated.level.platforms.len(),
            report.pattern_names(),
            report.transform.map_or("none", |t| t.as_str()),
            report.shuffle_factor,
            report.attempts,
            report.is_fallback
        );

        self.selector.commit_level(&generated.report.patterns);
        self.last_generation_ms = Some(now_ms);
        self.phase = GenerationPhase::Done;
        generated
    }

    /// One unvalidated candidate: patterns, injectors, transforms, goal
    fn attempt(&mut self, level_number: u32) -> GeneratedLevel {
        let style = StyleParams::roll(&mut self.rng);
        let ctx = GenerationContext::new(level_number, style);
        let mut layout = Layout::new(self.settings.effective_margin());

        let primary = self.selector.choose(&mut self.rng);
        let mut patterns = vec![primary];
        let hybrid =
            self.settings.hybrid_patterns && self.rng.chance(hybrid_chance(level_number));

        if hybrid {
            let first = GenerationContext {
                x_limit: HYBRID_SPLIT_X,
                max_platforms: (ctx.max_platforms / 2).max(1),
                ..ctx
            };
            primary.generate(&first, &mut self.rng, &mut layout);

            let secondary = self.selector.choose_hybrid(&mut self.rng, primary);
            let anchor = layout
                .rightmost_traversable()
                .cloned()
                .unwrap_or_else(Layout::start_platform);
            let offset = self.rng.spread(60.0);
            let second = GenerationContext {
                origin: Vec2::new(
                    anchor.right(),
                    clamp_span(anchor.y + offset, ctx.ceiling_y, GROUND_Y),
                ),
                max_platforms: ctx.max_platforms.saturating_sub(first.max_platforms).max(1),
                ..ctx
            };
            secondary.generate(&second, &mut self.rng, &mut layout);
            patterns.push(secondary);
        } else {
            primary.generate(&ctx, &mut self.rng, &mut layout);
        }

        let features = features::inject(level_number, &ctx.difficulty, &mut self.rng, &mut layout);

        let transform = if self.settings.transforms {
            let kind = TransformKind::random(&mut self.rng);
            apply_transform(kind, style.shuffle_factor, &mut self.rng, &mut layout);
            if level_number > 1 {
                apply_micro_jitter(&mut self.rng, &mut layout);
            }
            Some(kind)
        } else {
            None
        };

        let goal_x = if primary == PatternKind::Valley {
            self.rng.range(400.0, 600.0)
        } else {
            self.rng.range(650.0, 750.0)
        };
        let mut goal_platform = Platform::new(
            goal_x,
            goal_height(level_number),
            self.rng.range(80.0, 120.0),
            PlatformCategory::Goal,
        );
        goal_platform.clamp_to_world();
        let goal = Vec2::new(goal_platform.x, goal_platform.y);
        layout.place_goal(goal_platform);

        GeneratedLevel {
            level: Level::new(layout.into_platforms(), goal),
            report: GenerationReport {
                level_number,
                patterns,
                transform,
                shuffle_factor: style.shuffle_factor,
                features,
                attempts: 0,
                is_fallback: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levelgen::geometry::{overlaps, required_clearance};
    use crate::levelgen::validator::is_level_completable;
    use crate::settings::JumpEnvelope;
    use proptest::prelude::*;
    use std::cell::Cell;
    use std::collections::VecDeque;

    struct NeverCompletable;

    impl CompletabilityCheck for NeverCompletable {
        fn is_completable(&self, _level: &Level) -> bool {
            false
        }
    }

    /// Counts calls and delegates to the real validator
    #[derive(Default)]
    struct CountingValidator {
        calls: Cell<u32>,
        inner: ReachabilityValidator,
    }

    impl CompletabilityCheck for CountingValidator {
        fn is_completable(&self, level: &Level) -> bool {
            self.calls.set(self.calls.get() + 1);
            self.inner.is_completable(level)
        }
    }

    /// Coarse hop check between whole platform top edges, written without
    /// point sampling. Anything the validator accepts must pass this too.
    fn reachable_by_platform_hops(level: &Level, envelope: &JumpEnvelope) -> bool {
        let span_gap = |a: (f32, f32), b: (f32, f32)| (b.0 - a.1).max(a.0 - b.1).max(0.0);
        let hop = |from_y: f32, to_y: f32, gap: f32| {
            gap <= envelope.max_horizontal
                && from_y - to_y <= envelope.max_rise()
                && to_y - from_y <= envelope.max_fall
        };

        let spans: Vec<(f32, f32, f32)> = level
            .platforms
            .iter()
            .filter(|p| p.category.is_traversable())
            .map(|p| (p.x, p.right(), p.y))
            .collect();
        let Some(goal) = level.goal_platform() else {
            return false;
        };
        let goal_span = (goal.x, goal.right());

        let mut seen = vec![false; spans.len()];
        let mut queue: VecDeque<(f32, f32, f32)> = VecDeque::new();
        queue.push_back((level.spawn.x, level.spawn.x, level.spawn.y));
        if let Some(start) = level.start_platform() {
            queue.push_back((start.x, start.right(), start.y));
        }

        while let Some((left, right, y)) = queue.pop_front() {
            if hop(y, goal.y, span_gap((left, right), goal_span)) {
                return true;
            }
            for (i, &(l, r, ty)) in spans.iter().enumerate() {
                if !seen[i] && hop(y, ty, span_gap((left, right), (l, r))) {
                    seen[i] = true;
                    queue.push_back((l, r, ty));
                }
            }
        }
        false
    }

    fn assert_no_overlap(level: &Level) {
        for (i, a) in level.platforms.iter().enumerate() {
            for b in &level.platforms[i + 1..] {
                assert!(
                    !overlaps(a, b, required_clearance(a, b, PLACEMENT_MARGIN)),
                    "{a:?} overlaps {b:?}"
                );
            }
        }
    }

    fn session(seed: u64) -> GenerationSession {
        GenerationSession::new(seed, GeneratorSettings::default())
    }

    #[test]
    fn test_level_one_scenario() {
        for seed in 0..20 {
            let generated = session(seed).generate_level(1, 0.0);
            let level = &generated.level;
            assert_eq!(level.spawn, Vec2::new(50.0, 500.0));

            let start = level.start_platform().expect("spawn slab");
            assert!((0.0..=60.0).contains(&start.x));
            assert!(level.platforms.len() >= 3, "needs an intermediate platform");

            let goal = level.goal_platform().expect("goal platform");
            assert!(goal.y < 500.0);
            assert_eq!(level.goal, Vec2::new(goal.x, goal.y));
            assert!(is_level_completable(level));
        }
    }

    #[test]
    fn test_level_ten_goal_is_higher_than_level_one() {
        let mut session = session(10);
        let mut level_one = 0.0;
        let mut level_ten = 0.0;
        for i in 0..50 {
            let now = i as f64 * 10_000.0;
            let one = session.generate_level(1, now);
            let ten = session.generate_level(10, now + 1.0);
            assert!(is_level_completable(&one.level));
            assert!(is_level_completable(&ten.level));
            level_one += one.level.goal.y;
            level_ten += ten.level.goal.y;
        }
        assert!(level_ten / 50.0 < level_one / 50.0);
    }

    #[test]
    fn test_forced_failure_returns_fallback() {
        let mut session =
            GenerationSession::with_validator(7, GeneratorSettings::default(), NeverCompletable);
        let generated = session.generate_level(5, 0.0);
        assert_eq!(generated.level, generate_fallback_level(5));
        assert!(generated.report.is_fallback);
        assert_eq!(generated.report.attempts, MAX_GENERATION_ATTEMPTS);
        assert_eq!(session.phase(), GenerationPhase::Done);
    }

    #[test]
    fn test_attempt_budget_is_hard_capped() {
        let settings = GeneratorSettings {
            max_attempts: 1000,
            ..GeneratorSettings::default()
        };
        let mut session = GenerationSession::with_validator(3, settings, NeverCompletable);
        assert_eq!(session.generate_level(8, 0.0).report.attempts, MAX_GENERATION_ATTEMPTS);
    }

    #[test]
    fn test_validator_called_at_most_ten_times() {
        let mut session = GenerationSession::with_validator(
            11,
            GeneratorSettings::default(),
            CountingValidator::default(),
        );
        for level in 1..=30 {
            let before = session.validator.calls.get();
            let generated = session.generate_level(level, level as f64 * 100.0);
            let calls = session.validator.calls.get() - before;
            assert!(calls <= MAX_GENERATION_ATTEMPTS);
            assert_eq!(calls, generated.report.attempts);
        }
    }

    #[test]
    fn test_same_seed_same_levels() {
        let mut a = session(99);
        let mut b = session(99);
        for level in 1..=8 {
            let now = level as f64 * 500.0;
            assert_eq!(a.generate_level(level, now), b.generate_level(level, now));
        }
    }

    #[test]
    fn test_idle_gap_starts_fresh_session() {
        let mut session = session(1);
        assert!(session.is_fresh_session(4, 0.0));

        session.generate_level(3, 10_000.0);
        assert!(!session.is_fresh_session(4, 11_000.0));
        assert!(session.is_fresh_session(4, 12_500.0));
        assert!(session.is_fresh_session(1, 10_500.0));

        session.reset();
        assert!(session.is_fresh_session(4, 10_500.0));
    }

    #[test]
    fn test_memory_survives_quick_level_transitions() {
        let mut session = session(2);
        session.generate_level(2, 0.0);
        let remembered: Vec<_> = session.selector().recent().collect();
        assert!(!remembered.is_empty());

        session.generate_level(3, 500.0);
        // A continuation never clears memory, so it now holds at least as much
        assert!(session.selector().recent().count() >= remembered.len().min(3));
    }

    #[test]
    fn test_consecutive_levels_open_with_a_new_pattern() {
        for seed in [3, 8, 21] {
            let mut session = session(seed);
            let mut previous: Option<GenerationReport> = None;
            for level in 1..=200 {
                let report = session.generate_level(level, level as f64 * 100.0).report;
                if let (Some(prev), Some(opening)) = (&previous, report.patterns.first()) {
                    assert!(
                        !prev.patterns.contains(opening),
                        "level {level} reopened with {opening} after {:?}",
                        prev.patterns
                    );
                }
                previous = Some(report);
            }
        }
    }

    #[test]
    fn test_applied_settings_take_effect() {
        let mut session = session(12);
        session.generate_level(1, 0.0);

        let settings = GeneratorSettings {
            transforms: false,
            envelope: JumpEnvelope {
                max_horizontal: 150.0,
                ..JumpEnvelope::default()
            },
            ..GeneratorSettings::default()
        };
        session.apply_settings(settings.clone());
        assert_eq!(session.settings(), &settings);
        assert_eq!(session.validator.envelope.max_horizontal, 150.0);
        assert_eq!(session.last_generation_ms(), Some(0.0));

        for level in 2..=10 {
            let report = session.generate_level(level, level as f64 * 100.0).report;
            assert_eq!(report.transform, None);
        }
    }

    #[test]
    fn test_report_serialises() {
        let generated = session(4).generate_level(6, 0.0);
        let json = generated.report.to_json().expect("serialisable");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["level_number"], 6);
        assert!(value["attempts"].as_u64().is_some_and(|a| (1..=10).contains(&a)));
    }

    #[test]
    fn test_toggles_are_honoured() {
        let settings = GeneratorSettings {
            hybrid_patterns: false,
            transforms: false,
            ..GeneratorSettings::default()
        };
        let mut session = GenerationSession::new(5, settings);
        for level in 1..=20 {
            let report = session.generate_level(level, level as f64).report;
            if !report.is_fallback {
                assert_eq!(report.patterns.len(), 1);
                assert_eq!(report.transform, None);
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn generated_levels_hold_their_invariants(seed in any::<u64>(), level in 1u32..40) {
            let mut session = session(seed);
            let generated = session.generate_level(level, 0.0);
            let envelope = JumpEnvelope::default();

            prop_assert!(generated.report.attempts >= 1);
            prop_assert!(generated.report.attempts <= MAX_GENERATION_ATTEMPTS);
            prop_assert!(is_level_completable(&generated.level));
            prop_assert!(reachable_by_platform_hops(&generated.level, &envelope));
            prop_assert_eq!(generated.level.count(PlatformCategory::Goal), 1);
            assert_no_overlap(&generated.level);

            for p in &generated.level.platforms {
                prop_assert_eq!(p.height, PLATFORM_HEIGHT);
                prop_assert!(p.width > 0.0);
                prop_assert_eq!(p.motion.is_some(), p.category == PlatformCategory::Moving);
            }
        }

        #[test]
        fn hybrid_levels_use_two_distinct_patterns(seed in any::<u64>(), level in 10u32..40) {
            let generated = session(seed).generate_level(level, 0.0);
            if generated.report.patterns.len() == 2 {
                prop_assert_ne!(generated.report.patterns[0], generated.report.patterns[1]);
            }
        }
    }
}
