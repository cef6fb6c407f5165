//! Weighted pattern choice with a short recency memory

use std::collections::VecDeque;

use super::patterns::PatternKind;
use super::rng::LevelRng;

/// How many recent picks are remembered
pub const RECENCY_DEPTH: usize = 3;
/// Weight factor for patterns remembered but not the very last pick
const RECENT_PENALTY: f32 = 0.5;

/// Picks patterns so consecutive levels never repeat the same motif
#[derive(Debug, Clone, Default)]
pub struct PatternSelector {
    recent: VecDeque<PatternKind>,
    /// Every pattern the previously accepted level was built from
    last_level: Vec<PatternKind>,
}

impl PatternSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the recency memory (fresh play session)
    pub fn reset(&mut self) {
        self.recent.clear();
        self.last_level.clear();
    }

    pub fn recent(&self) -> impl Iterator<Item = PatternKind> + '_ {
        self.recent.iter().copied()
    }

    pub fn last(&self) -> Option<PatternKind> {
        self.recent.back().copied()
    }

    pub fn last_level(&self) -> &[PatternKind] {
        &self.last_level
    }

    /// Record the patterns of the level that was handed out; none of them
    /// may open the next level
    pub fn commit_level(&mut self, patterns: &[PatternKind]) {
        self.last_level = patterns.to_vec();
    }

    /// Weights after applying the recency rules: the last pick and `exclude`
    /// are ruled out, older remembered picks are halved
    fn weights(&self, exclude: &[PatternKind]) -> [f32; PatternKind::ALL.len()] {
        PatternKind::ALL.map(|kind| {
            if Some(kind) == self.last() || exclude.contains(&kind) {
                0.0
            } else if self.recent.contains(&kind) {
                kind.weight() * RECENT_PENALTY
            } else {
                kind.weight()
            }
        })
    }

    fn draw(&mut self, rng: &mut LevelRng, weights: &[f32]) -> PatternKind {
        let kind = rng
            .weighted_index(weights)
            .map(|i| PatternKind::ALL[i])
            .unwrap_or(PatternKind::Linear);
        self.remember(kind);
        kind
    }

    fn remember(&mut self, kind: PatternKind) {
        if self.recent.len() == RECENCY_DEPTH {
            self.recent.pop_front();
        }
        self.recent.push_back(kind);
    }

    /// Choose the main pattern for the next attempt
    pub fn choose(&mut self, rng: &mut LevelRng) -> PatternKind {
        let weights = self.weights(&self.last_level);
        self.draw(rng, &weights)
    }

    /// Choose a second pattern for a hybrid level; never the same as `primary`
    pub fn choose_hybrid(&mut self, rng: &mut LevelRng, primary: PatternKind) -> PatternKind {
        let weights = self.weights(&[primary]);
        self.draw(rng, &weights)
    }
}
