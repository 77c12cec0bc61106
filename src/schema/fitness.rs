//! Score types shared by all evaluators.
//!
//! Sign convention, fixed crate-wide: every scalar [`Score`] is
//! higher-is-better, and so are both fields of [`CompositeFitness`].
//! Evaluators that naturally count errors negate them before returning.
//! The entries of a [`BehavioralScore`] are the exception: they are
//! per-row errors, lower is better, which is the orientation the
//! dominance relation and the score-from-bscore adapter assume.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Scalar fitness; higher is better.
pub type Score = f64;

/// Per-sample-row error vector; each entry is lower-is-better.
pub type BehavioralScore = Vec<f64>;

/// Structural size of a candidate tree.
pub type Complexity = i64;

/// Two-objective fitness: a scalar score paired with a parsimony term.
///
/// Ordered lexicographically, both fields higher-is-better. The
/// complexity-based constructor stores the negated tree complexity as
/// parsimony; the memoized scorer stores `base_count - active_fields`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CompositeFitness {
    pub score: Score,
    pub parsimony: i64,
}

impl CompositeFitness {
    /// Sentinel returned for candidates that failed to reduce or evaluate.
    /// Ranks below every real fitness but stays totally ordered.
    pub const WORST: Self = Self {
        score: f64::NEG_INFINITY,
        parsimony: i64::MIN,
    };

    pub fn new(score: Score, parsimony: i64) -> Self {
        Self { score, parsimony }
    }
}

impl Ord for CompositeFitness {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.parsimony.cmp(&other.parsimony))
    }
}

impl PartialOrd for CompositeFitness {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CompositeFitness {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CompositeFitness {}
