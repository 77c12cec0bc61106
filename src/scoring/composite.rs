//! Instance decoding and composite (score, complexity) fitness.
//!
//! The representation and the reduction engine are external
//! collaborators, consumed through traits. A candidate tree must be
//! brought to canonical form before it is scored, compared for
//! complexity, or used as a cache key: two semantically equivalent
//! decodings must reduce to bit-identical trees or cache lookups and
//! parsimony comparisons are unsound.

use serde::{Deserialize, Serialize};

use crate::schema::{CompositeFitness, ProgramTree};

use super::evaluators::{ScoreError, Scorer};

/// A fixed-width encoded point in the search space, decoded into a
/// candidate tree by the [`Representation`]. Opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instance(pub Vec<u64>);

/// Errors reported by the canonicalizing reduction engine.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ReduceError {
    #[error("reduction did not terminate within {limit} rewrites")]
    NonTerminating { limit: usize },
    #[error("reduction produced an invalid tree: {0}")]
    InvalidTree(String),
}

/// Canonicalizing reduction engine.
///
/// Must be idempotent: reducing an already-canonical tree returns it
/// unchanged. Fails on malformed input rather than looping forever.
pub trait Reducer {
    fn reduce_to_canonical(&self, tree: &ProgramTree) -> Result<ProgramTree, ReduceError>;
}

/// Decodes instances into candidate trees.
///
/// Holds the mutable exemplar state the search loop owns; each scoring
/// call passes it in by reference, so there is no hidden global state.
pub trait Representation {
    /// Imprint the instance onto the internal exemplar.
    fn transform(&mut self, inst: &Instance);

    /// Canonical (fully reduced) form of the current exemplar.
    fn canonical_exemplar(&self) -> Result<ProgramTree, ReduceError>;

    /// Number of encoding dimensions the instance activates.
    fn active_fields(&self, inst: &Instance) -> usize;
}

/// Pairs an injected scalar score with the canonical tree's structural
/// complexity: decode, canonicalize, score, measure.
///
/// The parsimony field carries the negated complexity so that both
/// objectives are higher-is-better. Reduction failure is the
/// collaborator's report and propagates; the memoized layer above maps
/// it to the sentinel fitness.
#[derive(Debug, Clone)]
pub struct ComplexityScorer<S> {
    scorer: S,
}

impl<S: Scorer> ComplexityScorer<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    pub fn score_instance<R: Representation>(
        &self,
        rep: &mut R,
        inst: &Instance,
    ) -> Result<CompositeFitness, ScoreError> {
        rep.transform(inst);
        let tree = rep.canonical_exemplar()?;
        let score = self.scorer.score(&tree)?;
        Ok(CompositeFitness::new(score, -tree.complexity()))
    }
}
