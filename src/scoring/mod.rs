//! Scoring module - evaluators, memoization, and the Pareto archive.
//!
//! # Overview
//!
//! The scoring pipeline runs: search-space instance → representation
//! decode → canonical reduction → evaluator (possibly through the memo
//! cache) → scalar score and/or behavioral vector → archive merge or
//! direct ranking.
//!
//! - **Evaluators** (`evaluators`): logical and continuous target
//!   evaluators, scalar and behavioral variants
//! - **Occam scoring** (`occam`): Gaussian-likelihood fitness with a
//!   complexity penalty
//! - **Composite fitness** (`composite`): instance decoding through the
//!   representation and reduction collaborators
//! - **Memo cache** (`cache`): bounded LRU over canonical-tree scores
//! - **Dominance archive** (`dominance`): incremental nondominated
//!   frontier of behavioral scores
//! - **Randomness** (`rng`): seeded source for sampled evaluation
//!
//! # Example
//!
//! ```rust
//! use evoscore::schema::{ProgramTree, TruthTable};
//! use evoscore::scoring::{LogicalScore, Scorer};
//!
//! let target = ProgramTree::And(vec![ProgramTree::Var(0), ProgramTree::Var(1)]);
//! let table = TruthTable::from_tree(&target, 2).unwrap();
//! let scorer = LogicalScore::new(table);
//!
//! // x0 alone disagrees with AND on one of the four rows
//! let candidate = ProgramTree::Var(0);
//! assert_eq!(scorer.score(&candidate).unwrap(), -1.0);
//! ```

mod cache;
mod composite;
mod dominance;
mod evaluators;
mod occam;
mod rng;

pub use cache::{MemoScorer, TreeCache};
pub use composite::{ComplexityScorer, Instance, Reducer, ReduceError, Representation};
pub use dominance::{NondominatedArchive, dominates};
pub use evaluators::{
    BehavioralScorer, BscoreBasedScore, ContinBScore, ContinScore, ContinScoreSqr, LogicalBScore,
    LogicalScore, ScoreError, Scorer,
};
pub use occam::{LogPdm, OccamContinBScore, OccamContinScore};
pub use rng::ScoreRng;
