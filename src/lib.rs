//! Fitness evaluation and memoization core for evolutionary program search.
//!
//! Given a candidate program (a small syntax tree) and a target behavior,
//! this crate computes how well the candidate matches the target,
//! penalizes structural complexity, and avoids recomputing scores for
//! programs already seen. Two structures carry most of the weight: a
//! bounded memo cache keyed by canonical tree identity, and a
//! Pareto-dominance archive that maintains the nondominated frontier of
//! per-row behavioral scores incrementally, without re-sorting.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: candidate trees, target tables, score and config types
//! - `scoring`: evaluators, Occam penalty, memo cache, dominance archive
//!
//! The program representation, its canonicalizing reduction engine, and
//! the outer population loop live outside this crate and are consumed
//! through the [`scoring::Representation`] and [`scoring::Reducer`]
//! traits.
//!
//! # Example
//!
//! ```rust
//! use evoscore::schema::{ProgramTree, TruthTable};
//! use evoscore::scoring::{LogicalBScore, BehavioralScorer, NondominatedArchive};
//!
//! // Target: disjunction over two inputs
//! let target = ProgramTree::Or(vec![ProgramTree::Var(0), ProgramTree::Var(1)]);
//! let table = TruthTable::from_tree(&target, 2).unwrap();
//! let bscore = LogicalBScore::new(table);
//!
//! // Track competing candidates on the Pareto frontier
//! let mut archive = NondominatedArchive::new();
//! for (id, candidate) in [ProgramTree::Var(0), ProgramTree::Var(1)].iter().enumerate() {
//!     let bs = bscore.behavioral_score(candidate).unwrap();
//!     archive.merge([(id, bs)]);
//! }
//! assert_eq!(archive.len(), 2); // incomparable, both kept
//! ```

pub mod schema;
pub mod scoring;

// Re-export commonly used types
pub use schema::{BehavioralScore, CompositeFitness, ProgramTree, Score};
pub use scoring::{MemoScorer, NondominatedArchive, Scorer};
