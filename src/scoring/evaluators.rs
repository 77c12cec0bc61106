//! Target evaluators mapping candidate trees to fitness scores.
//!
//! Every scalar evaluator here returns higher-is-better scores, so the
//! error-counting variants negate their error before returning. The
//! behavioral variants return one error value per target row (lower is
//! better per entry), the shape the Pareto archive compares.

use log::warn;

use crate::schema::{BehavioralScore, ContinTable, EvalError, ProgramTree, SampleTable, Score, TruthTable};

use super::composite::ReduceError;

/// Errors surfaced while scoring a candidate.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("candidate evaluation failed: {0}")]
    Eval(#[from] EvalError),
    #[error("canonical reduction failed: {0}")]
    Reduce(#[from] ReduceError),
}

/// Scores a candidate tree with a single scalar; higher is better.
pub trait Scorer {
    fn score(&self, tree: &ProgramTree) -> Result<Score, ScoreError>;
}

/// Scores a candidate tree per target row.
pub trait BehavioralScorer {
    fn behavioral_score(&self, tree: &ProgramTree) -> Result<BehavioralScore, ScoreError>;
}

/// Hamming-distance scorer over a complete truth table.
///
/// Enumerates all `2^arity` rows and returns the negated mismatch count.
#[derive(Debug, Clone)]
pub struct LogicalScore {
    target: TruthTable,
}

impl LogicalScore {
    pub fn new(target: TruthTable) -> Self {
        Self { target }
    }
}

impl Scorer for LogicalScore {
    fn score(&self, tree: &ProgramTree) -> Result<Score, ScoreError> {
        let arity = self.target.arity();
        let mut mismatches = 0u64;
        for row in 0..self.target.len() {
            let inputs = TruthTable::inputs_for(row, arity);
            if tree.eval_bool(&inputs)? != self.target.output(row) {
                mismatches += 1;
            }
        }
        Ok(-(mismatches as Score))
    }
}

/// Behavioral variant of [`LogicalScore`]: one entry per truth-table row,
/// 0 when the candidate matches the target output, 1 when it does not.
#[derive(Debug, Clone)]
pub struct LogicalBScore {
    target: TruthTable,
}

impl LogicalBScore {
    pub fn new(target: TruthTable) -> Self {
        Self { target }
    }
}

impl BehavioralScorer for LogicalBScore {
    fn behavioral_score(&self, tree: &ProgramTree) -> Result<BehavioralScore, ScoreError> {
        let arity = self.target.arity();
        let mut bs = Vec::with_capacity(self.target.len());
        for row in 0..self.target.len() {
            let inputs = TruthTable::inputs_for(row, arity);
            let matched = tree.eval_bool(&inputs)? == self.target.output(row);
            bs.push(if matched { 0.0 } else { 1.0 });
        }
        Ok(bs)
    }
}

/// Continuous scorer: negated sum of absolute errors over the sample table.
#[derive(Debug, Clone)]
pub struct ContinScore {
    target: ContinTable,
    samples: SampleTable,
}

impl ContinScore {
    pub fn new(target: ContinTable, samples: SampleTable) -> Self {
        assert_eq!(
            target.len(),
            samples.len(),
            "target table and sample table must have the same row count"
        );
        Self { target, samples }
    }
}

impl Scorer for ContinScore {
    fn score(&self, tree: &ProgramTree) -> Result<Score, ScoreError> {
        let mut err = 0.0;
        for i in 0..self.samples.len() {
            err += (tree.eval_contin(self.samples.row(i))? - self.target.value(i)).abs();
        }
        Ok(-err)
    }
}

/// Alternate error metric over the same inputs: negated sum of squared errors.
#[derive(Debug, Clone)]
pub struct ContinScoreSqr {
    target: ContinTable,
    samples: SampleTable,
}

impl ContinScoreSqr {
    pub fn new(target: ContinTable, samples: SampleTable) -> Self {
        assert_eq!(
            target.len(),
            samples.len(),
            "target table and sample table must have the same row count"
        );
        Self { target, samples }
    }
}

impl Scorer for ContinScoreSqr {
    fn score(&self, tree: &ProgramTree) -> Result<Score, ScoreError> {
        let mut sse = 0.0;
        for i in 0..self.samples.len() {
            let diff = tree.eval_contin(self.samples.row(i))? - self.target.value(i);
            sse += diff * diff;
        }
        Ok(-sse)
    }
}

/// Behavioral continuous scorer: per-sample squared error.
#[derive(Debug, Clone)]
pub struct ContinBScore {
    target: ContinTable,
    samples: SampleTable,
}

impl ContinBScore {
    pub fn new(target: ContinTable, samples: SampleTable) -> Self {
        assert_eq!(
            target.len(),
            samples.len(),
            "target table and sample table must have the same row count"
        );
        Self { target, samples }
    }
}

impl BehavioralScorer for ContinBScore {
    fn behavioral_score(&self, tree: &ProgramTree) -> Result<BehavioralScore, ScoreError> {
        let mut bs = Vec::with_capacity(self.samples.len());
        for i in 0..self.samples.len() {
            let diff = tree.eval_contin(self.samples.row(i))? - self.target.value(i);
            bs.push(diff * diff);
        }
        Ok(bs)
    }
}

/// Scalar score derived from a behavioral scorer: the negated sum of the
/// per-row errors. Useful when a cache sits over the behavioral score.
///
/// An evaluation failure inside the behavioral computation is caught,
/// logged, and mapped to the worst possible score so the surrounding
/// search keeps making progress.
#[derive(Debug, Clone)]
pub struct BscoreBasedScore<B> {
    bscore: B,
}

impl<B: BehavioralScorer> BscoreBasedScore<B> {
    pub fn new(bscore: B) -> Self {
        Self { bscore }
    }
}

impl<B: BehavioralScorer> Scorer for BscoreBasedScore<B> {
    fn score(&self, tree: &ProgramTree) -> Result<Score, ScoreError> {
        match self.bscore.behavioral_score(tree) {
            Ok(bs) => Ok(-bs.iter().sum::<f64>()),
            Err(err) => {
                warn!("candidate failed to evaluate, assigning worst score: {err}");
                Ok(Score::NEG_INFINITY)
            }
        }
    }
}
