//! Target tables for logical and continuous scoring.
//!
//! A target behavior is held as a read-only table: a complete truth table
//! for logical domains, or a table of per-row outputs over a finite set of
//! randomly drawn probe points for continuous domains (so that evaluation
//! cost stays bounded on infinite input spaces).

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::tree::{EvalError, ProgramTree};

/// Complete truth table over `2^arity` input rows.
///
/// Row `r` binds variable `k` to bit `k` of `r`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruthTable {
    outputs: Vec<bool>,
    arity: usize,
}

impl TruthTable {
    /// Build from raw row outputs; the length must be a power of two.
    pub fn from_rows(outputs: Vec<bool>) -> Self {
        assert!(
            !outputs.is_empty() && outputs.len().is_power_of_two(),
            "truth table length must be a power of two"
        );
        let arity = outputs.len().trailing_zeros() as usize;
        Self { outputs, arity }
    }

    /// Build by enumerating a target tree over all `2^arity` rows.
    pub fn from_tree(tree: &ProgramTree, arity: usize) -> Result<Self, EvalError> {
        let mut outputs = Vec::with_capacity(1 << arity);
        for row in 0..1usize << arity {
            let inputs = Self::inputs_for(row, arity);
            outputs.push(tree.eval_bool(&inputs)?);
        }
        Ok(Self { outputs, arity })
    }

    /// Input row `r`: variable `k` is bit `k` of `r`.
    pub fn inputs_for(row: usize, arity: usize) -> Vec<bool> {
        (0..arity).map(|k| row >> k & 1 == 1).collect()
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Number of rows (`2^arity`).
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    pub fn output(&self, row: usize) -> bool {
        self.outputs[row]
    }
}

/// Probe points for continuous evaluation: one row of `arity` inputs each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleTable {
    rows: Vec<Vec<f64>>,
    arity: usize,
}

impl SampleTable {
    /// Build from explicit rows; all rows must have the same width.
    pub fn from_rows(rows: Vec<Vec<f64>>, arity: usize) -> Self {
        assert!(
            rows.iter().all(|r| r.len() == arity),
            "all sample rows must have width equal to the arity"
        );
        Self { rows, arity }
    }

    /// Draw `count` rows uniformly from `bounds` using the supplied source.
    ///
    /// Given the same source state this is deterministic, which is what the
    /// reproducibility invariant for sampled continuous domains rests on.
    pub fn random<R: Rng>(count: usize, arity: usize, bounds: (f64, f64), rng: &mut R) -> Self {
        let rows = (0..count)
            .map(|_| (0..arity).map(|_| rng.gen_range(bounds.0..=bounds.1)).collect())
            .collect();
        Self { rows, arity }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.rows[i]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

/// Target outputs for continuous scoring, one per sample row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinTable {
    values: Vec<f64>,
}

impl ContinTable {
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Evaluate a target tree over every sample row.
    pub fn from_tree(tree: &ProgramTree, samples: &SampleTable) -> Result<Self, EvalError> {
        let values = samples
            .rows()
            .iter()
            .map(|row| tree.eval_contin(row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, i: usize) -> f64 {
        self.values[i]
    }
}
