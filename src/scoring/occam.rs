//! Occam-penalized continuous evaluators.
//!
//! Fit quality is expressed as a Gaussian data log-likelihood and traded
//! off against structural complexity: among equally fitting candidates,
//! the simpler program wins.

use std::f64::consts::PI;

use crate::schema::{BehavioralScore, ContinTable, OccamConfig, ProgramTree, SampleTable, Score};

use super::evaluators::{BehavioralScorer, ScoreError, Scorer};

/// Log density of the data given the model under Gaussian output noise.
///
/// With sum-of-squared-error `sse` over `n` rows and assumed variance `v`:
///
/// ```text
/// log dP(D|M) = n * log((2*pi*v)^(-1/2)) - sse / (2*v)
/// ```
///
/// The variance-dependent factor is precomputed at construction to avoid
/// repeated transcendental calls. A non-positive variance degrades the
/// precomputed term (and the whole likelihood) to zero instead of
/// dividing by zero or producing NaN; that guard is load-bearing.
#[derive(Debug, Clone, Copy)]
pub struct LogPdm {
    variance: f64,
    var_term: f64,
}

impl LogPdm {
    pub fn new(variance: f64) -> Self {
        let var_term = if variance > 0.0 {
            1.0 / (2.0 * PI * variance).ln().sqrt()
        } else {
            0.0
        };
        Self { variance, var_term }
    }

    /// Data log-likelihood for `sse` accumulated over `rows` samples.
    pub fn log_pdm(&self, sse: f64, rows: usize) -> f64 {
        if self.variance > 0.0 {
            rows as f64 * self.var_term - sse / (2.0 * self.variance)
        } else {
            0.0
        }
    }

    /// Per-row negative log-likelihood contribution (lower is better),
    /// oriented for behavioral scores. Falls back to the raw squared
    /// error when the variance is non-positive.
    pub fn row_nll(&self, squared_error: f64) -> f64 {
        if self.variance > 0.0 {
            squared_error / (2.0 * self.variance) - self.var_term
        } else {
            squared_error
        }
    }
}

/// Scalar Occam scorer: Gaussian log-likelihood of the fit minus a
/// complexity penalty of `complexity * ln(alphabet_size)`.
#[derive(Debug, Clone)]
pub struct OccamContinScore {
    target: ContinTable,
    samples: SampleTable,
    log_pdm: LogPdm,
    alphabet_log: f64,
}

impl OccamContinScore {
    pub fn new(target: ContinTable, samples: SampleTable, config: &OccamConfig) -> Self {
        assert_eq!(
            target.len(),
            samples.len(),
            "target table and sample table must have the same row count"
        );
        Self {
            target,
            samples,
            log_pdm: LogPdm::new(config.variance),
            alphabet_log: config.alphabet_size.ln(),
        }
    }
}

impl Scorer for OccamContinScore {
    fn score(&self, tree: &ProgramTree) -> Result<Score, ScoreError> {
        let mut sse = 0.0;
        for i in 0..self.samples.len() {
            let diff = tree.eval_contin(self.samples.row(i))? - self.target.value(i);
            sse += diff * diff;
        }
        let loglik = self.log_pdm.log_pdm(sse, self.samples.len());
        Ok(loglik - tree.complexity() as f64 * self.alphabet_log)
    }
}

/// Behavioral Occam scorer: per-row penalized negative log-likelihood,
/// with the complexity penalty spread evenly over the rows so that the
/// negated sum of the entries reproduces [`OccamContinScore`].
#[derive(Debug, Clone)]
pub struct OccamContinBScore {
    target: ContinTable,
    samples: SampleTable,
    log_pdm: LogPdm,
    alphabet_log: f64,
}

impl OccamContinBScore {
    pub fn new(target: ContinTable, samples: SampleTable, config: &OccamConfig) -> Self {
        assert_eq!(
            target.len(),
            samples.len(),
            "target table and sample table must have the same row count"
        );
        Self {
            target,
            samples,
            log_pdm: LogPdm::new(config.variance),
            alphabet_log: config.alphabet_size.ln(),
        }
    }
}

impl BehavioralScorer for OccamContinBScore {
    fn behavioral_score(&self, tree: &ProgramTree) -> Result<BehavioralScore, ScoreError> {
        let rows = self.samples.len();
        let penalty_per_row = tree.complexity() as f64 * self.alphabet_log / rows as f64;
        let mut bs = Vec::with_capacity(rows);
        for i in 0..rows {
            let diff = tree.eval_contin(self.samples.row(i))? - self.target.value(i);
            bs.push(self.log_pdm.row_nll(diff * diff) + penalty_per_row);
        }
        Ok(bs)
    }
}
