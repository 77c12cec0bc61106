//! Seeded random source for sampled evaluation.

use rand::prelude::*;

use crate::schema::SampleTable;

/// Random number source injected into stochastic evaluation.
///
/// One owner per evaluator instance: scores derived from the same seed and
/// the same inputs are identical, which the search relies on when it
/// distributes evaluation across workers.
pub struct ScoreRng {
    rng: StdRng,
}

impl ScoreRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Draw a table of probe points, uniform over `bounds`.
    pub fn sample_table(&mut self, count: usize, arity: usize, bounds: (f64, f64)) -> SampleTable {
        SampleTable::random(count, arity, bounds, &mut self.rng)
    }

    /// Generate next u64 for seeding partitioned per-worker sources.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.r#gen()
    }
}
