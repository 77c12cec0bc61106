//! Bounded memoization of canonical-tree scores.
//!
//! Scoring dominates per-candidate cost, and the search revisits
//! semantically equivalent candidates constantly, so the memoized scorer
//! keys previously computed scalar scores by the canonical tree. The key
//! must already be in canonical form; the representation guarantees that
//! before anything touches the cache.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use log::warn;
use rayon::prelude::*;

use crate::schema::{CacheConfig, CompositeFitness, ProgramTree, Score};

use super::composite::{Instance, Representation};
use super::evaluators::Scorer;

struct CacheEntry {
    score: Score,
    id: u64,
}

/// Entry-bounded LRU cache keyed by canonical trees.
///
/// Recency is tracked with a lazily invalidated deque: every touch pushes
/// a fresh `(key, id)` pair, and pairs whose id no longer matches the map
/// entry are skipped during eviction.
pub struct TreeCache {
    map: HashMap<ProgramTree, CacheEntry>,
    order: VecDeque<(ProgramTree, u64)>,
    capacity: usize,
    counter: u64,
}

impl TreeCache {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "cache capacity must be non-zero");
        Self {
            map: HashMap::new(),
            order: VecDeque::new(),
            capacity,
            counter: 0,
        }
    }

    /// Look up a canonical tree, refreshing its recency on a hit.
    pub fn lookup(&mut self, key: &ProgramTree) -> Option<Score> {
        if let Some(entry) = self.map.get_mut(key) {
            let id = self.counter;
            self.counter = self.counter.wrapping_add(1);
            entry.id = id;
            let score = entry.score;
            self.order.push_back((key.clone(), id));
            self.maybe_compact();
            return Some(score);
        }
        None
    }

    /// Insert a freshly scored tree. If the cache would exceed its
    /// capacity, the least recently accessed entry is evicted first,
    /// exactly one per overflowing insertion.
    pub fn insert(&mut self, key: ProgramTree, score: Score) {
        let id = self.counter;
        self.counter = self.counter.wrapping_add(1);
        self.map.insert(key.clone(), CacheEntry { score, id });
        self.order.push_back((key, id));
        if self.map.len() > self.capacity {
            self.evict_one();
        }
        self.maybe_compact();
    }

    /// Stale pairs accumulate one per touch; compact before the recency
    /// log outgrows the live entries by more than a constant factor.
    fn maybe_compact(&mut self) {
        if self.order.len() > self.map.len().max(4) * 4 {
            self.compact();
        }
    }

    fn evict_one(&mut self) {
        while let Some((key, id)) = self.order.pop_front() {
            if self.map.get(&key).is_some_and(|entry| entry.id == id) {
                self.map.remove(&key);
                break;
            }
        }
    }

    fn compact(&mut self) {
        let map = &self.map;
        self.order
            .retain(|(key, id)| map.get(key).is_some_and(|entry| entry.id == *id));
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Memoizing composite scorer.
///
/// Wraps a scalar evaluator with the bounded tree cache and pairs the
/// (cached or freshly computed) score with a parsimony bonus of
/// `base_count - active_fields(instance)`: instances that activate
/// fewer encoding dimensions rank higher at equal score.
///
/// Failures never escape: a reduction or evaluation failure is logged
/// and mapped to [`CompositeFitness::WORST`], and the cache is left
/// untouched on those paths.
pub struct MemoScorer<S> {
    scorer: S,
    cache: Mutex<TreeCache>,
    base_count: i64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<S: Scorer> MemoScorer<S> {
    pub fn new(scorer: S, config: &CacheConfig) -> Self {
        Self {
            scorer,
            cache: Mutex::new(TreeCache::new(config.capacity)),
            base_count: config.base_count,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Score one instance through the cache.
    pub fn score_instance<R: Representation>(
        &self,
        rep: &mut R,
        inst: &Instance,
    ) -> CompositeFitness {
        rep.transform(inst);
        let tree = match rep.canonical_exemplar() {
            Ok(tree) => tree,
            Err(err) => {
                warn!("canonical reduction failed, assigning worst fitness: {err}");
                return CompositeFitness::WORST;
            }
        };

        // One critical section covers lookup, evaluation, and insertion,
        // so concurrent callers cannot interleave destructively.
        let score = {
            let mut cache = self.cache.lock().unwrap();
            match cache.lookup(&tree) {
                Some(score) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    score
                }
                None => {
                    let score = match self.scorer.score(&tree) {
                        Ok(score) => score,
                        Err(err) => {
                            warn!("candidate failed to evaluate, assigning worst fitness: {err}");
                            return CompositeFitness::WORST;
                        }
                    };
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    cache.insert(tree, score);
                    score
                }
            }
        };

        let bonus = self.base_count - rep.active_fields(inst) as i64;
        CompositeFitness::new(score, bonus)
    }

    /// Number of genuine evaluator invocations (cache misses). A
    /// diagnostic, not used for correctness.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Number of cache hits.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of distinct canonical trees currently cached.
    pub fn cached(&self) -> usize {
        self.cache.lock().unwrap().len()
    }

    /// Score a batch of instances in parallel. Each worker clones the
    /// representation context, so exemplar state is never shared.
    pub fn score_batch<R>(&self, rep: &R, instances: &[Instance]) -> Vec<CompositeFitness>
    where
        S: Sync,
        R: Representation + Clone + Sync,
    {
        instances
            .par_iter()
            .map_init(
                || rep.clone(),
                |rep, inst| self.score_instance(rep, inst),
            )
            .collect()
    }
}
