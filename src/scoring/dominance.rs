//! Pareto dominance over behavioral scores and the nondominated archive.
//!
//! Behavioral-score entries are per-row errors, lower is better. One
//! vector dominates another only if it is never worse and strictly
//! better somewhere; componentwise-equal vectors are incomparable and
//! may therefore coexist in the archive.

use crate::schema::BehavioralScore;

/// Tri-valued dominance between two behavioral score vectors.
///
/// Returns `Some(true)` if `x` dominates `y`, `Some(false)` if `y`
/// dominates `x`, and `None` if the two are incomparable (including the
/// componentwise-equal case). The vectors must have equal length; a
/// mismatch is a caller contract violation.
pub fn dominates(x: &[f64], y: &[f64]) -> Option<bool> {
    assert_eq!(x.len(), y.len(), "behavioral scores must have equal length");
    let mut result = None;
    for (a, b) in x.iter().zip(y) {
        if a < b {
            if result == Some(false) {
                return None;
            }
            result = Some(true);
        } else if b < a {
            if result == Some(true) {
                return None;
            }
            result = Some(false);
        }
    }
    result
}

/// Archive of mutually nondominated `(identity, behavioral score)` entries.
///
/// After any merge the members are pairwise incomparable under
/// [`dominates`]. Merging is order independent: each candidate's fate
/// depends only on pairwise dominance against whatever currently
/// remains, and a dominating candidate displaces everything it
/// dominates before it is inserted.
#[derive(Debug, Clone)]
pub struct NondominatedArchive<K> {
    entries: Vec<(K, BehavioralScore)>,
}

impl<K> Default for NondominatedArchive<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> NondominatedArchive<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Merge a batch of scored candidates into the archive.
    ///
    /// For each candidate: if any current member dominates it, it is
    /// discarded; otherwise every member it dominates is removed and the
    /// candidate is inserted. Removal uses `swap_remove` without
    /// advancing the scan index, so no entry is skipped or revisited.
    pub fn merge<I>(&mut self, batch: I)
    where
        I: IntoIterator<Item = (K, BehavioralScore)>,
    {
        for (key, bs) in batch {
            let mut dominated = false;
            let mut i = 0;
            while i < self.entries.len() {
                match dominates(&bs, &self.entries[i].1) {
                    Some(true) => {
                        self.entries.swap_remove(i);
                    }
                    Some(false) => {
                        dominated = true;
                        break;
                    }
                    None => i += 1,
                }
            }
            if !dominated {
                self.entries.push((key, bs));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(K, BehavioralScore)> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[(K, BehavioralScore)] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_dominates_basic() {
        assert_eq!(dominates(&[0.0, 1.0], &[2.0, 2.0]), Some(true));
        assert_eq!(dominates(&[2.0, 2.0], &[0.0, 1.0]), Some(false));
        assert_eq!(dominates(&[0.0, 2.0], &[1.0, 0.0]), None);
    }

    #[test]
    fn test_equal_vectors_are_incomparable() {
        assert_eq!(dominates(&[1.0, 1.0], &[1.0, 1.0]), None);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_length_mismatch_panics() {
        dominates(&[1.0], &[1.0, 2.0]);
    }

    #[test]
    fn test_merge_scenario_from_frontier() {
        // D = {A:[0,0], B:[2,2]}; incoming C:[0,1] dominates B, is
        // incomparable with A; expected D' = {A, C}
        let mut archive = NondominatedArchive::new();
        archive.merge([("a", vec![0.0, 0.0]), ("b", vec![2.0, 2.0])]);
        assert_eq!(archive.len(), 2);

        archive.merge([("c", vec![0.0, 1.0])]);

        let mut keys: Vec<&str> = archive.iter().map(|(k, _)| *k).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_dominated_candidate_discarded() {
        let mut archive = NondominatedArchive::new();
        archive.merge([("a", vec![0.0, 0.0])]);
        archive.merge([("b", vec![1.0, 1.0])]);
        assert_eq!(archive.len(), 1);
        assert_eq!(archive.entries()[0].0, "a");
    }

    #[test]
    fn test_duplicate_valued_entries_coexist() {
        let mut archive = NondominatedArchive::new();
        archive.merge([("a", vec![1.0, 2.0]), ("b", vec![1.0, 2.0])]);
        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn test_merge_order_independent() {
        let batch = [
            ("a", vec![0.0, 3.0]),
            ("b", vec![3.0, 0.0]),
            ("c", vec![1.0, 1.0]),
            ("d", vec![2.0, 2.0]), // dominated by c
        ];

        let mut forward = NondominatedArchive::new();
        forward.merge(batch.iter().cloned());

        let mut backward = NondominatedArchive::new();
        backward.merge(batch.iter().rev().cloned());

        fn keys<'a>(archive: &NondominatedArchive<&'a str>) -> Vec<&'a str> {
            let mut keys: Vec<&str> = archive.iter().map(|(k, _)| *k).collect();
            keys.sort_unstable();
            keys
        }
        assert_eq!(keys(&forward), keys(&backward));
        assert_eq!(keys(&forward), vec!["a", "b", "c"]);
    }

    proptest! {
        #[test]
        fn prop_dominance_antisymmetric(
            x in proptest::collection::vec(0.0f64..10.0, 4),
            y in proptest::collection::vec(0.0f64..10.0, 4),
        ) {
            match (dominates(&x, &y), dominates(&y, &x)) {
                (Some(true), Some(true)) => prop_assert!(false, "both dominate"),
                (Some(true), other) => prop_assert_eq!(other, Some(false)),
                (Some(false), other) => prop_assert_eq!(other, Some(true)),
                (None, other) => prop_assert_eq!(other, None),
            }
        }

        #[test]
        fn prop_dominance_irreflexive(
            x in proptest::collection::vec(0.0f64..10.0, 4),
        ) {
            prop_assert_eq!(dominates(&x, &x), None);
        }

        #[test]
        fn prop_archive_stays_mutually_nondominated(
            batches in proptest::collection::vec(
                proptest::collection::vec(
                    proptest::collection::vec(0.0f64..4.0, 3),
                    1..6,
                ),
                1..6,
            ),
        ) {
            let mut archive = NondominatedArchive::new();
            let mut id = 0u64;
            for batch in batches {
                archive.merge(batch.into_iter().map(|bs| {
                    id += 1;
                    (id, bs)
                }));
            }

            let entries = archive.entries();
            for i in 0..entries.len() {
                for j in (i + 1)..entries.len() {
                    prop_assert_eq!(dominates(&entries[i].1, &entries[j].1), None);
                }
            }
        }
    }
}
