//! Benchmarks for the memoized scorer and the dominance archive.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use evoscore::schema::{CacheConfig, ProgramTree, TruthTable};
use evoscore::scoring::{
    Instance, LogicalScore, MemoScorer, NondominatedArchive, ReduceError, Representation,
};

/// Minimal representation: the instance lists variable indices and the
/// canonical exemplar is their sorted, deduplicated disjunction.
#[derive(Debug, Clone, Default)]
struct DisjunctionRep {
    exemplar: Vec<u64>,
}

impl Representation for DisjunctionRep {
    fn transform(&mut self, inst: &Instance) {
        self.exemplar = inst.0.clone();
    }

    fn canonical_exemplar(&self) -> Result<ProgramTree, ReduceError> {
        let mut vars = self.exemplar.clone();
        vars.sort_unstable();
        vars.dedup();
        match vars.len() {
            0 => Err(ReduceError::InvalidTree("empty exemplar".into())),
            1 => Ok(ProgramTree::Var(vars[0] as usize)),
            _ => Ok(ProgramTree::Or(
                vars.into_iter().map(|v| ProgramTree::Var(v as usize)).collect(),
            )),
        }
    }

    fn active_fields(&self, inst: &Instance) -> usize {
        inst.0.len()
    }
}

fn bench_memo_hit_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("memo_hit_path");

    for arity in [4usize, 8, 12] {
        let target = ProgramTree::Or((0..arity).map(ProgramTree::Var).collect());
        let table = TruthTable::from_tree(&target, arity).unwrap();
        let scorer = MemoScorer::new(LogicalScore::new(table), &CacheConfig::default());

        let inst = Instance((0..arity as u64).collect());
        let mut rep = DisjunctionRep::default();
        // warm the cache so the benchmark measures the hit path
        scorer.score_instance(&mut rep, &inst);

        group.bench_with_input(BenchmarkId::from_parameter(arity), &arity, |b, _| {
            b.iter(|| black_box(scorer.score_instance(&mut rep, black_box(&inst))));
        });
    }

    group.finish();
}

fn bench_archive_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("archive_merge");

    for archive_size in [16usize, 128, 1024] {
        // mutually nondominated seed entries along an anti-diagonal
        let seed: Vec<(u64, Vec<f64>)> = (0..archive_size)
            .map(|i| {
                (
                    i as u64,
                    vec![i as f64, (archive_size - i) as f64],
                )
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(archive_size),
            &archive_size,
            |b, &size| {
                b.iter(|| {
                    let mut archive = NondominatedArchive::new();
                    archive.merge(seed.iter().cloned());
                    // one batch of incoming candidates, half dominated
                    archive.merge((0..32u64).map(|i| {
                        (size as u64 + i, vec![i as f64 + 0.5, (32 - i) as f64 + 0.5])
                    }));
                    black_box(archive.len())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_memo_hit_path, bench_archive_merge);
criterion_main!(benches);
