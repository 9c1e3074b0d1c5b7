//! Ordered edge map churn benchmarks.
//!
//! Measures interleaved insertions and removals on a single adjacency map,
//! the workload a high-degree vertex sees while deltas are applied.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use graphdelta_core::OrderedEdgeMap;

const SEED: u64 = 42;

/// Map sizes to benchmark.
const KEY_COUNTS: &[usize] = &[100, 1_000, 10_000];

fn random_keys(count: usize) -> Vec<usize> {
    let mut rng = SmallRng::seed_from_u64(SEED);
    (0..count)
        .map(|_| rng.gen_range(0..count.saturating_mul(4)))
        .collect()
}

fn edge_map_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_map_churn");
    for &count in KEY_COUNTS {
        let keys = random_keys(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &keys, |b, keys| {
            b.iter(|| {
                let mut map = OrderedEdgeMap::new();
                for &key in keys {
                    map.insert(key, key);
                }
                for &key in keys.iter().step_by(2) {
                    map.remove(key);
                }
                map.len()
            });
        });
    }
    group.finish();
}

fn edge_map_ordered_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_map_ordered_scan");
    for &count in KEY_COUNTS {
        let map: OrderedEdgeMap<usize> = random_keys(count).into_iter().map(|k| (k, k)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &map, |b, map| {
            b.iter(|| map.keys().sum::<usize>());
        });
    }
    group.finish();
}

criterion_group!(benches, edge_map_churn, edge_map_ordered_scan);
criterion_main!(benches);
