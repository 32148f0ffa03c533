//! Benchmarks for the hierarchical partition
//!
//! Run with: cargo bench --package pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use history::CandidateId;
use pipeline::grouping::{flatten, partition};
use pipeline::NamedPredicateSet;

fn layers() -> Vec<NamedPredicateSet> {
    vec![
        NamedPredicateSet::new("magnitude")
            .with("above_100", |x: &CandidateId| *x > 100)
            .with("below_50", |x: &CandidateId| *x > 0 && *x < 50)
            .with("rest", |_: &CandidateId| true),
        NamedPredicateSet::new("parity")
            .with("even", |x: &CandidateId| x % 2 == 0)
            .with("odd", |_: &CandidateId| true),
    ]
}

fn bench_partition(c: &mut Criterion) {
    let items: Vec<CandidateId> = (0..10_000).collect();
    let layers = layers();

    c.bench_function("partition_10k_two_layers", |b| {
        b.iter(|| {
            let groups = partition(black_box(&items), black_box(&layers));
            black_box(flatten(groups))
        })
    });
}

criterion_group!(benches, bench_partition);
criterion_main!(benches);
