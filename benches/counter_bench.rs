//! Counter construction and sorted-view benchmarks.
//!
//! `first_view` measures the sort performed on the first query of a fresh
//! counter; `memoized_view` measures repeated queries that reuse it.

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tallyflow::counter::Counter;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

/// Pre-generates a source with roughly `size / 8` distinct values.
fn generate_source(size: usize) -> Vec<u64> {
    (0..size as u64).map(|index| (index * 7919) % (size as u64 / 8 + 1)).collect()
}

fn benchmark_construction(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("counter_construction");

    for size in SIZES {
        let source = generate_source(size);
        group.bench_with_input(BenchmarkId::new("from_vec", size), &size, |bencher, _| {
            bencher.iter_batched(
                || source.clone(),
                |elements| black_box(Counter::from(black_box(elements))),
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn benchmark_first_view(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("counter_first_view");

    for size in SIZES {
        let counter = Counter::from(generate_source(size));
        group.bench_with_input(BenchmarkId::new("most_common", size), &size, |bencher, _| {
            bencher.iter_batched(
                || counter.clone(),
                |fresh| black_box(fresh.most_common(10).len()),
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn benchmark_memoized_view(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("counter_memoized_view");

    for size in SIZES {
        let counter = Counter::from(generate_source(size));
        let _ = counter.descending();
        group.bench_with_input(BenchmarkId::new("most_common", size), &size, |bencher, _| {
            bencher.iter(|| black_box(counter.most_common(black_box(10)).len()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_construction,
    benchmark_first_view,
    benchmark_memoized_view
);
criterion_main!(benches);
