//! Benchmarks for the expand and collapse algorithms on cluster-sized hostlists.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use hostlist::{collapse_hostlist, expand_hostlist, numerically_sorted};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

const SMALL: &str = "node[01-64]";
const LARGE: &str = "rack[01-16]-node[001-256],gpu[1-512],login[1-4]";

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("hostlist");

    group.bench_function("expand_small", |b| {
        b.iter(|| expand_hostlist(black_box(SMALL)));
    });

    group.bench_function("expand_large", |b| {
        b.iter(|| expand_hostlist(black_box(LARGE)));
    });

    let large_hosts = expand_hostlist(LARGE).expect("benchmark input is a valid hostlist");
    let large_sorted = numerically_sorted(large_hosts.clone());

    group.bench_function("sort_large", |b| {
        b.iter(|| numerically_sorted(black_box(large_hosts.clone())));
    });

    group.bench_function("collapse_large", |b| {
        b.iter(|| collapse_hostlist(black_box(&large_sorted), None));
    });

    group.finish();
}
