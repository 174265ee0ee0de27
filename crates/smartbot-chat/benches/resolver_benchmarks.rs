//! Benchmarks for reply resolution across each matching step.
//!
//! Inputs are chosen so every resolution step (exact, substring, keyword
//! group, fallback) is exercised. Fallback inputs scan the whole table and
//! every keyword group before drawing, so they are the worst case.

use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use smartbot_chat::{FixedIndex, ResponseResolver};

fn bench_resolve_steps(c: &mut Criterion) {
    let resolver = ResponseResolver::builtin_with_random(FixedIndex(0));

    let mut group = c.benchmark_group("resolve");
    group.sample_size(200);
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("exact", |b| b.iter(|| resolver.resolve("What Can You Do")));
    group.bench_function("substring", |b| {
        b.iter(|| resolver.resolve("could you give me some resume tips please"))
    });
    group.bench_function("keyword_group", |b| {
        b.iter(|| resolver.resolve("thank you so much"))
    });
    group.bench_function("fallback", |b| {
        b.iter(|| resolver.resolve("zzz-unmatched-xyz"))
    });

    group.finish();
}

/// Resolution of a long message with no trigger, the slowest path.
fn bench_resolve_long_unmatched(c: &mut Criterion) {
    let resolver = ResponseResolver::builtin_with_random(FixedIndex(0));
    let long_input = "lorem ipsum dolor sit amet ".repeat(80);

    c.bench_function("resolve_long_unmatched", |b| {
        b.iter(|| resolver.resolve(&long_input))
    });
}

criterion_group!(benches, bench_resolve_steps, bench_resolve_long_unmatched);
criterion_main!(benches);
