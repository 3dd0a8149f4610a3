//! Benchmarks for chain construction and batch scanning
//!
//! The failing chains measure the cost of short-circuiting, which should stay
//! flat no matter how many operations follow the first failure.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use fieldstep_validator::FieldExt;
use fieldstep_validator::prelude::*;

// ============================================================================
// Sync chains
// ============================================================================

fn bench_sync_chain(c: &mut Criterion) {
    c.bench_function("sync_chain_passing", |b| {
        b.iter(|| {
            let age = black_box("42")
                .field("Age")
                .not_empty()
                .parse::<u32>()
                .min(18)
                .max(120)
                .validate();
            black_box(age)
        })
    });

    c.bench_function("sync_chain_failing_early", |b| {
        b.iter(|| {
            let age = black_box("")
                .field("Age")
                .not_empty()
                .parse::<u32>()
                .min(18)
                .max(120)
                .validate();
            black_box(age)
        })
    });
}

// ============================================================================
// Batches
// ============================================================================

fn bench_batch(c: &mut Criterion) {
    let names: Vec<String> = (0..64).map(|i| format!("user{i}")).collect();

    c.bench_function("validate_all_64", |b| {
        b.iter(|| {
            let steps = names
                .iter()
                .map(|name| field(name.clone(), "Name").min_length(3));
            black_box(validate_all(steps))
        })
    });

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    c.bench_function("validate_all_async_64", |b| {
        b.iter(|| {
            let steps: Vec<AsyncStep<String>> = names
                .iter()
                .map(|name| field(name.clone(), "Name").min_length(3).to_async())
                .collect();
            black_box(runtime.block_on(validate_all_async(steps)))
        })
    });
}

criterion_group!(benches, bench_sync_chain, bench_batch);
criterion_main!(benches);
