//! # Pool Recycling Benchmark
//!
//! The recycle path must stay allocation-free: once a pool has grown to its
//! working-set size, spawn/despawn cycles touch only pre-built slots.
//!
//! Run with: `cargo bench --package revenant_pool`

// Benchmarks don't need docs and may have intentionally unused code
#![allow(missing_docs)]
#![allow(dead_code)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use revenant_pool::{EntityPool, PoolEntity};

/// A representative short-lived entity.
#[derive(Clone, Default)]
struct Projectile {
    position: [f32; 3],
    heading: [f32; 3],
    damage: u32,
}

impl PoolEntity for Projectile {}

/// Benchmark: steady-state recycle of a single slot.
fn bench_recycle_cycle(c: &mut Criterion) {
    let mut pool = EntityPool::of_clones(1, Projectile::default());

    c.bench_function("recycle_single_slot", |b| {
        b.iter(|| {
            let handle = pool.spawn().unwrap();
            pool.despawn(black_box(handle)).unwrap();
        });
    });
}

/// Benchmark: spawn a full wave, then sweep it back, at several wave sizes.
fn bench_wave_spawn_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("wave_spawn_sweep");

    for count in [64, 1_024, 16_384] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut pool = EntityPool::of_clones(count, Projectile::default());
            b.iter(|| {
                for _ in 0..count {
                    black_box(pool.spawn().unwrap());
                }
                pool.despawn_all()
            });
        });
    }

    group.finish();
}

/// Benchmark: growth from a cold pool (every spawn constructs).
fn bench_cold_growth(c: &mut Criterion) {
    c.bench_function("cold_growth_1024", |b| {
        b.iter(|| {
            let mut pool = EntityPool::of_clones(0, Projectile::default());
            for _ in 0..1_024 {
                black_box(pool.spawn().unwrap());
            }
            pool.total_count()
        });
    });
}

criterion_group!(
    benches,
    bench_recycle_cycle,
    bench_wave_spawn_sweep,
    bench_cold_growth
);
criterion_main!(benches);
