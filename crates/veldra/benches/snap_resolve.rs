//! Benchmarks for snap-point resolution and release decisions.
//!
//! These run once per pointer-move or release in production, so they must
//! stay trivially cheap.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use veldra::{Direction, Size, SnapPoint, SnapPointEngine, SnapRelease};

fn engine_with(count: usize) -> SnapPointEngine {
    let points: Vec<SnapPoint> = (1..=count)
        .map(|i| SnapPoint::Fraction(i as f32 / count as f32))
        .collect();
    let mut engine = SnapPointEngine::new(points, Direction::Bottom, None);
    engine.resolve(Size::new(400.0, 800.0));
    engine
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("snap_resolve");

    for count in [2, 4, 8, 16] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut engine = engine_with(count);
            b.iter(|| {
                engine.resolve(black_box(Size::new(400.0, 800.0)));
                black_box(engine.offsets().len())
            });
        });
    }

    group.finish();
}

fn bench_release_decision(c: &mut Criterion) {
    let mut group = c.benchmark_group("release_decision");

    for count in [2, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let engine = engine_with(count);
            let input = SnapRelease {
                dragged_distance: 120.0,
                velocity: 0.2,
                dismissible: true,
            };
            b.iter(|| black_box(engine.release_decision(black_box(input), false)));
        });
    }

    group.finish();
}

fn bench_drag_offset(c: &mut Criterion) {
    let engine = engine_with(4);
    c.bench_function("drag_offset", |b| {
        b.iter(|| black_box(engine.drag_offset(black_box(37.5), true)));
    });
}

criterion_group!(
    benches,
    bench_resolve,
    bench_release_decision,
    bench_drag_offset
);
criterion_main!(benches);
