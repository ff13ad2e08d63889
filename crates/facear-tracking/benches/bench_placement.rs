use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use facear_tracking::{anchor_transform, Pose, DEFAULT_PLACEMENT_DISTANCE};
use glam::{Quat, Vec3};

fn bench_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("anchor_transform");

    let camera = Pose::from_rotation_translation(
        Quat::from_rotation_y(0.8) * Quat::from_rotation_x(-0.2),
        Vec3::new(0.4, 1.6, -1.0),
    );

    group.bench_function("compose", |b| {
        b.iter(|| anchor_transform(black_box(&camera), black_box(DEFAULT_PLACEMENT_DISTANCE)))
    });

    group.finish();
}

criterion_group!(benches, bench_placement);
criterion_main!(benches);
