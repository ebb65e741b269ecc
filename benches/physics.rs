//! Benchmarks for weft cloth simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use weft::{ClothConfig, ClothSim, FrameInput, NoOpStepObserver, SphereCollider};
use glam::Vec3;

fn bench_topology_build(c: &mut Criterion) {
    c.bench_function("topology_build_64x64", |b| {
        b.iter(|| ClothSim::new(&ClothConfig::new(64 * 64)).unwrap());
    });
}

fn bench_cloth_frames(c: &mut Criterion) {
    c.bench_function("cloth_32x32_60_frames", |b| {
        b.iter(|| {
            let config = ClothConfig::new(32 * 32);
            let mut sim = ClothSim::new(&config).unwrap();
            let input = FrameInput::new(1.0 / 60.0, &config);
            for _ in 0..60 {
                sim.step_frame(&input, &mut NoOpStepObserver);
            }
            sim.particles().len()
        });
    });
}

fn bench_cloth_with_collider(c: &mut Criterion) {
    c.bench_function("cloth_32x32_collider_60_frames", |b| {
        b.iter(|| {
            let config = ClothConfig::new(32 * 32);
            let mut sim = ClothSim::new(&config).unwrap();
            let collider = SphereCollider::new(Vec3::new(16.0, -8.0, 16.0), 6.0);
            let input = FrameInput::new(1.0 / 60.0, &config).with_collider(collider);
            for _ in 0..60 {
                sim.step_frame(&input, &mut NoOpStepObserver);
            }
            sim.particles().len()
        });
    });
}

criterion_group!(
    benches,
    bench_topology_build,
    bench_cloth_frames,
    bench_cloth_with_collider
);
criterion_main!(benches);
