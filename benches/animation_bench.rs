//! Frame-update cost of the full tree scene and of the targeted integrator.
#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use rand::{rngs::StdRng, SeedableRng};
use yuletide::{
    animation::targeted::step_instance,
    engine::TreeEngine,
    options::Options,
    scene::{InstancePose, UploadTally},
};

const DT: f32 = 1.0 / 60.0;

fn step_instance_benchmark(c: &mut Criterion) {
    let target = Vec3::new(1.0, 2.0, 0.5);
    c.bench_function("step_instance_moving", |b| {
        b.iter(|| {
            let mut pose = InstancePose::at(Vec3::new(9.0, 4.0, -6.0), 1.0);
            black_box(step_instance(&mut pose, target, 1.1, 3.0, 0.1, black_box(DT)))
        });
    });
}

fn full_frame_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_frame");

    for count in [600_u32, 1800, 5400] {
        let mut options = Options::default();
        options.tree.count = count;
        let mut engine = TreeEngine::with_rng(
            options,
            &mut StdRng::seed_from_u64(u64::from(count)),
        )
        .unwrap();
        let switch = engine.mode_switch();
        let mut tally = UploadTally::default();
        let mut frame = 0_u32;

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                // Flip every three seconds so the integrator keeps working.
                frame += 1;
                if frame % 180 == 0 {
                    switch.toggle();
                }
                let stats = engine.advance(DT);
                engine.submit(&mut tally);
                black_box(stats)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, step_instance_benchmark, full_frame_benchmark);
criterion_main!(benches);
