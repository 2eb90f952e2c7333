use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rs_nbody::models::{KeyEntry, Vec3};
use rs_nbody::octree::{bitonic_sort, PipelineOrchestrator};
use rs_nbody::utils::PipelineConfig;

const PARTICLES: usize = 1 << 14;

fn random_positions(n: usize) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(0xB0B);
    (0..n)
        .map(|_| Vec3::new(
            rng.random_range(-800.0..800.0),
            rng.random_range(-800.0..800.0),
            rng.random_range(-800.0..800.0),
        ))
        .collect()
}

pub fn bench_bitonic_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitonic_sort");
    group.sample_size(50);
    let mut rng = StdRng::seed_from_u64(7);
    let entries: Vec<KeyEntry> = (0..PARTICLES)
        .map(|i| KeyEntry::new(rng.random_range(0..1u64 << 30), i as u32))
        .collect();

    group.bench_function("bitonic_16k", |b| b.iter_batched(
        || entries.clone(),
        |mut e| bitonic_sort(&mut e).unwrap(),
        BatchSize::LargeInput,
    ));

    group.bench_function("std_sort_unstable_16k", |b| b.iter_batched(
        || entries.clone(),
        |mut e| e.sort_unstable(),
        BatchSize::LargeInput,
    ));

    group.finish();
}

pub fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_pipeline");
    group.sample_size(50);
    let positions = random_positions(PARTICLES);

    for depth in [4u32, 7] {
        let config = PipelineConfig::new(Some(depth), Some(PARTICLES), None, None);
        let mut pipeline = PipelineOrchestrator::new(config).unwrap();
        group.bench_function(format!("run_16k_depth_{}", depth), |b| b.iter(|| {
            pipeline.run(&positions).unwrap().occupied_cells
        }));
    }

    group.finish();
}

criterion_group!(benches, bench_bitonic_sort, bench_pipeline);
criterion_main!(benches);
