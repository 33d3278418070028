//! Performance benchmarks for CAMOUFLAGE

use camouflage::config::Config;
use camouflage::ecology::layout;
use camouflage::genetics::Genome;
use camouflage::individual::IdGenerator;
use camouflage::reproduction::ReproductionSystem;
use camouflage::snapshot::NullSink;
use camouflage::{Color, Individual, World};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn benchmark_world_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_step");

    for population in [500, 2000, 5000].iter() {
        let mut config = Config::default();
        config.population.initial_count = *population;

        let mut world = match World::new_with_seed(config, 42) {
            Ok(world) => world,
            Err(e) => panic!("benchmark world: {e}"),
        };

        // Warm up
        if let Err(e) = world.run(10, &mut NullSink) {
            panic!("benchmark warm-up: {e}");
        }

        group.bench_with_input(
            BenchmarkId::new("population", population),
            population,
            |b, _| {
                b.iter(|| {
                    if let Err(e) = world.step() {
                        panic!("benchmark step: {e}");
                    }
                });
            },
        );
    }

    group.finish();
}

fn benchmark_layout(c: &mut Criterion) {
    let config = Config::default();

    c.bench_function("layout_partition_default", |b| {
        b.iter(|| {
            layout::partition(
                black_box(&config.biomes),
                black_box(1000),
                black_box(600),
                black_box(5000),
            )
        });
    });
}

fn benchmark_reproduction(c: &mut Criterion) {
    let config = Config::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let population: Vec<Individual> = (0..1000)
        .map(|id| {
            let genome = Genome::new(
                rng.gen_range(0..=1000),
                rng.gen_range(0..=600),
                Color::random(&mut rng),
            );
            Individual::founder(id, genome, 20, 85, 200)
        })
        .collect();

    c.bench_function("reproduction_pass_1000", |b| {
        b.iter(|| {
            let mut repro = ReproductionSystem::from_config(&config);
            let mut ids = IdGenerator::new();
            let mut members = population.clone();
            repro.reproduce(black_box(&mut members), &mut ids, &mut rng)
        });
    });
}

criterion_group!(
    benches,
    benchmark_world_step,
    benchmark_layout,
    benchmark_reproduction
);
criterion_main!(benches);
