//! Criterion benchmarks for the TSP genetic solver.
//!
//! Uses random Euclidean instances to measure the generational loop, each
//! crossover operator, and ant-colony seeding.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tsp_genetic::acs::{AcsConfig, AntColony};
use tsp_genetic::ga::{
    operators, CrossoverMethod, Genetic, GeneticArgs, InitialPopulation, MutationMethod,
    SelectionMethod, TourSeeder,
};
use tsp_genetic::graph::MatrixGraph;
use tsp_genetic::solver::MaxIterations;

fn random_instance(n: usize, seed: u64) -> MatrixGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)))
        .collect();
    MatrixGraph::from_points(&points)
}

fn args(chr: i64, initial: InitialPopulation) -> GeneticArgs {
    GeneticArgs::new()
        .with_chr(chr)
        .with_cr(0.2)
        .with_mr(0.7)
        .with_method_initial_population(initial)
        .with_method_select(SelectionMethod::Tournament)
        .with_method_cross(CrossoverMethod::Ox)
        .with_method_mutate(MutationMethod::Reverse)
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_genetic_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("genetic_random");
    group.sample_size(10);

    for (n, chr, gen) in [(20usize, 50i64, 50usize), (50, 100, 30), (100, 100, 20)] {
        let graph = random_instance(n, 42);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_c{}_g{}", n, chr, gen), n),
            &graph,
            |b, g| {
                b.iter(|| {
                    let mut genetic = Genetic::seeded(
                        black_box(g),
                        args(chr, InitialPopulation::Random),
                        MaxIterations(gen),
                        42,
                    )
                    .expect("valid arguments");
                    black_box(genetic.solve())
                })
            },
        );
    }
    group.finish();
}

fn bench_crossover(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossover");

    for &n in &[50usize, 200, 1000] {
        let mut rng = StdRng::seed_from_u64(7);
        let a: Vec<usize> = (0..n).collect();
        let b: Vec<usize> = (0..n).rev().collect();
        group.bench_with_input(BenchmarkId::new("ordinal-1p", n), &n, |bench, _| {
            bench.iter(|| {
                operators::ordinal_one_point_crossover(black_box(&a), black_box(&b), &mut rng)
            })
        });
        group.bench_with_input(BenchmarkId::new("ox", n), &n, |bench, _| {
            bench.iter(|| operators::order_crossover(black_box(&a), black_box(&b), &mut rng))
        });
        group.bench_with_input(BenchmarkId::new("pmx", n), &n, |bench, _| {
            bench.iter(|| operators::pmx_crossover(black_box(&a), black_box(&b), &mut rng))
        });
    }
    group.finish();
}

fn bench_ant_colony(c: &mut Criterion) {
    let mut group = c.benchmark_group("ant_colony");
    group.sample_size(10);

    for &n in &[20usize, 50] {
        let graph = random_instance(n, 3);
        let config = AcsConfig::default()
            .with_ants(20)
            .with_iterations(20)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &(graph, config), |b, (g, c)| {
            b.iter(|| {
                let mut colony = AntColony::new(black_box(g), c.clone());
                colony.solve();
                black_box(colony.tours())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_genetic_random, bench_crossover, bench_ant_colony);
criterion_main!(benches);
