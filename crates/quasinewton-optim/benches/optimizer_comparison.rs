//! Benchmarks comparing BFGS and L-BFGS on the Rosenbrock function
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::DVector;
use quasinewton_core::prelude::*;
use quasinewton_optim::{Bfgs, BfgsConfig, LBFGSConfig, LineSearchKind, LBFGS};

fn alternating_start(dim: usize) -> DVector<f64> {
    DVector::from_fn(dim, |i, _| if i % 2 == 0 { -1.2 } else { 1.0 })
}

fn benchmark_rosenbrock(c: &mut Criterion) {
    let mut group = c.benchmark_group("rosenbrock");

    for &dim in &[2, 10, 50, 100] {
        let rosen = Rosenbrock::new(dim).unwrap();
        let x0 = alternating_start(dim);
        let stopping_criterion = StoppingCriterion::new()
            .with_max_iterations(2000)
            .with_gradient_tolerance(1e-6);

        group.bench_with_input(BenchmarkId::new("bfgs", dim), &dim, |b, _| {
            b.iter(|| {
                let mut bfgs = Bfgs::new(BfgsConfig::new());
                bfgs.optimize(black_box(&rosen), black_box(&x0), &stopping_criterion)
            });
        });

        group.bench_with_input(BenchmarkId::new("lbfgs", dim), &dim, |b, _| {
            b.iter(|| {
                let mut lbfgs = LBFGS::new(LBFGSConfig::new().with_memory_size(10));
                lbfgs.optimize(black_box(&rosen), black_box(&x0), &stopping_criterion)
            });
        });
    }

    group.finish();
}

fn benchmark_line_searches(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_search");
    let rosen = Rosenbrock::new(10).unwrap();
    let x0 = alternating_start(10);
    let stopping_criterion = StoppingCriterion::new()
        .with_max_iterations(5000)
        .with_gradient_tolerance(1e-6);

    for (name, kind) in [
        ("more_thuente", LineSearchKind::MoreThuente),
        ("bisection", LineSearchKind::Bisection),
        ("backtracking", LineSearchKind::Backtracking),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut lbfgs = LBFGS::new(LBFGSConfig::new().with_line_search(kind));
                lbfgs.optimize(black_box(&rosen), black_box(&x0), &stopping_criterion)
            });
        });
    }

    group.finish();
}

fn benchmark_objective(c: &mut Criterion) {
    let mut group = c.benchmark_group("objective");

    for &dim in &[5, 100, 10_000] {
        let x: Vec<f64> = (0..dim).map(|i| 1.0 + 0.1 * (i % 7) as f64).collect();
        group.bench_with_input(BenchmarkId::new("value_and_gradient", dim), &x, |b, x| {
            b.iter(|| rosenbrock_with_gradient(black_box(x.as_slice())));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_rosenbrock,
    benchmark_line_searches,
    benchmark_objective
);
criterion_main!(benches);
