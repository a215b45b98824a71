//! Integration tests for quasinewton-optim
//!
//! These tests run the optimizers end to end on the Rosenbrock and
//! least-squares objectives from quasinewton-core.

use approx::assert_relative_eq;
use nalgebra::{DMatrix, DVector};
use quasinewton_core::objective::rosenbrock::DEFAULT_START;
use quasinewton_core::prelude::*;
use quasinewton_optim::{Bfgs, BfgsConfig, LBFGSConfig, LineSearchKind, LBFGS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn default_start() -> DVector<f64> {
    DVector::from_row_slice(&DEFAULT_START)
}

#[test]
fn test_bfgs_reproduces_demonstration() {
    let rosen = Rosenbrock::new(5).unwrap();
    let criterion = StoppingCriterion::new().with_gradient_tolerance(1e-2);

    let mut bfgs = Bfgs::with_default_config();
    let result = bfgs.optimize(&rosen, &default_start(), &criterion).unwrap();

    assert_eq!(result.termination_reason, TerminationReason::GradientTolerance);
    assert!(result.gradient_norm.unwrap() < 1e-2);
    assert!(result.value < 1e-2, "f = {}", result.value);
    assert!(result.iterations > 0);
}

#[test]
fn test_bfgs_and_lbfgs_reach_minimizer() {
    let rosen = Rosenbrock::new(5).unwrap();
    let criterion = StoppingCriterion::new().with_gradient_tolerance(1e-8);

    let bfgs = Bfgs::with_default_config()
        .optimize(&rosen, &default_start(), &criterion)
        .unwrap();
    let lbfgs = LBFGS::with_default_config()
        .optimize(&rosen, &default_start(), &criterion)
        .unwrap();

    for result in [&bfgs, &lbfgs] {
        assert!(result.converged, "{}", result.termination_reason);
        assert_relative_eq!(result.point, rosen.minimizer::<f64>(), epsilon = 1e-6);
    }
}

#[test]
fn test_classic_start_with_each_line_search() {
    let rosen = Rosenbrock::new(2).unwrap();
    let x0 = DVector::from_vec(vec![-1.2, 1.0]);
    let criterion = StoppingCriterion::new().with_gradient_tolerance(1e-6);

    for kind in [LineSearchKind::MoreThuente, LineSearchKind::Bisection] {
        let mut bfgs = Bfgs::new(BfgsConfig::new().with_line_search(kind));
        let result = bfgs.optimize(&rosen, &x0, &criterion).unwrap();
        assert!(result.converged, "{kind:?}: {}", result.termination_reason);
        assert_relative_eq!(result.point, DVector::from_element(2, 1.0), epsilon = 1e-4);
    }
}

#[test]
fn test_evaluation_counts_match_cost_function() {
    let counting = CountingCostFunction::new(Rosenbrock::new(5).unwrap());
    let criterion = StoppingCriterion::new().with_gradient_tolerance(1e-6);

    let result = Bfgs::with_default_config()
        .optimize(&counting, &default_start(), &criterion)
        .unwrap();

    let (costs, gradients) = counting.counts();
    assert_eq!(result.function_evaluations, costs);
    assert_eq!(result.gradient_evaluations, gradients);
}

#[test]
fn test_least_squares_matches_svd_solution() {
    let a = DMatrix::from_row_slice(
        6,
        3,
        &[
            2.0, 0.5, -1.0, //
            0.0, 1.0, 0.3, //
            1.0, -1.0, 2.0, //
            0.5, 0.2, 0.1, //
            -1.0, 0.0, 1.0, //
            0.3, 2.0, 0.0,
        ],
    );
    let x_true = DVector::from_vec(vec![1.0, -2.0, 0.5]);
    let b = &a * &x_true;
    let problem = LinearLeastSquares::new(a, b).unwrap();
    let expected = problem.least_squares_solution().unwrap();
    assert_relative_eq!(expected, x_true, epsilon = 1e-10);
    let criterion = StoppingCriterion::new().with_gradient_tolerance(1e-9);

    for result in [
        Bfgs::with_default_config().optimize(&problem, &DVector::zeros(3), &criterion),
        LBFGS::with_default_config().optimize(&problem, &DVector::zeros(3), &criterion),
    ] {
        let result = result.unwrap();
        assert!(result.converged);
        assert_relative_eq!(result.point, expected, epsilon = 1e-7);
    }
}

#[test]
fn test_synthetic_least_squares_reaches_zero() {
    let problem = LinearLeastSquares::<f64>::synthetic(10, 3).unwrap();
    let criterion = StoppingCriterion::new().with_gradient_tolerance(1e-6);

    let result = Bfgs::with_default_config()
        .optimize(&problem, &DVector::zeros(3), &criterion)
        .unwrap();

    assert!(result.converged, "{}", result.termination_reason);
    assert!(result.value < 1e-8, "f = {}", result.value);
}

#[test]
fn test_random_starts() {
    let mut rng = StdRng::seed_from_u64(42);
    let rosen = Rosenbrock::new(10).unwrap();
    let criterion = StoppingCriterion::new()
        .with_gradient_tolerance(1e-5)
        .with_max_iterations(5000);

    for _ in 0..5 {
        let x0: DVector<f64> = DVector::from_fn(10, |_, _| rng.gen_range(-2.0..2.0));
        let start_value = rosen.cost(&x0).unwrap();

        let result = LBFGS::new(LBFGSConfig::new().with_memory_size(7))
            .optimize(&rosen, &x0, &criterion)
            .unwrap();

        assert!(result.converged, "{}", result.termination_reason);
        assert!(result.value <= start_value);
        assert!(result.gradient_norm.unwrap() < 1e-5);
    }
}

#[test]
fn test_reuse_is_deterministic() {
    let rosen = Rosenbrock::new(5).unwrap();
    let criterion = StoppingCriterion::new().with_gradient_tolerance(1e-6);

    let mut bfgs = Bfgs::with_default_config();
    let first = bfgs.optimize(&rosen, &default_start(), &criterion).unwrap();
    let second = bfgs.optimize(&rosen, &default_start(), &criterion).unwrap();

    assert_eq!(first.point, second.point);
    assert_eq!(first.value, second.value);
    assert_eq!(first.iterations, second.iterations);
    assert_eq!(first.function_evaluations, second.function_evaluations);
}

#[test]
fn test_callback_can_stop() {
    let rosen = Rosenbrock::new(5).unwrap();
    let criterion = StoppingCriterion::new().with_gradient_tolerance(1e-12);
    let mut seen = Vec::new();
    let mut callback = MonitorCallback::new(|info: &CallbackInfo<'_, f64>| {
        seen.push(info.state.value);
        info.state.iteration < 3
    });

    let result = Bfgs::with_default_config()
        .optimize_with_callback(&rosen, &default_start(), &criterion, &mut callback)
        .unwrap();

    assert_eq!(result.termination_reason, TerminationReason::CallbackRequest);
    assert_eq!(result.iterations, 3);
    drop(callback);
    assert_eq!(seen.len(), 3);
    assert!(seen.windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn test_dimension_mismatch_is_an_error() {
    let rosen = Rosenbrock::new(5).unwrap();
    let x0 = DVector::from_vec(vec![1.0, 2.0, 3.0]);
    let result = Bfgs::with_default_config().optimize(&rosen, &x0, &StoppingCriterion::new());
    assert!(matches!(result, Err(OptimizerError::Objective(_))));
}

#[test]
fn test_non_finite_start_is_an_error() {
    let rosen = Rosenbrock::new(2).unwrap();
    let x0 = DVector::from_vec(vec![f64::NAN, 1.0]);
    let result = LBFGS::with_default_config().optimize(&rosen, &x0, &StoppingCriterion::new());
    assert!(matches!(result, Err(OptimizerError::Objective(_))));
}

#[test]
fn test_f32_runs() {
    let rosen = Rosenbrock::new(2).unwrap();
    let x0 = DVector::from_vec(vec![-1.2_f32, 1.0]);
    let criterion = StoppingCriterion::new().with_gradient_tolerance(1e-3_f32);

    let result = Bfgs::<f32>::with_default_config()
        .optimize(&rosen, &x0, &criterion)
        .unwrap();
    assert!(result.value < 1e-3, "f = {}", result.value);
}
