//! Serialization of configurations and results.

#![cfg(feature = "serde")]

use pretty_assertions::assert_eq;
use quasinewton_core::prelude::*;
use std::time::Duration;

#[test]
fn test_stopping_criterion_roundtrip() {
    let criterion = StoppingCriterion::<f64>::new()
        .with_gradient_tolerance(1e-2)
        .with_function_tolerance(1e-9)
        .with_change_window(3)
        .with_max_time(Duration::from_millis(1500));

    let json = serde_json::to_string(&criterion).unwrap();
    let back: StoppingCriterion<f64> = serde_json::from_str(&json).unwrap();

    assert_eq!(back.gradient_tolerance, Some(1e-2));
    assert_eq!(back.function_tolerance, Some(1e-9));
    assert_eq!(back.change_window, 3);
    assert_eq!(back.max_iterations, Some(1000));
    assert_eq!(back.max_time, Some(Duration::from_millis(1500)));
}

#[test]
fn test_termination_reason_as_name() {
    let json = serde_json::to_string(&TerminationReason::LineSearchFailed).unwrap();
    assert_eq!(json, "\"LineSearchFailed\"");

    let back: TerminationReason = serde_json::from_str("\"GradientTolerance\"").unwrap();
    assert!(back.is_success());
}

#[test]
fn test_result_roundtrip() {
    let result = OptimizationResult::new(
        DVector::from_vec(vec![1.0, 1.0]),
        0.0,
        12,
        Duration::from_millis(3),
        TerminationReason::GradientTolerance,
    )
    .with_gradient(DVector::from_vec(vec![0.0, 0.0]))
    .with_function_evaluations(15);

    let json = serde_json::to_string(&result).unwrap();
    let back: OptimizationResult<f64> = serde_json::from_str(&json).unwrap();

    assert_eq!(back.point, result.point);
    assert_eq!(back.iterations, 12);
    assert_eq!(back.function_evaluations, 15);
    assert_eq!(back.gradient_norm, Some(0.0));
    assert!(back.converged);
}

#[test]
fn test_rosenbrock_roundtrip() {
    let rosen = Rosenbrock::new(7).unwrap();
    let json = serde_json::to_string(&rosen).unwrap();
    let back: Rosenbrock = serde_json::from_str(&json).unwrap();
    assert_eq!(back, rosen);
    assert_eq!(back.dim(), 7);
}
