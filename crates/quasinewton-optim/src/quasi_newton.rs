//! Iteration shared by the quasi-Newton methods.
//!
//! BFGS and L-BFGS differ only in how they store and apply the inverse
//! Hessian approximation H. Everything else (validation, line search,
//! stopping rules, callbacks, result assembly) lives here.

use crate::line_search::{initial_step, AnyLineSearch, LineSearch, LineSearchParams};
use num_traits::Float;
use quasinewton_core::core::validation::{validate_dimension, validate_point};
use quasinewton_core::prelude::*;
use std::time::Instant;

/// Offset added to f(x₀) to stand in for the previous objective value, so
/// the first line search starts from min(1, 1.01·2·5000/|φ'(0)|).
const FIRST_STEP_DECREASE: f64 = 5000.0;

/// Inverse Hessian approximation of a quasi-Newton method.
pub(crate) trait InverseHessianApprox<T: Scalar> {
    /// Starts over for an `n`-dimensional problem.
    fn reset(&mut self, n: usize);

    /// Search direction −H·g.
    fn direction(&self, gradient: &DVector<T>) -> DVector<T>;

    /// Incorporates the step `s` and gradient change `y`.
    ///
    /// Returns false if the pair was skipped.
    fn update(&mut self, s: &DVector<T>, y: &DVector<T>) -> bool;
}

/// True if the curvature sᵀy is too small, relative to ‖s‖‖y‖, to keep the
/// approximation positive definite.
pub(crate) fn insufficient_curvature<T: Scalar>(sy: T, s: &DVector<T>, y: &DVector<T>) -> bool {
    !(sy > T::EPSILON * s.norm() * y.norm())
}

fn all_finite<T: Scalar>(v: &DVector<T>) -> bool {
    v.iter().all(|x| <T as Float>::is_finite(*x))
}

/// Runs a quasi-Newton minimization.
///
/// # Errors
///
/// Configuration, starting point and cost function errors. A line search
/// that cannot decrease the objective ends the run with
/// [`TerminationReason::LineSearchFailed`] instead.
#[allow(clippy::too_many_arguments)]
pub(crate) fn run<T, C, H>(
    name: &str,
    approx: &mut H,
    line_search: &mut AnyLineSearch<T>,
    params: &LineSearchParams<T>,
    cost_fn: &C,
    initial_point: &DVector<T>,
    criterion: &StoppingCriterion<T>,
    callback: &mut dyn OptimizationCallback<T>,
) -> OptimizerResult<OptimizationResult<T>>
where
    T: Scalar,
    C: CostFunction<T> + ?Sized,
    H: InverseHessianApprox<T> + ?Sized,
{
    let start_time = Instant::now();

    criterion.validate()?;
    params.validate()?;
    if let Some(dimension) = cost_fn.dimension() {
        validate_dimension(dimension, initial_point.len())?;
    }
    validate_point(initial_point.as_slice(), 1)?;

    let n = initial_point.len();
    let (value, gradient) = cost_fn.cost_and_gradient(initial_point)?;
    let finite_start = <T as Float>::is_finite(value) && all_finite(&gradient);

    approx.reset(n);
    let mut state = OptimizerState::new(initial_point.clone(), value, gradient);
    let mut monitor = ConvergenceMonitor::new(criterion, &state);
    callback.on_optimization_start(&state)?;

    log::debug!(
        "{name}: starting with {} and n = {n}, f = {value}, |g| = {}",
        LineSearch::<T>::name(line_search),
        state.gradient_norm
    );

    let reason = if !finite_start {
        log::warn!("{name}: objective or gradient is not finite at the initial point");
        TerminationReason::NumericalError
    } else {
        iterate(
            name,
            approx,
            line_search,
            params,
            cost_fn,
            &mut state,
            &mut monitor,
            callback,
        )?
    };

    // Every accepted step decreased f, so the current point is the best one.
    let OptimizerState {
        point,
        value,
        gradient,
        iteration,
        function_evaluations,
        gradient_evaluations,
        ..
    } = state;
    let result = OptimizationResult::new(point, value, iteration, start_time.elapsed(), reason)
        .with_gradient(gradient)
        .with_function_evaluations(function_evaluations)
        .with_gradient_evaluations(gradient_evaluations);

    callback.on_optimization_end(&result)?;
    log::info!(
        "{name}: {reason} after {iteration} iterations ({function_evaluations} evaluations), f = {value}"
    );

    Ok(result)
}

#[allow(clippy::too_many_arguments)]
fn iterate<T, C, H>(
    name: &str,
    approx: &mut H,
    line_search: &mut AnyLineSearch<T>,
    params: &LineSearchParams<T>,
    cost_fn: &C,
    state: &mut OptimizerState<T>,
    monitor: &mut ConvergenceMonitor<T>,
    callback: &mut dyn OptimizationCallback<T>,
) -> OptimizerResult<TerminationReason>
where
    T: Scalar,
    C: CostFunction<T> + ?Sized,
    H: InverseHessianApprox<T> + ?Sized,
{
    let n = state.point.len();
    let mut previous_value = state.value + <T as Scalar>::from_f64(FIRST_STEP_DECREASE);
    loop {
        if let Some(reason) = monitor.check(state) {
            return Ok(reason);
        }
        if state.gradient_norm == T::zero() {
            return Ok(TerminationReason::GradientTolerance);
        }

        let mut direction = approx.direction(&state.gradient);
        let mut slope = state.gradient.dot(&direction);
        if !(slope < T::zero()) || !<T as Float>::is_finite(slope) {
            log::warn!(
                "{name}: not a descent direction at iteration {} (slope {slope}), resetting to steepest descent",
                state.iteration
            );
            approx.reset(n);
            direction = -&state.gradient;
            slope = -state.gradient.norm_squared();
        }

        let step0 = initial_step(state.value, previous_value, slope, params);
        let step = match line_search.search_with_deriv(
            cost_fn,
            &state.point,
            state.value,
            &direction,
            slope,
            step0,
            params,
        ) {
            Ok(step) => step,
            Err(OptimizerError::LineSearchFailed {
                reason, iterations, ..
            }) => {
                log::warn!(
                    "{name}: line search failed at iteration {} after {iterations} evaluations: {reason}",
                    state.iteration
                );
                let gradient_evals = match line_search {
                    AnyLineSearch::Backtracking(_) => 0,
                    _ => iterations,
                };
                state.add_evaluations(iterations, gradient_evals);
                return Ok(TerminationReason::LineSearchFailed);
            }
            Err(err) => return Err(err),
        };
        state.add_evaluations(step.function_evals, step.gradient_evals);

        let s = &step.new_point - &state.point;
        let y = &step.new_gradient - &state.gradient;
        if !approx.update(&s, &y) {
            log::warn!(
                "{name}: skipped update at iteration {} (sᵀy = {})",
                state.iteration,
                s.dot(&y)
            );
        }

        previous_value = state.value;
        state.advance(step.new_point, step.new_value, step.new_gradient, step.step_size);
        monitor.record(state);

        log::trace!(
            "{name}: iteration {}: f = {}, |g| = {}, step = {}",
            state.iteration,
            state.value,
            state.gradient_norm,
            step.step_size
        );

        let info = CallbackInfo {
            state,
            elapsed: monitor.elapsed(),
        };
        if !callback.on_iteration_end(&info)? {
            return Ok(TerminationReason::CallbackRequest);
        }
    }
}
