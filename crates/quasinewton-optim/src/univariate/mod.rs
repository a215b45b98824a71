//! One-dimensional searches.
//!
//! Two families of searches share this module:
//!
//! - [`DerivativeSearch`]: proposes trial steps from observed values *and*
//!   slopes. These drive the Wolfe line searches of the quasi-Newton methods
//!   ([`Bisection`], [`MoreThuente`]) and can also minimize a scalar function
//!   directly through [`minimize_with_derivative`].
//! - [`ValueSearch`]: gradient-free, only observes values
//!   ([`GoldenSection`], used by [`minimize_without_derivative`]).
//!
//! Searches work in *step* coordinates relative to a starting location, so
//! the same implementation serves a line search along x + α·p and a plain
//! scalar minimization from x₀.
//!
//! # Protocol
//!
//! A driver calls `start` once and then alternates between evaluating the
//! proposed step and calling `observe`. `observe` returns the next step or
//! `None` when the search cannot make further progress (bracket collapsed,
//! step bounds reached). The step passed to `observe` is authoritative: a
//! driver may shrink a proposal that produced a non-finite value before
//! reporting it.

mod bisection;
mod golden_section;
mod more_thuente;

pub use bisection::Bisection;
pub use golden_section::GoldenSection;
pub use more_thuente::MoreThuente;

use crate::line_search::LineSearchParams;
use num_traits::Float;
use quasinewton_core::prelude::*;
use std::fmt::Debug;

/// Gradient-based one-dimensional search.
pub trait DerivativeSearch<T: Scalar>: Debug {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Resets the search at step 0 with value `value` and slope `slope`.
    ///
    /// Returns the first trial step.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `initial_step` is zero or not
    /// finite, and `InvalidSearchDirection` for searches that require a
    /// negative initial slope.
    fn start(
        &mut self,
        initial_step: T,
        value: T,
        slope: T,
        params: &LineSearchParams<T>,
    ) -> OptimizerResult<T>;

    /// Reports the value and slope at `step` and returns the next trial step.
    fn observe(&mut self, step: T, value: T, slope: T) -> Option<T>;
}

/// Gradient-free one-dimensional search.
pub trait ValueSearch<T: Scalar>: Debug {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Resets the search at `origin`, where the objective is `value`.
    ///
    /// Returns the first trial step.
    fn start(&mut self, origin: T, value: T) -> OptimizerResult<T>;

    /// Reports the value at `step` and returns the next trial step.
    fn observe(&mut self, step: T, value: T) -> Option<T>;

    /// Best (step, value) seen since `start`.
    fn best(&self) -> (T, T);
}

/// Outcome of a scalar minimization.
#[derive(Debug, Clone, PartialEq)]
pub struct UnivariateResult<T: Scalar> {
    /// Best location found
    pub location: T,
    /// Objective at `location`
    pub value: T,
    /// Derivative at `location`, when the search used derivatives
    pub derivative: Option<T>,
    /// Number of trial steps evaluated
    pub iterations: usize,
    /// Objective evaluations, including the one at the start
    pub function_evaluations: usize,
    /// Why the search stopped
    pub termination_reason: TerminationReason,
}

#[derive(Debug, Clone, Copy)]
struct Sample<T> {
    step: T,
    value: T,
    slope: T,
}

/// Minimizes a scalar function using its derivative.
///
/// `objective` returns `(f(x), f'(x))`. The stopping criterion's gradient
/// tolerance applies to |f'|, and its budgets bound the number of trials.
///
/// ```
/// use quasinewton_core::prelude::*;
/// use quasinewton_optim::line_search::LineSearchParams;
/// use quasinewton_optim::univariate::{minimize_with_derivative, Bisection};
///
/// let result = minimize_with_derivative(
///     |x: f64| ((x - 2.0).powi(2), 2.0 * (x - 2.0)),
///     -3.0,
///     &mut Bisection::new(),
///     &LineSearchParams::default(),
///     &StoppingCriterion::new().with_gradient_tolerance(1e-8),
/// )
/// .unwrap();
/// assert!((result.location - 2.0).abs() < 1e-6);
/// ```
pub fn minimize_with_derivative<T, F, S>(
    mut objective: F,
    x0: T,
    search: &mut S,
    params: &LineSearchParams<T>,
    criterion: &StoppingCriterion<T>,
) -> OptimizerResult<UnivariateResult<T>>
where
    T: Scalar,
    F: FnMut(T) -> (T, T),
    S: DerivativeSearch<T> + ?Sized,
{
    criterion.validate()?;
    params.validate()?;

    let (value0, slope0) = objective(x0);
    if !<T as Float>::is_finite(value0) || !<T as Float>::is_finite(slope0) {
        return Err(ObjectiveError::numerical_error(format!(
            "non-finite objective or derivative at the starting location {x0}"
        ))
        .into());
    }

    let mut best = Sample {
        step: T::zero(),
        value: value0,
        slope: slope0,
    };
    let mut monitor = ConvergenceMonitor::start(criterion, value0, <T as Float>::abs(slope0));
    let mut iterations = 0;
    let mut evaluations = 1;

    let reason = match monitor.check_convergence(value0, None) {
        Some(reason) => reason,
        None => {
            let mut step = search.start(params.initial_step_size, value0, slope0, params)?;
            loop {
                if let Some(reason) = monitor.check_budgets(iterations, evaluations) {
                    break reason;
                }

                let (value, slope) = objective(x0 + step);
                iterations += 1;
                evaluations += 1;
                if <T as Float>::is_nan(value) || <T as Float>::is_nan(slope) {
                    break TerminationReason::NumericalError;
                }

                let trial = Sample { step, value, slope };
                if value < best.value {
                    best = trial;
                }
                monitor.record_values(value, <T as Float>::abs(slope));
                if let Some(reason) = monitor.check_convergence(value, None) {
                    // The reported location is the one that met the test.
                    best = trial;
                    break reason;
                }

                match search.observe(step, value, slope) {
                    Some(next) => step = next,
                    None => break TerminationReason::BoundsConverged,
                }
            }
        }
    };

    log::debug!(
        "{}: x = {}, f = {} after {} trials ({})",
        search.name(),
        x0 + best.step,
        best.value,
        iterations,
        reason
    );

    Ok(UnivariateResult {
        location: x0 + best.step,
        value: best.value,
        derivative: Some(best.slope),
        iterations,
        function_evaluations: evaluations,
        termination_reason: reason,
    })
}

/// Minimizes a scalar function from its values alone.
///
/// The search explores from `x0` in the direction of its initial step. The
/// gradient tests of `criterion` are ignored; the search itself ends with
/// [`TerminationReason::BoundsConverged`] once its bracket is within
/// tolerance.
pub fn minimize_without_derivative<T, F, S>(
    mut objective: F,
    x0: T,
    search: &mut S,
    criterion: &StoppingCriterion<T>,
) -> OptimizerResult<UnivariateResult<T>>
where
    T: Scalar,
    F: FnMut(T) -> T,
    S: ValueSearch<T> + ?Sized,
{
    criterion.validate()?;

    let value0 = objective(x0);
    if !<T as Float>::is_finite(value0) {
        return Err(ObjectiveError::numerical_error(format!(
            "non-finite objective at the starting location {x0}"
        ))
        .into());
    }

    // No gradient here, so the gradient tests must never fire.
    let criterion = StoppingCriterion {
        gradient_tolerance: None,
        gradient_change_tolerance: None,
        ..criterion.clone()
    };
    let mut monitor = ConvergenceMonitor::start(&criterion, value0, T::zero());
    let mut iterations = 0;
    let mut evaluations = 1;

    let mut step = search.start(x0, value0)?;
    let reason = loop {
        if let Some(reason) = monitor.check_budgets(iterations, evaluations) {
            break reason;
        }

        let value = objective(x0 + step);
        iterations += 1;
        evaluations += 1;
        if <T as Float>::is_nan(value) {
            break TerminationReason::NumericalError;
        }

        let next = search.observe(step, value);
        let best_value = search.best().1;
        monitor.record_values(best_value, T::zero());
        if let Some(reason) = monitor.check_convergence(best_value, None) {
            break reason;
        }
        match next {
            Some(next) => step = next,
            None => break TerminationReason::BoundsConverged,
        }
    };

    let (best_step, best_value) = search.best();
    log::debug!(
        "{}: x = {}, f = {} after {} trials ({})",
        search.name(),
        x0 + best_step,
        best_value,
        iterations,
        reason
    );

    Ok(UnivariateResult {
        location: x0 + best_step,
        value: best_value,
        derivative: None,
        iterations,
        function_evaluations: evaluations,
        termination_reason: reason,
    })
}

/// Checks the common preconditions on a starting step.
pub(crate) fn validate_initial_step<T: Scalar>(initial_step: T) -> OptimizerResult<()> {
    if initial_step == T::zero() || !<T as Float>::is_finite(initial_step) {
        return Err(OptimizerError::invalid_configuration(
            "initial step must be non-zero and finite",
            "initial_step",
            initial_step,
        ));
    }
    Ok(())
}
