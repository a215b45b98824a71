//! Core optimizer traits and types.
//!
//! This module provides the abstractions shared by every unconstrained
//! minimizer in the workspace: the [`Optimizer`] trait, the iteration state
//! handed to callbacks, the stopping rules, and the final result.
//!
//! # Optimization Framework
//!
//! A gradient-based minimizer follows this structure:
//!
//! 1. **Initialization**: evaluate f(x₀) and ∇f(x₀)
//! 2. **Convergence check**: consult the [`ConvergenceMonitor`] (also before the first step)
//! 3. **Search direction**: determine pₖ (for quasi-Newton methods pₖ = −Hₖ∇f(xₖ))
//! 4. **Line search**: find a step size αₖ > 0 along pₖ
//! 5. **Update**: xₖ₊₁ = xₖ + αₖpₖ, then update the curvature model
//!
//! # Stopping Rules
//!
//! Convergence tests are checked before budgets, so a run that converges on
//! its last allowed iteration is reported as converged:
//!
//! - **Gradient norm**: ‖∇f(x)‖ < ε_grad (first-order optimality)
//! - **Gradient change**: |‖∇fₖ‖ − ‖∇fₖ₋w‖| < ε over a window of w iterations
//! - **Function change**: |f(xₖ) − f(xₖ₋w)| < ε_f over the same window
//! - **Point change**: ‖xₖ − xₖ₋₁‖ < ε_x
//! - **Target**: f(x) ≤ f_target
//! - **Budgets**: iterations, function evaluations, wall-clock time
//!
//! # Example
//!
//! ```rust
//! # use quasinewton_core::prelude::*;
//! # use std::time::Duration;
//! let criterion = StoppingCriterion::<f64>::new()
//!     .with_gradient_tolerance(1e-8)
//!     .with_function_tolerance(1e-12)
//!     .with_change_window(3)
//!     .with_max_time(Duration::from_secs(10));
//! assert!(criterion.validate().is_ok());
//! ```

use crate::{
    core::{
        cost_function::CostFunction,
        error::{OptimizerError, OptimizerResult},
        types::{DVector, Scalar},
    },
    optimization::{
        callback::{NoOpCallback, OptimizationCallback},
        tolerance::WindowedTolerance,
    },
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::time::{Duration, Instant};

/// Result of an optimization run.
///
/// The reported point is the lowest-valued point the optimizer visited,
/// together with its gradient.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimizationResult<T: Scalar> {
    /// Best point found
    pub point: DVector<T>,

    /// Objective value at `point`
    pub value: T,

    /// Gradient at `point` (if known)
    pub gradient: Option<DVector<T>>,

    /// Euclidean norm of `gradient`
    pub gradient_norm: Option<T>,

    /// Number of major iterations performed
    pub iterations: usize,

    /// Number of objective evaluations
    pub function_evaluations: usize,

    /// Number of gradient evaluations
    pub gradient_evaluations: usize,

    /// Wall-clock time elapsed during optimization
    pub duration: Duration,

    /// Why the optimizer stopped
    pub termination_reason: TerminationReason,

    /// True if the termination reason is a convergence criterion
    pub converged: bool,
}

impl<T: Scalar> OptimizationResult<T> {
    /// Creates a new optimization result.
    pub fn new(
        point: DVector<T>,
        value: T,
        iterations: usize,
        duration: Duration,
        termination_reason: TerminationReason,
    ) -> Self {
        Self {
            point,
            value,
            gradient: None,
            gradient_norm: None,
            iterations,
            function_evaluations: 0,
            gradient_evaluations: 0,
            duration,
            termination_reason,
            converged: termination_reason.is_success(),
        }
    }

    /// Sets the gradient at the final point (and its norm).
    pub fn with_gradient(mut self, gradient: DVector<T>) -> Self {
        self.gradient_norm = Some(gradient.norm());
        self.gradient = Some(gradient);
        self
    }

    /// Sets the gradient norm at the final point.
    pub fn with_gradient_norm(mut self, norm: T) -> Self {
        self.gradient_norm = Some(norm);
        self
    }

    /// Sets the function evaluation count.
    pub fn with_function_evaluations(mut self, count: usize) -> Self {
        self.function_evaluations = count;
        self
    }

    /// Sets the gradient evaluation count.
    pub fn with_gradient_evaluations(mut self, count: usize) -> Self {
        self.gradient_evaluations = count;
        self
    }

    /// Same as `converged`.
    pub fn success(&self) -> bool {
        self.converged
    }
}

impl<T: Scalar> fmt::Display for OptimizationResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.converged {
            writeln!(f, "Optimization terminated successfully.")?;
        } else {
            writeln!(f, "Warning: {}.", self.termination_reason)?;
        }
        writeln!(f, "         Current function value: {:.6}", Scalar::to_f64(self.value))?;
        writeln!(f, "         Iterations: {}", self.iterations)?;
        writeln!(f, "         Function evaluations: {}", self.function_evaluations)?;
        writeln!(f, "         Gradient evaluations: {}", self.gradient_evaluations)?;
        write!(f, "         Termination: {}", self.termination_reason)
    }
}

/// Reasons for optimization termination.
///
/// # Convergence
/// - **GradientTolerance** … **BoundsConverged**: a convergence test passed
///
/// # Computational Limits
/// - **MaxIterations**, **MaxTime**, **MaxFunctionEvaluations**
///
/// # Failures
/// - **LineSearchFailed**: no step along the search direction decreased f
/// - **NumericalError**: the objective returned NaN or infinity at an accepted point
///
/// # External Control
/// - **CallbackRequest**: a callback asked to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TerminationReason {
    /// ‖∇f(x)‖ fell below the gradient tolerance
    GradientTolerance,
    /// The gradient norm stopped changing over the window
    GradientChangeTolerance,
    /// The objective stopped changing over the window
    FunctionChangeTolerance,
    /// The last step moved less than the point tolerance
    PointChangeTolerance,
    /// Objective function value reached the target
    TargetReached,
    /// A bracketing search narrowed its bracket below tolerance
    BoundsConverged,
    /// Maximum iteration count exhausted without convergence
    MaxIterations,
    /// Wall-clock time limit exceeded
    MaxTime,
    /// Function evaluation budget exhausted
    MaxFunctionEvaluations,
    /// Line search failed to find a step decreasing the objective
    LineSearchFailed,
    /// Non-finite objective or gradient
    NumericalError,
    /// Progress callback requested early termination
    CallbackRequest,
}

impl TerminationReason {
    /// True for the convergence variants.
    pub fn is_success(self) -> bool {
        matches!(
            self,
            Self::GradientTolerance
                | Self::GradientChangeTolerance
                | Self::FunctionChangeTolerance
                | Self::PointChangeTolerance
                | Self::TargetReached
                | Self::BoundsConverged
        )
    }

    /// Human-readable description.
    pub fn message(self) -> &'static str {
        match self {
            Self::GradientTolerance => "gradient norm below tolerance",
            Self::GradientChangeTolerance => "gradient norm stopped changing",
            Self::FunctionChangeTolerance => "objective value stopped changing",
            Self::PointChangeTolerance => "step length below tolerance",
            Self::TargetReached => "objective reached target value",
            Self::BoundsConverged => "search bracket below tolerance",
            Self::MaxIterations => "Maximum number of iterations has been exceeded",
            Self::MaxTime => "Maximum runtime has been exceeded",
            Self::MaxFunctionEvaluations => {
                "Maximum number of function evaluations has been exceeded"
            }
            Self::LineSearchFailed => "Desired error not necessarily achieved due to precision loss",
            Self::NumericalError => "NaN or infinity encountered",
            Self::CallbackRequest => "Stopped by callback",
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Stopping criteria for optimization algorithms.
///
/// Every test is optional. The defaults stop after 1000 iterations or when
/// ‖∇f‖ < 1e-6, whichever comes first.
///
/// # Windowed Criteria
///
/// `gradient_change_tolerance` and `function_tolerance` compare the current
/// value with the one `change_window` iterations earlier, so a single slow
/// iteration does not end the run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StoppingCriterion<T: Scalar> {
    /// Maximum number of major optimization iterations
    pub max_iterations: Option<usize>,

    /// Maximum wall-clock time
    pub max_time: Option<Duration>,

    /// Maximum number of objective function evaluations
    pub max_function_evaluations: Option<usize>,

    /// Tolerance for the gradient norm: ‖∇f(x)‖ < ε_grad
    pub gradient_tolerance: Option<T>,

    /// Tolerance for the change of the gradient norm over the window
    pub gradient_change_tolerance: Option<T>,

    /// Tolerance for the change of the objective over the window
    pub function_tolerance: Option<T>,

    /// Number of iterations spanned by the change tolerances
    pub change_window: usize,

    /// Tolerance for the length of the last step: ‖xₖ − xₖ₋₁‖ < ε_x
    pub point_tolerance: Option<T>,

    /// Target objective value: stop when f(x) ≤ f_target
    pub target_value: Option<T>,
}

impl<T: Scalar> Default for StoppingCriterion<T> {
    fn default() -> Self {
        Self {
            max_iterations: Some(1000),
            max_time: None,
            max_function_evaluations: None,
            gradient_tolerance: Some(<T as Scalar>::from_f64(1e-6)),
            gradient_change_tolerance: None,
            function_tolerance: None,
            change_window: 5,
            point_tolerance: None,
            target_value: None,
        }
    }
}

impl<T: Scalar> StoppingCriterion<T> {
    /// Creates a new stopping criterion with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, max_iter: usize) -> Self {
        self.max_iterations = Some(max_iter);
        self
    }

    /// Removes the iteration limit.
    pub fn without_max_iterations(mut self) -> Self {
        self.max_iterations = None;
        self
    }

    /// Sets the maximum optimization time.
    pub fn with_max_time(mut self, max_time: Duration) -> Self {
        self.max_time = Some(max_time);
        self
    }

    /// Sets the maximum number of function evaluations.
    pub fn with_max_function_evaluations(mut self, max_evals: usize) -> Self {
        self.max_function_evaluations = Some(max_evals);
        self
    }

    /// Sets the gradient tolerance.
    pub fn with_gradient_tolerance(mut self, tol: T) -> Self {
        self.gradient_tolerance = Some(tol);
        self
    }

    /// Sets the gradient-norm change tolerance.
    pub fn with_gradient_change_tolerance(mut self, tol: T) -> Self {
        self.gradient_change_tolerance = Some(tol);
        self
    }

    /// Sets the function value change tolerance.
    pub fn with_function_tolerance(mut self, tol: T) -> Self {
        self.function_tolerance = Some(tol);
        self
    }

    /// Sets the window of the change tolerances.
    pub fn with_change_window(mut self, window: usize) -> Self {
        self.change_window = window;
        self
    }

    /// Sets the point change tolerance.
    pub fn with_point_tolerance(mut self, tol: T) -> Self {
        self.point_tolerance = Some(tol);
        self
    }

    /// Sets the target objective value.
    pub fn with_target_value(mut self, target: T) -> Self {
        self.target_value = Some(target);
        self
    }

    /// Checks that tolerances are positive and the window is non-empty.
    pub fn validate(&self) -> OptimizerResult<()> {
        let tolerances = [
            ("gradient_tolerance", self.gradient_tolerance),
            ("gradient_change_tolerance", self.gradient_change_tolerance),
            ("function_tolerance", self.function_tolerance),
            ("point_tolerance", self.point_tolerance),
        ];
        for (name, tol) in tolerances {
            if let Some(tol) = tol {
                if !(tol > T::zero()) {
                    return Err(OptimizerError::invalid_configuration(
                        "tolerance must be positive",
                        name,
                        tol,
                    ));
                }
            }
        }
        if self.change_window == 0 {
            return Err(OptimizerError::invalid_configuration(
                "change window must be at least 1",
                "change_window",
                self.change_window,
            ));
        }
        Ok(())
    }
}

/// Iteration state shared with callbacks and the convergence monitor.
#[derive(Debug, Clone)]
pub struct OptimizerState<T: Scalar> {
    /// Number of completed iterations
    pub iteration: usize,

    /// Current point
    pub point: DVector<T>,

    /// Objective value at `point`
    pub value: T,

    /// Gradient at `point`
    pub gradient: DVector<T>,

    /// Euclidean norm of `gradient`
    pub gradient_norm: T,

    /// Objective value before the last step
    pub previous_value: Option<T>,

    /// Step size accepted by the last line search
    pub step_size: Option<T>,

    /// Length ‖xₖ − xₖ₋₁‖ of the last step
    pub step_norm: Option<T>,

    /// Objective evaluations so far
    pub function_evaluations: usize,

    /// Gradient evaluations so far
    pub gradient_evaluations: usize,
}

impl<T: Scalar> OptimizerState<T> {
    /// State at the starting point, after one value and gradient evaluation.
    pub fn new(point: DVector<T>, value: T, gradient: DVector<T>) -> Self {
        let gradient_norm = gradient.norm();
        Self {
            iteration: 0,
            point,
            value,
            gradient,
            gradient_norm,
            previous_value: None,
            step_size: None,
            step_norm: None,
            function_evaluations: 1,
            gradient_evaluations: 1,
        }
    }

    /// Moves to the point accepted by a line search.
    pub fn advance(&mut self, point: DVector<T>, value: T, gradient: DVector<T>, step_size: T) {
        self.step_norm = Some((&point - &self.point).norm());
        self.previous_value = Some(self.value);
        self.step_size = Some(step_size);
        self.gradient_norm = gradient.norm();
        self.point = point;
        self.value = value;
        self.gradient = gradient;
        self.iteration += 1;
    }

    /// Adds evaluations performed outside the initial evaluation.
    pub fn add_evaluations(&mut self, function_evaluations: usize, gradient_evaluations: usize) {
        self.function_evaluations += function_evaluations;
        self.gradient_evaluations += gradient_evaluations;
    }
}

/// Applies a [`StoppingCriterion`] to a running optimization.
#[derive(Debug, Clone)]
pub struct ConvergenceMonitor<T: Scalar> {
    criterion: StoppingCriterion<T>,
    gradient: WindowedTolerance<T>,
    value: WindowedTolerance<T>,
    start: Instant,
}

impl<T: Scalar> ConvergenceMonitor<T> {
    /// Starts monitoring from the initial state.
    pub fn new(criterion: &StoppingCriterion<T>, initial: &OptimizerState<T>) -> Self {
        Self::start(criterion, initial.value, initial.gradient_norm)
    }

    /// Starts monitoring from an initial objective value and gradient magnitude.
    pub fn start(criterion: &StoppingCriterion<T>, value: T, gradient_norm: T) -> Self {
        let mut gradient = WindowedTolerance::new(
            criterion.gradient_tolerance,
            criterion.gradient_change_tolerance,
            criterion.change_window,
        );
        gradient.reset(gradient_norm);
        let mut objective =
            WindowedTolerance::new(None, criterion.function_tolerance, criterion.change_window);
        objective.reset(value);
        Self {
            criterion: criterion.clone(),
            gradient,
            value: objective,
            start: Instant::now(),
        }
    }

    /// Records the state reached at the end of an iteration.
    pub fn record(&mut self, state: &OptimizerState<T>) {
        self.record_values(state.value, state.gradient_norm);
    }

    /// Records an objective value and gradient magnitude.
    pub fn record_values(&mut self, value: T, gradient_norm: T) {
        self.gradient.push(gradient_norm);
        self.value.push(value);
    }

    /// Time since monitoring started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Returns the reason to stop, if any, for the given state.
    pub fn check(&self, state: &OptimizerState<T>) -> Option<TerminationReason> {
        self.check_convergence(state.value, state.step_norm)
            .or_else(|| self.check_budgets(state.iteration, state.function_evaluations))
    }

    /// Convergence tests only, in priority order.
    pub fn check_convergence(&self, value: T, step_norm: Option<T>) -> Option<TerminationReason> {
        if self.gradient.absolute_converged() {
            return Some(TerminationReason::GradientTolerance);
        }
        if self.gradient.change_converged() {
            return Some(TerminationReason::GradientChangeTolerance);
        }
        if self.value.change_converged() {
            return Some(TerminationReason::FunctionChangeTolerance);
        }
        if let (Some(tol), Some(step)) = (self.criterion.point_tolerance, step_norm) {
            if step < tol {
                return Some(TerminationReason::PointChangeTolerance);
            }
        }
        if let Some(target) = self.criterion.target_value {
            if value <= target {
                return Some(TerminationReason::TargetReached);
            }
        }
        None
    }

    /// Budget tests only.
    pub fn check_budgets(
        &self,
        iterations: usize,
        function_evaluations: usize,
    ) -> Option<TerminationReason> {
        if self
            .criterion
            .max_iterations
            .is_some_and(|max| iterations >= max)
        {
            return Some(TerminationReason::MaxIterations);
        }
        if self
            .criterion
            .max_function_evaluations
            .is_some_and(|max| function_evaluations >= max)
        {
            return Some(TerminationReason::MaxFunctionEvaluations);
        }
        if self
            .criterion
            .max_time
            .is_some_and(|max| self.elapsed() >= max)
        {
            return Some(TerminationReason::MaxTime);
        }
        None
    }
}

/// Interface for unconstrained minimization algorithms.
///
/// Implementations own their configuration and reset any internal state at
/// the start of each call, so reusing an instance gives the same result for
/// the same inputs.
pub trait Optimizer<T: Scalar>: Debug {
    /// Returns a human-readable name identifying the optimization algorithm.
    fn name(&self) -> &str;

    /// Minimizes `cost_fn` starting from `initial_point`.
    ///
    /// # Errors
    ///
    /// Returns errors for:
    /// - Invalid configuration or stopping criterion
    /// - Invalid initial point (wrong length, non-finite components)
    /// - Errors raised by the cost function
    fn optimize<C>(
        &mut self,
        cost_fn: &C,
        initial_point: &DVector<T>,
        stopping_criterion: &StoppingCriterion<T>,
    ) -> OptimizerResult<OptimizationResult<T>>
    where
        C: CostFunction<T> + ?Sized,
    {
        self.optimize_with_callback(cost_fn, initial_point, stopping_criterion, &mut NoOpCallback)
    }

    /// Same as [`optimize`](Self::optimize), reporting progress to `callback`.
    fn optimize_with_callback<C>(
        &mut self,
        cost_fn: &C,
        initial_point: &DVector<T>,
        stopping_criterion: &StoppingCriterion<T>,
        callback: &mut dyn OptimizationCallback<T>,
    ) -> OptimizerResult<OptimizationResult<T>>
    where
        C: CostFunction<T> + ?Sized;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn state(value: f64, gradient: Vec<f64>) -> OptimizerState<f64> {
        OptimizerState::new(DVector::zeros(gradient.len()), value, DVector::from_vec(gradient))
    }

    #[test]
    fn test_default_criterion() {
        let criterion = StoppingCriterion::<f64>::default();
        assert_eq!(criterion.max_iterations, Some(1000));
        assert_eq!(criterion.gradient_tolerance, Some(1e-6));
        assert_eq!(criterion.change_window, 5);
        assert!(criterion.function_tolerance.is_none());
        assert!(criterion.validate().is_ok());
    }

    #[test]
    fn test_criterion_validation() {
        let bad = StoppingCriterion::<f64>::new().with_gradient_tolerance(0.0);
        assert!(matches!(
            bad.validate(),
            Err(OptimizerError::InvalidConfiguration { .. })
        ));
        let bad = StoppingCriterion::<f64>::new().with_point_tolerance(f64::NAN);
        assert!(bad.validate().is_err());
        let bad = StoppingCriterion::<f64>::new().with_change_window(0);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_state_advance() {
        let mut s = state(10.0, vec![3.0, 4.0]);
        assert_relative_eq!(s.gradient_norm, 5.0);

        s.advance(
            DVector::from_vec(vec![0.6, 0.8]),
            2.0,
            DVector::from_vec(vec![0.0, 1.0]),
            0.5,
        );
        s.add_evaluations(3, 3);
        assert_eq!(s.iteration, 1);
        assert_eq!(s.previous_value, Some(10.0));
        assert_relative_eq!(s.step_norm.unwrap(), 1.0);
        assert_relative_eq!(s.gradient_norm, 1.0);
        assert_eq!(s.function_evaluations, 4);
    }

    #[test]
    fn test_monitor_gradient_tolerance_on_initial_state() {
        let criterion = StoppingCriterion::new().with_gradient_tolerance(1e-3);
        let s = state(1.0, vec![1e-4, 0.0]);
        let monitor = ConvergenceMonitor::new(&criterion, &s);
        assert_eq!(monitor.check(&s), Some(TerminationReason::GradientTolerance));
    }

    #[test]
    fn test_monitor_convergence_before_budget() {
        let criterion = StoppingCriterion::new()
            .with_gradient_tolerance(1e-3)
            .with_max_iterations(1);
        let mut s = state(1.0, vec![1.0]);
        let mut monitor = ConvergenceMonitor::new(&criterion, &s);
        assert_eq!(monitor.check(&s), None);

        s.advance(DVector::from_vec(vec![1.0]), 0.0, DVector::from_vec(vec![0.0]), 1.0);
        monitor.record(&s);
        assert_eq!(monitor.check(&s), Some(TerminationReason::GradientTolerance));
    }

    #[test]
    fn test_monitor_budgets() {
        let criterion = StoppingCriterion::<f64>::new()
            .with_max_iterations(2)
            .with_max_function_evaluations(5);
        let monitor = ConvergenceMonitor::start(&criterion, 1.0, 1.0);
        assert_eq!(monitor.check_budgets(1, 4), None);
        assert_eq!(monitor.check_budgets(2, 4), Some(TerminationReason::MaxIterations));
        assert_eq!(
            monitor.check_budgets(1, 5),
            Some(TerminationReason::MaxFunctionEvaluations)
        );

        let timed = StoppingCriterion::<f64>::new().with_max_time(Duration::ZERO);
        let monitor = ConvergenceMonitor::start(&timed, 1.0, 1.0);
        assert_eq!(monitor.check_budgets(0, 0), Some(TerminationReason::MaxTime));
    }

    #[test]
    fn test_monitor_function_change_and_target() {
        let criterion = StoppingCriterion::new()
            .without_max_iterations()
            .with_function_tolerance(1e-3)
            .with_change_window(2)
            .with_target_value(-5.0);
        let mut monitor = ConvergenceMonitor::start(&criterion, 10.0, 1.0);
        monitor.record_values(5.0, 1.0);
        assert_eq!(monitor.check_convergence(5.0, None), None);
        monitor.record_values(5.0, 1.0);
        assert_eq!(monitor.check_convergence(5.0, None), None);
        monitor.record_values(5.0, 1.0);
        assert_eq!(
            monitor.check_convergence(5.0, None),
            Some(TerminationReason::FunctionChangeTolerance)
        );

        let monitor = ConvergenceMonitor::start(&criterion, -6.0, 1.0);
        assert_eq!(
            monitor.check_convergence(-6.0, None),
            Some(TerminationReason::TargetReached)
        );
    }

    #[test]
    fn test_monitor_point_tolerance() {
        let criterion = StoppingCriterion::new().with_point_tolerance(1e-6);
        let monitor = ConvergenceMonitor::start(&criterion, 1.0, 1.0);
        assert_eq!(monitor.check_convergence(1.0, Some(1e-3)), None);
        assert_eq!(
            monitor.check_convergence(1.0, Some(1e-8)),
            Some(TerminationReason::PointChangeTolerance)
        );
    }

    #[test]
    fn test_termination_reason_classification() {
        assert!(TerminationReason::GradientTolerance.is_success());
        assert!(TerminationReason::BoundsConverged.is_success());
        assert!(!TerminationReason::MaxIterations.is_success());
        assert!(!TerminationReason::LineSearchFailed.is_success());
        assert_eq!(
            TerminationReason::MaxIterations.to_string(),
            "Maximum number of iterations has been exceeded"
        );
    }

    #[test]
    fn test_result_display() {
        let result = OptimizationResult::new(
            DVector::from_vec(vec![1.0, 1.0]),
            1.5e-7,
            25,
            Duration::from_millis(3),
            TerminationReason::GradientTolerance,
        )
        .with_gradient(DVector::from_vec(vec![3e-3, 4e-3]))
        .with_function_evaluations(30)
        .with_gradient_evaluations(30);

        assert!(result.success());
        assert_relative_eq!(result.gradient_norm.unwrap(), 5e-3);
        let text = result.to_string();
        assert!(text.starts_with("Optimization terminated successfully."));
        assert!(text.contains("Current function value: 0.000000"));
        assert!(text.contains("Iterations: 25"));
        assert!(text.contains("Function evaluations: 30"));

        let failed = OptimizationResult::new(
            DVector::from_vec(vec![0.0]),
            2.0,
            1000,
            Duration::ZERO,
            TerminationReason::MaxIterations,
        );
        assert!(!failed.converged);
        assert!(failed
            .to_string()
            .starts_with("Warning: Maximum number of iterations has been exceeded."));
    }
}
