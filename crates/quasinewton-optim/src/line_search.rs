//! Line searches along a descent direction.
//!
//! Given a point x, a direction p and the slope φ'(0) = ∇f(x)·p < 0, a line
//! search picks a step α > 0 for x₊ = x + α·p such that φ(α) = f(x + α·p)
//! decreases sufficiently.
//!
//! # Conditions
//!
//! **Sufficient decrease (Armijo)**:
//! φ(α) ≤ φ(0) + c₁·α·φ'(0)
//!
//! **Strong Wolfe curvature**:
//! |φ'(α)| ≤ c₂·|φ'(0)|
//!
//! **Weak Wolfe curvature**:
//! φ'(α) ≥ c₂·φ'(0)
//!
//! with 0 < c₁ < c₂ < 1. Quasi-Newton updates need the curvature condition:
//! it guarantees sᵀy > 0, which keeps the inverse Hessian approximation
//! positive definite.
//!
//! # Searches
//!
//! - [`WolfeLineSearch`]: evaluates value and slope at trial steps proposed
//!   by a [`DerivativeSearch`] ([`MoreThuente`] or [`Bisection`]) until the
//!   Wolfe conditions hold
//! - [`BacktrackingLineSearch`]: Armijo-only, shrinking the step by ρ
//!
//! [`LineSearchKind`] names a search in configurations and [`AnyLineSearch`]
//! dispatches to it.

use crate::univariate::{Bisection, DerivativeSearch, MoreThuente};
use num_traits::Float;
use quasinewton_core::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Result of a line search.
#[derive(Debug, Clone)]
pub struct LineSearchResult<T: Scalar> {
    /// The accepted step size α
    pub step_size: T,

    /// The new point x + α·p
    pub new_point: DVector<T>,

    /// The objective value at the new point
    pub new_value: T,

    /// The gradient at the new point
    pub new_gradient: DVector<T>,

    /// Objective evaluations performed
    pub function_evals: usize,

    /// Gradient evaluations performed
    pub gradient_evals: usize,

    /// True if the step satisfies all the conditions of the search; false
    /// when the budget ran out and the best sufficient-decrease step was
    /// returned instead
    pub success: bool,
}

/// Parameters shared by all line searches.
///
/// ## Wolfe Condition Constants
/// - **c₁**: sufficient decrease, in (0, 1), typically 10⁻⁴
/// - **c₂**: curvature, in (c₁, 1), 0.9 for quasi-Newton methods
///
/// ## Step Size Management
/// - **initial_step_size**: fallback first trial when no better guess exists
/// - **min_step_size** / **max_step_size**: bounds on every trial
/// - **rho**: shrink factor for backtracking and for non-finite trials
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineSearchParams<T: Scalar> {
    /// Initial step size α₀
    pub initial_step_size: T,

    /// Largest step the search may try
    pub max_step_size: T,

    /// Smallest step the search may try
    pub min_step_size: T,

    /// Maximum number of trial steps
    pub max_iterations: usize,

    /// Armijo parameter c₁
    pub c1: T,

    /// Curvature parameter c₂
    pub c2: T,

    /// Reduction factor ρ ∈ (0, 1)
    pub rho: T,
}

impl<T: Scalar> Default for LineSearchParams<T> {
    fn default() -> Self {
        Self {
            initial_step_size: T::one(),
            max_step_size: <T as Scalar>::from_f64(50.0),
            min_step_size: <T as Scalar>::from_f64(1e-10),
            max_iterations: 100,
            c1: <T as Scalar>::from_f64(1e-4),
            c2: <T as Scalar>::from_f64(0.9),
            rho: <T as Scalar>::from_f64(0.5),
        }
    }
}

impl<T: Scalar> LineSearchParams<T> {
    /// Parameters for quasi-Newton methods (c₁ = 10⁻⁴, c₂ = 0.9).
    pub fn strong_wolfe() -> Self {
        Self::default()
    }

    /// Parameters for Armijo backtracking.
    pub fn backtracking() -> Self {
        Self {
            max_iterations: 50,
            ..Self::default()
        }
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` unless 0 < min ≤ initial ≤ max,
    /// 0 < c₁ < c₂ < 1, 0 < ρ < 1 and at least one iteration is allowed.
    pub fn validate(&self) -> OptimizerResult<()> {
        let zero = T::zero();
        let one = T::one();

        if !(self.min_step_size > zero) {
            return Err(OptimizerError::invalid_configuration(
                "minimum step size must be positive",
                "min_step_size",
                self.min_step_size,
            ));
        }
        if !(self.max_step_size >= self.min_step_size) || !<T as Float>::is_finite(self.max_step_size)
        {
            return Err(OptimizerError::invalid_configuration(
                "maximum step size must be finite and not below the minimum",
                "max_step_size",
                self.max_step_size,
            ));
        }
        if !(self.initial_step_size >= self.min_step_size
            && self.initial_step_size <= self.max_step_size)
        {
            return Err(OptimizerError::invalid_configuration(
                "initial step size must lie within the step bounds",
                "initial_step_size",
                self.initial_step_size,
            ));
        }
        if !(self.c1 > zero && self.c1 < one) {
            return Err(OptimizerError::invalid_configuration(
                "c1 must be in (0, 1)",
                "c1",
                self.c1,
            ));
        }
        if !(self.c2 > self.c1 && self.c2 < one) {
            return Err(OptimizerError::invalid_configuration(
                "c2 must be in (c1, 1)",
                "c2",
                self.c2,
            ));
        }
        if !(self.rho > zero && self.rho < one) {
            return Err(OptimizerError::invalid_configuration(
                "rho must be in (0, 1)",
                "rho",
                self.rho,
            ));
        }
        if self.max_iterations == 0 {
            return Err(OptimizerError::invalid_configuration(
                "at least one line search iteration is required",
                "max_iterations",
                self.max_iterations,
            ));
        }
        Ok(())
    }

    fn clamp(&self, step: T) -> T {
        <T as Float>::min(<T as Float>::max(step, self.min_step_size), self.max_step_size)
    }
}

/// Which curvature condition to enforce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WolfeKind {
    /// |φ'(α)| ≤ c₂·|φ'(0)|
    #[default]
    Strong,
    /// φ'(α) ≥ c₂·φ'(0)
    Weak,
}

/// Wolfe conditions anchored at φ(0) and φ'(0).
#[derive(Debug, Clone, Copy)]
pub struct WolfeConditions<T: Scalar> {
    /// Curvature condition variant
    pub kind: WolfeKind,
    /// Sufficient decrease constant
    pub c1: T,
    /// Curvature constant
    pub c2: T,
    /// φ(0)
    pub value0: T,
    /// φ'(0)
    pub slope0: T,
}

impl<T: Scalar> WolfeConditions<T> {
    /// Conditions with the constants of `params`.
    pub fn new(kind: WolfeKind, params: &LineSearchParams<T>, value0: T, slope0: T) -> Self {
        Self {
            kind,
            c1: params.c1,
            c2: params.c2,
            value0,
            slope0,
        }
    }

    /// Armijo test.
    pub fn sufficient_decrease(&self, step: T, value: T) -> bool {
        value <= self.value0 + self.c1 * step * self.slope0
    }

    /// Curvature test.
    pub fn curvature(&self, slope: T) -> bool {
        match self.kind {
            WolfeKind::Strong => {
                <T as Float>::abs(slope) <= self.c2 * <T as Float>::abs(self.slope0)
            }
            WolfeKind::Weak => slope >= self.c2 * self.slope0,
        }
    }

    /// Both tests.
    pub fn is_satisfied(&self, step: T, value: T, slope: T) -> bool {
        self.sufficient_decrease(step, value) && self.curvature(slope)
    }
}

/// First trial step from the previous decrease of the objective.
///
/// Assuming the next decrease matches the last one along a quadratic model
/// gives α₀ = 2·(f − f_prev)/φ'(0); the result is inflated by 1% and capped
/// at 1 so quasi-Newton methods still try the unit step. Falls back to
/// `params.initial_step_size` when the estimate is not positive.
pub fn initial_step<T: Scalar>(
    value: T,
    previous_value: T,
    slope: T,
    params: &LineSearchParams<T>,
) -> T {
    let estimate = <T as Scalar>::from_f64(1.01 * 2.0) * (value - previous_value) / slope;
    let step = <T as Float>::min(T::one(), estimate);
    if step > T::zero() && <T as Float>::is_finite(step) {
        params.clamp(step)
    } else {
        params.initial_step_size
    }
}

/// Trait for line search algorithms.
pub trait LineSearch<T: Scalar>: Debug {
    /// Returns a human-readable name identifying the line search algorithm.
    fn name(&self) -> &str;

    /// Searches along `direction` from `point`.
    ///
    /// `slope` must be ∇f(point)·direction and negative.
    ///
    /// # Errors
    ///
    /// - `InvalidSearchDirection` if `slope` is not negative
    /// - `InvalidConfiguration` for invalid `params`
    /// - `LineSearchFailed` if no trial gave sufficient decrease
    /// - errors raised by the cost function
    #[allow(clippy::too_many_arguments)]
    fn search_with_deriv<C>(
        &mut self,
        cost_fn: &C,
        point: &DVector<T>,
        value: T,
        direction: &DVector<T>,
        slope: T,
        initial_step: T,
        params: &LineSearchParams<T>,
    ) -> OptimizerResult<LineSearchResult<T>>
    where
        C: CostFunction<T> + ?Sized;

    /// Searches along `direction`, computing the slope from `gradient` and
    /// starting from `params.initial_step_size`.
    fn search<C>(
        &mut self,
        cost_fn: &C,
        point: &DVector<T>,
        value: T,
        gradient: &DVector<T>,
        direction: &DVector<T>,
        params: &LineSearchParams<T>,
    ) -> OptimizerResult<LineSearchResult<T>>
    where
        C: CostFunction<T> + ?Sized,
    {
        let slope = gradient.dot(direction);
        self.search_with_deriv(
            cost_fn,
            point,
            value,
            direction,
            slope,
            params.initial_step_size,
            params,
        )
    }
}

fn check_descent<T: Scalar>(slope: T) -> OptimizerResult<()> {
    if slope < T::zero() {
        Ok(())
    } else {
        Err(OptimizerError::invalid_search_direction(Scalar::to_f64(slope)))
    }
}

fn all_finite<T: Scalar>(v: &DVector<T>) -> bool {
    v.iter().all(|x| <T as Float>::is_finite(*x))
}

/// Line search enforcing the Wolfe conditions, with trial steps chosen by a
/// one-dimensional search `S`.
///
/// If the trial budget runs out (or `S` gives up) the lowest trial that
/// satisfied sufficient decrease is returned with `success = false`; only
/// when no trial decreased the objective enough does the search fail.
#[derive(Debug, Clone, Default)]
pub struct WolfeLineSearch<S> {
    search: S,
    kind: WolfeKind,
}

impl<S> WolfeLineSearch<S> {
    /// Strong Wolfe line search driven by `search`.
    pub fn new(search: S) -> Self {
        Self {
            search,
            kind: WolfeKind::Strong,
        }
    }

    /// Selects the curvature condition.
    pub fn with_kind(mut self, kind: WolfeKind) -> Self {
        self.kind = kind;
        self
    }

    /// The curvature condition in use.
    pub fn kind(&self) -> WolfeKind {
        self.kind
    }
}

impl<T, S> LineSearch<T> for WolfeLineSearch<S>
where
    T: Scalar,
    S: DerivativeSearch<T>,
{
    fn name(&self) -> &str {
        DerivativeSearch::<T>::name(&self.search)
    }

    fn search_with_deriv<C>(
        &mut self,
        cost_fn: &C,
        point: &DVector<T>,
        value: T,
        direction: &DVector<T>,
        slope: T,
        initial_step: T,
        params: &LineSearchParams<T>,
    ) -> OptimizerResult<LineSearchResult<T>>
    where
        C: CostFunction<T> + ?Sized,
    {
        params.validate()?;
        check_descent(slope)?;

        let name = DerivativeSearch::<T>::name(&self.search).to_string();
        let wolfe = WolfeConditions::new(self.kind, params, value, slope);
        let mut step = params.clamp(self.search.start(initial_step, value, slope, params)?);
        let mut previous_step = None;
        let mut function_evals = 0;
        let mut best: Option<LineSearchResult<T>> = None;

        for _ in 0..params.max_iterations {
            if previous_step == Some(step) {
                break;
            }
            previous_step = Some(step);

            let trial_point = point + direction * step;
            let (trial_value, trial_gradient) = cost_fn.cost_and_gradient(&trial_point)?;
            function_evals += 1;

            if !<T as Float>::is_finite(trial_value) || !all_finite(&trial_gradient) {
                log::trace!("{name}: non-finite value at step {step}");
                step = step * params.rho;
                if step < params.min_step_size {
                    break;
                }
                continue;
            }

            let trial_slope = trial_gradient.dot(direction);
            if wolfe.is_satisfied(step, trial_value, trial_slope) {
                return Ok(LineSearchResult {
                    step_size: step,
                    new_point: trial_point,
                    new_value: trial_value,
                    new_gradient: trial_gradient,
                    function_evals,
                    gradient_evals: function_evals,
                    success: true,
                });
            }

            let next = self.search.observe(step, trial_value, trial_slope);
            if wolfe.sufficient_decrease(step, trial_value)
                && best.as_ref().map_or(true, |b| trial_value < b.new_value)
            {
                best = Some(LineSearchResult {
                    step_size: step,
                    new_point: trial_point,
                    new_value: trial_value,
                    new_gradient: trial_gradient,
                    function_evals,
                    gradient_evals: function_evals,
                    success: false,
                });
            }

            match next {
                Some(next) => step = params.clamp(next),
                None => break,
            }
        }

        match best {
            Some(mut result) => {
                log::debug!(
                    "{}: Wolfe conditions not met, taking step {} after {} evaluations",
                    name,
                    result.step_size,
                    function_evals
                );
                result.function_evals = function_evals;
                result.gradient_evals = function_evals;
                Ok(result)
            }
            None => Err(OptimizerError::line_search_failed(
                format!("{name}: no step gave sufficient decrease"),
                function_evals,
                Scalar::to_f64(step),
                Scalar::to_f64(value),
            )),
        }
    }
}

/// Backtracking line search with the Armijo condition.
///
/// Starting from the initial step, the step is multiplied by ρ until
/// φ(α) ≤ φ(0) + c₁·α·φ'(0). The gradient is evaluated once, at the
/// accepted point.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktrackingLineSearch;

impl BacktrackingLineSearch {
    /// Creates a new backtracking line search.
    pub fn new() -> Self {
        Self
    }
}

impl<T: Scalar> LineSearch<T> for BacktrackingLineSearch {
    fn name(&self) -> &str {
        "Backtracking"
    }

    fn search_with_deriv<C>(
        &mut self,
        cost_fn: &C,
        point: &DVector<T>,
        value: T,
        direction: &DVector<T>,
        slope: T,
        initial_step: T,
        params: &LineSearchParams<T>,
    ) -> OptimizerResult<LineSearchResult<T>>
    where
        C: CostFunction<T> + ?Sized,
    {
        params.validate()?;
        check_descent(slope)?;

        let wolfe = WolfeConditions::new(WolfeKind::Strong, params, value, slope);
        let mut step = params.clamp(initial_step);
        let mut function_evals = 0;

        for _ in 0..params.max_iterations {
            let trial_point = point + direction * step;
            let trial_value = cost_fn.cost(&trial_point)?;
            function_evals += 1;

            if <T as Float>::is_finite(trial_value) && wolfe.sufficient_decrease(step, trial_value) {
                let new_gradient = cost_fn.gradient(&trial_point)?;
                return Ok(LineSearchResult {
                    step_size: step,
                    new_point: trial_point,
                    new_value: trial_value,
                    new_gradient,
                    function_evals,
                    gradient_evals: 1,
                    success: true,
                });
            }

            step = step * params.rho;
            if step < params.min_step_size {
                break;
            }
        }

        Err(OptimizerError::line_search_failed(
            "Armijo condition not satisfied",
            function_evals,
            Scalar::to_f64(step),
            Scalar::to_f64(value),
        ))
    }
}

/// Line search selection for optimizer configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LineSearchKind {
    /// Strong Wolfe search with Moré–Thuente steps
    #[default]
    MoreThuente,
    /// Strong Wolfe search with derivative bisection
    Bisection,
    /// Armijo backtracking
    Backtracking,
}

/// Any of the line searches named by [`LineSearchKind`].
#[derive(Debug, Clone)]
pub enum AnyLineSearch<T: Scalar> {
    /// Moré–Thuente steps
    MoreThuente(WolfeLineSearch<MoreThuente<T>>),
    /// Bisection steps
    Bisection(WolfeLineSearch<Bisection<T>>),
    /// Armijo backtracking
    Backtracking(BacktrackingLineSearch),
}

impl<T: Scalar> From<LineSearchKind> for AnyLineSearch<T> {
    fn from(kind: LineSearchKind) -> Self {
        match kind {
            LineSearchKind::MoreThuente => Self::MoreThuente(WolfeLineSearch::new(MoreThuente::new())),
            LineSearchKind::Bisection => Self::Bisection(WolfeLineSearch::new(Bisection::new())),
            LineSearchKind::Backtracking => Self::Backtracking(BacktrackingLineSearch::new()),
        }
    }
}

impl<T: Scalar> LineSearch<T> for AnyLineSearch<T> {
    fn name(&self) -> &str {
        match self {
            Self::MoreThuente(ls) => LineSearch::<T>::name(ls),
            Self::Bisection(ls) => LineSearch::<T>::name(ls),
            Self::Backtracking(ls) => LineSearch::<T>::name(ls),
        }
    }

    fn search_with_deriv<C>(
        &mut self,
        cost_fn: &C,
        point: &DVector<T>,
        value: T,
        direction: &DVector<T>,
        slope: T,
        initial_step: T,
        params: &LineSearchParams<T>,
    ) -> OptimizerResult<LineSearchResult<T>>
    where
        C: CostFunction<T> + ?Sized,
    {
        match self {
            Self::MoreThuente(ls) => {
                ls.search_with_deriv(cost_fn, point, value, direction, slope, initial_step, params)
            }
            Self::Bisection(ls) => {
                ls.search_with_deriv(cost_fn, point, value, direction, slope, initial_step, params)
            }
            Self::Backtracking(ls) => {
                ls.search_with_deriv(cost_fn, point, value, direction, slope, initial_step, params)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rosenbrock_2d() -> Rosenbrock {
        Rosenbrock::new(2).unwrap()
    }

    fn steepest_descent_setup() -> (DVector<f64>, f64, DVector<f64>, DVector<f64>) {
        let x = DVector::from_vec(vec![-1.2, 1.0]);
        let (f, g) = rosenbrock_2d().cost_and_gradient(&x).unwrap();
        let p = -&g;
        (x, f, g, p)
    }

    #[test]
    fn test_params_validation() {
        assert!(LineSearchParams::<f64>::default().validate().is_ok());
        assert!(LineSearchParams::<f64>::backtracking().validate().is_ok());

        let mut params = LineSearchParams::<f64>::default();
        params.c2 = 1e-5;
        assert!(matches!(
            params.validate(),
            Err(OptimizerError::InvalidConfiguration { .. })
        ));

        let mut params = LineSearchParams::<f64>::default();
        params.rho = 1.0;
        assert!(params.validate().is_err());

        let mut params = LineSearchParams::<f64>::default();
        params.initial_step_size = 100.0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_wolfe_conditions() {
        let params = LineSearchParams::default();
        let strong = WolfeConditions::new(WolfeKind::Strong, &params, 1.0, -1.0);
        assert!(strong.sufficient_decrease(1.0, 0.5));
        assert!(!strong.sufficient_decrease(1.0, 1.0));
        assert!(strong.is_satisfied(1.0, 0.5, 0.5));
        assert!(!strong.is_satisfied(1.0, 0.5, 0.95));

        let weak = WolfeConditions::new(WolfeKind::Weak, &params, 1.0, -1.0);
        assert!(weak.is_satisfied(1.0, 0.5, 5.0));
        assert!(!weak.is_satisfied(1.0, 0.5, -0.95));
    }

    #[test]
    fn test_initial_step_heuristic() {
        let params = LineSearchParams::default();
        // 1.01 · 2 · (10 − 11) / −400
        assert_relative_eq!(initial_step(10.0, 11.0, -400.0, &params), 0.00505, epsilon = 1e-15);
        assert_eq!(initial_step(10.0, 5010.0, -1.0, &params), 1.0);
        // No decrease last time: fall back.
        assert_eq!(initial_step(10.0, 9.0, -1.0, &params), 1.0);
    }

    #[test]
    fn test_wolfe_searches_satisfy_conditions() {
        let cost = rosenbrock_2d();
        let (x, f, g, p) = steepest_descent_setup();
        let slope = g.dot(&p);
        let params = LineSearchParams::default();
        let wolfe = WolfeConditions::new(WolfeKind::Strong, &params, f, slope);

        for kind in [LineSearchKind::MoreThuente, LineSearchKind::Bisection] {
            let mut ls = AnyLineSearch::from(kind);
            let start = initial_step(f, f + 5000.0, slope, &params);
            let result = ls
                .search_with_deriv(&cost, &x, f, &p, slope, start, &params)
                .unwrap();
            assert!(result.success, "{kind:?}");
            assert!(result.new_value < f);
            assert!(wolfe.is_satisfied(
                result.step_size,
                result.new_value,
                result.new_gradient.dot(&p)
            ));
            assert_eq!(result.function_evals, result.gradient_evals);
            let expected = &x + &p * result.step_size;
            assert_relative_eq!(result.new_point, expected);
        }
    }

    #[test]
    fn test_backtracking_armijo() {
        let cost = rosenbrock_2d();
        let (x, f, g, p) = steepest_descent_setup();
        let mut ls = BacktrackingLineSearch::new();
        let params = LineSearchParams::backtracking();
        let result = ls.search(&cost, &x, f, &g, &p, &params).unwrap();
        assert!(result.new_value <= f + params.c1 * result.step_size * g.dot(&p));
        assert_eq!(result.gradient_evals, 1);
        // The unit step overshoots badly along −∇f, so backtracking happened.
        assert!(result.step_size < 1.0);
    }

    #[test]
    fn test_rejects_ascent_direction() {
        let cost = rosenbrock_2d();
        let (x, f, g, _) = steepest_descent_setup();
        for kind in [
            LineSearchKind::MoreThuente,
            LineSearchKind::Bisection,
            LineSearchKind::Backtracking,
        ] {
            let mut ls = AnyLineSearch::<f64>::from(kind);
            let err = ls
                .search(&cost, &x, f, &g, &g, &LineSearchParams::default())
                .unwrap_err();
            assert!(matches!(err, OptimizerError::InvalidSearchDirection { .. }));
        }
    }

    #[test]
    fn test_non_finite_trials_shrink_the_step() {
        // Finite only for x < 1.5.
        let barrier = FunctionCost::new(
            |x: &DVector<f64>| {
                if x[0] < 1.5 {
                    (x[0] - 1.0).powi(2)
                } else {
                    f64::INFINITY
                }
            },
            |x: &DVector<f64>| DVector::from_vec(vec![2.0 * (x[0] - 1.0)]),
        );
        let x = DVector::from_vec(vec![0.0]);
        let p = DVector::from_vec(vec![2.0]);
        let mut ls = AnyLineSearch::from(LineSearchKind::MoreThuente);
        let result = ls
            .search_with_deriv(&barrier, &x, 1.0, &p, -4.0, 1.0, &LineSearchParams::default())
            .unwrap();
        assert!(result.new_point[0] < 1.5);
        assert!(result.new_value < 1.0);
    }

    #[test]
    fn test_failure_without_decrease() {
        // Slope claims descent but the function only increases.
        let liar = FunctionCost::new(
            |x: &DVector<f64>| x[0] * x[0] + 1.0,
            |_x: &DVector<f64>| DVector::from_vec(vec![-1.0]),
        );
        let x = DVector::from_vec(vec![0.0]);
        let p = DVector::from_vec(vec![1.0]);
        let mut params = LineSearchParams::default();
        params.max_iterations = 10;
        let err = BacktrackingLineSearch::new()
            .search_with_deriv(&liar, &x, 1.0, &p, -1.0, 1.0, &params)
            .unwrap_err();
        assert!(matches!(err, OptimizerError::LineSearchFailed { .. }));
    }
}
