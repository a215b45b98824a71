//! Cost function interface for optimization algorithms.
//!
//! Optimizers only ever see an objective through [`CostFunction`]. An
//! implementation must provide the value; the gradient defaults to central
//! finite differences, so smooth objectives without an analytic derivative
//! still work (at the price of 2n extra evaluations per gradient).
//!
//! # Helpers
//!
//! - [`FunctionCost`] adapts a value closure and a gradient closure
//! - [`CountingCostFunction`] counts evaluations for diagnostics and tests
//! - [`DerivativeChecker`] compares an analytic gradient with finite differences

use crate::core::{
    error::{ObjectiveError, Result},
    types::{DVector, Scalar},
};
use num_traits::Float;
use std::cell::Cell;
use std::fmt::{self, Debug};

/// Trait for differentiable objective functions on ℝⁿ.
///
/// This is the main trait that optimization algorithms use to evaluate
/// the objective function and its derivatives.
pub trait CostFunction<T: Scalar>: Debug {
    /// Fixed input dimension, if the objective has one.
    ///
    /// Optimizers reject starting points of a different length.
    fn dimension(&self) -> Option<usize> {
        None
    }

    /// Evaluates the cost function at a point.
    fn cost(&self, point: &DVector<T>) -> Result<T>;

    /// Evaluates the cost function and its gradient at a point.
    ///
    /// The default implementation calls `cost` and falls back to
    /// [`gradient_fd`](Self::gradient_fd). Implementations with an analytic
    /// gradient should override this method.
    fn cost_and_gradient(&self, point: &DVector<T>) -> Result<(T, DVector<T>)> {
        let cost = self.cost(point)?;
        let gradient = self.gradient_fd(point)?;
        Ok((cost, gradient))
    }

    /// Computes only the gradient at a point.
    fn gradient(&self, point: &DVector<T>) -> Result<DVector<T>> {
        self.cost_and_gradient(point).map(|(_, gradient)| gradient)
    }

    /// Computes the gradient using central finite differences.
    ///
    /// The step is `h = ε^(1/3)`, which balances truncation and rounding
    /// error for central differences.
    fn gradient_fd(&self, point: &DVector<T>) -> Result<DVector<T>> {
        let n = point.len();
        let mut gradient = DVector::zeros(n);
        let h = <T as Float>::cbrt(T::EPSILON);
        let two_h = h + h;

        let mut shifted = point.clone();
        for i in 0..n {
            let xi = point[i];

            shifted[i] = xi + h;
            let f_plus = self.cost(&shifted)?;
            shifted[i] = xi - h;
            let f_minus = self.cost(&shifted)?;
            shifted[i] = xi;

            gradient[i] = (f_plus - f_minus) / two_h;
        }

        Ok(gradient)
    }
}

impl<T, C> CostFunction<T> for &C
where
    T: Scalar,
    C: CostFunction<T> + ?Sized,
{
    fn dimension(&self) -> Option<usize> {
        (**self).dimension()
    }

    fn cost(&self, point: &DVector<T>) -> Result<T> {
        (**self).cost(point)
    }

    fn cost_and_gradient(&self, point: &DVector<T>) -> Result<(T, DVector<T>)> {
        (**self).cost_and_gradient(point)
    }

    fn gradient(&self, point: &DVector<T>) -> Result<DVector<T>> {
        (**self).gradient(point)
    }
}

/// Cost function assembled from a value closure and a gradient closure.
///
/// ```
/// use quasinewton_core::prelude::*;
///
/// let paraboloid = FunctionCost::new(
///     |x: &DVector<f64>| x.norm_squared(),
///     |x: &DVector<f64>| x * 2.0,
/// );
/// let (value, gradient) = paraboloid
///     .cost_and_gradient(&DVector::from_vec(vec![1.0, 2.0]))
///     .unwrap();
/// assert_eq!(value, 5.0);
/// assert_eq!(gradient[1], 4.0);
/// ```
pub struct FunctionCost<F, G> {
    value: F,
    gradient: G,
    dimension: Option<usize>,
}

impl<F, G> FunctionCost<F, G> {
    /// Creates a cost function from closures computing f(x) and ∇f(x).
    pub fn new(value: F, gradient: G) -> Self {
        Self {
            value,
            gradient,
            dimension: None,
        }
    }

    /// Restricts the cost function to inputs of length `dimension`.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }
}

impl<F, G> Debug for FunctionCost<F, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionCost")
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

impl<T, F, G> CostFunction<T> for FunctionCost<F, G>
where
    T: Scalar,
    F: Fn(&DVector<T>) -> T,
    G: Fn(&DVector<T>) -> DVector<T>,
{
    fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    fn cost(&self, point: &DVector<T>) -> Result<T> {
        Ok((self.value)(point))
    }

    fn cost_and_gradient(&self, point: &DVector<T>) -> Result<(T, DVector<T>)> {
        let value = (self.value)(point);
        let gradient = (self.gradient)(point);
        if gradient.len() != point.len() {
            return Err(ObjectiveError::dimension_mismatch(
                point.len(),
                gradient.len(),
            ));
        }
        Ok((value, gradient))
    }
}

/// Wrapper to count function evaluations for testing and debugging.
#[derive(Debug)]
pub struct CountingCostFunction<F> {
    /// The underlying cost function
    pub inner: F,
    cost_count: Cell<usize>,
    gradient_count: Cell<usize>,
}

impl<F> CountingCostFunction<F> {
    /// Creates a new counting wrapper around a cost function.
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            cost_count: Cell::new(0),
            gradient_count: Cell::new(0),
        }
    }

    /// Resets all counters to zero.
    pub fn reset_counts(&self) {
        self.cost_count.set(0);
        self.gradient_count.set(0);
    }

    /// Returns the current (cost, gradient) evaluation counts.
    pub fn counts(&self) -> (usize, usize) {
        (self.cost_count.get(), self.gradient_count.get())
    }
}

impl<T, F> CostFunction<T> for CountingCostFunction<F>
where
    T: Scalar,
    F: CostFunction<T>,
{
    fn dimension(&self) -> Option<usize> {
        self.inner.dimension()
    }

    fn cost(&self, point: &DVector<T>) -> Result<T> {
        self.cost_count.set(self.cost_count.get() + 1);
        self.inner.cost(point)
    }

    fn cost_and_gradient(&self, point: &DVector<T>) -> Result<(T, DVector<T>)> {
        self.cost_count.set(self.cost_count.get() + 1);
        self.gradient_count.set(self.gradient_count.get() + 1);
        self.inner.cost_and_gradient(point)
    }

    fn gradient(&self, point: &DVector<T>) -> Result<DVector<T>> {
        self.gradient_count.set(self.gradient_count.get() + 1);
        self.inner.gradient(point)
    }
}

/// Utilities for checking gradient implementations.
pub struct DerivativeChecker;

impl DerivativeChecker {
    /// Checks if the gradient implementation matches finite differences.
    ///
    /// Each component is compared with the relative error
    /// `|g_i - fd_i| / max(1, |fd_i|)`.
    ///
    /// # Returns
    ///
    /// A tuple of (passes, max_error) where passes indicates if the
    /// gradient is correct within tolerance, and max_error is the
    /// maximum component-wise error.
    pub fn check_gradient<T, C>(cost_fn: &C, point: &DVector<T>, tol: T) -> Result<(bool, T)>
    where
        T: Scalar,
        C: CostFunction<T> + ?Sized,
    {
        let analytical_grad = cost_fn.gradient(point)?;
        let fd_grad = cost_fn.gradient_fd(point)?;
        if analytical_grad.len() != fd_grad.len() {
            return Err(ObjectiveError::dimension_mismatch(
                fd_grad.len(),
                analytical_grad.len(),
            ));
        }

        let max_error = analytical_grad
            .iter()
            .zip(fd_grad.iter())
            .map(|(&a, &fd)| {
                <T as Float>::abs(a - fd) / <T as Float>::max(T::one(), <T as Float>::abs(fd))
            })
            .fold(T::zero(), <T as Float>::max);

        Ok((max_error < tol, max_error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// f(x) = x1^2 + 2*x2^2 without an analytic gradient.
    #[derive(Debug)]
    struct SimpleCost;

    impl CostFunction<f64> for SimpleCost {
        fn cost(&self, point: &DVector<f64>) -> Result<f64> {
            Ok(point[0] * point[0] + 2.0 * point[1] * point[1])
        }
    }

    #[test]
    fn test_finite_difference_gradient() {
        let point = DVector::from_vec(vec![1.0, 2.0]);
        let grad = SimpleCost.gradient(&point).unwrap();

        assert_relative_eq!(grad[0], 2.0, epsilon = 1e-7);
        assert_relative_eq!(grad[1], 8.0, epsilon = 1e-7);
    }

    #[test]
    fn test_function_cost() {
        let cost = FunctionCost::new(
            |x: &DVector<f64>| x.norm_squared(),
            |x: &DVector<f64>| x * 2.0,
        )
        .with_dimension(3);

        let point = DVector::from_vec(vec![1.0, -1.0, 0.5]);
        let (value, grad) = cost.cost_and_gradient(&point).unwrap();
        assert_relative_eq!(value, 2.25);
        assert_relative_eq!(grad, DVector::from_vec(vec![2.0, -2.0, 1.0]));
        assert_eq!(CostFunction::<f64>::dimension(&cost), Some(3));
    }

    #[test]
    fn test_function_cost_rejects_short_gradient() {
        let cost = FunctionCost::new(
            |x: &DVector<f64>| x.sum(),
            |_: &DVector<f64>| DVector::zeros(1),
        );
        let result = cost.cost_and_gradient(&DVector::from_vec(vec![1.0, 2.0]));
        assert!(matches!(
            result,
            Err(ObjectiveError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_counting_cost_function() {
        let counting = CountingCostFunction::new(SimpleCost);
        let point = DVector::from_vec(vec![1.0, 1.0]);

        counting.cost(&point).unwrap();
        counting.cost_and_gradient(&point).unwrap();
        assert_eq!(counting.counts(), (2, 1));

        counting.reset_counts();
        assert_eq!(counting.counts(), (0, 0));
    }

    #[test]
    fn test_derivative_checker() {
        let good = FunctionCost::new(
            |x: &DVector<f64>| x[0].powi(3) + x[1],
            |x: &DVector<f64>| DVector::from_vec(vec![3.0 * x[0] * x[0], 1.0]),
        );
        let point = DVector::from_vec(vec![1.5, -0.5]);
        let (passes, max_error) = DerivativeChecker::check_gradient(&good, &point, 1e-6).unwrap();
        assert!(passes, "max error {max_error}");

        let bad = FunctionCost::new(
            |x: &DVector<f64>| x[0].powi(3) + x[1],
            |x: &DVector<f64>| DVector::from_vec(vec![2.0 * x[0], 1.0]),
        );
        let (passes, max_error) = DerivativeChecker::check_gradient(&bad, &point, 1e-6).unwrap();
        assert!(!passes);
        assert!(max_error > 0.1);
    }
}
