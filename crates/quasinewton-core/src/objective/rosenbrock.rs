//! The generalized Rosenbrock function and its gradient.
//!
//! For x ∈ ℝⁿ with n ≥ 2:
//!
//! ```text
//! f(x) = Σ_{i=0}^{n-2} 100·(x[i+1] − x[i]²)² + (1 − x[i])²
//! ```
//!
//! The function is non-negative with its global minimum f = 0 at (1, …, 1),
//! sitting at the bottom of a narrow curved valley that makes it a standard
//! stress test for line-search and quasi-Newton methods.
//!
//! The gradient has three forms depending on the position of the component:
//!
//! ```text
//! g[0]   = −400·x[0]·(x[1] − x[0]²) − 2·(1 − x[0])
//! g[i]   = 200·(x[i] − x[i-1]²) − 400·(x[i+1] − x[i]²)·x[i] − 2·(1 − x[i])
//! g[n-1] = 200·(x[n-1] − x[n-2]²)
//! ```
//!
//! Both are computed here in one sweep over consecutive pairs, each pair
//! contributing to the two components it couples.
//!
//! All functions take plain slices, so vectors, arrays and nalgebra storage
//! (through `as_slice`) are evaluated by the same code and give identical
//! results. Inputs shorter than two components or containing NaN or
//! infinities are rejected. Finite inputs large enough to overflow produce an
//! infinite value rather than an error, which line searches treat as "too far".

use crate::core::{
    cost_function::CostFunction,
    error::{ObjectiveError, Result},
    types::{DVector, Scalar},
    validation::{validate_dimension, validate_point},
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest input length for which the function is defined.
pub const MIN_DIMENSION: usize = 2;

/// Five-dimensional starting point of the classic BFGS demonstration.
pub const DEFAULT_START: [f64; 5] = [1.3, 0.7, 0.8, 1.9, 1.2];

#[inline]
fn pair_term<T: Scalar>(xi: T, next: T) -> T {
    let valley = next - xi * xi;
    let offset = T::one() - xi;
    <T as Scalar>::from_f64(100.0) * valley * valley + offset * offset
}

/// Evaluates the Rosenbrock function at `x`.
pub fn rosenbrock<T: Scalar>(x: &[T]) -> Result<T> {
    validate_point(x, MIN_DIMENSION)?;
    Ok(x
        .windows(2)
        .fold(T::zero(), |acc, pair| acc + pair_term(pair[0], pair[1])))
}

/// Writes the gradient of the Rosenbrock function at `x` into `gradient`.
///
/// `gradient` must have the same length as `x`.
pub fn rosenbrock_gradient_into<T: Scalar>(x: &[T], gradient: &mut [T]) -> Result<()> {
    validate_point(x, MIN_DIMENSION)?;
    if gradient.len() != x.len() {
        return Err(ObjectiveError::dimension_mismatch(x.len(), gradient.len()));
    }

    let two = <T as Scalar>::from_f64(2.0);
    let two_hundred = <T as Scalar>::from_f64(200.0);
    let four_hundred = <T as Scalar>::from_f64(400.0);

    gradient.fill(T::zero());
    for (i, pair) in x.windows(2).enumerate() {
        let (xi, next) = (pair[0], pair[1]);
        let valley = next - xi * xi;
        gradient[i] -= four_hundred * valley * xi + two * (T::one() - xi);
        gradient[i + 1] += two_hundred * valley;
    }
    Ok(())
}

/// Computes the gradient of the Rosenbrock function at `x`.
pub fn rosenbrock_gradient<T: Scalar>(x: &[T]) -> Result<DVector<T>> {
    let mut gradient = DVector::zeros(x.len());
    rosenbrock_gradient_into(x, gradient.as_mut_slice())?;
    Ok(gradient)
}

/// Computes the value and the gradient of the Rosenbrock function at `x`.
pub fn rosenbrock_with_gradient<T: Scalar>(x: &[T]) -> Result<(T, DVector<T>)> {
    let gradient = rosenbrock_gradient(x)?;
    let value = x
        .windows(2)
        .fold(T::zero(), |acc, pair| acc + pair_term(pair[0], pair[1]));
    Ok((value, gradient))
}

/// Rosenbrock objective of a fixed dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rosenbrock {
    dimension: usize,
}

impl Rosenbrock {
    /// Creates the objective for inputs of length `dimension` (at least 2).
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension < MIN_DIMENSION {
            return Err(ObjectiveError::invalid_dimension(MIN_DIMENSION, dimension));
        }
        Ok(Self { dimension })
    }

    /// Input length of this objective.
    pub fn dim(&self) -> usize {
        self.dimension
    }

    /// The global minimizer (1, …, 1).
    pub fn minimizer<T: Scalar>(&self) -> DVector<T> {
        DVector::from_element(self.dimension, T::one())
    }

    /// The global minimum value, zero.
    pub fn minimum<T: Scalar>(&self) -> T {
        T::zero()
    }
}

impl<T: Scalar> CostFunction<T> for Rosenbrock {
    fn dimension(&self) -> Option<usize> {
        Some(self.dimension)
    }

    fn cost(&self, point: &DVector<T>) -> Result<T> {
        validate_dimension(self.dimension, point.len())?;
        rosenbrock(point.as_slice())
    }

    fn cost_and_gradient(&self, point: &DVector<T>) -> Result<(T, DVector<T>)> {
        validate_dimension(self.dimension, point.len())?;
        rosenbrock_with_gradient(point.as_slice())
    }

    fn gradient(&self, point: &DVector<T>) -> Result<DVector<T>> {
        validate_dimension(self.dimension, point.len())?;
        rosenbrock_gradient(point.as_slice())
    }
}
