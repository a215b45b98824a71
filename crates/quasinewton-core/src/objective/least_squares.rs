//! Linear least-squares objective f(x) = ‖A·x − b‖².

use crate::core::{
    cost_function::CostFunction,
    error::{ObjectiveError, Result},
    types::{DMatrix, DVector, Scalar},
    validation::{validate_dimension, validate_point},
};
use num_traits::Float;

/// Sum of squared residuals of an overdetermined linear system.
///
/// The gradient is `2·Aᵀ(A·x − b)`.
#[derive(Debug, Clone)]
pub struct LinearLeastSquares<T: Scalar> {
    a: DMatrix<T>,
    b: DVector<T>,
}

impl<T: Scalar> LinearLeastSquares<T> {
    /// Creates the objective for the system `A·x ≈ b`.
    pub fn new(a: DMatrix<T>, b: DVector<T>) -> Result<Self> {
        if a.nrows() != b.len() {
            return Err(ObjectiveError::dimension_mismatch(
                format!("{} observations", a.nrows()),
                format!("{} observations", b.len()),
            ));
        }
        if a.ncols() == 0 {
            return Err(ObjectiveError::invalid_dimension(1, 0));
        }
        Ok(Self { a, b })
    }

    /// Deterministic dataset with `A[i, j] = i·m + j` and `b[i] = i`.
    ///
    /// For `m = 10, n = 3` this is the system used alongside the Rosenbrock
    /// demonstration. Its columns are affinely dependent, so the minimizer
    /// is not unique, but the minimum value is zero.
    pub fn synthetic(m: usize, n: usize) -> Result<Self> {
        // Column-major, as nalgebra stores it.
        let a = (0..n)
            .flat_map(|j| (0..m).map(move |i| i * m + j))
            .map(representable)
            .collect::<Result<Vec<T>>>()?;
        let b = (0..m).map(representable).collect::<Result<Vec<T>>>()?;
        Self::new(DMatrix::from_vec(m, n, a), DVector::from_vec(b))
    }

    /// Number of observations (rows of A).
    pub fn observations(&self) -> usize {
        self.a.nrows()
    }

    /// Number of unknowns (columns of A).
    pub fn unknowns(&self) -> usize {
        self.a.ncols()
    }

    /// Residual vector `A·x − b`.
    pub fn residual(&self, x: &DVector<T>) -> Result<DVector<T>> {
        validate_dimension(self.a.ncols(), x.len())?;
        validate_point(x.as_slice(), 1)?;
        Ok(&self.a * x - &self.b)
    }

    /// Minimum-norm least-squares solution computed with an SVD.
    pub fn least_squares_solution(&self) -> Result<DVector<T>> {
        let svd = self.a.clone().svd(true, true);
        let largest = svd
            .singular_values
            .iter()
            .fold(T::zero(), |acc, &s| <T as Float>::max(acc, s));
        let cutoff = largest * T::EPSILON * representable::<T>(self.a.nrows().max(1))?;
        svd.solve(&self.b, cutoff)
            .map_err(ObjectiveError::numerical_error)
    }
}

fn representable<T: Scalar>(v: usize) -> Result<T> {
    <T as Scalar>::try_from_usize(v)
        .ok_or_else(|| ObjectiveError::numerical_error(format!("{v} is not representable")))
}

impl<T: Scalar> CostFunction<T> for LinearLeastSquares<T> {
    fn dimension(&self) -> Option<usize> {
        Some(self.a.ncols())
    }

    fn cost(&self, point: &DVector<T>) -> Result<T> {
        let r = self.residual(point)?;
        Ok(r.norm_squared())
    }

    fn cost_and_gradient(&self, point: &DVector<T>) -> Result<(T, DVector<T>)> {
        let r = self.residual(point)?;
        let gradient = self.a.tr_mul(&r) * <T as Scalar>::from_f64(2.0);
        Ok((r.norm_squared(), gradient))
    }
}
