//! Type definitions and aliases for quasi-Newton optimization.
//!
//! This module provides the numeric trait shared by every algorithm in the
//! workspace together with the nalgebra aliases used for points, gradients
//! and inverse-Hessian approximations.

use nalgebra::{Const, Dyn, OMatrix, OVector, RealField, Scalar as NalgebraScalar};
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Trait for scalar types used in optimization (f32 or f64).
///
/// This trait combines all the necessary numeric traits required
/// by the objectives, line searches and quasi-Newton updates.
pub trait Scalar:
    NalgebraScalar
    + RealField
    + Float
    + FromPrimitive
    + Display
    + Debug
    + Default
    + Copy
    + Send
    + Sync
    + 'static
{
    /// Machine epsilon for this scalar type.
    const EPSILON: Self;

    /// Default tolerance for gradient norm convergence.
    const DEFAULT_GRADIENT_TOLERANCE: Self;

    /// Convert from f64 (for constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_from_f64` for a non-panicking version.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }

    /// Try to convert from f64.
    fn try_from_f64(v: f64) -> Option<Self> {
        <Self as FromPrimitive>::from_f64(v)
    }

    /// Convert to f64 (for logging and error payloads).
    ///
    /// Values that cannot be represented become NaN.
    fn to_f64(self) -> f64 {
        num_traits::cast(self).unwrap_or(f64::NAN)
    }

    /// Try to convert from usize (for dataset construction).
    fn try_from_usize(v: usize) -> Option<Self> {
        <Self as FromPrimitive>::from_usize(v)
    }
}

impl Scalar for f32 {
    const EPSILON: Self = f32::EPSILON;
    const DEFAULT_GRADIENT_TOLERANCE: Self = 1e-4;
}

impl Scalar for f64 {
    const EPSILON: Self = f64::EPSILON;
    const DEFAULT_GRADIENT_TOLERANCE: Self = 1e-6;
}

/// Type alias for a dynamically-sized matrix.
pub type DMatrix<T> = OMatrix<T, Dyn, Dyn>;

/// Type alias for a dynamically-sized vector.
pub type DVector<T> = OVector<T, Dyn>;

/// Type alias for a statically-sized vector.
pub type SVector<T, const N: usize> = OVector<T, Const<N>>;

/// Numerical constants for different precision levels.
pub mod constants {
    use super::Scalar;

    /// Get machine epsilon for the given scalar type.
    pub fn epsilon<T: Scalar>() -> T {
        T::EPSILON
    }

    /// Get default gradient convergence tolerance.
    pub fn gradient_tolerance<T: Scalar>() -> T {
        T::DEFAULT_GRADIENT_TOLERANCE
    }

    /// Golden ratio constant.
    pub fn golden_ratio<T: Scalar>() -> T {
        <T as Scalar>::from_f64(1.618_033_988_749_895)
    }
}
