//! Input checks shared by objectives and optimizers.

use crate::core::{
    error::{ObjectiveError, Result},
    types::Scalar,
};
use num_traits::Float;

/// Checks that `x` has at least `minimum` components and that all are finite.
pub fn validate_point<T: Scalar>(x: &[T], minimum: usize) -> Result<()> {
    if x.len() < minimum {
        return Err(ObjectiveError::invalid_dimension(minimum, x.len()));
    }
    match x.iter().position(|v| !<T as Float>::is_finite(*v)) {
        Some(index) => Err(ObjectiveError::non_finite(index, x[index])),
        None => Ok(()),
    }
}

/// Checks that `actual` equals the dimension a fixed-size objective expects.
pub fn validate_dimension(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(ObjectiveError::dimension_mismatch(expected, actual))
    }
}
