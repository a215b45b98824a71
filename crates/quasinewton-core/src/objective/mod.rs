//! Objective functions.
//!
//! - [`rosenbrock`]: the generalized Rosenbrock valley and its gradient
//! - [`least_squares`]: linear least-squares residual objective

pub mod least_squares;
pub mod rosenbrock;

pub use least_squares::LinearLeastSquares;
pub use rosenbrock::{
    rosenbrock, rosenbrock_gradient, rosenbrock_gradient_into, rosenbrock_with_gradient,
    Rosenbrock,
};
