//! Error types for objective evaluation and optimization.
//!
//! This module defines the two error families used throughout the library:
//! [`ObjectiveError`] for problems detected while evaluating an objective or
//! its gradient, and [`OptimizerError`] for problems in the solver itself.

use thiserror::Error;

/// Errors that can occur while evaluating an objective function.
#[derive(Debug, Clone, Error)]
pub enum ObjectiveError {
    /// Input vector is shorter than the objective requires.
    ///
    /// The Rosenbrock function couples consecutive components and is only
    /// defined for vectors with at least two entries.
    #[error("Invalid input dimension: expected at least {minimum}, got {actual}")]
    InvalidDimension {
        /// Smallest accepted length
        minimum: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// Dimension mismatch between vectors or matrices.
    ///
    /// This error occurs when operations involve inputs with incompatible dimensions.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions
        expected: String,
        /// Actual dimensions
        actual: String,
    },

    /// A component of the input is NaN or infinite.
    #[error("Non-finite input component at index {index}: {value}")]
    NonFinite {
        /// Position of the offending component
        index: usize,
        /// Printed value of the component
        value: String,
    },

    /// Numerical instability detected.
    ///
    /// This error occurs when numerical operations become unstable,
    /// such as a failed factorization or an overflowing evaluation.
    #[error("Numerical instability detected: {reason}")]
    NumericalError {
        /// Description of the numerical issue
        reason: String,
    },

    /// Method or feature not implemented.
    #[error("Feature not implemented: {feature}")]
    NotImplemented {
        /// Name of the unimplemented feature
        feature: String,
    },
}

impl ObjectiveError {
    /// Create an InvalidDimension error.
    pub fn invalid_dimension(minimum: usize, actual: usize) -> Self {
        Self::InvalidDimension { minimum, actual }
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch<S1, S2>(expected: S1, actual: S2) -> Self
    where
        S1: std::fmt::Display,
        S2: std::fmt::Display,
    {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a NonFinite error for the component at `index`.
    pub fn non_finite<V: std::fmt::Display>(index: usize, value: V) -> Self {
        Self::NonFinite {
            index,
            value: value.to_string(),
        }
    }

    /// Create a NumericalError with a custom reason.
    pub fn numerical_error<S: Into<String>>(reason: S) -> Self {
        Self::NumericalError {
            reason: reason.into(),
        }
    }

    /// Create a NotImplemented error for a specific feature.
    pub fn not_implemented<S: Into<String>>(feature: S) -> Self {
        Self::NotImplemented {
            feature: feature.into(),
        }
    }
}

/// Errors that can occur during optimization.
#[derive(Debug, Clone, Error)]
pub enum OptimizerError {
    /// Line search failed to find an acceptable step.
    ///
    /// This error occurs when the line search cannot find a step size
    /// that gives any decrease of the objective within its budget.
    #[error("Line search failed: {reason}")]
    LineSearchFailed {
        /// Description of why the line search failed
        reason: String,
        /// Number of iterations attempted
        iterations: usize,
        /// Last step size tried
        last_step_size: f64,
        /// Function value at the starting point
        initial_value: f64,
    },

    /// Search direction is not a descent direction.
    #[error("Search direction is not a descent direction (directional derivative {directional_derivative})")]
    InvalidSearchDirection {
        /// Slope of the objective along the direction at step zero
        directional_derivative: f64,
    },

    /// Invalid optimizer configuration.
    ///
    /// This error occurs when the optimizer is configured with invalid
    /// parameters (e.g., non-positive tolerance, c1 >= c2).
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the configuration issue
        reason: String,
        /// Name of the problematic parameter
        parameter: String,
        /// Value that was rejected
        value: String,
    },

    /// A progress callback failed.
    #[error("Callback failed: {reason}")]
    CallbackFailed {
        /// Description of the failure
        reason: String,
    },

    /// Error raised by the objective function.
    #[error("Objective error: {0}")]
    Objective(#[from] ObjectiveError),
}

impl OptimizerError {
    /// Create a LineSearchFailed error.
    pub fn line_search_failed<S: Into<String>>(
        reason: S,
        iterations: usize,
        last_step_size: f64,
        initial_value: f64,
    ) -> Self {
        Self::LineSearchFailed {
            reason: reason.into(),
            iterations,
            last_step_size,
            initial_value,
        }
    }

    /// Create an InvalidSearchDirection error.
    pub fn invalid_search_direction(directional_derivative: f64) -> Self {
        Self::InvalidSearchDirection {
            directional_derivative,
        }
    }

    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration<S1, S2, V>(reason: S1, parameter: S2, value: V) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        V: std::fmt::Display,
    {
        Self::InvalidConfiguration {
            reason: reason.into(),
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Create a CallbackFailed error.
    pub fn callback_failed<S: Into<String>>(reason: S) -> Self {
        Self::CallbackFailed {
            reason: reason.into(),
        }
    }
}

/// Result type alias for objective evaluation.
pub type Result<T> = std::result::Result<T, ObjectiveError>;

/// Result type alias for optimizer operations.
pub type OptimizerResult<T> = std::result::Result<T, OptimizerError>;
