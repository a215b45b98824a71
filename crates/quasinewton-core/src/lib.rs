//! Core traits and types for quasi-Newton optimization.
//!
//! This crate provides the objective side of the workspace and the
//! vocabulary shared by all solvers. It contains no optimization algorithm;
//! those live in `quasinewton-optim` and consume objectives only through the
//! [`CostFunction`](core::cost_function::CostFunction) trait.
//!
//! # Key Concepts
//!
//! - **Objectives**: the generalized Rosenbrock function and a linear
//!   least-squares residual, each with an analytic gradient
//! - **Cost functions**: value and gradient oracle used by optimizers
//! - **Stopping rules**: gradient, change-over-window and budget criteria
//! - **Callbacks**: progress logging, tabular display and early stopping
//!
//! # Modules
//!
//! - [`core`]: numeric types, errors, cost function trait and input checks
//! - [`objective`]: Rosenbrock and least-squares objectives
//! - [`optimization`]: optimizer trait, stopping criterion, callbacks, display
//!
//! # Example
//!
//! ```
//! use quasinewton_core::prelude::*;
//!
//! let x = [1.3, 0.7, 0.8, 1.9, 1.2];
//! let value = rosenbrock(&x).unwrap();
//! let gradient = rosenbrock_gradient(&x).unwrap();
//! assert!(value > 0.0);
//! assert_eq!(gradient.len(), 5);
//! ```

pub mod core;
pub mod objective;
pub mod optimization;

// Re-export commonly used items at the crate root
pub use crate::core::error::{ObjectiveError, OptimizerError, OptimizerResult, Result};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use quasinewton_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::cost_function::{
        CostFunction, CountingCostFunction, DerivativeChecker, FunctionCost,
    };
    pub use crate::core::error::{ObjectiveError, OptimizerError, OptimizerResult, Result};
    pub use crate::core::types::{constants, DMatrix, DVector, SVector, Scalar};
    pub use crate::objective::{
        rosenbrock, rosenbrock_gradient, rosenbrock_gradient_into, rosenbrock_with_gradient,
        LinearLeastSquares, Rosenbrock,
    };
    pub use crate::optimization::callback::{
        CallbackInfo, LogProgressCallback, MonitorCallback, NoOpCallback, OptimizationCallback,
    };
    pub use crate::optimization::display::{DisplayFormat, ProgressDisplay};
    pub use crate::optimization::optimizer::{
        ConvergenceMonitor, OptimizationResult, Optimizer, OptimizerState, StoppingCriterion,
        TerminationReason,
    };
    pub use crate::optimization::tolerance::WindowedTolerance;
}
