//! Quasi-Newton optimization algorithms.
//!
//! This crate provides BFGS and L-BFGS together with the line searches and
//! one-dimensional searches they are built on. Objectives come from
//! `quasinewton-core` through its `CostFunction` trait.
//!
//! # Available Optimizers
//!
//! - **BFGS**: dense inverse Hessian approximation
//! - **L-BFGS**: limited-memory two-loop recursion
//!
//! # Line Searches
//!
//! - **Moré–Thuente**: safeguarded cubic/quadratic interpolation (default)
//! - **Bisection**: derivative bisection under the Wolfe conditions
//! - **Backtracking**: Armijo condition only
//!
//! # Examples
//!
//! ```rust
//! use quasinewton_core::prelude::*;
//! use quasinewton_optim::{Bfgs, BfgsConfig, LineSearchKind};
//!
//! let mut optimizer = Bfgs::new(
//!     BfgsConfig::new().with_line_search(LineSearchKind::MoreThuente),
//! );
//!
//! let stopping_criterion = StoppingCriterion::new()
//!     .with_max_iterations(1000)
//!     .with_gradient_tolerance(1e-2);
//!
//! let rosen = Rosenbrock::new(5).unwrap();
//! let x0 = DVector::from_vec(vec![1.3, 0.7, 0.8, 1.9, 1.2]);
//! let result = optimizer.optimize(&rosen, &x0, &stopping_criterion).unwrap();
//! assert!(result.converged);
//! ```

pub mod bfgs;
pub mod lbfgs;
pub mod line_search;
pub mod minimize;
pub mod univariate;

mod quasi_newton;

// Re-export main optimizers for convenience
pub use bfgs::{Bfgs, BfgsConfig};
pub use lbfgs::{LBFGSConfig, LBFGSState, LBFGS};
pub use line_search::{
    AnyLineSearch, BacktrackingLineSearch, LineSearch, LineSearchKind, LineSearchParams,
    LineSearchResult, WolfeConditions, WolfeKind, WolfeLineSearch,
};
pub use minimize::{minimize, Method, MinimizeOptions};
pub use univariate::{
    minimize_with_derivative, minimize_without_derivative, Bisection, DerivativeSearch,
    GoldenSection, MoreThuente, UnivariateResult, ValueSearch,
};

/// Prelude module for convenient imports.
///
/// Brings in the core prelude as well.
pub mod prelude {
    pub use crate::{
        minimize, Bfgs, BfgsConfig, LBFGSConfig, LineSearchKind, LineSearchParams, Method,
        MinimizeOptions, LBFGS,
    };
    pub use quasinewton_core::prelude::*;
}
