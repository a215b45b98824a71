//! # quasinewton
//!
//! The Rosenbrock benchmark objective and its gradient, minimized with BFGS
//! or L-BFGS.
//!
//! This crate re-exports the workspace crates:
//!
//! - [`quasinewton_core`]: objectives, cost function trait, stopping rules,
//!   callbacks
//! - [`quasinewton_optim`]: BFGS, L-BFGS, line searches and univariate searches
//!
//! # Quick Start
//!
//! ```rust
//! use quasinewton::prelude::*;
//!
//! let x0 = DVector::from_vec(vec![1.3, 0.7, 0.8, 1.9, 1.2]);
//! let rosen = Rosenbrock::new(x0.len()).unwrap();
//! let options = MinimizeOptions::new().with_tol(1e-2);
//!
//! let result = minimize(&rosen, &x0, Method::Bfgs, &options).unwrap();
//! assert!(result.converged);
//! ```
//!
//! The `rosen_bfgs` binary runs the same minimization from the command line
//! with a progress table.

pub use quasinewton_core;
pub use quasinewton_optim;

pub use quasinewton_core::objective::rosenbrock::DEFAULT_START;

/// Everything needed to define an objective and minimize it.
pub mod prelude {
    pub use quasinewton_optim::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use super::DEFAULT_START;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_start_value() {
        let value = rosenbrock(&DEFAULT_START).unwrap();
        assert_relative_eq!(value, 848.22, epsilon = 1e-9);
    }

    #[test]
    fn test_prelude_minimizes() {
        let x0 = DVector::from_row_slice(&DEFAULT_START);
        let rosen = Rosenbrock::new(5).unwrap();
        let options = MinimizeOptions::new().with_tol(1e-2);
        let result = minimize(&rosen, &x0, Method::LBfgs, &options).unwrap();
        assert!(result.converged);
    }
}
