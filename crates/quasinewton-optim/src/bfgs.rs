//! BFGS optimizer with a dense inverse Hessian.
//!
//! BFGS (Broyden-Fletcher-Goldfarb-Shanno) keeps an n×n approximation H of
//! the inverse Hessian and moves along p = −H·∇f. After each step
//! s = x₊ − x with gradient change y = ∇f₊ − ∇f, H is updated so that the
//! secant equation H₊·y = s holds:
//!
//! ```text
//! ρ  = 1 / sᵀy
//! H₊ = (I − ρ·s·yᵀ)·H·(I − ρ·y·sᵀ) + ρ·s·sᵀ
//!    = H + (sᵀy + yᵀHy)/(sᵀy)² · s·sᵀ − (H·y·sᵀ + s·yᵀ·H)/(sᵀy)
//! ```
//!
//! The Wolfe curvature condition of the line search gives sᵀy > 0, which
//! keeps H positive definite and p a descent direction.
//!
//! # Key Features
//!
//! - **Dense update**: O(n²) memory and work per iteration
//! - **Optional first-update scaling**: replaces H₀ = I by (sᵀy/yᵀy)·I
//!   before the first update
//! - **Custom initial inverse Hessian**: any symmetric positive definite n×n
//!   matrix
//! - **Skipped updates**: pairs with sᵀy ≤ ε‖s‖‖y‖ leave H unchanged
//!
//! # References
//!
//! - Nocedal & Wright, "Numerical Optimization" (2006), Chapter 6

use crate::line_search::{AnyLineSearch, LineSearchKind, LineSearchParams};
use crate::quasi_newton::{self, insufficient_curvature, InverseHessianApprox};
use quasinewton_core::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the BFGS optimizer.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BfgsConfig<T: Scalar> {
    /// Line search strategy
    pub line_search: LineSearchKind,
    /// Line search parameters
    pub line_search_params: LineSearchParams<T>,
    /// Initial inverse Hessian (identity if `None`)
    pub initial_inverse_hessian: Option<DMatrix<T>>,
    /// Whether to scale the identity by sᵀy/yᵀy before the first update
    pub scale_initial_hessian: bool,
}

impl<T: Scalar> Default for BfgsConfig<T> {
    fn default() -> Self {
        Self {
            line_search: LineSearchKind::default(),
            line_search_params: LineSearchParams::strong_wolfe(),
            initial_inverse_hessian: None,
            scale_initial_hessian: false,
        }
    }
}

impl<T: Scalar> BfgsConfig<T> {
    /// Creates a new configuration with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the line search strategy.
    pub fn with_line_search(mut self, kind: LineSearchKind) -> Self {
        self.line_search = kind;
        self
    }

    /// Sets the line search parameters.
    pub fn with_line_search_params(mut self, params: LineSearchParams<T>) -> Self {
        self.line_search_params = params;
        self
    }

    /// Sets the initial inverse Hessian.
    pub fn with_initial_inverse_hessian(mut self, h0: DMatrix<T>) -> Self {
        self.initial_inverse_hessian = Some(h0);
        self
    }

    /// Enables or disables scaling of the identity before the first update.
    pub fn with_scaled_initial_hessian(mut self, scale: bool) -> Self {
        self.scale_initial_hessian = scale;
        self
    }

    /// Checks the configuration for an `n`-dimensional problem.
    pub fn validate(&self, n: usize) -> OptimizerResult<()> {
        self.line_search_params.validate()?;
        if let Some(h0) = &self.initial_inverse_hessian {
            if h0.nrows() != n || h0.ncols() != n {
                return Err(OptimizerError::invalid_configuration(
                    format!("initial inverse Hessian must be {n}x{n}"),
                    "initial_inverse_hessian",
                    format!("{}x{}", h0.nrows(), h0.ncols()),
                ));
            }
            if h0.iter().any(|v| !num_traits::Float::is_finite(*v)) {
                return Err(OptimizerError::invalid_configuration(
                    "initial inverse Hessian must be finite",
                    "initial_inverse_hessian",
                    "non-finite entry",
                ));
            }
        }
        Ok(())
    }
}

/// Dense inverse Hessian approximation.
#[derive(Debug, Clone)]
struct DenseInverseHessian<T: Scalar> {
    initial: Option<DMatrix<T>>,
    scale_first: bool,
    h: DMatrix<T>,
    updates: usize,
}

impl<T: Scalar> DenseInverseHessian<T> {
    fn new(config: &BfgsConfig<T>) -> Self {
        Self {
            initial: config.initial_inverse_hessian.clone(),
            scale_first: config.scale_initial_hessian,
            h: DMatrix::zeros(0, 0),
            updates: 0,
        }
    }
}

impl<T: Scalar> InverseHessianApprox<T> for DenseInverseHessian<T> {
    fn reset(&mut self, n: usize) {
        self.h = match &self.initial {
            Some(h0) if h0.nrows() == n => h0.clone(),
            _ => DMatrix::identity(n, n),
        };
        self.updates = 0;
    }

    fn direction(&self, gradient: &DVector<T>) -> DVector<T> {
        -(&self.h * gradient)
    }

    fn update(&mut self, s: &DVector<T>, y: &DVector<T>) -> bool {
        let sy = s.dot(y);
        if insufficient_curvature(sy, s, y) {
            return false;
        }

        if self.updates == 0 && self.scale_first && self.initial.is_none() {
            let n = s.len();
            self.h = DMatrix::identity(n, n) * (sy / y.norm_squared());
        }

        let hy = &self.h * y;
        let yhy = y.dot(&hy);
        let ss = s * s.transpose();
        let cross = &hy * s.transpose() + s * hy.transpose();
        self.h += ss * ((sy + yhy) / (sy * sy)) - cross * (T::one() / sy);
        self.updates += 1;
        true
    }
}

/// BFGS optimizer.
///
/// # Examples
///
/// ```
/// use quasinewton_core::prelude::*;
/// use quasinewton_optim::{Bfgs, BfgsConfig};
///
/// let mut bfgs = Bfgs::new(BfgsConfig::new());
/// let x0 = DVector::<f64>::from_vec(vec![-1.2, 1.0]);
/// let criterion = StoppingCriterion::new().with_gradient_tolerance(1e-8);
/// let result = bfgs.optimize(&Rosenbrock::new(2).unwrap(), &x0, &criterion).unwrap();
/// assert!(result.converged);
/// assert!((result.point[0] - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct Bfgs<T: Scalar> {
    config: BfgsConfig<T>,
    line_search: AnyLineSearch<T>,
}

impl<T: Scalar> Bfgs<T> {
    /// Creates a new BFGS optimizer with the given configuration.
    pub fn new(config: BfgsConfig<T>) -> Self {
        let line_search = AnyLineSearch::from(config.line_search);
        Self {
            config,
            line_search,
        }
    }

    /// Creates a new BFGS optimizer with default configuration.
    pub fn with_default_config() -> Self {
        Self::new(BfgsConfig::default())
    }

    /// Returns the optimizer configuration.
    pub fn config(&self) -> &BfgsConfig<T> {
        &self.config
    }
}

impl<T: Scalar> Optimizer<T> for Bfgs<T> {
    fn name(&self) -> &str {
        "BFGS"
    }

    fn optimize_with_callback<C>(
        &mut self,
        cost_fn: &C,
        initial_point: &DVector<T>,
        stopping_criterion: &StoppingCriterion<T>,
        callback: &mut dyn OptimizationCallback<T>,
    ) -> OptimizerResult<OptimizationResult<T>>
    where
        C: CostFunction<T> + ?Sized,
    {
        self.config.validate(initial_point.len())?;
        self.line_search = AnyLineSearch::from(self.config.line_search);
        let mut approx = DenseInverseHessian::new(&self.config);

        quasi_newton::run(
            "BFGS",
            &mut approx,
            &mut self.line_search,
            &self.config.line_search_params,
            cost_fn,
            initial_point,
            stopping_criterion,
            callback,
        )
    }
}
