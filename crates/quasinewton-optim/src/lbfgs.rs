//! L-BFGS optimizer.
//!
//! L-BFGS (Limited-memory Broyden-Fletcher-Goldfarb-Shanno) is a quasi-Newton optimization
//! algorithm that approximates the inverse Hessian using a limited history of past gradient
//! and position updates. Memory and work per iteration are O(m·n) for m stored pairs,
//! against O(n²) for dense [`Bfgs`](crate::Bfgs).
//!
//! # Algorithm Overview
//!
//! 1. Stores the m most recent position differences s_k and gradient differences y_k
//! 2. Approximates the inverse Hessian-vector product using two-loop recursion
//! 3. Computes search direction as negative approximate Newton direction
//! 4. Performs line search to find suitable step size
//!
//! ## Two-Loop Recursion Algorithm
//!
//! ```text
//! q = grad_f(x_k)
//! for i = k-1, k-2, ..., k-m:
//!     α_i = ρ_i * <s_i, q>
//!     q = q - α_i * y_i
//!
//! r = γ * q  // γ = <s_{k-1}, y_{k-1}> / <y_{k-1}, y_{k-1}>
//!
//! for i = k-m, k-m+1, ..., k-1:
//!     β = ρ_i * <y_i, r>
//!     r = r + (α_i - β) * s_i
//!
//! return -r  // Search direction
//! ```
//!
//! # Key Features
//!
//! - **Limited memory**: Only stores m vector pairs (typically 5-20)
//! - **Automatic scaling**: Initial Hessian approximation based on most recent update
//! - **Cautious updates**: Pairs with too little curvature are not stored
//! - **Strong Wolfe line search**: Ensures sufficient decrease and curvature conditions
//!
//! # References
//!
//! - Nocedal & Wright, "Numerical Optimization" (2006), Chapter 7
//! - Liu & Nocedal, "On the limited memory BFGS method for large scale optimization" (1989)

use crate::line_search::{AnyLineSearch, LineSearchKind, LineSearchParams};
use crate::quasi_newton::{self, insufficient_curvature, InverseHessianApprox};
use quasinewton_core::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Stored curvature pairs of L-BFGS.
#[derive(Debug, Clone)]
pub struct LBFGSState<T: Scalar> {
    /// Number of vector pairs to keep
    pub memory_size: usize,

    /// Position differences s_k = x_{k+1} - x_k, oldest first
    pub s_history: VecDeque<DVector<T>>,

    /// Gradient differences y_k = g_{k+1} - g_k, oldest first
    pub y_history: VecDeque<DVector<T>>,

    /// ρ_k = 1 / (y_k^T s_k)
    pub rho_history: VecDeque<T>,

    cautious: bool,
}

impl<T: Scalar> LBFGSState<T> {
    /// Creates an empty history.
    pub fn new(memory_size: usize) -> Self {
        Self {
            memory_size,
            s_history: VecDeque::with_capacity(memory_size),
            y_history: VecDeque::with_capacity(memory_size),
            rho_history: VecDeque::with_capacity(memory_size),
            cautious: true,
        }
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.s_history.len()
    }

    /// True if no pair is stored.
    pub fn is_empty(&self) -> bool {
        self.s_history.is_empty()
    }

    /// Drops all stored pairs.
    pub fn clear(&mut self) {
        self.s_history.clear();
        self.y_history.clear();
        self.rho_history.clear();
    }

    /// Stores the pair (s, y), evicting the oldest one when full.
    ///
    /// Returns false if the pair was rejected for lack of curvature.
    pub fn push(&mut self, s: DVector<T>, y: DVector<T>) -> bool {
        let sy = s.dot(&y);
        let rejected = if self.cautious {
            insufficient_curvature(sy, &s, &y)
        } else {
            !(sy > T::zero())
        };
        if rejected || self.memory_size == 0 {
            return false;
        }

        if self.s_history.len() == self.memory_size {
            self.s_history.pop_front();
            self.y_history.pop_front();
            self.rho_history.pop_front();
        }
        self.rho_history.push_back(T::one() / sy);
        self.s_history.push_back(s);
        self.y_history.push_back(y);
        true
    }

    /// Computes H·q by the two-loop recursion.
    pub fn apply_inverse_hessian(&self, q: &DVector<T>) -> DVector<T> {
        let m = self.len();
        if m == 0 {
            return q.clone();
        }

        let mut q = q.clone();
        let mut alpha = vec![T::zero(); m];
        for i in (0..m).rev() {
            alpha[i] = self.rho_history[i] * self.s_history[i].dot(&q);
            q.axpy(-alpha[i], &self.y_history[i], T::one());
        }

        let s = &self.s_history[m - 1];
        let y = &self.y_history[m - 1];
        let gamma = s.dot(y) / y.norm_squared();
        let mut r = q * gamma;

        for i in 0..m {
            let beta = self.rho_history[i] * self.y_history[i].dot(&r);
            r.axpy(alpha[i] - beta, &self.s_history[i], T::one());
        }
        r
    }
}

impl<T: Scalar> InverseHessianApprox<T> for LBFGSState<T> {
    fn reset(&mut self, _n: usize) {
        self.clear();
    }

    fn direction(&self, gradient: &DVector<T>) -> DVector<T> {
        -self.apply_inverse_hessian(gradient)
    }

    fn update(&mut self, s: &DVector<T>, y: &DVector<T>) -> bool {
        self.push(s.clone(), y.clone())
    }
}

/// Configuration for the L-BFGS optimizer.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LBFGSConfig<T: Scalar> {
    /// Number of vector pairs to store (typically 5-20)
    pub memory_size: usize,
    /// Line search strategy
    pub line_search: LineSearchKind,
    /// Line search parameters
    pub line_search_params: LineSearchParams<T>,
    /// Whether to use cautious updates (skip pairs with sᵀy ≤ ε‖s‖‖y‖)
    pub use_cautious_updates: bool,
}

impl<T: Scalar> Default for LBFGSConfig<T> {
    fn default() -> Self {
        Self {
            memory_size: 10,
            line_search: LineSearchKind::default(),
            line_search_params: LineSearchParams::strong_wolfe(),
            use_cautious_updates: true,
        }
    }
}

impl<T: Scalar> LBFGSConfig<T> {
    /// Creates a new configuration with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the memory size (number of vector pairs to store).
    pub fn with_memory_size(mut self, size: usize) -> Self {
        self.memory_size = size;
        self
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

    /// Sets the fallback initial step size for line search.
    pub fn with_initial_step_size(mut self, step_size: T) -> Self {
        self.line_search_params.initial_step_size = step_size;
        self
    }

    /// Enables or disables cautious updates.
    pub fn with_cautious_updates(mut self, cautious: bool) -> Self {
        self.use_cautious_updates = cautious;
        self
    }

    /// Checks the configuration.
    pub fn validate(&self) -> OptimizerResult<()> {
        if self.memory_size == 0 {
            return Err(OptimizerError::invalid_configuration(
                "memory size must be at least 1",
                "memory_size",
                self.memory_size,
            ));
        }
        self.line_search_params.validate()
    }
}

/// L-BFGS optimizer.
///
/// # Examples
///
/// ```
/// use quasinewton_core::prelude::*;
/// use quasinewton_optim::{LBFGS, LBFGSConfig};
///
/// // L-BFGS with custom parameters
/// let mut lbfgs = LBFGS::new(
///     LBFGSConfig::new()
///         .with_memory_size(5)
///         .with_cautious_updates(true),
/// );
/// let x0 = DVector::from_vec(vec![-1.2, 1.0, -1.2, 1.0]);
/// let criterion = StoppingCriterion::new().with_gradient_tolerance(1e-6);
/// let result = lbfgs.optimize(&Rosenbrock::new(4).unwrap(), &x0, &criterion).unwrap();
/// assert!(result.value < 1e-8);
/// ```
#[derive(Debug, Clone)]
pub struct LBFGS<T: Scalar> {
    config: LBFGSConfig<T>,
    line_search: AnyLineSearch<T>,
}

impl<T: Scalar> LBFGS<T> {
    /// Creates a new L-BFGS optimizer with the given configuration.
    pub fn new(config: LBFGSConfig<T>) -> Self {
        let line_search = AnyLineSearch::from(config.line_search);
        Self {
            config,
            line_search,
        }
    }

    /// Creates a new L-BFGS optimizer with default configuration.
    pub fn with_default_config() -> Self {
        Self::new(LBFGSConfig::default())
    }

    /// Returns the optimizer configuration.
    pub fn config(&self) -> &LBFGSConfig<T> {
        &self.config
    }
}

impl<T: Scalar> Optimizer<T> for LBFGS<T> {
    fn name(&self) -> &str {
        "L-BFGS"
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
        self.config.validate()?;
        self.line_search = AnyLineSearch::from(self.config.line_search);
        let mut history = LBFGSState::new(self.config.memory_size);
        history.cautious = self.config.use_cautious_updates;

        quasi_newton::run(
            "L-BFGS",
            &mut history,
            &mut self.line_search,
            &self.config.line_search_params,
            cost_fn,
            initial_point,
            stopping_criterion,
            callback,
        )
    }
}
