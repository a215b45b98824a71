//! One-call minimization.
//!
//! [`minimize`] picks an optimizer by [`Method`], turns [`MinimizeOptions`]
//! into a [`StoppingCriterion`] and optionally prints a progress table and a
//! result summary to stdout.

use crate::bfgs::Bfgs;
use crate::lbfgs::LBFGS;
use quasinewton_core::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Quasi-Newton method used by [`minimize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Method {
    /// Dense BFGS
    #[default]
    Bfgs,
    /// Limited-memory BFGS
    LBfgs,
}

impl Method {
    /// Display name of the method.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bfgs => "BFGS",
            Self::LBfgs => "L-BFGS",
        }
    }
}

/// Options for [`minimize`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MinimizeOptions<T: Scalar> {
    /// Gradient norm tolerance
    pub tol: T,
    /// Print iterations and the result summary to stdout
    pub display: bool,
    /// Iteration budget
    pub max_iterations: Option<usize>,
    /// Objective evaluation budget
    pub max_function_evaluations: Option<usize>,
    /// Wall-clock budget
    pub max_time: Option<Duration>,
}

impl<T: Scalar> Default for MinimizeOptions<T> {
    fn default() -> Self {
        Self {
            tol: T::DEFAULT_GRADIENT_TOLERANCE,
            display: false,
            max_iterations: Some(1000),
            max_function_evaluations: None,
            max_time: None,
        }
    }
}

impl<T: Scalar> MinimizeOptions<T> {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the gradient norm tolerance.
    pub fn with_tol(mut self, tol: T) -> Self {
        self.tol = tol;
        self
    }

    /// Enables or disables printing.
    pub fn with_display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    /// Sets the iteration budget (`None` for unlimited).
    pub fn with_max_iterations(mut self, max_iterations: Option<usize>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the objective evaluation budget.
    pub fn with_max_function_evaluations(mut self, max_evals: usize) -> Self {
        self.max_function_evaluations = Some(max_evals);
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_max_time(mut self, max_time: Duration) -> Self {
        self.max_time = Some(max_time);
        self
    }

    /// The stopping criterion these options describe.
    pub fn stopping_criterion(&self) -> StoppingCriterion<T> {
        let mut criterion = StoppingCriterion::new().with_gradient_tolerance(self.tol);
        criterion.max_iterations = self.max_iterations;
        criterion.max_function_evaluations = self.max_function_evaluations;
        criterion.max_time = self.max_time;
        criterion
    }
}

/// Minimizes `cost_fn` from `x0` with the given method and default
/// optimizer configuration.
///
/// # Example
///
/// ```
/// use quasinewton_core::prelude::*;
/// use quasinewton_optim::{minimize, Method, MinimizeOptions};
///
/// let x0 = DVector::from_vec(vec![1.3, 0.7, 0.8, 1.9, 1.2]);
/// let options = MinimizeOptions::new().with_tol(1e-2);
/// let result = minimize(&Rosenbrock::new(5).unwrap(), &x0, Method::Bfgs, &options).unwrap();
/// assert!(result.converged);
/// assert!(result.gradient_norm.unwrap() < 1e-2);
/// ```
pub fn minimize<T, C>(
    cost_fn: &C,
    x0: &DVector<T>,
    method: Method,
    options: &MinimizeOptions<T>,
) -> OptimizerResult<OptimizationResult<T>>
where
    T: Scalar,
    C: CostFunction<T> + ?Sized,
{
    let criterion = options.stopping_criterion();
    let mut display = ProgressDisplay::stdout();
    let mut silent = NoOpCallback;
    let callback: &mut dyn OptimizationCallback<T> = if options.display {
        &mut display
    } else {
        &mut silent
    };

    let result = match method {
        Method::Bfgs => {
            Bfgs::<T>::with_default_config().optimize_with_callback(cost_fn, x0, &criterion, callback)?
        }
        Method::LBfgs => {
            LBFGS::<T>::with_default_config().optimize_with_callback(cost_fn, x0, &criterion, callback)?
        }
    };

    if options.display {
        println!("{result}");
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_options_to_criterion() {
        let options = MinimizeOptions::<f64>::new()
            .with_tol(1e-3)
            .with_max_iterations(None)
            .with_max_function_evaluations(200)
            .with_max_time(Duration::from_secs(2));
        let criterion = options.stopping_criterion();

        assert_eq!(criterion.gradient_tolerance, Some(1e-3));
        assert_eq!(criterion.max_iterations, None);
        assert_eq!(criterion.max_function_evaluations, Some(200));
        assert_eq!(criterion.max_time, Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_methods_agree_on_rosenbrock() {
        let x0 = DVector::<f64>::from_vec(vec![1.3, 0.7, 0.8, 1.9, 1.2]);
        let options = MinimizeOptions::new().with_tol(1e-6);
        let rosen = Rosenbrock::new(5).unwrap();

        for method in [Method::Bfgs, Method::LBfgs] {
            let result = minimize(&rosen, &x0, method, &options).unwrap();
            assert!(result.converged, "{}: {}", method.name(), result.termination_reason);
            for xi in result.point.iter() {
                assert!((xi - 1.0).abs() < 1e-4, "{}: {}", method.name(), result.point);
            }
        }
    }

    #[test]
    fn test_budget_stops_run() {
        let x0 = DVector::<f64>::from_vec(vec![1.3, 0.7, 0.8, 1.9, 1.2]);
        let options = MinimizeOptions::new()
            .with_tol(1e-12)
            .with_max_iterations(Some(3));
        let result = minimize(&Rosenbrock::new(5).unwrap(), &x0, Method::Bfgs, &options).unwrap();

        assert_eq!(result.termination_reason, TerminationReason::MaxIterations);
        assert_eq!(result.iterations, 3);
        assert!(!result.converged);
    }
}
