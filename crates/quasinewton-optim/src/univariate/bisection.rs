//! Derivative bisection.

use super::{validate_initial_step, DerivativeSearch};
use crate::line_search::LineSearchParams;
use num_traits::Float;
use quasinewton_core::prelude::*;

#[derive(Debug, Clone, Copy)]
struct Endpoint<T> {
    step: T,
    value: T,
    slope: T,
}

/// Bisection on the sign of the derivative.
///
/// The step doubles until the derivative turns positive or the value stops
/// decreasing; from then on the bracket is halved, keeping the end with a
/// negative derivative as the lower bound. With a positive initial slope the
/// search walks in the negative direction, so it also serves as a plain
/// scalar minimizer.
#[derive(Debug, Clone, Default)]
pub struct Bisection<T: Scalar> {
    reversed: bool,
    lower: Option<Endpoint<T>>,
    upper: Option<Endpoint<T>>,
}

impl<T: Scalar> Bisection<T> {
    /// Creates a new bisection search.
    pub fn new() -> Self {
        Self {
            reversed: false,
            lower: None,
            upper: None,
        }
    }

    fn midpoint(lower: &Endpoint<T>, upper: &Endpoint<T>) -> T {
        (lower.step + upper.step) * <T as Scalar>::from_f64(0.5)
    }
}

/// Values equal within 1e-15, absolutely or relative to the larger one.
fn nearly_equal<T: Scalar>(a: T, b: T) -> bool {
    let tol = <T as Scalar>::from_f64(1e-15);
    let diff = <T as Float>::abs(a - b);
    diff <= tol || diff <= tol * <T as Float>::max(<T as Float>::abs(a), <T as Float>::abs(b))
}

impl<T: Scalar> DerivativeSearch<T> for Bisection<T> {
    fn name(&self) -> &str {
        "Bisection"
    }

    fn start(
        &mut self,
        initial_step: T,
        value: T,
        slope: T,
        _params: &LineSearchParams<T>,
    ) -> OptimizerResult<T> {
        validate_initial_step(initial_step)?;

        self.reversed = slope > T::zero();
        let sign = if self.reversed { -T::one() } else { T::one() };
        self.lower = Some(Endpoint {
            step: T::zero(),
            value,
            slope: slope * sign,
        });
        self.upper = None;
        Ok(<T as Float>::abs(initial_step) * sign)
    }

    fn observe(&mut self, step: T, value: T, slope: T) -> Option<T> {
        let mut lower = self.lower?;
        let slope = if self.reversed { -slope } else { slope };
        let trial = Endpoint { step, value, slope };

        let bracketed = self.upper.is_some_and(|u| u.slope >= T::zero());
        let next = if bracketed {
            if slope < T::zero() {
                lower = trial;
            } else {
                self.upper = Some(trial);
            }
            self.upper.map(|u| Self::midpoint(&lower, &u))
        } else if slope > T::zero() {
            // The derivative changed sign.
            self.upper = Some(trial);
            Some(Self::midpoint(&lower, &trial))
        } else if value < lower.value || nearly_equal(value, lower.value) {
            lower = trial;
            match self.upper {
                Some(upper) => Some(Self::midpoint(&lower, &upper)),
                None => Some(step + step),
            }
        } else {
            // Higher value with a negative derivative: a minimum was skipped.
            self.upper = Some(trial);
            Some(Self::midpoint(&lower, &trial))
        };
        self.lower = Some(lower);

        let next = next?;
        let width = match self.upper {
            Some(upper) => <T as Float>::abs(upper.step - lower.step),
            None => <T as Float>::infinity(),
        };
        let scale = <T as Float>::max(T::one(), <T as Float>::abs(next));
        if !<T as Float>::is_finite(next) || width <= T::EPSILON * scale {
            return None;
        }
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doubles_until_bracketed() {
        let params = LineSearchParams::default();
        let mut search = Bisection::new();
        // f(t) = (t − 5)², slope 2(t − 5)
        let first = search.start(1.0, 25.0, -10.0, &params).unwrap();
        assert_eq!(first, 1.0);
        assert_eq!(search.observe(1.0, 16.0, -8.0), Some(2.0));
        assert_eq!(search.observe(2.0, 9.0, -6.0), Some(4.0));
        assert_eq!(search.observe(4.0, 1.0, -2.0), Some(8.0));
        // Derivative positive at 8: bisect [4, 8].
        assert_eq!(search.observe(8.0, 9.0, 6.0), Some(6.0));
        // Positive at 6: upper becomes 6.
        assert_eq!(search.observe(6.0, 1.0, 2.0), Some(5.0));
    }

    #[test]
    fn test_positive_slope_walks_backwards() {
        let params = LineSearchParams::default();
        let mut search = Bisection::new();
        let first = search.start(1.0, 4.0, 4.0, &params).unwrap();
        assert_eq!(first, -1.0);
        assert_eq!(search.observe(-1.0, 1.0, 2.0), Some(-2.0));
        // Exactly at the minimum: the (reversed) slope is zero, keep going.
        assert_eq!(search.observe(-2.0, 0.0, 0.0), Some(-4.0));
        // Overshoot: the reversed slope is positive, bracket [−2, −4].
        assert_eq!(search.observe(-4.0, 4.0, -4.0), Some(-3.0));
    }

    #[test]
    fn test_value_increase_with_negative_slope_brackets() {
        let params = LineSearchParams::default();
        let mut search = Bisection::new();
        search.start(1.0, 1.0, -1.0, &params).unwrap();
        assert_eq!(search.observe(1.0, 3.0, -0.5), Some(0.5));
        // Still unbracketed in slope, decrease moves the lower end.
        assert_eq!(search.observe(0.5, 0.5, -0.1), Some(0.75));
    }

    #[test]
    fn test_collapsed_bracket_stops() {
        let params = LineSearchParams::default();
        let mut search = Bisection::new();
        search.start(1e-300, 1.0, -1.0, &params).unwrap();
        assert_eq!(search.observe(1e-300, 1.0, 1.0), None);
    }

    #[test]
    fn test_zero_step_rejected() {
        let mut search = Bisection::<f64>::new();
        assert!(search
            .start(0.0, 1.0, -1.0, &LineSearchParams::default())
            .is_err());
    }
}
