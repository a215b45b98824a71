//! Golden-section search.

use super::{validate_initial_step, ValueSearch};
use num_traits::Float;
use quasinewton_core::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Point<T> {
    step: T,
    value: T,
}

#[derive(Debug, Clone, Copy)]
enum Phase<T> {
    /// Doubling the step while the value keeps decreasing; holds the best
    /// interior candidate so far.
    Expanding(Option<Point<T>>),
    /// An upper end exists but no interior point beats the lower end yet.
    Shrinking { upper: Point<T> },
    /// A three-point bracket with `middle` lower than both ends.
    Reducing { middle: Point<T>, upper: Point<T> },
}

/// Golden-section search for the minimum nearest to the start in the
/// direction of the initial step.
///
/// The search expands the step until the value increases, then reduces the
/// bracket by the golden ratio until its width is within `tolerance`
/// (absolute, or relative to the bracket location). If the value increases
/// right away the bracket shrinks toward the start, so a start that is
/// already past the minimum returns the start.
#[derive(Debug, Clone)]
pub struct GoldenSection<T: Scalar> {
    initial_step: T,
    tolerance: T,
    origin: T,
    lower: Point<T>,
    best: Point<T>,
    phase: Phase<T>,
}

impl<T: Scalar> GoldenSection<T> {
    /// Creates a search taking `initial_step` first (its sign sets the
    /// direction) and stopping at bracket width `tolerance`.
    pub fn new(initial_step: T, tolerance: T) -> Self {
        let origin = Point {
            step: T::zero(),
            value: T::zero(),
        };
        Self {
            initial_step,
            tolerance,
            origin: T::zero(),
            lower: origin,
            best: origin,
            phase: Phase::Expanding(None),
        }
    }

    /// 2 − φ, the fraction of an interval taken by a golden step.
    fn resphi() -> T {
        <T as Scalar>::from_f64(2.0) - constants::golden_ratio::<T>()
    }

    /// Point inside [lower, upper] when no interior point is known.
    fn shrink_step(lower: T, upper: T) -> T {
        lower + Self::resphi() * (upper - lower)
    }

    /// Golden step into the larger of the two sub-intervals around `middle`.
    fn golden_step(lower: T, middle: T, upper: T) -> T {
        if <T as Float>::abs(upper - middle) > <T as Float>::abs(middle - lower) {
            middle + Self::resphi() * (upper - middle)
        } else {
            middle + Self::resphi() * (lower - middle)
        }
    }

    fn converged(&self, upper: T) -> bool {
        let width = <T as Float>::abs(upper - self.lower.step);
        let scale = <T as Float>::max(
            <T as Float>::abs(self.origin + self.lower.step),
            <T as Float>::abs(self.origin + upper),
        );
        width <= self.tolerance || width <= self.tolerance * scale
    }
}

impl<T: Scalar> ValueSearch<T> for GoldenSection<T> {
    fn name(&self) -> &str {
        "GoldenSection"
    }

    fn start(&mut self, origin: T, value: T) -> OptimizerResult<T> {
        validate_initial_step(self.initial_step)?;
        if !(self.tolerance > T::zero()) {
            return Err(OptimizerError::invalid_configuration(
                "tolerance must be positive",
                "tolerance",
                self.tolerance,
            ));
        }
        self.origin = origin;
        self.lower = Point {
            step: T::zero(),
            value,
        };
        self.best = self.lower;
        self.phase = Phase::Expanding(None);
        Ok(self.initial_step)
    }

    fn observe(&mut self, step: T, value: T) -> Option<T> {
        let trial = Point { step, value };
        if value < self.best.value {
            self.best = trial;
        }

        let (next, upper) = match self.phase {
            Phase::Expanding(middle) => {
                let reference = middle.map_or(self.lower.value, |m| m.value);
                if value < reference {
                    if let Some(m) = middle {
                        self.lower = m;
                    }
                    self.phase = Phase::Expanding(Some(trial));
                    (step + step, None)
                } else {
                    match middle {
                        Some(m) => {
                            self.phase = Phase::Reducing {
                                middle: m,
                                upper: trial,
                            };
                            (
                                Self::golden_step(self.lower.step, m.step, step),
                                Some(step),
                            )
                        }
                        None => {
                            self.phase = Phase::Shrinking { upper: trial };
                            (Self::shrink_step(self.lower.step, step), Some(step))
                        }
                    }
                }
            }
            Phase::Shrinking { upper } => {
                if value < self.lower.value {
                    self.phase = Phase::Reducing {
                        middle: trial,
                        upper,
                    };
                    (
                        Self::golden_step(self.lower.step, step, upper.step),
                        Some(upper.step),
                    )
                } else {
                    self.phase = Phase::Shrinking { upper: trial };
                    (Self::shrink_step(self.lower.step, step), Some(step))
                }
            }
            Phase::Reducing { middle, mut upper } => {
                let toward_upper = (step - middle.step) * (upper.step - middle.step) > T::zero();
                let middle = if value < middle.value {
                    if toward_upper {
                        self.lower = middle;
                    } else {
                        upper = middle;
                    }
                    trial
                } else {
                    if toward_upper {
                        upper = trial;
                    } else {
                        self.lower = trial;
                    }
                    middle
                };
                self.phase = Phase::Reducing { middle, upper };
                (
                    Self::golden_step(self.lower.step, middle.step, upper.step),
                    Some(upper.step),
                )
            }
        };

        if let Some(upper) = upper {
            if self.converged(upper) {
                return None;
            }
        }
        if let Phase::Reducing { middle, .. } = self.phase {
            if next == middle.step {
                return None;
            }
        }
        if <T as Float>::is_finite(next) {
            Some(next)
        } else {
            None
        }
    }

    fn best(&self) -> (T, T) {
        (self.best.step, self.best.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_expansion_then_bracket() {
        // f(x) = (x − 3)², start at 0
        let f = |s: f64| (s - 3.0).powi(2);
        let mut search = GoldenSection::new(1.0, 1e-8);
        assert_eq!(search.start(0.0, f(0.0)).unwrap(), 1.0);
        assert_eq!(search.observe(1.0, f(1.0)), Some(2.0));
        assert_eq!(search.observe(2.0, f(2.0)), Some(4.0));
        // f(4) = 1 is not below f(2) = 1: bracket [1, 2, 4].
        let next = search.observe(4.0, f(4.0)).unwrap();
        assert_relative_eq!(next, 2.0 + (2.0 - constants::golden_ratio::<f64>()) * 2.0);
        assert_eq!(search.best(), (2.0, 1.0));
    }

    #[test]
    fn test_shrinks_toward_start() {
        let f = |s: f64| s * s;
        let mut search = GoldenSection::new(1.0, 1e-6);
        search.start(0.0, 0.0).unwrap();
        let mut step = 1.0;
        let mut trials = 0;
        while let Some(next) = search.observe(step, f(step)) {
            assert!(next > 0.0 && next < step);
            step = next;
            trials += 1;
            assert!(trials < 100);
        }
        assert_eq!(search.best(), (0.0, 0.0));
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(GoldenSection::new(0.0, 1e-6).start(0.0, 1.0).is_err());
        assert!(GoldenSection::new(1.0, 0.0).start(0.0, 1.0).is_err());
    }
}
