//! Moré–Thuente safeguarded step selection.
//!
//! This is the step computation of the MINPACK-2 routines `dcsrch` and
//! `dcstep` (Moré & Thuente, "Line search algorithms with guaranteed
//! sufficient decrease", ACM TOMS 20, 1994). Trial steps come from cubic and
//! quadratic interpolation of the observed values and slopes, safeguarded so
//! that the interval of uncertainty shrinks and extrapolated steps stay
//! within [1.1, 4] times the last increase.
//!
//! The Wolfe tests themselves are left to the caller; this type only
//! proposes the next step.

use super::{validate_initial_step, DerivativeSearch};
use crate::line_search::LineSearchParams;
use num_traits::Float;
use quasinewton_core::prelude::*;

/// Lower extrapolation factor.
const XTRAPL: f64 = 1.1;
/// Upper extrapolation factor.
const XTRAPU: f64 = 4.0;
/// Required relative shrink of the interval before forcing a bisection.
const SHRINK: f64 = 0.66;
/// Relative width at which the interval of uncertainty is considered empty.
const XTOL: f64 = 1e-14;

#[derive(Debug, Clone, Copy)]
struct Endpoint<T> {
    step: T,
    value: T,
    slope: T,
}

impl<T: Scalar> Endpoint<T> {
    fn origin(value: T, slope: T) -> Self {
        Self {
            step: T::zero(),
            value,
            slope,
        }
    }

    /// ψ(α) = φ(α) − φ(0) − c₁·α·φ'(0), shifted by the constant φ(0).
    fn modified(self, gtest: T) -> Self {
        Self {
            step: self.step,
            value: self.value - self.step * gtest,
            slope: self.slope - gtest,
        }
    }

    fn unmodified(self, gtest: T) -> Self {
        Self {
            step: self.step,
            value: self.value + self.step * gtest,
            slope: self.slope + gtest,
        }
    }
}

/// Moré–Thuente step selection.
#[derive(Debug, Clone)]
pub struct MoreThuente<T: Scalar> {
    /// Best step so far (least value of the active function)
    x: Endpoint<T>,
    /// Other end of the interval of uncertainty
    y: Endpoint<T>,
    bracketed: bool,
    /// Stage 1 works on the modified function ψ
    stage_one: bool,
    finit: T,
    gtest: T,
    stmin: T,
    stmax: T,
    stpmin: T,
    stpmax: T,
    width: T,
    width1: T,
}

impl<T: Scalar> Default for MoreThuente<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> MoreThuente<T> {
    /// Creates a new search; bounds and c₁ are taken from the line search
    /// parameters at `start`.
    pub fn new() -> Self {
        let origin = Endpoint::origin(T::zero(), T::zero());
        Self {
            x: origin,
            y: origin,
            bracketed: false,
            stage_one: true,
            finit: T::zero(),
            gtest: T::zero(),
            stmin: T::zero(),
            stmax: T::zero(),
            stpmin: T::zero(),
            stpmax: T::zero(),
            width: T::zero(),
            width1: T::zero(),
        }
    }

    /// True once a minimizer has been bracketed.
    pub fn is_bracketed(&self) -> bool {
        self.bracketed
    }

    fn clamp(&self, step: T) -> T {
        <T as Float>::min(<T as Float>::max(step, self.stpmin), self.stpmax)
    }
}

impl<T: Scalar> DerivativeSearch<T> for MoreThuente<T> {
    fn name(&self) -> &str {
        "MoreThuente"
    }

    fn start(
        &mut self,
        initial_step: T,
        value: T,
        slope: T,
        params: &LineSearchParams<T>,
    ) -> OptimizerResult<T> {
        validate_initial_step(initial_step)?;
        if initial_step < T::zero() {
            return Err(OptimizerError::invalid_configuration(
                "initial step must be positive",
                "initial_step",
                initial_step,
            ));
        }
        if !(slope < T::zero()) {
            return Err(OptimizerError::invalid_search_direction(Scalar::to_f64(
                slope,
            )));
        }

        let xtrapu = <T as Scalar>::from_f64(XTRAPU);
        self.stpmin = params.min_step_size;
        self.stpmax = params.max_step_size;
        self.finit = value;
        self.gtest = params.c1 * slope;
        self.bracketed = false;
        self.stage_one = true;
        self.width = self.stpmax - self.stpmin;
        self.width1 = self.width / <T as Scalar>::from_f64(0.5);
        self.x = Endpoint::origin(value, slope);
        self.y = self.x;

        let step = self.clamp(initial_step);
        self.stmin = T::zero();
        self.stmax = step + xtrapu * step;
        Ok(step)
    }

    fn observe(&mut self, step: T, value: T, slope: T) -> Option<T> {
        let xtol = <T as Scalar>::from_f64(XTOL);
        let ftest = self.finit + step * self.gtest;

        if self.stage_one && value <= ftest && slope >= T::zero() {
            self.stage_one = false;
        }

        // Nothing left to gain: rounding errors or the step bounds prevent
        // further progress.
        if self.bracketed && (step <= self.stmin || step >= self.stmax) {
            return None;
        }
        if self.bracketed && self.stmax - self.stmin <= xtol * self.stmax {
            return None;
        }
        if step == self.stpmax && value <= ftest && slope <= self.gtest {
            return None;
        }
        if step == self.stpmin && (value > ftest || slope >= self.gtest) {
            return None;
        }

        let trial = Endpoint { step, value, slope };
        let mut next;
        if self.stage_one && value <= self.x.value && value > ftest {
            // Interpolate the modified function while the sufficient decrease
            // test has not been met.
            let mut x = self.x.modified(self.gtest);
            let mut y = self.y.modified(self.gtest);
            next = safeguarded_step(
                &mut x,
                &mut y,
                trial.modified(self.gtest),
                &mut self.bracketed,
                self.stmin,
                self.stmax,
            );
            self.x = x.unmodified(self.gtest);
            self.y = y.unmodified(self.gtest);
        } else {
            next = safeguarded_step(
                &mut self.x,
                &mut self.y,
                trial,
                &mut self.bracketed,
                self.stmin,
                self.stmax,
            );
        }

        if self.bracketed {
            let span = <T as Float>::abs(self.y.step - self.x.step);
            if span >= <T as Scalar>::from_f64(SHRINK) * self.width1 {
                next = self.x.step + (self.y.step - self.x.step) * <T as Scalar>::from_f64(0.5);
            }
            self.width1 = self.width;
            self.width = span;
        }

        if self.bracketed {
            self.stmin = <T as Float>::min(self.x.step, self.y.step);
            self.stmax = <T as Float>::max(self.x.step, self.y.step);
        } else {
            let increase = next - self.x.step;
            self.stmin = next + <T as Scalar>::from_f64(XTRAPL) * increase;
            self.stmax = next + <T as Scalar>::from_f64(XTRAPU) * increase;
        }

        next = self.clamp(next);

        // Fall back to the best step when the interval has collapsed.
        if self.bracketed
            && (next <= self.stmin
                || next >= self.stmax
                || self.stmax - self.stmin <= xtol * self.stmax)
        {
            next = self.x.step;
        }

        if <T as Float>::is_finite(next) {
            Some(next)
        } else {
            None
        }
    }
}

/// Cubic minimizer of the data at `a` and `b`, scaled to avoid overflow.
///
/// Returns (theta, gamma); gamma is the square root of the discriminant,
/// clipped at zero when `clip` is set.
fn cubic_terms<T: Scalar>(a: &Endpoint<T>, b: &Endpoint<T>, clip: bool) -> (T, T) {
    let three = <T as Scalar>::from_f64(3.0);
    let theta = three * (a.value - b.value) / (b.step - a.step) + a.slope + b.slope;
    let s = <T as Float>::max(
        <T as Float>::max(<T as Float>::abs(theta), <T as Float>::abs(a.slope)),
        <T as Float>::abs(b.slope),
    );
    let mut discriminant = (theta / s) * (theta / s) - (a.slope / s) * (b.slope / s);
    if clip {
        discriminant = <T as Float>::max(discriminant, T::zero());
    }
    (theta, s * <T as Float>::sqrt(discriminant))
}

/// One `dcstep` update.
///
/// `x` holds the step with the least value, `y` the other end of the
/// interval of uncertainty. Both are updated with `trial` and the new step,
/// safeguarded to `[stpmin, stpmax]` when not bracketed, is returned.
fn safeguarded_step<T: Scalar>(
    x: &mut Endpoint<T>,
    y: &mut Endpoint<T>,
    trial: Endpoint<T>,
    bracketed: &mut bool,
    stpmin: T,
    stpmax: T,
) -> T {
    let half = <T as Scalar>::from_f64(0.5);
    let shrink = <T as Scalar>::from_f64(SHRINK);
    let stp = trial.step;
    let (fp, dp) = (trial.value, trial.slope);
    let sgnd = dp * <T as Float>::signum(x.slope);

    let stpf = if fp > x.value {
        // Higher value: the minimum is bracketed. Take the cubic step if it
        // is closer to x, otherwise the average of cubic and quadratic.
        let (theta, mut gamma) = cubic_terms(x, &trial, false);
        if stp < x.step {
            gamma = -gamma;
        }
        let p = (gamma - x.slope) + theta;
        let q = ((gamma - x.slope) + gamma) + dp;
        let stpc = x.step + (p / q) * (stp - x.step);
        let stpq = x.step
            + ((x.slope / ((x.value - fp) / (stp - x.step) + x.slope)) * half) * (stp - x.step);
        *bracketed = true;
        if <T as Float>::abs(stpc - x.step) < <T as Float>::abs(stpq - x.step) {
            stpc
        } else {
            stpc + (stpq - stpc) * half
        }
    } else if sgnd < T::zero() {
        // Lower value, derivatives of opposite sign: bracketed. Take the
        // step farther from the trial (cubic or secant).
        let (theta, mut gamma) = cubic_terms(x, &trial, false);
        if stp > x.step {
            gamma = -gamma;
        }
        let p = (gamma - dp) + theta;
        let q = ((gamma - dp) + gamma) + x.slope;
        let stpc = stp + (p / q) * (x.step - stp);
        let stpq = stp + (dp / (dp - x.slope)) * (x.step - stp);
        *bracketed = true;
        if <T as Float>::abs(stpc - stp) > <T as Float>::abs(stpq - stp) {
            stpc
        } else {
            stpq
        }
    } else if <T as Float>::abs(dp) < <T as Float>::abs(x.slope) {
        // Lower value, same sign, decreasing slope magnitude. The cubic step
        // is used only if the cubic tends to infinity in the step direction
        // or its minimum lies beyond the trial.
        let (theta, mut gamma) = cubic_terms(x, &trial, true);
        if stp > x.step {
            gamma = -gamma;
        }
        let p = (gamma - dp) + theta;
        let q = (gamma + (x.slope - dp)) + gamma;
        let r = p / q;
        let stpc = if r < T::zero() && gamma != T::zero() {
            stp + r * (x.step - stp)
        } else if stp > x.step {
            stpmax
        } else {
            stpmin
        };
        let stpq = stp + (dp / (dp - x.slope)) * (x.step - stp);

        if *bracketed {
            let candidate = if <T as Float>::abs(stpc - stp) < <T as Float>::abs(stpq - stp) {
                stpc
            } else {
                stpq
            };
            let limit = stp + shrink * (y.step - stp);
            if stp > x.step {
                <T as Float>::min(candidate, limit)
            } else {
                <T as Float>::max(candidate, limit)
            }
        } else {
            let candidate = if <T as Float>::abs(stpc - stp) > <T as Float>::abs(stpq - stp) {
                stpc
            } else {
                stpq
            };
            <T as Float>::max(stpmin, <T as Float>::min(stpmax, candidate))
        }
    } else if *bracketed {
        // Lower value, same sign, slope magnitude not decreasing: cubic
        // step towards y.
        let (theta, mut gamma) = cubic_terms(&trial, y, false);
        if stp > y.step {
            gamma = -gamma;
        }
        let p = (gamma - dp) + theta;
        let q = ((gamma - dp) + gamma) + y.slope;
        stp + (p / q) * (y.step - stp)
    } else if stp > x.step {
        stpmax
    } else {
        stpmin
    };

    // Update the interval of uncertainty.
    if fp > x.value {
        *y = trial;
    } else {
        if sgnd < T::zero() {
            *y = *x;
        }
        *x = trial;
    }

    stpf
}
