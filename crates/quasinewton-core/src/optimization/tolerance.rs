//! Absolute and windowed-change tolerances on a scalar series.
//!
//! Optimizers feed one value per iteration (the objective, or the gradient
//! norm) into a [`WindowedTolerance`]. The series has converged in the
//! absolute sense when its latest value is below the absolute tolerance, and
//! in the change sense when it moved less than the change tolerance over the
//! last `window` iterations.

use crate::core::types::Scalar;
use num_traits::Float;
use std::collections::VecDeque;

/// Convergence test on a scalar series.
#[derive(Debug, Clone)]
pub struct WindowedTolerance<T: Scalar> {
    absolute: Option<T>,
    change: Option<T>,
    window: usize,
    history: VecDeque<T>,
    latest: T,
}

impl<T: Scalar> WindowedTolerance<T> {
    /// Creates a tolerance; `None` disables the corresponding test.
    ///
    /// A window of zero is treated as one.
    pub fn new(absolute: Option<T>, change: Option<T>, window: usize) -> Self {
        let window = window.max(1);
        Self {
            absolute,
            change,
            window,
            history: VecDeque::with_capacity(window + 1),
            latest: <T as Float>::infinity(),
        }
    }

    /// Starts a new series with `initial` as its first value.
    pub fn reset(&mut self, initial: T) {
        self.history.clear();
        self.history.push_back(initial);
        self.latest = initial;
    }

    /// Appends the value of the current iteration.
    pub fn push(&mut self, value: T) {
        self.latest = value;
        if self.change.is_some() {
            self.history.push_back(value);
            while self.history.len() > self.window + 1 {
                self.history.pop_front();
            }
        }
    }

    /// Most recent value of the series.
    pub fn latest(&self) -> T {
        self.latest
    }

    /// True if the latest value is below the absolute tolerance.
    pub fn absolute_converged(&self) -> bool {
        self.absolute.is_some_and(|tol| self.latest < tol)
    }

    /// True if the series moved less than the change tolerance over the
    /// last `window` values. Never true before the window has filled.
    pub fn change_converged(&self) -> bool {
        let Some(tol) = self.change else {
            return false;
        };
        if self.history.len() <= self.window {
            return false;
        }
        match (self.history.front(), self.history.back()) {
            (Some(&oldest), Some(&newest)) => <T as Float>::abs(newest - oldest) < tol,
            _ => false,
        }
    }
}
