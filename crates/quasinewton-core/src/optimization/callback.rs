//! Callback support for optimization algorithms.
//!
//! This module provides traits and types for implementing callbacks that can
//! monitor and control the optimization process.

use crate::core::error::OptimizerResult;
use crate::core::types::Scalar;
use crate::optimization::optimizer::{OptimizationResult, OptimizerState};
use std::fmt;
use std::time::Duration;

/// Information passed to callbacks after each iteration.
#[derive(Clone, Debug)]
pub struct CallbackInfo<'a, T: Scalar> {
    /// Current optimization state
    pub state: &'a OptimizerState<T>,

    /// Elapsed time since optimization start
    pub elapsed: Duration,
}

/// Trait for optimization callbacks.
///
/// Callbacks allow monitoring and controlling the optimization process.
/// They can be used for logging, progress tables, early stopping, etc.
pub trait OptimizationCallback<T: Scalar> {
    /// Called once with the state at the starting point.
    fn on_optimization_start(&mut self, state: &OptimizerState<T>) -> OptimizerResult<()> {
        let _ = state;
        Ok(())
    }

    /// Called at the end of each iteration.
    ///
    /// Returns `true` to continue optimization, `false` to stop early.
    fn on_iteration_end(&mut self, info: &CallbackInfo<'_, T>) -> OptimizerResult<bool> {
        let _ = info;
        Ok(true)
    }

    /// Called with the final result.
    fn on_optimization_end(&mut self, result: &OptimizationResult<T>) -> OptimizerResult<()> {
        let _ = result;
        Ok(())
    }
}

/// A no-op callback that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCallback;

impl<T: Scalar> OptimizationCallback<T> for NoOpCallback {}

/// A callback that reports progress through the `log` facade.
#[derive(Debug, Clone)]
pub struct LogProgressCallback {
    log_every: usize,
}

impl LogProgressCallback {
    /// Logs every `log_every` iterations (0 is treated as 1).
    pub fn new(log_every: usize) -> Self {
        Self {
            log_every: log_every.max(1),
        }
    }
}

impl<T: Scalar> OptimizationCallback<T> for LogProgressCallback {
    fn on_optimization_start(&mut self, state: &OptimizerState<T>) -> OptimizerResult<()> {
        log::info!(
            "starting optimization: n = {}, f = {}, |g| = {}",
            state.point.len(),
            state.value,
            state.gradient_norm
        );
        Ok(())
    }

    fn on_iteration_end(&mut self, info: &CallbackInfo<'_, T>) -> OptimizerResult<bool> {
        if info.state.iteration % self.log_every == 0 {
            log::info!(
                "iteration {}: f = {}, |g| = {}, evaluations = {}",
                info.state.iteration,
                info.state.value,
                info.state.gradient_norm,
                info.state.function_evaluations
            );
        }
        Ok(true)
    }

    fn on_optimization_end(&mut self, result: &OptimizationResult<T>) -> OptimizerResult<()> {
        log::info!(
            "optimization finished after {} iterations: f = {} ({})",
            result.iterations,
            result.value,
            result.termination_reason
        );
        Ok(())
    }
}

/// Callback built from a closure deciding whether to continue.
///
/// ```
/// use quasinewton_core::prelude::*;
///
/// // Stop as soon as the objective drops below 1.
/// let mut monitor = MonitorCallback::new(|info: &CallbackInfo<'_, f64>| info.state.value >= 1.0);
/// # let _ = &mut monitor;
/// ```
pub struct MonitorCallback<F> {
    monitor: F,
}

impl<F> MonitorCallback<F> {
    /// Wraps `monitor`, which returns `false` to stop the optimizer.
    pub fn new<T>(monitor: F) -> Self
    where
        T: Scalar,
        F: FnMut(&CallbackInfo<'_, T>) -> bool,
    {
        Self { monitor }
    }
}

impl<F> fmt::Debug for MonitorCallback<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MonitorCallback")
    }
}

impl<T, F> OptimizationCallback<T> for MonitorCallback<F>
where
    T: Scalar,
    F: FnMut(&CallbackInfo<'_, T>) -> bool,
{
    fn on_iteration_end(&mut self, info: &CallbackInfo<'_, T>) -> OptimizerResult<bool> {
        Ok((self.monitor)(info))
    }
}
