//! Optimization framework: stopping rules, results, callbacks and display.

pub mod callback;
pub mod display;
pub mod optimizer;
pub mod tolerance;
