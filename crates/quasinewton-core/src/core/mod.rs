//! Core building blocks: numeric types, errors and the cost function trait.

pub mod cost_function;
pub mod error;
pub mod types;
pub mod validation;
