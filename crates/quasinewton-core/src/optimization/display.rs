//! Iteration diagnostics written to any `io::Write` sink.
//!
//! [`ProgressDisplay`] is an [`OptimizationCallback`] that prints one row per
//! reported iteration with the columns `Iter`, `FnEval`, `Obj` and
//! `GradNorm`. Two layouts are available:
//!
//! - [`DisplayFormat::Table`]: right-aligned columns for terminals, with the
//!   heading repeated every [`HEADING_INTERVAL`] rows
//! - [`DisplayFormat::Csv`]: a single header line followed by
//!   comma-separated rows at full precision, for log files

use crate::core::error::{OptimizerError, OptimizerResult};
use crate::core::types::Scalar;
use crate::optimization::callback::{CallbackInfo, OptimizationCallback};
use crate::optimization::optimizer::{OptimizationResult, OptimizerState};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::io::{self, Stdout, Write};

/// Number of table rows between repeated headings.
pub const HEADING_INTERVAL: usize = 30;

const HEADINGS: [&str; 4] = ["Iter", "FnEval", "Obj", "GradNorm"];

/// Output layout of a [`ProgressDisplay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DisplayFormat {
    /// Aligned columns with periodic headings
    #[default]
    Table,
    /// Comma-separated values
    Csv,
}

/// Writes iteration diagnostics to `W`.
#[derive(Debug)]
pub struct ProgressDisplay<W: Write> {
    writer: W,
    format: DisplayFormat,
    print_every: usize,
    rows_since_heading: usize,
    header_written: bool,
}

impl ProgressDisplay<Stdout> {
    /// Table display on standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout(), DisplayFormat::Table)
    }
}

impl<W: Write> ProgressDisplay<W> {
    /// Creates a display writing every iteration to `writer`.
    pub fn new(writer: W, format: DisplayFormat) -> Self {
        Self {
            writer,
            format,
            print_every: 1,
            rows_since_heading: 0,
            header_written: false,
        }
    }

    /// Only print iterations that are multiples of `every` (0 is treated as 1).
    pub fn with_print_every(mut self, every: usize) -> Self {
        self.print_every = every.max(1);
        self
    }

    /// Consumes the display and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_heading(&mut self) -> io::Result<()> {
        match self.format {
            DisplayFormat::Table => {
                writeln!(
                    self.writer,
                    "{:>8} {:>8} {:>16} {:>16}",
                    HEADINGS[0], HEADINGS[1], HEADINGS[2], HEADINGS[3]
                )?;
                self.rows_since_heading = 0;
            }
            DisplayFormat::Csv => {
                if !self.header_written {
                    writeln!(self.writer, "{}", HEADINGS.join(","))?;
                }
            }
        }
        self.header_written = true;
        Ok(())
    }

    fn write_row<T: Scalar>(&mut self, state: &OptimizerState<T>) -> io::Result<()> {
        let needs_heading = match self.format {
            DisplayFormat::Table => {
                !self.header_written || self.rows_since_heading >= HEADING_INTERVAL
            }
            DisplayFormat::Csv => !self.header_written,
        };
        if needs_heading {
            self.write_heading()?;
        }

        let value = Scalar::to_f64(state.value);
        let gradient_norm = Scalar::to_f64(state.gradient_norm);
        match self.format {
            DisplayFormat::Table => writeln!(
                self.writer,
                "{:>8} {:>8} {:>16.8e} {:>16.8e}",
                state.iteration, state.function_evaluations, value, gradient_norm
            )?,
            DisplayFormat::Csv => writeln!(
                self.writer,
                "{},{},{},{}",
                state.iteration, state.function_evaluations, value, gradient_norm
            )?,
        }
        self.rows_since_heading += 1;
        Ok(())
    }
}

fn display_error(err: io::Error) -> OptimizerError {
    OptimizerError::callback_failed(format!("progress display: {err}"))
}

impl<T: Scalar, W: Write> OptimizationCallback<T> for ProgressDisplay<W> {
    fn on_optimization_start(&mut self, state: &OptimizerState<T>) -> OptimizerResult<()> {
        self.rows_since_heading = 0;
        self.header_written = false;
        self.write_row(state).map_err(display_error)
    }

    fn on_iteration_end(&mut self, info: &CallbackInfo<'_, T>) -> OptimizerResult<bool> {
        if info.state.iteration % self.print_every == 0 {
            self.write_row(info.state).map_err(display_error)?;
        }
        Ok(true)
    }

    fn on_optimization_end(&mut self, _result: &OptimizationResult<T>) -> OptimizerResult<()> {
        self.writer.flush().map_err(display_error)
    }
}
