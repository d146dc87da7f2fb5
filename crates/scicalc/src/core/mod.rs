//! Calculator core: expression text, evaluation and history
//!
//! The engine keeps its state as display text; everything in here turns
//! that text into numbers without ever executing generated code.

pub mod buffer;
pub mod evaluator;
pub mod format;
pub mod history;
mod operations;
pub mod parser;

pub use operations::{Calculator, Function, Operation};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Everything that can go wrong while evaluating an expression.
///
/// The engine never surfaces these to its caller; they all collapse into the
/// `"Error"` display sentinel. They exist so the evaluator can be tested and
/// so failures can be logged with their real cause.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,
    /// Result overflowed (infinity)
    #[error("Overflow: result exceeds maximum value")]
    Overflow,
    /// Invalid expression syntax
    #[error("Invalid expression: {0}")]
    ParseError(String),
    /// Empty expression provided
    #[error("Empty expression")]
    EmptyExpression,
    /// Invalid result (NaN or a function evaluated outside its domain)
    #[error("Invalid result: {0}")]
    InvalidResult(String),
}

impl CalcError {
    /// Create a parse error
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError(message.into())
    }
}
