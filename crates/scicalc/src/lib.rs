//! Scientific calculator expression engine
//!
//! The input state machine behind a calculator keypad. Button presses edit an
//! expression string (`12+sin(3`, `2×√(9)`); evaluating it runs a
//! recursive-descent parser over the text and shows the rounded result.
//! Nothing is ever executed as code.
//!
//! Hosts push [`InputEvent`]s into an [`ExpressionEngine`] and receive the
//! two display panes through a [`DisplaySink`]: any `FnMut(&str, &str)`
//! closure works.
//!
//! # Example
//!
//! ```rust
//! use scicalc::prelude::*;
//!
//! let mut engine = ExpressionEngine::new(RecordingDisplay::new());
//! for label in ["2", "+", "3", "×", "4", "="] {
//!     engine.dispatch(InputEvent::from_label(label).unwrap());
//! }
//! assert_eq!(engine.expression(), "14");
//! assert_eq!(engine.sink().history(), "2+3*4");
//!
//! // Errors collapse into a sentinel the next keystroke replaces
//! engine.clear();
//! engine.append_digit('1');
//! engine.choose_operator(Operation::Divide);
//! engine.append_digit('0');
//! engine.evaluate();
//! assert_eq!(engine.expression(), "Error");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod display;
pub mod driver;
pub mod engine;
pub mod input;
pub mod keypad;

pub use config::{ConfigError, ConfigResult, EngineConfig};
pub use display::{DisplayFrame, DisplaySink, NullDisplay, RecordingDisplay};
pub use engine::ExpressionEngine;
pub use input::{InputEvent, Paren};
pub use keypad::{Keypad, KeypadButton};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::core::evaluator::Evaluator;
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::parser::{translate, AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{CalcError, CalcResult, Calculator, Function, Operation};
    pub use crate::display::{DisplaySink, NullDisplay, RecordingDisplay};
    pub use crate::driver::{CalculatorDriver, DriverError, EngineDriver};
    pub use crate::engine::ExpressionEngine;
    pub use crate::input::{InputEvent, Paren};
    pub use crate::keypad::Keypad;
}
