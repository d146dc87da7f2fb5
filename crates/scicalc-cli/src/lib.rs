//! scicalc CLI library
//!
//! Argument parsing, logging setup and the line-oriented session loop behind
//! the `scicalc` binary.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
#![warn(missing_docs)]
#![deny(missing_debug_implementations)]

mod commands;
mod error;
pub mod logging;
mod session;

pub use commands::Cli;
pub use error::{CliError, CliResult};
pub use session::{LineOutcome, Session};
