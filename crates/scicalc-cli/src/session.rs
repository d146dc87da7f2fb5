//! Line-oriented calculator session
//!
//! Each input line is a run of button labels. Every known label is pressed
//! in order; unknown ones are reported and skipped. The word `recall` loads
//! the most recent evaluation back as it was keyed. After the line the
//! display panes are printed as `history | current`.

use crate::commands::Cli;
use crate::error::CliResult;
use scicalc::{EngineConfig, ExpressionEngine, Keypad, RecordingDisplay};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Words that end an interactive session
const QUIT_WORDS: [&str; 2] = ["quit", "exit"];

/// Word that reloads the latest evaluation into the expression
const RECALL_WORD: &str = "recall";

/// Outcome of one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The labels were pressed; these were not recognised
    Pressed {
        /// Labels with no matching button
        unknown: Vec<String>,
    },
    /// The line was blank
    Blank,
    /// The line asked to end the session
    Quit,
}

/// A calculator session over one engine
#[derive(Debug)]
pub struct Session {
    engine: ExpressionEngine<RecordingDisplay>,
    keypad: Keypad,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Session {
    /// Creates a session showing the initial display
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let mut engine = ExpressionEngine::with_config(config, RecordingDisplay::new());
        engine.refresh();
        Self {
            engine,
            keypad: Keypad::new(),
        }
    }

    /// Builds the engine configuration from the command line
    pub fn config_from_cli(cli: &Cli) -> CliResult<EngineConfig> {
        let mut config = match &cli.config {
            Some(path) => EngineConfig::from_path(path)?,
            None => EngineConfig::default(),
        };
        if let Some(precision) = cli.precision {
            config = config.with_precision(precision);
            config.validate()?;
        }
        Ok(config)
    }

    /// The engine behind the session
    #[must_use]
    pub fn engine(&self) -> &ExpressionEngine<RecordingDisplay> {
        &self.engine
    }

    /// The display as printed: `history | current`
    #[must_use]
    pub fn display_line(&self) -> String {
        let sink = self.engine.sink();
        format!("{} | {}", sink.history(), sink.current())
    }

    /// Presses every label on the line
    pub fn feed_line(&mut self, line: &str) -> LineOutcome {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return LineOutcome::Blank;
        }
        if QUIT_WORDS.contains(&trimmed) {
            return LineOutcome::Quit;
        }

        let mut unknown = Vec::new();
        for label in trimmed.split_whitespace() {
            if label == RECALL_WORD {
                self.engine.recall(0);
                continue;
            }
            match self.keypad.find_by_label(label) {
                Some(button) => self.engine.dispatch(button.event),
                None => {
                    debug!(%label, "unknown label");
                    unknown.push(label.to_string());
                }
            }
        }
        LineOutcome::Pressed { unknown }
    }

    /// Reads lines until end of input or a quit word, printing the display
    /// after each one
    pub fn run<R, W, E>(&mut self, input: R, out: &mut W, err: &mut E) -> CliResult<()>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        for line in input.lines() {
            match self.feed_line(&line?) {
                LineOutcome::Quit => break,
                LineOutcome::Blank => {}
                LineOutcome::Pressed { unknown } => {
                    for label in unknown {
                        writeln!(err, "unknown button: {label}")?;
                    }
                    writeln!(out, "{}", self.display_line())?;
                }
            }
        }
        info!(evaluations = self.engine.history().len(), "session finished");
        Ok(())
    }

    /// Writes the history tape, one evaluation per line
    pub fn write_history<W: Write>(&self, out: &mut W) -> CliResult<()> {
        let tape = self.engine.history().export_formatted();
        if !tape.is_empty() {
            writeln!(out, "{tape}")?;
        }
        Ok(())
    }
}
