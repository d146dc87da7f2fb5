//! Calculator driver
//!
//! Any host that can press buttons and read back both display panes can run
//! the same verification routines: write the check once, run it against the
//! in-memory engine, a terminal session or a browser page.

use crate::config::EngineConfig;
use crate::display::RecordingDisplay;
use crate::engine::ExpressionEngine;
use crate::input::InputEvent;
use crate::keypad::Keypad;
use thiserror::Error;

/// Result type for driver interactions
pub type DriverResult<T> = Result<T, DriverError>;

/// Errors reported by drivers and verification routines
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// No button carries this label
    #[error("Unknown button label: {0}")]
    UnknownLabel(String),

    /// A display pane did not show what was expected
    #[error("After `{keys}` the {pane} pane showed `{actual}`, expected `{expected}`")]
    Mismatch {
        /// Labels pressed since the last clear
        keys: String,
        /// `history` or `current`
        pane: &'static str,
        /// Expected text
        expected: String,
        /// Actual text
        actual: String,
    },
}

/// Abstract driver for calculator interactions
///
/// # Example
///
/// ```
/// use scicalc::driver::{verify_precedence, CalculatorDriver, EngineDriver};
///
/// let mut driver = EngineDriver::new();
/// verify_precedence(&mut driver).unwrap();
/// ```
pub trait CalculatorDriver {
    /// Presses the button with this label
    fn press(&mut self, label: &str) -> DriverResult<()>;

    /// Text of the history pane
    fn history_text(&self) -> String;

    /// Text of the current pane
    fn current_text(&self) -> String;

    /// Presses `C`
    fn clear(&mut self);

    /// Presses each whitespace-separated label in turn
    fn press_all(&mut self, labels: &str) -> DriverResult<()> {
        labels.split_whitespace().try_for_each(|label| self.press(label))
    }
}

/// Driver backed by an in-memory [`ExpressionEngine`]
#[derive(Debug, Default)]
pub struct EngineDriver {
    engine: ExpressionEngine<RecordingDisplay>,
    keypad: Keypad,
}

impl EngineDriver {
    /// Creates a driver over a fresh engine
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver over an engine with a custom configuration
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            engine: ExpressionEngine::with_config(config, RecordingDisplay::new()),
            keypad: Keypad::new(),
        }
    }

    /// Returns the underlying engine
    #[must_use]
    pub fn engine(&self) -> &ExpressionEngine<RecordingDisplay> {
        &self.engine
    }

    /// Returns the underlying engine mutably
    pub fn engine_mut(&mut self) -> &mut ExpressionEngine<RecordingDisplay> {
        &mut self.engine
    }

    /// Current expression text
    #[must_use]
    pub fn expression(&self) -> &str {
        self.engine.expression()
    }
}

impl CalculatorDriver for EngineDriver {
    fn press(&mut self, label: &str) -> DriverResult<()> {
        let event = self
            .keypad
            .find_by_label(label)
            .map(|button| button.event)
            .ok_or_else(|| DriverError::UnknownLabel(label.to_string()))?;
        self.engine.dispatch(event);
        Ok(())
    }

    fn history_text(&self) -> String {
        self.engine.sink().history().to_string()
    }

    fn current_text(&self) -> String {
        self.engine.sink().current().to_string()
    }

    fn clear(&mut self) {
        self.engine.dispatch(InputEvent::Clear);
    }
}

fn check<D: CalculatorDriver>(
    driver: &mut D,
    keys: &str,
    history: Option<&str>,
    current: &str,
) -> DriverResult<()> {
    driver.clear();
    driver.press_all(keys)?;

    let mismatch = |pane, expected: &str, actual: String| DriverError::Mismatch {
        keys: keys.to_string(),
        pane,
        expected: expected.to_string(),
        actual,
    };

    if let Some(expected) = history {
        let actual = driver.history_text();
        if actual != expected {
            return Err(mismatch("history", expected, actual));
        }
    }
    let actual = driver.current_text();
    if actual != current {
        return Err(mismatch("current", current, actual));
    }
    Ok(())
}

/// Verifies the four basic operations
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) -> DriverResult<()> {
    check(driver, "2 + 3 =", Some("2+3"), "5")?;
    check(driver, "1 0 - 4 =", Some("10-4"), "6")?;
    check(driver, "6 × 7 =", Some("6*7"), "42")?;
    check(driver, "2 0 ÷ 4 =", Some("20/4"), "5")?;
    check(driver, "1 ÷ 3 =", None, "0.3333333333")
}

/// Verifies operator precedence and grouping
pub fn verify_precedence<D: CalculatorDriver>(driver: &mut D) -> DriverResult<()> {
    check(driver, "2 + 3 × 4 =", Some("2+3*4"), "14")?;
    check(driver, "2 × 3 xʸ 2 =", Some("2*3^2"), "18")?;
    check(driver, "( 2 + 3 ) × 4 =", Some("(2+3)*4"), "20")?;
    check(driver, "2 xʸ 3 xʸ 2 =", None, "512")
}

/// Verifies the scientific functions
pub fn verify_scientific_functions<D: CalculatorDriver>(driver: &mut D) -> DriverResult<()> {
    check(driver, "sin 0 ) =", Some("sin(0)"), "0")?;
    check(driver, "cos 0 ) =", Some("cos(0)"), "1")?;
    check(driver, "√ 8 1 ) =", Some("sqrt(81)"), "9")?;
    check(driver, "2 × √ 1 6 ) =", Some("2*sqrt(16)"), "8")
}

/// Verifies that failures show `Error` and the next input recovers
pub fn verify_error_recovery<D: CalculatorDriver>(driver: &mut D) -> DriverResult<()> {
    check(driver, "5 ÷ 0 =", Some("5/0"), "Error")?;
    check(driver, "5 ÷ 0 = 7", Some("7"), "...")?;
    check(driver, "( 1 + 2 =", None, "Error")?;
    check(driver, "√ 0 - 9 ) =", None, "Error")?;
    check(driver, "5 ÷ 0 = C", Some("0"), "0")
}

/// Verifies operator replacement, decimal guarding, sign toggling and
/// percentage
pub fn verify_editing<D: CalculatorDriver>(driver: &mut D) -> DriverResult<()> {
    check(driver, "5 + ×", Some("5×"), "...")?;
    check(driver, "1 . 5 .", Some("1.5"), "...")?;
    check(driver, "+ .", Some("0+0."), "...")?;
    check(driver, "1 2 + 5 ±", Some("12+-5"), "...")?;
    check(driver, "1 2 + 5 ± =", None, "7")?;
    check(driver, "5 0 %", Some("0.5"), "0.5")
}

/// Runs every verification routine
pub fn run_full_specification<D: CalculatorDriver>(driver: &mut D) -> DriverResult<()> {
    verify_basic_arithmetic(driver)?;
    verify_precedence(driver)?;
    verify_scientific_functions(driver)?;
    verify_error_recovery(driver)?;
    verify_editing(driver)
}
