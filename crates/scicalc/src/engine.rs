//! Expression engine
//!
//! The calculator's input state machine. It owns the expression text and the
//! operator flag, applies the keypad's composition rules, and evaluates on
//! request. No operation returns an error or panics: every failure turns the
//! expression into the `"Error"` sentinel, which the next clear, digit,
//! function or parenthesis replaces.

use crate::config::EngineConfig;
use crate::core::buffer::ExpressionBuffer;
use crate::core::evaluator::Evaluator;
use crate::core::format::{format_number, format_result};
use crate::core::history::{History, HistoryEntry};
use crate::core::parser::translate;
use crate::core::{Function, Operation};
use crate::display::{DisplaySink, RecordingDisplay};
use crate::input::{InputEvent, Paren};
use tracing::debug;

/// Scientific calculator input state machine
#[derive(Debug)]
pub struct ExpressionEngine<S = RecordingDisplay> {
    buffer: ExpressionBuffer,
    last_input_was_operator_or_function: bool,
    evaluator: Evaluator,
    history: History,
    config: EngineConfig,
    sink: S,
}

impl Default for ExpressionEngine<RecordingDisplay> {
    fn default() -> Self {
        Self::new(RecordingDisplay::new())
    }
}

impl<S: DisplaySink> ExpressionEngine<S> {
    /// Creates an engine showing `"0"` with the default configuration
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self::with_config(EngineConfig::default(), sink)
    }

    /// Creates an engine with a custom configuration
    #[must_use]
    pub fn with_config(config: EngineConfig, sink: S) -> Self {
        Self {
            buffer: ExpressionBuffer::new(),
            last_input_was_operator_or_function: false,
            evaluator: Evaluator::new(),
            history: History::with_capacity(config.history_capacity),
            config,
            sink,
        }
    }

    /// Current expression text
    #[must_use]
    pub fn expression(&self) -> &str {
        self.buffer.as_str()
    }

    /// True right after an operator, a function opener or `(`
    #[must_use]
    pub fn last_input_was_operator_or_function(&self) -> bool {
        self.last_input_was_operator_or_function
    }

    /// True when the engine is in the `"Error"` state
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.buffer.is_error()
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Tape of successful evaluations
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Empties the tape; the expression is untouched
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Loads a recorded expression back as it was keyed, ready to edit.
    ///
    /// `back` counts from the most recent evaluation, which is `0`. Does
    /// nothing when the tape has no such entry.
    pub fn recall(&mut self, back: usize) {
        let Some(entry) = self.history.recent(back) else {
            debug!(back, recorded = self.history.len(), "nothing to recall");
            return;
        };
        let keyed = entry.keyed.clone();
        self.buffer.set(&keyed);
        self.last_input_was_operator_or_function = false;
        self.notify();
    }

    /// The display sink
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The display sink, mutably
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the engine, returning its sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Routes an input event to its operation
    pub fn dispatch(&mut self, event: InputEvent) {
        debug!(?event, expression = %self.buffer, "dispatch");
        match event {
            InputEvent::Digit(d) => {
                if let Some(ch) = char::from_digit(u32::from(d), 10) {
                    self.append_digit(ch);
                }
            }
            InputEvent::Decimal => self.append_digit('.'),
            InputEvent::Operator(op) => self.choose_operator(op),
            InputEvent::Function(func) => self.append_function(func),
            InputEvent::Parenthesis(paren) => self.append_parenthesis(paren),
            InputEvent::Evaluate => self.evaluate(),
            InputEvent::Clear => self.clear(),
            InputEvent::Percentage => self.percentage(),
            InputEvent::ToggleSign => self.toggle_sign(),
        }
    }

    /// Pushes the current state to the sink without changing it
    pub fn refresh(&mut self) {
        self.notify();
    }

    /// Appends a digit or `.`; anything else is ignored.
    ///
    /// A `.` after an operator or opener starts `0.`, and a second `.` in
    /// the same number is ignored.
    pub fn append_digit(&mut self, token: char) {
        if !(token.is_ascii_digit() || token == '.') {
            debug!(%token, "ignoring non-digit token");
            return;
        }

        if self.buffer.is_sentinel() {
            if token == '.' {
                self.buffer.set("0.");
            } else {
                self.buffer.set(token.encode_utf8(&mut [0; 4]));
            }
        } else if token == '.' {
            if self.buffer.trailing_run_has_decimal() {
                debug!(expression = %self.buffer, "ignoring duplicate decimal point");
                return;
            }
            if self.buffer.expects_operand() {
                self.buffer.push_str("0.");
            } else {
                self.buffer.push('.');
            }
        } else {
            self.buffer.push(token);
        }

        self.last_input_was_operator_or_function = false;
        self.notify();
    }

    /// Appends a binary operator, replacing a trailing one
    pub fn choose_operator(&mut self, op: Operation) {
        if self.buffer.is_error() {
            self.buffer.reset();
        }

        if self.last_input_was_operator_or_function && self.buffer.ends_with_operator() {
            self.buffer.replace_trailing_operator(op);
        } else {
            self.buffer.push(op.stored_symbol());
        }

        self.last_input_was_operator_or_function = true;
        self.notify();
    }

    /// Opens a function call such as `sin(`
    pub fn append_function(&mut self, func: Function) {
        if self.buffer.is_sentinel() {
            self.buffer.set(func.prefix());
        } else {
            self.buffer.push_str(func.prefix());
        }
        self.last_input_was_operator_or_function = true;
        self.notify();
    }

    /// Appends `(` or `)`
    pub fn append_parenthesis(&mut self, paren: Paren) {
        if self.buffer.is_sentinel() {
            self.buffer.set(paren.symbol().encode_utf8(&mut [0; 4]));
        } else {
            self.buffer.push(paren.symbol());
        }
        self.last_input_was_operator_or_function = paren == Paren::Open;
        self.notify();
    }

    /// Evaluates the expression and stores the rounded result in its place.
    ///
    /// The history pane shows the translated expression; the current pane
    /// shows the result or `"Error"`. Does nothing in the error state.
    pub fn evaluate(&mut self) {
        if self.buffer.is_error() {
            return;
        }

        let translated = translate(self.buffer.as_str());
        match self.evaluator.evaluate_str(&translated) {
            Ok(value) => {
                let text = format_result(value, self.config.precision);
                debug!(expression = %translated, result = %text, "evaluated");
                self.history.record(HistoryEntry::new(
                    self.buffer.as_str(),
                    translated.as_str(),
                    text.as_str(),
                ));
                self.buffer.set(&text);
            }
            Err(err) => {
                debug!(expression = %translated, error = %err, "evaluation failed");
                self.buffer.set_error();
            }
        }

        self.last_input_was_operator_or_function = false;
        self.sink.update(&translated, self.buffer.as_str());
    }

    /// Resets to `"0"`
    pub fn clear(&mut self) {
        self.buffer.reset();
        self.last_input_was_operator_or_function = false;
        self.notify();
    }

    /// Divides by one hundred.
    ///
    /// A bare number is divided directly and keeps every digit the quotient
    /// has; anything else is evaluated first and the rounded result divided.
    /// Both panes show the outcome.
    pub fn percentage(&mut self) {
        let bare = self.buffer.is_bare_number();
        if !bare {
            self.evaluate();
        }
        if !self.buffer.is_error() {
            match self.buffer.as_str().parse::<f64>() {
                Ok(value) => {
                    let text = if bare {
                        format_number(value / 100.0)
                    } else {
                        format_result(value / 100.0, self.config.precision)
                    };
                    self.buffer.set(&text);
                }
                Err(err) => {
                    debug!(expression = %self.buffer, error = %err, "percentage failed");
                    self.buffer.set_error();
                }
            }
        }
        let text = self.buffer.as_str();
        self.sink.update(text, text);
    }

    /// Negates the trailing number, e.g. `12+5` becomes `12+-5`.
    ///
    /// Does nothing when the expression does not end in a number.
    pub fn toggle_sign(&mut self) {
        let Some(start) = self.buffer.trailing_literal_start() else {
            return;
        };
        let literal = &self.buffer.as_str()[start..];
        let Ok(value) = literal.parse::<f64>() else {
            debug!(%literal, "ignoring sign toggle on non-numeric literal");
            return;
        };
        let negated = format_number(-value);
        self.buffer.splice_tail(start, &negated);
        self.notify();
    }

    fn notify(&mut self) {
        let current = if self.buffer.is_sentinel() {
            self.buffer.as_str()
        } else {
            self.config.preview_placeholder.as_str()
        };
        self.sink.update(self.buffer.as_str(), current);
    }
}
