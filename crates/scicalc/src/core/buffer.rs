//! Expression buffer
//!
//! Owns the expression text and answers the lexical questions the input
//! rules depend on: what the last character is, where the trailing numeric
//! literal starts, whether the number being typed already has a decimal
//! point. Keeping these scans here means the engine never pattern-matches
//! raw text inline.

use crate::core::Operation;

/// Text of the initial, empty expression
pub const INITIAL: &str = "0";

/// Text of the failure sentinel
pub const ERROR: &str = "Error";

/// Lexical class of a single expression character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// `0`-`9`
    Digit,
    /// `.`
    Decimal,
    /// One of the stored binary operators `+ - × ÷ ^`
    Operator(Operation),
    /// `(`, which also terminates every function opener
    OpenParen,
    /// `)`
    CloseParen,
    /// Function-name letters, `√` and anything else
    Other,
}

impl CharClass {
    /// Classifies a character
    #[must_use]
    pub fn of(ch: char) -> Self {
        match ch {
            '0'..='9' => Self::Digit,
            '.' => Self::Decimal,
            '(' => Self::OpenParen,
            ')' => Self::CloseParen,
            _ => Operation::from_stored(ch).map_or(Self::Other, Self::Operator),
        }
    }

    /// True for characters that can be part of a numeric literal
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Digit | Self::Decimal)
    }
}

/// The engine's mutable expression text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionBuffer {
    text: String,
}

impl Default for ExpressionBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionBuffer {
    /// Creates a buffer holding the initial `"0"`
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: INITIAL.to_string(),
        }
    }

    /// Returns the expression text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// True when the buffer holds the initial `"0"`
    #[must_use]
    pub fn is_initial(&self) -> bool {
        self.text == INITIAL
    }

    /// True when the buffer holds the `"Error"` sentinel
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.text == ERROR
    }

    /// True for either sentinel; the next composing keystroke replaces it
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.is_initial() || self.is_error()
    }

    /// Resets to `"0"`
    pub fn reset(&mut self) {
        INITIAL.clone_into(&mut self.text);
    }

    /// Switches to the `"Error"` sentinel
    pub fn set_error(&mut self) {
        ERROR.clone_into(&mut self.text);
    }

    /// Replaces the whole text
    pub fn set(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }

    /// Appends text
    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    /// Appends a single character
    pub fn push(&mut self, ch: char) {
        self.text.push(ch);
    }

    /// Returns the last character, if any
    #[must_use]
    pub fn last_char(&self) -> Option<char> {
        self.text.chars().next_back()
    }

    /// Returns the class of the last character
    #[must_use]
    pub fn last_class(&self) -> Option<CharClass> {
        self.last_char().map(CharClass::of)
    }

    /// True when the expression ends in a binary operator
    #[must_use]
    pub fn ends_with_operator(&self) -> bool {
        matches!(self.last_class(), Some(CharClass::Operator(_)))
    }

    /// True when the expression ends in an operator, a function opener or `(`,
    /// i.e. a position where a new operand is expected
    #[must_use]
    pub fn expects_operand(&self) -> bool {
        matches!(
            self.last_class(),
            Some(CharClass::Operator(_) | CharClass::OpenParen)
        )
    }

    /// Replaces the trailing operator; does nothing if there is none
    pub fn replace_trailing_operator(&mut self, op: Operation) {
        if self.ends_with_operator() {
            self.text.pop();
            self.text.push(op.stored_symbol());
        }
    }

    /// The maximal run of digits and `.` at the end of the text
    #[must_use]
    pub fn trailing_run(&self) -> &str {
        let start = self
            .text
            .char_indices()
            .rev()
            .take_while(|&(_, ch)| CharClass::of(ch).is_numeric())
            .last()
            .map_or(self.text.len(), |(i, _)| i);
        &self.text[start..]
    }

    /// True when the number currently being typed already has a `.`
    #[must_use]
    pub fn trailing_run_has_decimal(&self) -> bool {
        self.trailing_run().contains('.')
    }

    /// Byte offset where the trailing numeric literal starts.
    ///
    /// The literal is the longest suffix of digits holding at most one `.`.
    /// A `-` directly in front of it belongs to the literal when it is a
    /// sign rather than a subtraction: at the start of the text, or after an
    /// operator or `(`.
    #[must_use]
    pub fn trailing_literal_start(&self) -> Option<usize> {
        let mut start = None;
        let mut seen_decimal = false;
        for (i, ch) in self.text.char_indices().rev() {
            match CharClass::of(ch) {
                CharClass::Digit => start = Some(i),
                CharClass::Decimal if !seen_decimal => {
                    seen_decimal = true;
                    start = Some(i);
                }
                _ => break,
            }
        }
        let start = start?;

        let before = &self.text[..start];
        if let Some(prefix) = before.strip_suffix('-') {
            let is_sign = match prefix.chars().next_back().map(CharClass::of) {
                None | Some(CharClass::Operator(_) | CharClass::OpenParen) => true,
                Some(_) => false,
            };
            if is_sign {
                return Some(prefix.len());
            }
        }
        Some(start)
    }

    /// The trailing numeric literal, sign included
    #[must_use]
    pub fn trailing_literal(&self) -> Option<&str> {
        self.trailing_literal_start().map(|i| &self.text[i..])
    }

    /// Replaces everything from `start` to the end with `replacement`
    pub fn splice_tail(&mut self, start: usize, replacement: &str) {
        self.text.truncate(start);
        self.text.push_str(replacement);
    }

    /// True when the whole text is a bare number: digits and at most one `.`
    #[must_use]
    pub fn is_bare_number(&self) -> bool {
        let mut decimals = 0;
        let mut digits = 0;
        for ch in self.text.chars() {
            match CharClass::of(ch) {
                CharClass::Digit => digits += 1,
                CharClass::Decimal => decimals += 1,
                _ => return false,
            }
        }
        digits > 0 && decimals <= 1
    }
}

impl std::fmt::Display for ExpressionBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
