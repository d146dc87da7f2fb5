//! Input events
//!
//! Every button press becomes exactly one [`InputEvent`], and every event maps
//! to exactly one engine operation through
//! [`ExpressionEngine::dispatch`](crate::ExpressionEngine::dispatch).

use crate::core::{Function, Operation};
use serde::{Deserialize, Serialize};

/// Parenthesis token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Paren {
    /// `(`
    Open,
    /// `)`
    Close,
}

impl Paren {
    /// Returns the parenthesis character
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Open => '(',
            Self::Close => ')',
        }
    }
}

/// A single calculator input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// Insert a digit (0-9)
    Digit(u8),
    /// Insert a decimal point
    Decimal,
    /// Choose a binary operator
    Operator(Operation),
    /// Open a function call
    Function(Function),
    /// Insert a parenthesis
    Parenthesis(Paren),
    /// Evaluate the expression
    Evaluate,
    /// Reset to `0`
    Clear,
    /// Divide by one hundred
    Percentage,
    /// Negate the trailing number
    ToggleSign,
}

impl InputEvent {
    /// Maps a button label to its event.
    ///
    /// Accepts the glyphs printed on the keypad (`×`, `÷`, `xʸ`, `√`, `±`, ...)
    /// and their ASCII spellings (`*`, `/`, `^`, `sqrt`, `+/-`, ...).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if let [digit @ b'0'..=b'9'] = label.as_bytes() {
            return Some(Self::Digit(digit - b'0'));
        }
        if let Some(op) = Operation::from_glyph(label) {
            return Some(Self::Operator(op));
        }
        if let Some(func) = Function::from_name(label) {
            return Some(Self::Function(func));
        }
        match label {
            "." | "," => Some(Self::Decimal),
            "(" => Some(Self::Parenthesis(Paren::Open)),
            ")" => Some(Self::Parenthesis(Paren::Close)),
            "=" => Some(Self::Evaluate),
            "C" | "AC" => Some(Self::Clear),
            "%" => Some(Self::Percentage),
            "±" | "+/-" => Some(Self::ToggleSign),
            _ => None,
        }
    }

    /// Returns the label printed on the button for this event
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.glyph().to_string(),
            Self::Function(func) => func.label().to_string(),
            Self::Parenthesis(paren) => paren.symbol().to_string(),
            Self::Evaluate => "=".to_string(),
            Self::Clear => "C".to_string(),
            Self::Percentage => "%".to_string(),
            Self::ToggleSign => "±".to_string(),
        }
    }
}
