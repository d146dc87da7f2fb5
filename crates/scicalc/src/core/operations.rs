//! Operators, functions and checked arithmetic
//!
//! Each operator and function exists in three spellings: the glyph printed
//! on its button, the text stored in the expression, and the canonical text
//! the tokenizer reads after symbol translation.

use crate::core::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
    /// Power (xʸ)
    Power,
}

impl Operation {
    /// All operators in keypad order
    pub const ALL: [Self; 5] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
    ];

    /// Returns the glyph shown on the button
    #[must_use]
    pub const fn glyph(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Power => "xʸ",
        }
    }

    /// Returns the character stored in the expression text
    #[must_use]
    pub const fn stored_symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
            Self::Power => '^',
        }
    }

    /// Returns the operator symbol understood by the tokenizer
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "^",
        }
    }

    /// Looks up an operator from any of its spellings (`×`, `*`, `xʸ`, `^`, ...)
    #[must_use]
    pub fn from_glyph(glyph: &str) -> Option<Self> {
        match glyph {
            "+" => Some(Self::Add),
            "-" | "−" => Some(Self::Subtract),
            "×" | "*" | "x" => Some(Self::Multiply),
            "÷" | "/" => Some(Self::Divide),
            "xʸ" | "^" | "**" => Some(Self::Power),
            _ => None,
        }
    }

    /// Returns the operator whose stored character is `ch`
    #[must_use]
    pub fn from_stored(ch: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.stored_symbol() == ch)
    }
}

/// Unary function applied to a parenthesised argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Function {
    /// Sine (radians)
    Sin,
    /// Cosine (radians)
    Cos,
    /// Tangent (radians)
    Tan,
    /// Square root
    Sqrt,
}

impl Function {
    /// All functions in keypad order
    pub const ALL: [Self; 4] = [Self::Sin, Self::Cos, Self::Tan, Self::Sqrt];

    /// Returns the label shown on the button
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sqrt => "√",
        }
    }

    /// Returns the opening token stored in the expression, including `(`
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Sin => "sin(",
            Self::Cos => "cos(",
            Self::Tan => "tan(",
            Self::Sqrt => "√(",
        }
    }

    /// Returns the identifier understood by the tokenizer
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sqrt => "sqrt",
        }
    }

    /// Looks up a function from its label or identifier
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "sqrt" | "√" => Some(Self::Sqrt),
            _ => None,
        }
    }
}

/// Checked arithmetic over `f64`
///
/// Every result passes through the same finiteness check, so a NaN or an
/// infinity can never leak out of an evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator;

impl Calculator {
    /// Performs an operation on two operands
    pub fn calculate(a: f64, b: f64, op: Operation) -> CalcResult<f64> {
        match op {
            Operation::Add => Self::add(a, b),
            Operation::Subtract => Self::subtract(a, b),
            Operation::Multiply => Self::multiply(a, b),
            Operation::Divide => Self::divide(a, b),
            Operation::Power => Self::power(a, b),
        }
    }

    /// Applies a function to its argument
    pub fn apply(func: Function, x: f64) -> CalcResult<f64> {
        let result = match func {
            Function::Sin => x.sin(),
            Function::Cos => x.cos(),
            Function::Tan => x.tan(),
            Function::Sqrt => {
                if x < 0.0 {
                    return Err(CalcError::InvalidResult(format!(
                        "square root of negative number {x}"
                    )));
                }
                x.sqrt()
            }
        };
        Self::check_overflow(result)
    }

    /// Addition: a + b
    pub fn add(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_overflow(a + b)
    }

    /// Subtraction: a - b
    pub fn subtract(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_overflow(a - b)
    }

    /// Multiplication: a * b
    pub fn multiply(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_overflow(a * b)
    }

    /// Division: a / b
    pub fn divide(a: f64, b: f64) -> CalcResult<f64> {
        if b == 0.0 {
            return Err(CalcError::DivisionByZero);
        }
        Self::check_overflow(a / b)
    }

    /// Power: a ^ b
    pub fn power(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_overflow(a.powf(b))
    }

    /// Rejects NaN and infinity
    pub fn check_overflow(result: f64) -> CalcResult<f64> {
        if result.is_nan() {
            Err(CalcError::InvalidResult("NaN".into()))
        } else if result.is_infinite() {
            Err(CalcError::Overflow)
        } else {
            Ok(result)
        }
    }
}
