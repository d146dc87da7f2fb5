//! Result formatting
//!
//! Results are rounded to a fixed number of significant digits and printed
//! in plain positional notation, so a formatted result is always made of
//! digits, at most one `.` and an optional leading `-`. That keeps it inside
//! the expression alphabet and lets the user keep composing on top of it.

/// Significant digits kept by default
pub const DEFAULT_PRECISION: usize = 10;

/// Rounds `value` to `digits` significant digits.
///
/// Non-finite values are returned unchanged.
#[must_use]
pub fn round_significant(value: f64, digits: usize) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    let digits = digits.clamp(1, 17);
    let scientific = format!("{:.*e}", digits - 1, value);
    scientific.parse().unwrap_or(value)
}

/// Formats a number without exponent notation or trailing zeros.
///
/// Negative zero prints as `0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// Rounds then formats; this is what the engine stores after an evaluation.
#[must_use]
pub fn format_result(value: f64, digits: usize) -> String {
    format_number(round_significant(value, digits))
}
