//! Comparison values produced by normalization

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder actual value for a key absent from the configuration
pub const NOT_SET: &str = "Not Set";

/// Placeholder actual value for a key present with an empty value
pub const EMPTY: &str = "Empty";

/// A normalized value, ready to be compared
///
/// Magnitude-bearing settings convert to `Numeric`; everything else stays
/// `Text`. A `Numeric` never equals a `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompareValue {
    /// Magnitude in megabytes (or a bare number taken as-is)
    Numeric(f64),
    /// Literal text, compared after case/whitespace folding
    Text(String),
}

impl CompareValue {
    pub fn text(value: impl Into<String>) -> Self {
        CompareValue::Text(value.into())
    }

    pub fn not_set() -> Self {
        CompareValue::Text(NOT_SET.to_string())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CompareValue::Numeric(n) => Some(*n),
            CompareValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CompareValue::Numeric(_) => None,
            CompareValue::Text(s) => Some(s),
        }
    }

    /// True for a text value holding nothing but whitespace
    pub fn is_blank(&self) -> bool {
        matches!(self, CompareValue::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for CompareValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareValue::Text(s) => f.write_str(s),
            CompareValue::Numeric(n) => fmt_number(*n, f),
        }
    }
}

// Integral magnitudes keep one decimal place: 4 -> "4.0", 1024 -> "1024.0".
// At or above 1e16 and below 1e-4 the exponent form is used: "1e+16", "1e-05".
fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let magnitude = n.abs();
    if n.is_nan() {
        f.write_str("nan")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "inf" } else { "-inf" })
    } else if n != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        fmt_exponent(n, f)
    } else if n.fract() == 0.0 {
        write!(f, "{:.1}", n)
    } else {
        write!(f, "{}", n)
    }
}

// Signed exponent with at least two digits.
fn fmt_exponent(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let formatted = format!("{:e}", n);
    let (mantissa, exponent) = formatted.split_once('e').unwrap_or((&formatted, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    write!(f, "{}e{}{:02}", mantissa, sign, exponent.abs())
}

impl From<&str> for CompareValue {
    fn from(value: &str) -> Self {
        CompareValue::Text(value.to_string())
    }
}

impl From<f64> for CompareValue {
    fn from(value: f64) -> Self {
        CompareValue::Numeric(value)
    }
}
