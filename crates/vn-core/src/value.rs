use std::fmt;

use serde::{Deserialize, Serialize};

/// A dynamically typed game-state value.
///
/// Story content defines keys implicitly, so values are a small tagged union
/// rather than a schema. Integers and floats compare numerically, so a story
/// that writes `1` matches a condition that expects `1.0`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    /// The null sentinel. In conditions it means "absent or null".
    #[default]
    Null,
    /// A boolean flag.
    Bool(bool),
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A text value.
    String(String),
}

impl StateValue {
    /// Returns true for the null sentinel.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Exact integer/float equality: the float must be integral and convert back
/// to the same integer, so large integers never match a rounded float.
fn integer_eq_float(n: i64, x: f64) -> bool {
    // i64::MIN is -2^63, exactly representable.
    let min = i64::MIN as f64;
    x.fract() == 0.0 && x >= min && x < -min && x as i64 == n
}

impl PartialEq for StateValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Integer(n), Self::Float(x)) | (Self::Float(x), Self::Integer(n)) => {
                integer_eq_float(*n, *x)
            }
            _ => false,
        }
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for StateValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for StateValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for StateValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for StateValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
