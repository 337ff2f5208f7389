//! Filter literal classification.
//!
//! Filter rule values arrive as untyped JSON. The first element decides
//! whether the sequence is textual or numeric; a numeric sequence is
//! integral only when every element is an integer.

use crate::error::{CoreError, CoreResult};
use serde_json::Value;

/// A typed filter literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Whole number, rendered as a plain integer
    Integer(i64),
    /// Floating-point number, rendered with four fractional digits
    Float(f64),
    /// Text, rendered quoted
    String(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LiteralKind {
    Integer,
    Float,
    String,
}

impl LiteralKind {
    fn of_sequence(values: &[Value]) -> CoreResult<Self> {
        match values.first() {
            Some(Value::String(_)) => Ok(Self::String),
            Some(Value::Number(_)) => {
                let integral = values.iter().all(|v| v.as_i64().is_some());
                if integral {
                    Ok(Self::Integer)
                } else {
                    Ok(Self::Float)
                }
            }
            Some(other) => Err(CoreError::malformed(format!(
                "filter values must be numbers or strings, found {other}"
            ))),
            None => Err(CoreError::malformed("filter rule has no values")),
        }
    }
}

impl Literal {
    /// Classify a sequence of JSON values into literals of one uniform kind.
    pub fn classify(values: &[Value]) -> CoreResult<Vec<Self>> {
        let kind = LiteralKind::of_sequence(values)?;
        values
            .iter()
            .map(|value| Self::from_value(kind, value))
            .collect()
    }

    fn from_value(kind: LiteralKind, value: &Value) -> CoreResult<Self> {
        let mismatch = || {
            CoreError::malformed(format!(
                "filter value {value} does not match the sequence's {kind:?} kind"
            ))
        };
        match kind {
            LiteralKind::Integer => value.as_i64().map(Self::Integer).ok_or_else(mismatch),
            LiteralKind::Float => value.as_f64().map(Self::Float).ok_or_else(mismatch),
            LiteralKind::String => value
                .as_str()
                .map(|s| Self::String(s.to_string()))
                .ok_or_else(mismatch),
        }
    }
}

#[cfg(test)]
#[path = "literal_test.rs"]
mod tests;
