//! Pure predicates behind the scalar constraint keywords.
//!
//! Each checker takes the (possibly coerced) value and the keyword's operand
//! and answers whether the constraint holds. Operand extraction lives here as
//! well, so a malformed operand is reported as a [`SchemaError`] in one
//! place.

use crate::error::{SchemaError, SchemaResult};
use serde_json::Value;
use std::collections::HashSet;

/// Numeric operand of `keyword`.
pub fn number_operand(keyword: &str, expected: &Value) -> SchemaResult<f64> {
    expected
        .as_f64()
        .ok_or_else(|| SchemaError::invalid_keyword(keyword, format!("expected a number, got {}", expected)))
}

/// Length of a string in characters.
pub fn char_length(value: &str) -> usize {
    value.chars().count()
}

/// `minLength`, `minItems`: inclusive lower bound on a length.
pub fn min_length(length: usize, expected: f64) -> bool {
    length as f64 >= expected
}

/// `maxLength`, `maxItems`: inclusive upper bound on a length.
pub fn max_length(length: usize, expected: f64) -> bool {
    length as f64 <= expected
}

/// `minimum`: inclusive lower bound.
pub fn minimum(value: f64, expected: f64) -> bool {
    value >= expected
}

/// `maximum`: inclusive upper bound.
pub fn maximum(value: f64, expected: f64) -> bool {
    value <= expected
}

/// `exclusiveMinimum`: strict lower bound.
pub fn exclusive_minimum(value: f64, expected: f64) -> bool {
    value > expected
}

/// `exclusiveMaximum`: strict upper bound.
pub fn exclusive_maximum(value: f64, expected: f64) -> bool {
    value < expected
}

/// `divisibleBy`: remainder check on operands scaled to whole numbers.
///
/// Both operands are multiplied by ten to the larger of their decimal
/// precisions and rounded, so `0.3` is divisible by `0.1`. A zero divisor
/// never divides.
pub fn divisible_by(value: f64, divisor: f64) -> bool {
    let scale = decimal_places(value).max(decimal_places(divisor));
    let multiplier = 10f64.powi(scale as i32);
    let scaled_value = (value * multiplier).round();
    let scaled_divisor = (divisor * multiplier).round();
    scaled_divisor != 0.0 && scaled_value % scaled_divisor == 0.0
}

fn decimal_places(value: f64) -> usize {
    if !value.is_finite() {
        return 0;
    }
    let text = format!("{}", value.abs());
    text.split_once('.').map_or(0, |(_, fraction)| fraction.len())
}

/// `uniqueItems`: no two elements share the same canonical serialisation.
pub fn unique_items(items: &[Value]) -> bool {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .all(|item| seen.insert(canonical(item).to_string()))
}

/// Copy of `value` with whole-number floats written as integers, so `1.0`
/// and `1` serialise alike.
fn canonical(value: &Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Value::from(f as i64),
            _ => value.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(canonical).collect()),
        Value::Object(members) => Value::Object(
            members
                .iter()
                .map(|(key, member)| (key.clone(), canonical(member)))
                .collect(),
        ),
        _ => value.clone(),
    }
}

/// Equality used by `equal` and `enum`.
///
/// Numbers compare by numeric value, so `1` equals `1.0`; containers compare
/// element-wise with the same rule.
pub fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => match (x.as_u64(), y.as_u64()) {
                (Some(x), Some(y)) => x == y,
                _ => x.as_f64() == y.as_f64(),
            },
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| strict_equals(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| strict_equals(x, y)))
        }
        _ => a == b,
    }
}

/// `enum`: membership by [`strict_equals`].
pub fn is_member(options: &[Value], value: &Value) -> bool {
    options.iter().any(|option| strict_equals(option, value))
}
