//! Best-effort conversion of values to the type a schema declares.
//!
//! Coercion never fails and never touches the caller's data: a converted
//! value is returned as an owned copy, anything else is borrowed through.
//!
//! Rules, in order:
//! 1. a schema allowing `null` keeps a `null` value as `null`;
//! 2. a schema allowing `integer` or `number` turns numeric strings into numbers;
//! 3. a schema allowing `boolean` maps `"true"`, `"1"`, `1` to `true` and
//!    `"false"`, `"0"`, `0` to `false`.
//!
//! Rules 2 and 3 apply in sequence, so with `type: ["boolean", "number"]`
//! the string `"1"` becomes the number `1` and then `true`.

use super::Schema;
use super::types::ValueKind;
use serde_json::{Number, Value};
use std::borrow::Cow;

/// Coerce `value` to the type implied by `schema`.
pub fn coerce<'v>(value: &'v Value, schema: Schema<'_>) -> Cow<'v, Value> {
    let Some(decl) = schema.type_decl() else {
        return Cow::Borrowed(value);
    };

    if decl.contains(ValueKind::Null) && value.is_null() {
        return Cow::Borrowed(value);
    }

    let mut current = Cow::Borrowed(value);

    if decl.contains(ValueKind::Integer) || decl.contains(ValueKind::Number) {
        if let Some(number) = numeric_string(&current) {
            current = Cow::Owned(Value::Number(number));
        }
    }

    if decl.contains(ValueKind::Boolean) {
        if let Some(flag) = boolean_token(&current) {
            current = Cow::Owned(Value::Bool(flag));
        }
    }

    current
}

/// Parse a string holding a decimal number.
///
/// Integral results become integer numbers so that `"42"` classifies as an
/// `integer`. Blank strings are not numeric.
fn numeric_string(value: &Value) -> Option<Number> {
    let text = value.as_str()?.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(int) = text.parse::<i64>() {
        return Some(Number::from(int));
    }
    let float = text.parse::<f64>().ok().filter(|f| f.is_finite())?;
    if float.fract() == 0.0 && float.abs() < i64::MAX as f64 {
        return Some(Number::from(float as i64));
    }
    Number::from_f64(float)
}

fn boolean_token(value: &Value) -> Option<bool> {
    match value {
        Value::String(s) if s == "true" || s == "1" => Some(true),
        Value::String(s) if s == "false" || s == "0" => Some(false),
        Value::Number(n) if n.as_f64() == Some(1.0) => Some(true),
        Value::Number(n) if n.as_f64() == Some(0.0) => Some(false),
        _ => None,
    }
}
