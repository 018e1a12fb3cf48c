//! Type classification of JSON values against declared type tokens.
//!
//! A schema's `type` is either one token or a list of tokens. Candidates are
//! tried in declaration order and the first one the value structurally
//! satisfies is the classification, which then selects the family of
//! type-specific constraints to run.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Closed set of value kinds a schema can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// UTF-8 string
    String,
    /// Any number
    Number,
    /// A number with zero fractional part
    Integer,
    /// `true` or `false`
    Boolean,
    /// Mapping of keys to values
    Object,
    /// Ordered sequence
    Array,
    /// `null`
    Null,
    /// Anything present
    Any,
}

impl ValueKind {
    /// Parse a type token; matching is case-insensitive and ignores surrounding whitespace.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            "object" => Some(Self::Object),
            "array" => Some(Self::Array),
            "null" => Some(Self::Null),
            "any" => Some(Self::Any),
            _ => None,
        }
    }

    /// Canonical token for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Null => "null",
            Self::Any => "any",
        }
    }

    /// Whether `value` structurally satisfies this kind.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => is_integral(value),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
            Self::Null => value.is_null(),
            Self::Any => true,
        }
    }

    /// Kind inferred from the value alone, used when no `type` is declared.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `type` declaration.
///
/// Unrecognised tokens are dropped, since they can never match; a
/// declaration made only of unrecognised tokens therefore rejects every
/// value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    candidates: Vec<ValueKind>,
}

impl TypeDecl {
    /// Parse a `type` operand (a token or a list of tokens).
    pub fn from_value(value: &Value) -> Self {
        let candidates = match value {
            Value::String(token) => ValueKind::from_token(token).into_iter().collect(),
            Value::Array(tokens) => tokens
                .iter()
                .filter_map(Value::as_str)
                .filter_map(ValueKind::from_token)
                .collect(),
            _ => Vec::new(),
        };
        Self { candidates }
    }

    /// Candidates in declaration order.
    pub fn candidates(&self) -> &[ValueKind] {
        &self.candidates
    }

    /// Whether `kind` is one of the candidates.
    pub fn contains(&self, kind: ValueKind) -> bool {
        self.candidates.contains(&kind)
    }

    /// First candidate `value` satisfies, or `None` when none does.
    pub fn classify(&self, value: &Value) -> Option<ValueKind> {
        self.candidates
            .iter()
            .copied()
            .find(|kind| kind.matches(value))
    }
}

/// Classify `value` against an optional declaration.
///
/// With no declaration the runtime kind is returned. With a declaration the
/// first matching candidate is returned, or `None` when none matches, which
/// is a `type` failure.
pub fn classify(value: &Value, declared: Option<&TypeDecl>) -> Option<ValueKind> {
    match declared {
        None => Some(ValueKind::of(value)),
        Some(decl) => decl.classify(value),
    }
}

/// Runtime type name reported as `actual` on `type` failures.
pub fn type_name(value: &Value) -> &'static str {
    ValueKind::of(value).as_str()
}

fn is_integral(value: &Value) -> bool {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => true,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0),
        _ => false,
    }
}
