//! Error types for schema validation.
//!
//! Two kinds of failure exist and they never mix. A [`ValidationError`] is a
//! record describing one constraint the data did not satisfy; validation
//! collects them and hands them back inside a report. A [`SchemaError`] means
//! the engine could not run at all because the schema or the options were
//! malformed, and is returned through `Result`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single failed constraint.
///
/// `attribute` is the schema keyword that failed (`minLength`, `type`, or a
/// caller-defined keyword), `property` is the local name of the key being
/// validated, `expected` is the schema's operand for that keyword and
/// `actual` is the offending value. For `type` failures `actual` holds the
/// runtime type name of the value instead of the value itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Schema keyword that failed
    pub attribute: String,
    /// Name of the failing property
    pub property: String,
    /// Operand declared in the schema for `attribute`
    pub expected: Value,
    /// Value that failed the check
    pub actual: Value,
    /// Resolved, human-readable message
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.property, self.message)
    }
}

/// Engine-level failures caused by malformed schemas or options.
///
/// These surface before or during a walk and abort it; they are never
/// reported as validation errors.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A `pattern` value or `patternProperties` key is not a valid regular expression
    #[error("Invalid regular expression '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A constraint keyword carries an operand of the wrong shape
    #[error("Invalid operand for keyword '{keyword}': {reason}")]
    InvalidKeyword { keyword: String, reason: String },

    /// `conform` names a predicate that is not registered
    #[error("No conform predicate registered under '{name}'")]
    UnknownConformer { name: String },

    /// A schema or options value that must be a mapping is not one
    #[error("{what} must be a JSON object")]
    NotAnObject { what: String },

    /// Options JSON could not be decoded
    #[error("Invalid options: {0}")]
    Options(#[from] serde_json::Error),
}

impl SchemaError {
    /// Create an invalid keyword error
    pub fn invalid_keyword(keyword: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKeyword {
            keyword: keyword.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create a not-an-object error
    pub fn not_an_object(what: impl Into<String>) -> Self {
        Self::NotAnObject { what: what.into() }
    }
}

pub type SchemaResult<T> = Result<T, SchemaError>;
