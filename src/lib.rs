//! Schema-driven validation of JSON objects.
//!
//! Validates a `serde_json` object against a JSON-schema-like description
//! and returns every constraint violation found, each with a human-readable
//! and optionally localised message. The engine never fails on bad *data*;
//! failures are reported as [`ValidationError`] records inside a
//! [`ValidationReport`]. Only malformed *schemas* surface as [`SchemaError`].
//!
//! # Core Components
//!
//! - [`Validator`] - Configured engine (registry + options)
//! - [`Registry`] - Message templates, format matchers, keywords and custom predicates
//! - [`ValidationOptions`] - Per-run switches and the optional [`Translator`]
//!
//! # Quick Start
//!
//! ```rust
//! use revalidate::{ValidationOptions, validate};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = json!({
//!     "properties": {
//!         "name": {"type": "string", "required": true, "minLength": 3},
//!         "age": {"type": "integer", "minimum": 0}
//!     },
//!     "additionalProperties": false
//! });
//!
//! let report = validate(&json!({"name": "ab", "age": 4}), &schema, &ValidationOptions::default())?;
//! assert!(!report.valid);
//! assert_eq!(report.errors[0].to_string(), "name is too short (minimum is 3 characters)");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod i18n;
pub mod options;
pub mod schema;

pub use error::{SchemaError, SchemaResult, ValidationError};
pub use i18n::{InMemoryTranslator, Translator};
pub use options::ValidationOptions;
pub use schema::{FormatMatcher, Registry, Schema, ValidationReport, Validator};

use serde_json::Value;

/// Validate `object` against `schema` using the built-in registry.
///
/// A `null` or empty schema always yields a valid report.
pub fn validate(
    object: &Value,
    schema: &Value,
    options: &ValidationOptions,
) -> SchemaResult<ValidationReport> {
    Validator::new(options.clone()).validate(object, schema)
}
