//! Schema access and the validation engine.
//!
//! Schemas are plain `serde_json` objects. [`Schema`] is a borrowed, copyable
//! view over one of them with typed accessors for the keywords the engine
//! understands; every nested schema (`properties` entries, `items`,
//! `additionalProperties`, object-form `dependencies`) is handed out as
//! another view.
//!
//! # Key Types
//!
//! - [`Schema`] - Borrowed view over a schema object
//! - [`Registry`] - Message templates, format matchers, keywords and predicates
//! - [`Validator`] - The configured engine
//! - [`ValidationReport`] - `{valid, errors}` result of a run
//!
//! # Examples
//!
//! ```rust
//! use revalidate::schema::Validator;
//! use revalidate::ValidationOptions;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = Validator::new(ValidationOptions::default());
//! let report = validator.validate(
//!     &json!({"name": "ab"}),
//!     &json!({"properties": {"name": {"type": "string", "minLength": 3}}}),
//! )?;
//! assert!(!report.is_valid());
//! # Ok(())
//! # }
//! ```

pub mod coerce;
pub mod constraints;
pub mod formats;
pub mod messages;
pub mod registry;
pub mod types;
pub mod validation;


pub use formats::FormatMatcher;
pub use registry::{Predicate, Registry};
pub use types::{TypeDecl, ValueKind};
pub use validation::{ValidationReport, Validator};

use serde_json::{Map, Value};

/// Borrowed view over a schema object.
///
/// A view over something that is not an object behaves like the empty
/// schema: every keyword lookup misses.
#[derive(Debug, Clone, Copy)]
pub struct Schema<'a> {
    keywords: Option<&'a Map<String, Value>>,
}

impl<'a> Schema<'a> {
    /// View `value` as a schema.
    pub fn new(value: &'a Value) -> Self {
        Self {
            keywords: value.as_object(),
        }
    }

    /// View an already-extracted keyword map as a schema.
    pub fn from_map(map: &'a Map<String, Value>) -> Self {
        Self {
            keywords: Some(map),
        }
    }

    /// The empty schema.
    pub fn empty() -> Self {
        Self { keywords: None }
    }

    /// Whether the schema declares no keywords.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_none_or(|map| map.is_empty())
    }

    /// Raw operand for `keyword`.
    pub fn get(&self, keyword: &str) -> Option<&'a Value> {
        self.keywords.and_then(|map| map.get(keyword))
    }

    /// Whether `keyword` is declared at all.
    pub fn has(&self, keyword: &str) -> bool {
        self.get(keyword).is_some()
    }

    /// Iterate over all declared keywords in declaration order.
    pub fn keywords(self) -> impl Iterator<Item = (&'a String, &'a Value)> + 'a {
        self.keywords.into_iter().flat_map(|map| map.iter())
    }

    /// String operand for `keyword`.
    pub fn get_str(&self, keyword: &str) -> Option<&'a str> {
        self.get(keyword).and_then(Value::as_str)
    }

    /// Object operand for `keyword`.
    pub fn get_object(&self, keyword: &str) -> Option<&'a Map<String, Value>> {
        self.get(keyword).and_then(Value::as_object)
    }

    /// Whether `required: true` is declared.
    pub fn is_required(&self) -> bool {
        self.get("required").and_then(Value::as_bool).unwrap_or(false)
    }

    /// The declared `type`, if any.
    pub fn type_decl(&self) -> Option<TypeDecl> {
        self.get("type").map(TypeDecl::from_value)
    }

    /// Whether the declared `type` mentions `kind`.
    pub fn declares_type(&self, kind: ValueKind) -> bool {
        self.type_decl().is_some_and(|decl| decl.contains(kind))
    }

    /// Entries of `properties`, in declaration order.
    pub fn properties(&self) -> Option<&'a Map<String, Value>> {
        self.get_object("properties")
    }

    /// Entries of `patternProperties`, in declaration order.
    pub fn pattern_properties(&self) -> Option<&'a Map<String, Value>> {
        self.get_object("patternProperties")
    }

    /// Root key for translation lookups.
    pub fn i18n_key(&self) -> Option<&'a str> {
        self.get_str("i18nKey")
    }

    /// Per-keyword override message from `messages`.
    pub fn message_for(&self, attribute: &str) -> Option<&'a str> {
        self.get_object("messages")
            .and_then(|messages| messages.get(attribute))
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
    }

    /// Schema-wide override message.
    pub fn message(&self) -> Option<&'a str> {
        self.get_str("message").filter(|message| !message.is_empty())
    }

    /// Translation context declared for `attribute` under `i18nContext`.
    pub fn i18n_context_for(&self, attribute: &str) -> Option<&'a Value> {
        self.get_object("i18nContext")
            .and_then(|context| context.get(attribute))
            .filter(|context| !context.is_null())
    }

    /// Whether the schema describes object members and so warrants a nested walk.
    pub fn describes_members(&self) -> bool {
        self.has("properties") || self.has("patternProperties") || self.has("additionalProperties")
    }
}

impl<'a> From<&'a Value> for Schema<'a> {
    fn from(value: &'a Value) -> Self {
        Self::new(value)
    }
}
