//! Translation collaborator used to localise validation messages.
//!
//! The engine only needs two operations from a translation backend: asking
//! whether a key exists and translating a key with an interpolation context.
//! [`Translator`] captures exactly that, so any i18n stack can be plugged in.
//! [`InMemoryTranslator`] is a dictionary-backed implementation for callers
//! that keep their catalogue in memory (and for tests).

use serde_json::Value;
use std::collections::HashMap;

/// Namespace prefixed to every key the engine looks up.
pub const NAMESPACE: &str = "validation_translation";

/// Opaque key → string lookup service.
///
/// Implementations must be cheap and side-effect free; they are called
/// synchronously from inside a validation walk.
pub trait Translator: Send + Sync {
    /// Whether a translation exists for `key`.
    fn exists(&self, key: &str) -> bool;

    /// Translate `key`, interpolating from `context`.
    ///
    /// The context is a JSON object carrying at least `expected`,
    /// `attribute` and `property`, mirrored under a `sprintf` sub-object,
    /// plus any per-keyword `i18nContext` entries from the schema.
    fn translate(&self, key: &str, context: &Value) -> String;
}

/// Dictionary-backed [`Translator`].
///
/// Keys are full lookup keys (`validation_translation:generic.required`).
/// Values may contain `{{token}}` placeholders, resolved against the
/// top-level context first and the `sprintf` sub-object second.
///
/// ```rust
/// use revalidate::i18n::{InMemoryTranslator, Translator};
/// use serde_json::json;
///
/// let translator = InMemoryTranslator::new()
///     .with_entry("validation_translation:generic.required", "{{property}} fehlt");
///
/// assert!(translator.exists("validation_translation:generic.required"));
/// let message = translator.translate(
///     "validation_translation:generic.required",
///     &json!({"property": "name"}),
/// );
/// assert_eq!(message, "name fehlt");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTranslator {
    entries: HashMap<String, String>,
}

impl InMemoryTranslator {
    /// Create an empty translator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a translation.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add or replace a translation in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Number of translations held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup_token<'a>(context: &'a Value, token: &str) -> Option<&'a Value> {
        context
            .get(token)
            .or_else(|| context.get("sprintf").and_then(|s| s.get(token)))
    }

    fn render(template: &str, context: &Value) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    let token = after[..end].trim();
                    if let Some(value) = Self::lookup_token(context, token) {
                        out.push_str(&display_value(value));
                    }
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

impl Translator for InMemoryTranslator {
    fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn translate(&self, key: &str, context: &Value) -> String {
        match self.entries.get(key) {
            Some(template) => Self::render(template, context),
            None => key.to_string(),
        }
    }
}

/// Render a JSON value the way it reads inside a message.
///
/// Strings are unquoted, integral floats drop their fraction, arrays are
/// comma-joined and `null` renders as nothing.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}
