//! Turning a failed constraint into an error record with a readable message.
//!
//! Message sources are tried from most to least specific:
//!
//! 1. with a translator configured, the exact keys
//!    `validation_translation:<i18nKey>.<property>.<attribute>` (when the
//!    schema has an `i18nKey`) and then
//!    `validation_translation:globals.<property>.<attribute>`;
//! 2. the schema's own `messages[<attribute>]`, then its `message`;
//! 3. the translator's `validation_translation:generic.<attribute>`;
//! 4. the registry's default template for the attribute;
//! 5. a literal fallback.
//!
//! Messages from steps 2-5 have `%{token}` placeholders filled from the
//! `{expected, attribute, property}` payload. Translated messages from
//! step 1 are used verbatim; the translator receives the payload as context.

use super::Schema;
use super::registry::{FALLBACK_MESSAGE, Registry};
use crate::error::ValidationError;
use crate::i18n::{NAMESPACE, Translator, display_value};
use regex::{Captures, Regex};
use serde_json::{Map, Value, json};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)%\{([a-z]+)\}").expect("placeholder pattern is valid"));

/// Builds error records for one object walk.
#[derive(Clone, Copy)]
pub struct ErrorResolver<'a> {
    registry: &'a Registry,
    translator: Option<&'a dyn Translator>,
    root_key: Option<&'a str>,
}

impl<'a> ErrorResolver<'a> {
    /// Create a resolver; `root_key` is the owning schema's `i18nKey`.
    pub fn new(
        registry: &'a Registry,
        translator: Option<&'a dyn Translator>,
        root_key: Option<&'a str>,
    ) -> Self {
        Self {
            registry,
            translator,
            root_key,
        }
    }

    /// The translation root key in effect.
    pub fn root_key(&self) -> Option<&'a str> {
        self.root_key
    }

    /// The same resolver with no translation root key.
    pub fn without_root_key(self) -> Self {
        Self {
            root_key: None,
            ..self
        }
    }

    /// Build the record for `attribute` failing on `property`.
    pub fn resolve(
        &self,
        attribute: &str,
        property: &str,
        actual: Value,
        schema: Schema<'_>,
    ) -> ValidationError {
        let expected = schema.get(attribute).cloned().unwrap_or(Value::Null);
        let payload = json!({
            "expected": expected,
            "attribute": attribute,
            "property": property,
        });

        let (translated, generic) = match self.translator {
            Some(translator) => {
                let context = translation_context(schema.i18n_context_for(attribute), &payload);
                self.translate(translator, attribute, property, &context)
            }
            None => (None, None),
        };

        let message = translated.unwrap_or_else(|| {
            let template = schema
                .message_for(attribute)
                .or_else(|| schema.message())
                .or(generic.as_deref())
                .or_else(|| self.registry.message(attribute))
                .unwrap_or(FALLBACK_MESSAGE);
            interpolate(template, &payload)
        });

        ValidationError {
            attribute: attribute.to_string(),
            property: property.to_string(),
            expected,
            actual,
            message,
        }
    }

    /// Exact translation and generic translation, in that order.
    fn translate(
        &self,
        translator: &dyn Translator,
        attribute: &str,
        property: &str,
        context: &Value,
    ) -> (Option<String>, Option<String>) {
        let lookup = |path: String| {
            let key = format!("{}:{}", NAMESPACE, path);
            log::trace!("Looking up translation '{}'", key);
            translator
                .exists(&key)
                .then(|| translator.translate(&key, context))
        };

        let exact = self
            .root_key
            .and_then(|root| lookup(format!("{}.{}.{}", root, property, attribute)))
            .or_else(|| lookup(format!("globals.{}.{}", property, attribute)));
        if exact.is_some() {
            return (exact, None);
        }
        (None, lookup(format!("generic.{}", attribute)))
    }
}

/// Merge the schema's per-attribute context with the interpolation payload,
/// mirroring the payload under `sprintf`.
fn translation_context(schema_context: Option<&Value>, payload: &Value) -> Value {
    let mut context = Map::new();
    if let Some(Value::Object(extra)) = schema_context {
        context.extend(extra.clone());
    }

    let mut sprintf = match context.get("sprintf") {
        Some(Value::Object(existing)) => existing.clone(),
        _ => Map::new(),
    };
    if let Value::Object(payload) = payload {
        sprintf.extend(payload.clone());
        context.extend(payload.clone());
    }
    context.insert("sprintf".to_string(), Value::Object(sprintf));
    Value::Object(context)
}

/// Replace `%{token}` placeholders with payload values.
///
/// Tokens match case-insensitively; unknown tokens become empty.
pub fn interpolate(template: &str, payload: &Value) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let token = caps[1].to_ascii_lowercase();
            payload.get(&token).map(display_value).unwrap_or_default()
        })
        .into_owned()
}
