//! Options controlling a validation run.
//!
//! Options can be built in code with the fluent `with_*` setters or decoded
//! from a JSON object using the camelCase names (`validateFormats`,
//! `validateFormatsStrict`, `validateFormatExtensions`, `cast`). Decoding
//! merges the caller's object shallowly over the defaults.

use crate::error::{SchemaError, SchemaResult};
use crate::i18n::Translator;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Configuration for a validation run.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationOptions {
    /// Enforce `format` constraints.
    pub validate_formats: bool,
    /// Treat unknown format names as failures instead of passing them.
    pub validate_formats_strict: bool,
    /// Consult the extended format table before the core one.
    pub validate_format_extensions: bool,
    /// Coerce values to the schema's declared type before checking.
    pub cast: bool,
    /// Translation service used to localise messages.
    #[serde(skip)]
    pub i18n: Option<Arc<dyn Translator>>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            validate_formats: true,
            validate_formats_strict: false,
            validate_format_extensions: true,
            cast: false,
            i18n: None,
        }
    }
}

impl fmt::Debug for ValidationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationOptions")
            .field("validate_formats", &self.validate_formats)
            .field("validate_formats_strict", &self.validate_formats_strict)
            .field("validate_format_extensions", &self.validate_format_extensions)
            .field("cast", &self.cast)
            .field("i18n", &self.i18n.is_some())
            .finish()
    }
}

impl ValidationOptions {
    /// Create options with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode options from JSON, merged shallowly over the defaults.
    ///
    /// `null` yields the defaults. Any other non-object value is rejected.
    ///
    /// ```rust
    /// use revalidate::ValidationOptions;
    /// use serde_json::json;
    ///
    /// let options = ValidationOptions::from_json(&json!({"cast": true})).unwrap();
    /// assert!(options.cast);
    /// assert!(options.validate_formats);
    /// ```
    pub fn from_json(value: &Value) -> SchemaResult<Self> {
        let mut merged = match serde_json::to_value(Self::default())? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        merge_shallow(&mut merged, [value])
            .map_err(|_| SchemaError::not_an_object("options"))?;
        Ok(serde_json::from_value(Value::Object(merged))?)
    }

    /// Enable or disable value coercion.
    pub fn with_cast(mut self, cast: bool) -> Self {
        self.cast = cast;
        self
    }

    /// Enable or disable `format` checking.
    pub fn with_formats(mut self, enabled: bool) -> Self {
        self.validate_formats = enabled;
        self
    }

    /// Enable or disable failing on unknown formats.
    pub fn with_strict_formats(mut self, strict: bool) -> Self {
        self.validate_formats_strict = strict;
        self
    }

    /// Enable or disable the extended format table.
    pub fn with_format_extensions(mut self, enabled: bool) -> Self {
        self.validate_format_extensions = enabled;
        self
    }

    /// Attach a translation service.
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.i18n = Some(translator);
        self
    }

    /// The configured translator, if any.
    pub fn translator(&self) -> Option<&dyn Translator> {
        self.i18n.as_deref()
    }
}

/// Copy the top-level keys of each source into `target`.
///
/// Later sources overwrite earlier ones; nested objects are replaced, not
/// merged. `null` sources are skipped and any other non-object source is an
/// error.
pub fn merge_shallow<'a, I>(target: &mut Map<String, Value>, sources: I) -> SchemaResult<()>
where
    I: IntoIterator<Item = &'a Value>,
{
    for source in sources {
        match source {
            Value::Null => continue,
            Value::Object(map) => {
                for (key, value) in map {
                    target.insert(key.clone(), value.clone());
                }
            }
            _ => return Err(SchemaError::not_an_object("merge source")),
        }
    }
    Ok(())
}
