//! The validation engine: object walker and per-property validator.
//!
//! A run walks the schema's `properties`, then `patternProperties`, then
//! `additionalProperties` against the object's own keys. Each property goes
//! through a fixed sequence of checks, and nested objects and array items
//! recurse back into the walker. Every failure is appended to one shared,
//! ordered error list; nothing short-circuits the walk except the rules that
//! end checking for a single property (absence, a `format` failure, a `type`
//! failure).

use super::Schema;
use super::coerce::coerce;
use super::constraints::{self, number_operand};
use super::formats::{has_unsafe_url_chars, is_url_format};
use super::messages::ErrorResolver;
use super::registry::Registry;
use super::types::{ValueKind, classify, type_name};
use crate::error::{SchemaError, SchemaResult, ValidationError};
use crate::i18n::Translator;
use crate::options::ValidationOptions;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Outcome of a validation run.
///
/// `valid` is true exactly when `errors` is empty. Errors are in discovery
/// order: declared properties first, then pattern-matched properties, then
/// additional properties, and within a property in checking order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Build a report from collected errors.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// A report with no errors.
    pub fn valid() -> Self {
        Self::from_errors(Vec::new())
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Errors recorded against `property`.
    pub fn errors_for<'a>(&'a self, property: &'a str) -> impl Iterator<Item = &'a ValidationError> + 'a {
        self.errors.iter().filter(move |error| error.property == property)
    }

    /// `Ok(())` when valid, the errors otherwise.
    pub fn into_result(self) -> Result<(), Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// A configured validation engine.
///
/// Holds the registry and options for any number of runs. The registry is
/// shared, so cloning a validator is cheap.
///
/// ```rust
/// use revalidate::schema::{Registry, Validator};
/// use revalidate::ValidationOptions;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let registry = Registry::default()
///     .with_constraint("isEven", |value, _| value.as_i64().is_some_and(|n| n % 2 == 0));
/// let validator = Validator::with_registry(Arc::new(registry), ValidationOptions::default());
///
/// let schema = json!({"properties": {"count": {"type": "integer", "isEven": true}}});
/// let report = validator.validate(&json!({"count": 3}), &schema)?;
/// assert_eq!(report.errors[0].attribute, "isEven");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    registry: Arc<Registry>,
    options: ValidationOptions,
}

impl Validator {
    /// Create a validator over the built-in registry.
    pub fn new(options: ValidationOptions) -> Self {
        Self::with_registry(Registry::builtin(), options)
    }

    /// Create a validator over a caller-configured registry.
    pub fn with_registry(registry: Arc<Registry>, options: ValidationOptions) -> Self {
        Self { registry, options }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Validate `object` against `schema`.
    ///
    /// A `null` schema always validates. Data failures are reported in the
    /// returned report; `Err` is reserved for malformed schemas.
    pub fn validate(&self, object: &Value, schema: &Value) -> SchemaResult<ValidationReport> {
        let schema = match schema {
            Value::Null => return Ok(ValidationReport::valid()),
            Value::Object(map) => Schema::from_map(map),
            _ => return Err(SchemaError::not_an_object("schema")),
        };

        log::debug!("Starting validation against schema with {} keywords", schema.keywords().count());
        let mut walk = Walk::new(&self.registry, &self.options);
        walk.validate_object(object, schema)?;
        log::debug!("Validation finished with {} error(s)", walk.errors.len());

        Ok(ValidationReport::from_errors(walk.errors))
    }
}

/// State of one run: the shared error accumulator and compiled patterns.
struct Walk<'v> {
    registry: &'v Registry,
    options: &'v ValidationOptions,
    translator: Option<&'v dyn Translator>,
    errors: Vec<ValidationError>,
    patterns: HashMap<String, Regex>,
}

impl<'v> Walk<'v> {
    fn new(registry: &'v Registry, options: &'v ValidationOptions) -> Self {
        Self {
            registry,
            options,
            translator: options.translator(),
            errors: Vec::new(),
            patterns: HashMap::new(),
        }
    }

    fn regex(&mut self, pattern: &str) -> SchemaResult<Regex> {
        if let Some(regex) = self.patterns.get(pattern) {
            return Ok(regex.clone());
        }
        let regex =
            Regex::new(pattern).map_err(|source| SchemaError::invalid_pattern(pattern, source))?;
        self.patterns.insert(pattern.to_string(), regex.clone());
        Ok(regex)
    }

    fn fail(
        &mut self,
        resolver: ErrorResolver<'_>,
        attribute: &str,
        property: &str,
        actual: Value,
        schema: Schema<'_>,
    ) {
        self.errors
            .push(resolver.resolve(attribute, property, actual, schema));
    }

    fn coerced<'a>(&self, value: &'a Value, schema: Schema<'_>) -> Cow<'a, Value> {
        if self.options.cast {
            coerce(value, schema)
        } else {
            Cow::Borrowed(value)
        }
    }

    /// Walk `schema`'s member declarations against `object`'s own keys.
    fn validate_object(&mut self, object: &Value, schema: Schema<'_>) -> SchemaResult<()> {
        let members = object.as_object();
        let own_keys: Vec<&String> = members.map(|m| m.keys().collect()).unwrap_or_default();
        let member = |key: &str| members.and_then(|m| m.get(key));

        let resolver = ErrorResolver::new(self.registry, self.translator, schema.i18n_key());
        let mut visited: HashSet<&str> = HashSet::new();

        if let Some(properties) = schema.properties() {
            for (name, property_schema) in properties {
                visited.insert(name);
                self.validate_property(
                    object,
                    member(name),
                    name,
                    Schema::new(property_schema),
                    resolver,
                )?;
            }
        }

        if let Some(patterns) = schema.pattern_properties() {
            for (pattern, property_schema) in patterns {
                let regex = self.regex(pattern)?;
                for key in own_keys.iter().filter(|key| regex.is_match(key)) {
                    visited.insert(key.as_str());
                    self.validate_property(
                        object,
                        member(key),
                        key,
                        Schema::new(property_schema),
                        resolver,
                    )?;
                }
            }
        }

        let unvisited = own_keys
            .iter()
            .filter(|key| !visited.contains(key.as_str()));
        match schema.get("additionalProperties") {
            Some(Value::Bool(false)) => {
                for key in unvisited {
                    let actual = member(key).cloned().unwrap_or(Value::Null);
                    self.fail(resolver, "additionalProperties", key, actual, schema);
                }
            }
            Some(extra @ Value::Object(_)) => {
                for key in unvisited {
                    self.validate_property(object, member(key), key, Schema::new(extra), resolver)?;
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Run the per-property checks on `value`, the `property` member of `owner`.
    fn validate_property(
        &mut self,
        owner: &Value,
        value: Option<&Value>,
        property: &str,
        schema: Schema<'_>,
        resolver: ErrorResolver<'_>,
    ) -> SchemaResult<()> {
        log::trace!("Validating property '{}'", property);

        let Some(raw) = value else {
            // only the literal `"any"` type opts out, not a list containing it
            let opted_out = schema.get_str("type") == Some("any");
            if schema.is_required() && !opted_out {
                self.fail(resolver, "required", property, Value::Null, schema);
            }
            return Ok(());
        };

        let value = self.coerced(raw, schema);
        let value = value.as_ref();

        if let Some(other) = schema.get_str("equal") {
            let matches = owner
                .get(other)
                .map(|other_value| self.coerced(other_value, schema))
                .is_some_and(|other_value| constraints::strict_equals(&other_value, value));
            if !matches {
                self.fail(resolver, "equal", property, value.clone(), schema);
            }
        }

        if !self.check_format(value, property, schema, resolver)? {
            return Ok(());
        }

        if let Some(Value::Array(options)) = schema.get("enum") {
            if !constraints::is_member(options, value) {
                self.fail(resolver, "enum", property, value.clone(), schema);
            }
        }

        match schema.get("dependencies") {
            Some(Value::String(dependency)) => {
                if owner.get(dependency).is_none() {
                    self.fail(resolver, "dependencies", property, Value::Null, schema);
                }
            }
            Some(Value::Array(dependencies)) => {
                for dependency in dependencies.iter().filter_map(Value::as_str) {
                    if owner.get(dependency).is_none() {
                        self.fail(resolver, "dependencies", property, Value::Null, schema);
                    }
                }
            }
            Some(nested @ Value::Object(_)) => {
                self.validate_object(owner, Schema::new(nested))?;
            }
            _ => {}
        }

        self.check_custom_constraints(value, property, schema, resolver);

        let declared = schema.type_decl();
        let Some(kind) = classify(value, declared.as_ref()) else {
            let actual = Value::String(type_name(value).to_string());
            self.fail(resolver, "type", property, actual, schema);
            return Ok(());
        };

        if let Some(conform) = schema.get("conform") {
            let name = conform
                .as_str()
                .ok_or_else(|| SchemaError::invalid_keyword("conform", "expected a predicate name"))?;
            let registry = self.registry;
            let predicate = registry
                .conformer(name)
                .ok_or_else(|| SchemaError::UnknownConformer {
                    name: name.to_string(),
                })?;
            if !predicate(value, conform) {
                self.fail(resolver, "conform", property, value.clone(), schema);
            }
        }

        match kind {
            ValueKind::String => self.check_string(value, property, schema, resolver),
            ValueKind::Number | ValueKind::Integer => {
                self.check_number(value, property, schema, resolver)
            }
            ValueKind::Array => self.check_array(owner, value, property, schema, resolver),
            ValueKind::Object if schema.describes_members() => self.validate_object(value, schema),
            _ => Ok(()),
        }
    }

    /// Returns `Ok(false)` when a format failure ends checking for this property.
    fn check_format(
        &mut self,
        value: &Value,
        property: &str,
        schema: Schema<'_>,
        resolver: ErrorResolver<'_>,
    ) -> SchemaResult<bool> {
        if !self.options.validate_formats {
            return Ok(true);
        }
        let Some(format) = schema.get("format") else {
            return Ok(true);
        };
        let name = format
            .as_str()
            .ok_or_else(|| SchemaError::invalid_keyword("format", "expected a format name"))?;

        let registry = self.registry;
        match registry.format(name, self.options.validate_format_extensions) {
            None => {
                log::debug!("No matcher registered for format '{}'", name);
                if self.options.validate_formats_strict {
                    self.fail(resolver, "format", property, value.clone(), schema);
                    return Ok(false);
                }
            }
            Some(_) if value.is_null() => {}
            Some(matcher) => {
                let conforms = matcher.test(value)
                    && !(is_url_format(name) && has_unsafe_url_chars(value));
                if !conforms {
                    self.fail(resolver, "format", property, value.clone(), schema);
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Schema keys that are not reserved keywords and have a registered predicate.
    fn check_custom_constraints(
        &mut self,
        value: &Value,
        property: &str,
        schema: Schema<'_>,
        resolver: ErrorResolver<'_>,
    ) {
        let registry = self.registry;
        for (keyword, expected) in schema.keywords() {
            if registry.is_keyword(keyword) {
                continue;
            }
            match registry.constraint(keyword) {
                Some(predicate) => {
                    log::debug!("Applying custom constraint '{}' to '{}'", keyword, property);
                    if !predicate(value, expected) {
                        self.fail(resolver, keyword, property, value.clone(), schema);
                    }
                }
                None => log::trace!("Ignoring non-keyword schema entry '{}'", keyword),
            }
        }
    }

    fn check_string(
        &mut self,
        value: &Value,
        property: &str,
        schema: Schema<'_>,
        resolver: ErrorResolver<'_>,
    ) -> SchemaResult<()> {
        let Some(text) = value.as_str() else {
            return Ok(());
        };
        let length = constraints::char_length(text);

        if let Some(expected) = schema.get("minLength") {
            if !constraints::min_length(length, number_operand("minLength", expected)?) {
                self.fail(resolver, "minLength", property, value.clone(), schema);
            }
        }
        if let Some(expected) = schema.get("maxLength") {
            if !constraints::max_length(length, number_operand("maxLength", expected)?) {
                self.fail(resolver, "maxLength", property, value.clone(), schema);
            }
        }
        if let Some(pattern) = schema.get("pattern") {
            let pattern = pattern
                .as_str()
                .ok_or_else(|| SchemaError::invalid_keyword("pattern", "expected a regular expression string"))?;
            if !self.regex(pattern)?.is_match(text) {
                self.fail(resolver, "pattern", property, value.clone(), schema);
            }
        }
        Ok(())
    }

    fn check_number(
        &mut self,
        value: &Value,
        property: &str,
        schema: Schema<'_>,
        resolver: ErrorResolver<'_>,
    ) -> SchemaResult<()> {
        let Some(number) = value.as_f64() else {
            return Ok(());
        };
        let checks: [(&str, fn(f64, f64) -> bool); 5] = [
            ("minimum", constraints::minimum),
            ("maximum", constraints::maximum),
            ("exclusiveMinimum", constraints::exclusive_minimum),
            ("exclusiveMaximum", constraints::exclusive_maximum),
            ("divisibleBy", constraints::divisible_by),
        ];
        for (keyword, check) in checks {
            if let Some(expected) = schema.get(keyword) {
                if !check(number, number_operand(keyword, expected)?) {
                    self.fail(resolver, keyword, property, value.clone(), schema);
                }
            }
        }
        Ok(())
    }

    fn check_array(
        &mut self,
        owner: &Value,
        value: &Value,
        property: &str,
        schema: Schema<'_>,
        resolver: ErrorResolver<'_>,
    ) -> SchemaResult<()> {
        let Some(items) = value.as_array() else {
            return Ok(());
        };

        if let Some(item_schema) = schema.get("items") {
            // item errors are looked up under globals and generic keys only
            let item_resolver = resolver.without_root_key();
            for item in items {
                self.validate_property(owner, Some(item), property, Schema::new(item_schema), item_resolver)?;
            }
        }
        if let Some(expected) = schema.get("minItems") {
            if !constraints::min_length(items.len(), number_operand("minItems", expected)?) {
                self.fail(resolver, "minItems", property, value.clone(), schema);
            }
        }
        if let Some(expected) = schema.get("maxItems") {
            if !constraints::max_length(items.len(), number_operand("maxItems", expected)?) {
                self.fail(resolver, "maxItems", property, value.clone(), schema);
            }
        }
        if schema.get("uniqueItems").and_then(Value::as_bool) == Some(true)
            && !constraints::unique_items(items)
        {
            self.fail(resolver, "uniqueItems", property, value.clone(), schema);
        }
        Ok(())
    }
}
