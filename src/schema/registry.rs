//! Engine configuration shared across validation runs.
//!
//! A [`Registry`] holds everything that is configured once and read by every
//! run: default message templates, the core and extended format tables, the
//! reserved keyword list and the caller-defined predicates. The built-in
//! instance is immutable and shared; customised registries are built with
//! the `with_*` methods and passed to a
//! [`Validator`](super::Validator).

use super::formats::{self, FormatMatcher};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Predicate over `(value, expected)` used by custom keywords and `conform`.
pub type Predicate = Arc<dyn Fn(&Value, &Value) -> bool + Send + Sync>;

/// Message used when neither the schema nor the registry has one.
pub const FALLBACK_MESSAGE: &str = "no default message";

const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    ("required", "is required"),
    ("minLength", "is too short (minimum is %{expected} characters)"),
    ("maxLength", "is too long (maximum is %{expected} characters)"),
    ("pattern", "invalid input"),
    ("minimum", "must be greater than or equal to %{expected}"),
    ("maximum", "must be less than or equal to %{expected}"),
    ("exclusiveMinimum", "must be greater than %{expected}"),
    ("exclusiveMaximum", "must be less than %{expected}"),
    ("divisibleBy", "must be divisible by %{expected}"),
    ("minItems", "must contain more than %{expected} items"),
    ("maxItems", "must contain less than %{expected} items"),
    ("uniqueItems", "must hold a unique set of values"),
    ("format", "is not a valid %{expected}"),
    ("conform", "must conform to given constraint"),
    ("type", "must be of %{expected} type"),
    ("equal", "must be the same as %{expected}"),
    ("enum", "must be present in given enumerator"),
    ("dependencies", "depends on %{expected}"),
    ("additionalProperties", "is not allowed"),
];

// Keywords with structural or documentary meaning, on top of every keyword
// that has a default message.
const STRUCTURAL_KEYWORDS: &[&str] = &[
    "description",
    "items",
    "message",
    "messages",
    "admin_only",
    "dependencies",
    "i18nContext",
    "i18nKey",
    "properties",
    "patternProperties",
    "additionalProperties",
    "required",
];

/// Messages, formats, keywords and predicates used by the engine.
#[derive(Clone)]
pub struct Registry {
    messages: HashMap<String, String>,
    formats: HashMap<String, FormatMatcher>,
    format_extensions: HashMap<String, FormatMatcher>,
    keywords: HashSet<String>,
    constraints: HashMap<String, Predicate>,
    conformers: HashMap<String, Predicate>,
}

impl Registry {
    /// The shared, immutable built-in registry.
    pub fn builtin() -> Arc<Registry> {
        static BUILTIN: OnceLock<Arc<Registry>> = OnceLock::new();
        BUILTIN.get_or_init(|| Arc::new(Registry::default())).clone()
    }

    /// A registry with no messages, formats, keywords or predicates.
    pub fn empty() -> Self {
        Self {
            messages: HashMap::new(),
            formats: HashMap::new(),
            format_extensions: HashMap::new(),
            keywords: HashSet::new(),
            constraints: HashMap::new(),
            conformers: HashMap::new(),
        }
    }

    /// Set the default message template for `keyword`.
    pub fn with_message(mut self, keyword: impl Into<String>, template: impl Into<String>) -> Self {
        self.messages.insert(keyword.into(), template.into());
        self
    }

    /// Add or replace a core format.
    pub fn with_format(mut self, name: impl Into<String>, matcher: FormatMatcher) -> Self {
        self.formats.insert(name.into(), matcher);
        self
    }

    /// Add or replace an extended format.
    pub fn with_format_extension(mut self, name: impl Into<String>, matcher: FormatMatcher) -> Self {
        self.format_extensions.insert(name.into(), matcher);
        self
    }

    /// Reserve `keyword` so it is never treated as a custom constraint.
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        self.constraints.remove(&keyword);
        self.keywords.insert(keyword);
        self
    }

    /// Register a custom keyword predicate.
    ///
    /// For every schema carrying `keyword`, the predicate is called with the
    /// (possibly coerced) value and the keyword's operand; a `false` result
    /// records a failure under `keyword`. Reserved keywords cannot be
    /// claimed and are ignored here.
    pub fn with_constraint<F>(mut self, keyword: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        let keyword = keyword.into();
        if self.keywords.contains(&keyword) {
            log::debug!("Refusing to register custom constraint over reserved keyword '{}'", keyword);
            return self;
        }
        self.constraints.insert(keyword, Arc::new(predicate));
        self
    }

    /// Register a named predicate that schemas reference with `conform: "<name>"`.
    pub fn with_conformer<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        self.conformers.insert(name.into(), Arc::new(predicate));
        self
    }

    /// Default message template for `keyword`.
    pub fn message(&self, keyword: &str) -> Option<&str> {
        self.messages.get(keyword).map(String::as_str)
    }

    /// Resolve a format, consulting the extended table first when asked to.
    pub fn format(&self, name: &str, include_extensions: bool) -> Option<&FormatMatcher> {
        let extended = if include_extensions {
            self.format_extensions.get(name)
        } else {
            None
        };
        extended.or_else(|| self.formats.get(name))
    }

    /// Whether `keyword` is reserved.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }

    /// Custom constraint registered under `keyword`.
    pub fn constraint(&self, keyword: &str) -> Option<&Predicate> {
        self.constraints.get(keyword)
    }

    /// Conform predicate registered under `name`.
    pub fn conformer(&self, name: &str) -> Option<&Predicate> {
        self.conformers.get(name)
    }
}

impl Default for Registry {
    fn default() -> Self {
        let messages: HashMap<String, String> = DEFAULT_MESSAGES
            .iter()
            .map(|(keyword, template)| (keyword.to_string(), template.to_string()))
            .collect();
        let keywords = messages
            .keys()
            .map(String::as_str)
            .chain(STRUCTURAL_KEYWORDS.iter().copied())
            .map(str::to_string)
            .collect();

        Self {
            messages,
            formats: formats::core_formats(),
            format_extensions: formats::extended_formats(),
            keywords,
            constraints: HashMap::new(),
            conformers: HashMap::new(),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut constraints: Vec<_> = self.constraints.keys().collect();
        constraints.sort();
        let mut conformers: Vec<_> = self.conformers.keys().collect();
        conformers.sort();
        f.debug_struct("Registry")
            .field("messages", &self.messages.len())
            .field("formats", &self.formats.len())
            .field("format_extensions", &self.format_extensions.len())
            .field("keywords", &self.keywords.len())
            .field("constraints", &constraints)
            .field("conformers", &conformers)
            .finish()
    }
}
