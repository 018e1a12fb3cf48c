//! Fluent builders for schemas.
//!
//! Tests describe schemas in terms of the constraint they exercise and let
//! the builder produce the JSON.

use serde_json::{Map, Value, json};

/// Builder for an object schema
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    schema: Map<String, Value>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a property
    pub fn property(mut self, name: &str, property: PropertyBuilder) -> Self {
        let properties = self
            .schema
            .entry("properties")
            .or_insert_with(|| json!({}));
        if let Value::Object(properties) = properties {
            properties.insert(name.to_string(), property.build());
        }
        self
    }

    /// Declare a pattern property
    pub fn pattern_property(mut self, pattern: &str, property: PropertyBuilder) -> Self {
        let patterns = self
            .schema
            .entry("patternProperties")
            .or_insert_with(|| json!({}));
        if let Value::Object(patterns) = patterns {
            patterns.insert(pattern.to_string(), property.build());
        }
        self
    }

    /// Forbid undeclared keys
    pub fn closed(mut self) -> Self {
        self.schema
            .insert("additionalProperties".to_string(), Value::Bool(false));
        self
    }

    /// Validate undeclared keys against a schema
    pub fn additional(mut self, property: PropertyBuilder) -> Self {
        self.schema
            .insert("additionalProperties".to_string(), property.build());
        self
    }

    /// Set the translation root key
    pub fn i18n_key(mut self, key: &str) -> Self {
        self.schema.insert("i18nKey".to_string(), json!(key));
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.schema)
    }
}

/// Builder for a property schema
#[derive(Debug, Clone, Default)]
pub struct PropertyBuilder {
    schema: Map<String, Value>,
}

impl PropertyBuilder {
    /// Property with a declared type
    pub fn typed(kind: &str) -> Self {
        Self::default().with("type", json!(kind))
    }

    /// Property without a declared type
    pub fn untyped() -> Self {
        Self::default()
    }

    pub fn required(self) -> Self {
        self.with("required", json!(true))
    }

    /// Set any keyword
    pub fn with(mut self, keyword: &str, operand: Value) -> Self {
        self.schema.insert(keyword.to_string(), operand);
        self
    }

    /// Nest an object schema's member declarations
    pub fn object(mut self, nested: SchemaBuilder) -> Self {
        if let Value::Object(members) = nested.build() {
            self.schema.extend(members);
        }
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.schema)
    }
}
