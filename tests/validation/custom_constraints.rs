//! Caller-registered keyword constraints and conform predicates.

use crate::common::builders::{PropertyBuilder, SchemaBuilder};
use revalidate::{Registry, SchemaError, ValidationOptions, Validator};
use serde_json::{Value, json};
use std::sync::Arc;

fn validator(registry: Registry) -> Validator {
    Validator::with_registry(Arc::new(registry), ValidationOptions::default())
}

fn multiple_of_registry() -> Registry {
    Registry::default()
        .with_message("multipleOf", "must be a multiple of %{expected}")
        .with_constraint("multipleOf", |value, expected| {
            match (value.as_i64(), expected.as_i64()) {
                (Some(value), Some(step)) if step != 0 => value % step == 0,
                _ => true,
            }
        })
}

#[test]
fn test_constraint_receives_operand() {
    let validator = validator(multiple_of_registry());
    let schema = SchemaBuilder::new()
        .property("n", PropertyBuilder::typed("integer").with("multipleOf", json!(3)))
        .build();

    assert!(validator.validate(&json!({"n": 9}), &schema).unwrap().valid);

    let report = validator.validate(&json!({"n": 10}), &schema).unwrap();
    assert_failures!(report, [("n", "multipleOf")]);
    assert_eq!(report.errors[0].expected, json!(3));
    assert_eq!(report.errors[0].actual, json!(10));
    assert_eq!(report.errors[0].message, "must be a multiple of 3");
}

#[test]
fn test_constraint_runs_before_type_check() {
    let validator = validator(multiple_of_registry());
    let schema = SchemaBuilder::new()
        .property(
            "n",
            PropertyBuilder::typed("string").with("multipleOf", json!(2)),
        )
        .build();

    let report = validator.validate(&json!({"n": 3}), &schema).unwrap();
    assert_failures!(report, [("n", "multipleOf"), ("n", "type")]);
}

#[test]
fn test_unregistered_keywords_are_ignored() {
    let schema = SchemaBuilder::new()
        .property(
            "n",
            PropertyBuilder::typed("integer")
                .with("multipleOf", json!(3))
                .with("x-ui-widget", json!("slider"))
                .with("description", json!("A number"))
                .with("admin_only", json!(true)),
        )
        .build();

    let report = validator(Registry::default())
        .validate(&json!({"n": 10}), &schema)
        .unwrap();
    assert_valid!(report);
}

#[test]
fn test_reserved_keywords_cannot_be_overridden() {
    let registry = Registry::default().with_constraint("maximum", |_, _| false);
    assert!(registry.constraint("maximum").is_none());

    let schema = SchemaBuilder::new()
        .property("n", PropertyBuilder::typed("integer").with("maximum", json!(10)))
        .build();
    assert_valid!(validator(registry).validate(&json!({"n": 1}), &schema).unwrap());
}

#[test]
fn test_constraint_sees_cast_value() {
    let registry = Registry::default().with_constraint("even", |value, _| {
        value.as_i64().is_some_and(|n| n % 2 == 0)
    });
    let validator = Validator::with_registry(
        Arc::new(registry),
        ValidationOptions::default().with_cast(true),
    );
    let schema = SchemaBuilder::new()
        .property("n", PropertyBuilder::typed("integer").with("even", json!(true)))
        .build();

    assert!(validator.validate(&json!({"n": "4"}), &schema).unwrap().valid);
}

#[test]
fn test_conform_predicates() {
    let registry = Registry::default().with_conformer("palindrome", |value, _| {
        value
            .as_str()
            .is_some_and(|s| s.chars().eq(s.chars().rev()))
    });
    let validator = validator(registry);
    let schema = SchemaBuilder::new()
        .property("word", PropertyBuilder::typed("string").with("conform", json!("palindrome")))
        .build();

    assert!(validator.validate(&json!({"word": "level"}), &schema).unwrap().valid);

    let report = validator.validate(&json!({"word": "levels"}), &schema).unwrap();
    assert_failures!(report, [("word", "conform")]);
    assert_eq!(report.errors[0].message, "must conform to given constraint");
}

#[test]
fn test_conform_skipped_after_type_failure() {
    let registry = Registry::default().with_conformer("never", |_, _| false);
    let schema = SchemaBuilder::new()
        .property("word", PropertyBuilder::typed("string").with("conform", json!("never")))
        .build();

    let report = validator(registry).validate(&json!({"word": 5}), &schema).unwrap();
    assert_failures!(report, [("word", "type")]);
}

#[test]
fn test_conform_errors() {
    let validator = validator(Registry::default());

    let unknown = SchemaBuilder::new()
        .property("v", PropertyBuilder::untyped().with("conform", json!("nope")))
        .build();
    match validator.validate(&json!({"v": 1}), &unknown) {
        Err(SchemaError::UnknownConformer { name }) => assert_eq!(name, "nope"),
        other => panic!("Expected UnknownConformer, got {:?}", other),
    }

    let malformed = SchemaBuilder::new()
        .property("v", PropertyBuilder::untyped().with("conform", json!(5)))
        .build();
    assert!(matches!(
        validator.validate(&json!({"v": 1}), &malformed),
        Err(SchemaError::InvalidKeyword { .. })
    ));

    // absent properties never reach the predicate lookup
    assert!(validator.validate(&json!({}), &unknown).unwrap().valid);
}

#[test]
fn test_registry_is_shared_between_validators() {
    let registry = Arc::new(multiple_of_registry());
    let strict = Validator::with_registry(registry.clone(), ValidationOptions::default().with_strict_formats(true));
    let lenient = Validator::with_registry(registry, ValidationOptions::default());

    let schema: Value = json!({"properties": {"n": {"multipleOf": 4, "format": "unknown"}}});
    let object = json!({"n": 6});

    let strict_report = strict.validate(&object, &schema).unwrap();
    let lenient_report = lenient.validate(&object, &schema).unwrap();
    assert_failures!(strict_report, [("n", "format")]);
    assert_failures!(lenient_report, [("n", "multipleOf")]);
}
