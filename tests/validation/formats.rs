//! Format keyword tests.
//!
//! Core and extended matchers, strict handling of unknown names, and the
//! toggles that switch format checking off.

use crate::common::builders::{PropertyBuilder, SchemaBuilder};
use crate::common::{check, check_with};
use revalidate::schema::FormatMatcher;
use revalidate::{Registry, ValidationOptions, Validator};
use serde_json::{Value, json};
use std::sync::Arc;

fn format_schema(format: &str) -> Value {
    SchemaBuilder::new()
        .property("value", PropertyBuilder::untyped().with("format", json!(format)))
        .build()
}

fn accepts(format: &str, value: Value) -> bool {
    check(&json!({"value": value}), &format_schema(format)).valid
}

#[test]
fn test_core_formats() {
    let cases = [
        ("email", json!("someone@example.org"), json!("someone@")),
        ("ip-address", json!("10.0.0.255"), json!("10.0.0.256")),
        ("ipv6", json!("fe80:0000:0000:0000:0204:61ff:fe9d:f156"), json!("fe80::1::2")),
        ("date-time", json!("2020-02-29T23:59:59Z"), json!("Feb 29 2020")),
        ("date", json!("2020-02-29"), json!("2020/02/29")),
        ("time", json!("23:59:59"), json!("23:59")),
        ("color", json!("#ff0000"), json!("reddish")),
        ("host-name", json!("api.example.com"), json!("-bad-.example")),
        ("utc-millisec", json!(1_600_000_000_000_i64), json!(-5)),
        ("regex", json!("^a+$"), json!("(")),
    ];

    for (format, good, bad) in cases {
        assert!(accepts(format, good.clone()), "{} should accept {}", format, good);
        assert!(!accepts(format, bad.clone()), "{} should reject {}", format, bad);
    }
}

#[test]
fn test_color_forms() {
    for color in ["#abc", "#A0B1C2", "rgb(255, 0, 0)", "rgb(10%,20%,30%)", "navy", "Teal"] {
        assert!(accepts("color", json!(color)), "{} should be a color", color);
    }
    assert!(!accepts("color", json!("#abcd")));
    assert!(!accepts("color", json!("xnavy")));
}

#[test]
fn test_url_formats() {
    assert!(accepts("url", json!("https://example.com/path?q=1")));
    assert!(accepts("url", json!("ftp://user:pw@files.example.com:2121/")));
    assert!(accepts("url", json!("http://8.8.8.8/")));
    assert!(!accepts("url", json!("http://192.168.1.1/")));
    assert!(!accepts("url", json!("http://127.0.0.1/")));
    assert!(!accepts("url", json!("http://localhost/")));
    assert!(!accepts("url", json!("mailto:someone@example.com")));

    assert!(accepts("android_url", json!("market://details?id=com.example")));
    assert!(accepts("android_url", json!("https://play.example.com/app")));
    assert!(!accepts("android_url", json!("intent://x")));
}

#[test]
fn test_url_rejects_unsafe_characters() {
    for url in [
        "http://example.com/{id}",
        "http://example.com/a|b",
        "http://example.com/a^b",
        "http://example.com/a\\b",
    ] {
        let report = check(&json!({"value": url}), &format_schema("url"));
        assert_failures!(report, [("value", "format")]);
    }
}

#[test]
fn test_format_message_names_the_format() {
    let report = check(&json!({"value": "nope"}), &format_schema("email"));
    assert_eq!(report.errors[0].message, "is not a valid email");
    assert_eq!(report.errors[0].to_string(), "value is not a valid email");
}

#[test]
fn test_null_values_skip_known_formats() {
    assert!(accepts("email", Value::Null));
}

#[test]
fn test_unknown_formats_depend_on_strict_mode() {
    let schema = format_schema("postal-code");
    let object = json!({"value": "8001"});

    assert_valid!(check(&object, &schema));

    let strict = ValidationOptions::default().with_strict_formats(true);
    let report = check_with(&object, &schema, &strict);
    assert_failures!(report, [("value", "format")]);
}

#[test]
fn test_strict_mode_without_extensions_hides_url() {
    let options = ValidationOptions::default()
        .with_strict_formats(true)
        .with_format_extensions(false);
    let report = check_with(&json!({"value": "https://example.com"}), &format_schema("url"), &options);
    assert_failures!(report, [("value", "format")]);
}

#[test]
fn test_formats_disabled() {
    let options = ValidationOptions::default()
        .with_formats(false)
        .with_strict_formats(true);
    assert_valid!(check_with(&json!({"value": "nope"}), &format_schema("email"), &options));
    assert_valid!(check_with(&json!({"value": "x"}), &format_schema("unknown"), &options));
}

#[test]
fn test_format_failure_skips_remaining_checks() {
    let schema = SchemaBuilder::new()
        .property(
            "value",
            PropertyBuilder::typed("integer")
                .with("format", json!("email"))
                .with("enum", json!([1])),
        )
        .build();
    assert_failures!(check(&json!({"value": "x"}), &schema), [("value", "format")]);
}

#[test]
fn test_custom_formats() {
    let registry = Registry::default()
        .with_format("postal-code", FormatMatcher::pattern(r"^\d{4}$").unwrap())
        .with_format_extension(
            "email",
            FormatMatcher::predicate(|value| value.as_str().is_some_and(|s| s.ends_with("@corp.example"))),
        );
    let validator = Validator::with_registry(Arc::new(registry), ValidationOptions::default());

    let postal = format_schema("postal-code");
    assert!(validator.validate(&json!({"value": "8001"}), &postal).unwrap().valid);
    assert!(!validator.validate(&json!({"value": "80011"}), &postal).unwrap().valid);

    let email = format_schema("email");
    assert!(validator.validate(&json!({"value": "a@corp.example"}), &email).unwrap().valid);
    assert!(!validator.validate(&json!({"value": "a@example.com"}), &email).unwrap().valid);

    let core_only = Validator::with_registry(
        validator.registry().clone().into(),
        ValidationOptions::default().with_format_extensions(false),
    );
    assert!(core_only.validate(&json!({"value": "a@example.com"}), &email).unwrap().valid);
}
