//! # Basic Usage Example
//!
//! Validates a sign-up form against a schema, first with the built-in
//! messages, then with casting enabled, and finally with a translator and a
//! registry carrying custom predicates.
//!
//! The engine logs through the `log` crate; run with `RUST_LOG=debug` to see
//! each validation run.

use revalidate::{InMemoryTranslator, Registry, ValidationOptions, Validator, validate};
use serde_json::json;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let schema = json!({
        "i18nKey": "signup",
        "properties": {
            "email": {"type": "string", "required": true, "format": "email"},
            "password": {"type": "string", "required": true, "minLength": 8},
            "confirm": {"type": "string", "equal": "password"},
            "age": {"type": "integer", "minimum": 13},
            "newsletter": {"type": "boolean"},
            "username": {"type": "string", "required": true, "noSpaces": true}
        },
        "additionalProperties": false
    });

    let form = json!({
        "email": "jane@example",
        "password": "short",
        "confirm": "shorter",
        "age": "12",
        "newsletter": "1",
        "username": "jane doe",
        "referrer": "ad"
    });

    log::info!("Validating with default options");
    let report = validate(&form, &schema, &ValidationOptions::default())?;
    for error in &report.errors {
        log::info!("  {}", error);
    }

    log::info!("Validating with casting enabled");
    let report = validate(&form, &schema, &ValidationOptions::default().with_cast(true))?;
    for error in &report.errors {
        log::info!("  {} ({} expected {})", error, error.attribute, error.expected);
    }

    log::info!("Validating with translations and custom constraints");
    let translator = InMemoryTranslator::new()
        .with_entry("validation_translation:signup.email.format", "Bitte eine gueltige E-Mail-Adresse angeben")
        .with_entry("validation_translation:globals.password.minLength", "Passwort braucht {{expected}} Zeichen")
        .with_entry("validation_translation:generic.additionalProperties", "ist nicht erlaubt");
    let registry = Registry::default()
        .with_message("noSpaces", "must not contain spaces")
        .with_constraint("noSpaces", |value, expected| {
            expected.as_bool() != Some(true) || value.as_str().is_none_or(|s| !s.contains(' '))
        });
    let validator = Validator::with_registry(
        Arc::new(registry),
        ValidationOptions::default()
            .with_cast(true)
            .with_translator(Arc::new(translator)),
    );

    let report = validator.validate(&form, &schema)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
