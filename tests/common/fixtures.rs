//! Shared schemas and records.

use serde_json::{Value, json};

/// Schema for an account record exercising most keywords.
pub fn account_schema() -> Value {
    json!({
        "i18nKey": "account",
        "properties": {
            "id": {"type": "integer", "required": true, "minimum": 1},
            "login": {"type": "string", "required": true, "minLength": 3, "maxLength": 16, "pattern": "^[a-z][a-z0-9_]*$"},
            "email": {"type": "string", "required": true, "format": "email"},
            "password": {"type": "string", "minLength": 8},
            "passwordConfirmation": {"type": "string", "equal": "password"},
            "plan": {"enum": ["free", "pro", "team"]},
            "seats": {"type": "integer", "minimum": 1, "maximum": 500, "divisibleBy": 5, "dependencies": "plan"},
            "tags": {"type": "array", "items": {"type": "string", "maxLength": 10}, "uniqueItems": true, "maxItems": 5},
            "billing": {
                "type": "object",
                "properties": {
                    "country": {"type": "string", "required": true, "minLength": 2, "maxLength": 2},
                    "vat": {"type": ["string", "null"]}
                },
                "additionalProperties": false
            }
        },
        "patternProperties": {"^meta_": {"type": "string"}},
        "additionalProperties": false
    })
}

/// Account record valid against [`account_schema`].
pub fn valid_account() -> Value {
    json!({
        "id": 7,
        "login": "jdoe",
        "email": "jdoe@example.com",
        "password": "correct horse",
        "passwordConfirmation": "correct horse",
        "plan": "team",
        "seats": 25,
        "tags": ["beta", "eu"],
        "billing": {"country": "NZ", "vat": null},
        "meta_source": "signup"
    })
}
