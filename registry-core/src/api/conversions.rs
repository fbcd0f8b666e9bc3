//! Key casing conversion for JSON payloads.
//!
//! The registry speaks snake_case on the wire while in-memory models use
//! camelCase. [`transform_keys`] rewrites every object key of a payload with
//! one of the case functions below.

use serde_json::{Map, Value};

/// A key rewriting function.
pub type CaseFn = fn(&str) -> String;

/// Rewrite `_x` into `X` for every lowercase ASCII letter following an underscore.
pub fn snake_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('_', Some(next)) if next.is_ascii_lowercase() => {
                out.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }

    out
}

/// Rewrite `xY` into `x_y` for every lowercase letter followed by an uppercase one.
pub fn camel_to_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut chars = key.chars().peekable();

    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(next) if c.is_ascii_lowercase() && next.is_ascii_uppercase() => {
                out.push(c);
                out.push('_');
                out.push(next.to_ascii_lowercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }

    out
}

/// Recursively rewrite the keys of every object inside `value`.
///
/// Scalars are returned unchanged, arrays are mapped element-wise.
pub fn transform_keys(value: Value, case_fn: CaseFn) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| transform_keys(item, case_fn))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (case_fn(&key), transform_keys(value, case_fn)))
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snake_to_camel() {
        assert_eq!(snake_to_camel("policy_url"), "policyUrl");
        assert_eq!(snake_to_camel("ascii_armor"), "asciiArmor");
        assert_eq!(snake_to_camel("name"), "name");
        assert_eq!(snake_to_camel("trailing_"), "trailing_");
        assert_eq!(snake_to_camel("key_1"), "key_1");
    }

    #[test]
    fn test_camel_to_snake() {
        assert_eq!(camel_to_snake("policyUrl"), "policy_url");
        assert_eq!(camel_to_snake("trustSignature"), "trust_signature");
        assert_eq!(camel_to_snake("isPublic"), "is_public");
        assert_eq!(camel_to_snake("id"), "id");
    }

    #[test]
    fn test_transform_nested_payload() {
        let wire = json!({
            "policy_url": "https://example.com",
            "api_keys": [{ "id": "1", "key_name": "ci" }],
            "is_public": true,
            "nothing": null
        });

        let camel = transform_keys(wire.clone(), snake_to_camel);
        assert_eq!(
            camel,
            json!({
                "policyUrl": "https://example.com",
                "apiKeys": [{ "id": "1", "keyName": "ci" }],
                "isPublic": true,
                "nothing": null
            })
        );

        assert_eq!(transform_keys(camel, camel_to_snake), wire);
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(transform_keys(json!("snake_case"), snake_to_camel), json!("snake_case"));
        assert_eq!(transform_keys(json!(42), camel_to_snake), json!(42));
        assert_eq!(transform_keys(Value::Null, camel_to_snake), Value::Null);
    }

    #[test]
    fn test_values_are_not_rewritten() {
        let value = json!({ "full_name": "hashicorp_aws" });
        assert_eq!(
            transform_keys(value, snake_to_camel),
            json!({ "fullName": "hashicorp_aws" })
        );
    }
}
