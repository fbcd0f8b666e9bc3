//! Field checks shared by the settings forms.
//!
//! Optional fields that are left empty always pass; the remaining checks run
//! only on non-empty input.

use std::borrow::Cow;
use validator::{ValidateUrl, ValidationError, ValidationErrors};

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const URL_MESSAGE: &str = "Not a valid URL.";

fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

pub fn min_length_message(min: usize, exclusive: bool) -> String {
    format!(
        "Minimum length should be {} than {}.",
        if exclusive { "greater" } else { "greater or equal" },
        min
    )
}

pub fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", REQUIRED_MESSAGE));
    }
    Ok(())
}

/// Length check counted in characters.
pub fn min_length(value: &str, min: usize, exclusive: bool) -> Result<(), ValidationError> {
    let length = value.chars().count();
    let passed = if exclusive { length > min } else { length >= min };

    if !passed {
        return Err(error("min_length", min_length_message(min, exclusive)));
    }
    Ok(())
}

pub fn url(value: &str) -> Result<(), ValidationError> {
    let lowered = value.to_ascii_lowercase();
    let has_scheme = ["http://", "https://", "ftp://"]
        .iter()
        .any(|scheme| lowered.starts_with(scheme));

    if !has_scheme || !value.to_string().validate_url() {
        return Err(error("url", URL_MESSAGE));
    }
    Ok(())
}

pub fn optional_url(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    url(value)
}

/// A failed field and its message, as shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Flatten validation errors into one message per field, ordered by field name.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut flattened: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errors)| {
            errors.first().map(|e| FieldError {
                field: field.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();

    flattened.sort_by(|a, b| a.field.cmp(&b.field));
    flattened
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert!(required("x").is_ok());
        let err = required("  ").unwrap_err();
        assert_eq!(err.message.as_deref(), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_min_length_bounds() {
        assert!(min_length("abc", 3, false).is_ok());
        assert!(min_length("abc", 3, true).is_err());
        assert!(min_length("abcd", 3, true).is_ok());

        let err = min_length("ab", 3, false).unwrap_err();
        assert_eq!(
            err.message.as_deref(),
            Some("Minimum length should be greater or equal than 3.")
        );
        let err = min_length("abc", 3, true).unwrap_err();
        assert_eq!(err.message.as_deref(), Some("Minimum length should be greater than 3."));
    }

    #[test]
    fn test_url() {
        assert!(url("https://example.com/policy").is_ok());
        assert!(url("ftp://files.example.com").is_ok());
        assert_eq!(url("example").unwrap_err().message.as_deref(), Some(URL_MESSAGE));
        assert!(url("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_optional_url_accepts_empty() {
        assert!(optional_url("").is_ok());
        assert!(optional_url("not a url").is_err());
    }
}
