//! Settings forms as posted by the browser.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use super::authority::{NewApiKey, NewAuthority, NewKey};
use crate::utils::validation::{min_length, optional_url, required};

fn authority_name(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    min_length(value.trim(), 2, true)
}

fn key_id(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    min_length(value.trim(), 8, false)
}

fn api_key_name(value: &str) -> Result<(), ValidationError> {
    required(value)
}

fn optional(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct AuthorityForm {
    #[serde(default)]
    #[validate(custom(function = "authority_name"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "optional_url"))]
    pub policy_url: String,
    /// Checkbox; present only when ticked.
    #[serde(default)]
    pub is_public: Option<String>,
}

impl From<AuthorityForm> for NewAuthority {
    fn from(form: AuthorityForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            policy_url: form.policy_url.trim().to_string(),
            is_public: form.is_public.is_some(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct KeyForm {
    #[serde(default)]
    #[validate(custom(function = "key_id"))]
    pub key_id: String,
    #[serde(default)]
    pub ascii_armor: String,
    #[serde(default)]
    pub trust_signature: String,
}

impl From<KeyForm> for NewKey {
    fn from(form: KeyForm) -> Self {
        Self {
            key_id: form.key_id.trim().to_string(),
            ascii_armor: optional(form.ascii_armor),
            trust_signature: optional(form.trust_signature),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ApiKeyForm {
    #[serde(default)]
    #[validate(custom(function = "api_key_name"))]
    pub name: String,
}

impl From<ApiKeyForm> for NewApiKey {
    fn from(form: ApiKeyForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::{field_errors, REQUIRED_MESSAGE, URL_MESSAGE};

    #[test]
    fn test_empty_authority_form() {
        let errors = AuthorityForm::default().validate().unwrap_err();
        let errors = field_errors(&errors);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[0].message, REQUIRED_MESSAGE);
    }

    #[test]
    fn test_authority_form_rejects_bad_policy_url() {
        let form = AuthorityForm {
            name: "hashicorp".into(),
            policy_url: "nope".into(),
            is_public: None,
        };
        let errors = field_errors(&form.validate().unwrap_err());

        assert_eq!(errors[0].field, "policy_url");
        assert_eq!(errors[0].message, URL_MESSAGE);
    }

    #[test]
    fn test_authority_form_converts() {
        let form = AuthorityForm {
            name: " hashicorp ".into(),
            policy_url: String::new(),
            is_public: Some("on".into()),
        };
        assert!(form.validate().is_ok());

        let authority = NewAuthority::from(form);
        assert_eq!(authority.name, "hashicorp");
        assert!(authority.is_public);
    }

    #[test]
    fn test_key_form_length_and_optional_fields() {
        let short = KeyForm {
            key_id: "ABC".into(),
            ..Default::default()
        };
        let errors = field_errors(&short.validate().unwrap_err());
        assert_eq!(errors[0].message, "Minimum length should be greater or equal than 8.");

        let key = NewKey::from(KeyForm {
            key_id: "34365D9472D7468F".into(),
            ascii_armor: "  ".into(),
            trust_signature: "sig".into(),
        });
        assert_eq!(key.ascii_armor, None);
        assert_eq!(key.trust_signature.as_deref(), Some("sig"));
    }
}
