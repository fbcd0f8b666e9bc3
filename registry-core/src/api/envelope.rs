//! Result envelope returned by every registry API call.
//!
//! Transport failures, non-2xx responses and client-side validation failures
//! all fold into [`ApiResult::Error`], so callers only ever branch on two
//! shapes: data or a single human readable message.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;

use super::catalogue::{ErrorCode, decode_error};

/// Default status used when an error carries no status of its own.
pub const DEFAULT_ERROR_STATUS: u16 = 500;

/// Outcome of a registry API call.
///
/// Serialises as `{"status": "OK", "data", "errors": []}` or
/// `{"status": "ERROR", "message", "errors"}`; a success never carries errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    Ok {
        data: T,
    },
    Error {
        /// Catalogue message safe to show to the user.
        message: String,
        /// Backend supplied details, kept for logs.
        errors: Vec<String>,
    },
}

impl<T: Serialize> Serialize for ApiResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut envelope = serializer.serialize_struct("ApiResult", 3)?;
        match self {
            ApiResult::Ok { data } => {
                envelope.serialize_field("status", "OK")?;
                envelope.serialize_field("data", data)?;
                envelope.serialize_field("errors", &[] as &[String])?;
            }
            ApiResult::Error { message, errors } => {
                envelope.serialize_field("status", "ERROR")?;
                envelope.serialize_field("message", message)?;
                envelope.serialize_field("errors", errors)?;
            }
        }
        envelope.end()
    }
}

/// A failed call, before it is folded into an envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// A response was received with a failing status.
    Response { status: u16, body: Option<Value> },
    /// No response; only a description of what went wrong.
    Message(String),
    /// Nothing is known about the failure.
    Unknown,
}

impl From<reqwest::Error> for Failure {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Failure::Response {
                status: status.as_u16(),
                body: None,
            },
            None => Failure::Message(err.to_string()),
        }
    }
}

/// Wrap `data` into a successful envelope.
pub fn with_success<T>(data: T) -> ApiResult<T> {
    ApiResult::Ok { data }
}

/// Build an error envelope. The status defaults to 500 and resolves to a
/// catalogue message; `data` is flattened into the detail list.
pub fn with_error<T>(status: Option<u16>, data: Option<&Value>) -> ApiResult<T> {
    let status = status.unwrap_or(DEFAULT_ERROR_STATUS);

    ApiResult::Error {
        message: decode_error(status).to_string(),
        errors: error_details(data),
    }
}

/// Fold a received response into an envelope.
pub fn handle_response(status: u16, body: Value) -> ApiResult<Value> {
    if (200..300).contains(&status) {
        return with_success(body);
    }

    with_error(Some(status), Some(&body))
}

/// Fold a failure into an error envelope.
pub fn handle_error<T>(failure: Failure) -> ApiResult<T> {
    match failure {
        Failure::Response { status, body } => with_error(Some(status), body.as_ref()),
        Failure::Message(message) => {
            with_error(Some(DEFAULT_ERROR_STATUS), Some(&Value::String(message)))
        }
        Failure::Unknown => with_error(None, None),
    }
}

/// Envelope for a request rejected before reaching the network.
pub fn bad_request<T>(reason: &str) -> ApiResult<T> {
    handle_error(Failure::Response {
        status: 400,
        body: Some(Value::String(reason.to_string())),
    })
}

/// Accepts `{"errors": [..]}`, string arrays, bare strings; anything else is
/// serialised as JSON.
fn error_details(data: Option<&Value>) -> Vec<String> {
    let Some(data) = data else {
        return Vec::new();
    };

    if let Some(errors) = data.get("errors").and_then(string_array) {
        return errors;
    }

    if let Some(errors) = string_array(data) {
        return errors;
    }

    match data {
        Value::String(s) => vec![s.clone()],
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

fn string_array(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    if items.is_empty() {
        return None;
    }

    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

impl<T> ApiResult<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, ApiResult::Ok { .. })
    }

    pub fn is_error(&self) -> bool {
        !self.is_ok()
    }

    /// The user facing message of an error envelope.
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiResult::Ok { .. } => None,
            ApiResult::Error { message, .. } => Some(message),
        }
    }

    /// Backend details of an error envelope; always empty on success.
    pub fn errors(&self) -> &[String] {
        match self {
            ApiResult::Ok { .. } => &[],
            ApiResult::Error { errors, .. } => errors,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ApiResult::Ok { data } => Some(data),
            ApiResult::Error { .. } => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResult<U> {
        match self {
            ApiResult::Ok { data } => ApiResult::Ok { data: f(data) },
            ApiResult::Error { message, errors } => ApiResult::Error { message, errors },
        }
    }

    /// Collapse into the view state of a page: data or a message.
    pub fn into_view(self) -> Result<T, String> {
        match self {
            ApiResult::Ok { data } => Ok(data),
            ApiResult::Error { message, .. } => Err(message),
        }
    }

    /// Whether this is an error envelope carrying the given catalogue code.
    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.message() == Some(code.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_statuses_yield_data() {
        for status in [200, 201, 204, 250, 299] {
            let result = handle_response(status, json!({ "id": "1" }));
            assert_eq!(result, with_success(json!({ "id": "1" })));
        }
    }

    #[test]
    fn test_failing_statuses_yield_messages() {
        for status in [100, 199, 300, 302, 400, 401, 404, 500, 503] {
            let result = handle_response(status, json!(null));
            let message = result.message().expect("error envelope");
            assert!(!message.is_empty(), "status {status} produced empty message");
        }
    }

    #[test]
    fn test_with_error_defaults_to_internal_error() {
        let result: ApiResult<()> = with_error(None, None);
        assert!(result.has_code(ErrorCode::InternalServerError));
        assert_eq!(
            result,
            ApiResult::Error {
                message: ErrorCode::InternalServerError.message().to_string(),
                errors: vec![],
            }
        );
    }

    #[test]
    fn test_error_details_shapes() {
        let result: ApiResult<()> =
            with_error(Some(400), Some(&json!({ "errors": ["name is required"] })));
        assert!(matches!(result, ApiResult::Error { ref errors, .. } if errors == &vec!["name is required".to_string()]));

        let result: ApiResult<()> = with_error(Some(404), Some(&json!(["a", "b"])));
        assert!(matches!(result, ApiResult::Error { ref errors, .. } if errors.len() == 2));

        let result: ApiResult<()> = with_error(Some(418), Some(&json!({ "code": 7 })));
        assert!(result.has_code(ErrorCode::Unknown));
        assert!(matches!(result, ApiResult::Error { ref errors, .. } if errors == &vec![r#"{"code":7}"#.to_string()]));
    }

    #[test]
    fn test_handle_error_variants() {
        let result: ApiResult<()> = handle_error(Failure::Response {
            status: 404,
            body: Some(json!("missing")),
        });
        assert!(result.has_code(ErrorCode::NotFound));

        let result: ApiResult<()> = handle_error(Failure::Message("connection refused".into()));
        assert!(result.has_code(ErrorCode::InternalServerError));
        assert!(matches!(result, ApiResult::Error { ref errors, .. } if errors[0] == "connection refused"));

        let result: ApiResult<()> = handle_error(Failure::Unknown);
        assert!(result.has_code(ErrorCode::InternalServerError));
    }

    #[test]
    fn test_bad_request_envelope() {
        let result: ApiResult<()> = bad_request("missing id");
        assert!(result.has_code(ErrorCode::BadRequest));
    }

    #[test]
    fn test_serialized_shape() {
        let ok = serde_json::to_value(with_success(1)).unwrap();
        assert_eq!(ok, json!({ "status": "OK", "data": 1, "errors": [] }));
        assert!(with_success(1).errors().is_empty());

        let err = serde_json::to_value(with_error::<i32>(Some(404), Some(&json!("gone")))).unwrap();
        assert_eq!(err["status"], "ERROR");
        assert_eq!(err["errors"], json!(["gone"]));
        assert!(err.get("data").is_none());
    }
}
