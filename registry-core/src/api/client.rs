//! HTTP client factory for registry API resource groups.
//!
//! Every resource client is built through [`ApiClientFactory`] so the casing
//! mismatch between the registry (snake_case) and in-memory models
//! (camelCase) stays invisible to call sites.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::conversions::{camel_to_snake, snake_to_camel, transform_keys};
use super::envelope::{ApiResult, DEFAULT_ERROR_STATUS, Failure, handle_error, handle_response, with_error};
use crate::error::AppError;
use crate::observability::inject_trace_context;

/// Default request timeout for registry calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Settings shared by every client a factory creates.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Registry origin, e.g. `http://localhost:5758`.
    pub registry_url: String,
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            registry_url: "http://localhost:5758".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Builds [`ApiClient`]s bound to a base path on the registry.
#[derive(Clone)]
pub struct ApiClientFactory {
    http: reqwest::Client,
    config: ApiClientConfig,
}

impl ApiClientFactory {
    pub fn new(config: ApiClientConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Create a client whose requests are resolved against `base_path`.
    pub fn create_client(&self, base_path: &str) -> ApiClient {
        ApiClient {
            http: self.http.clone(),
            base_url: format!(
                "{}{}",
                self.config.registry_url.trim_end_matches('/'),
                base_path
            ),
            cookie: None,
        }
    }
}

/// A registry client bound to one resource group.
///
/// Outgoing bodies are converted to snake_case and incoming bodies to
/// camelCase before being decoded into `T`.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    cookie: Option<HeaderValue>,
}

impl ApiClient {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// A copy of this client that forwards the browser's cookie header,
    /// so the registry sees the caller's own session.
    pub fn forwarding(&self, cookie: Option<HeaderValue>) -> Self {
        Self {
            cookie,
            ..self.clone()
        }
    }

    /// Resolve `path` against the base URL; absolute URLs are used as is.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(Method::GET, path, None).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        match encode_body(body) {
            Ok(body) => self.send(Method::POST, path, Some(body)).await,
            Err(failure) => handle_error(failure),
        }
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        match encode_body(body) {
            Ok(body) => self.send(Method::PATCH, path, Some(body)).await,
            Err(failure) => handle_error(failure),
        }
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(Method::DELETE, path, None).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> ApiResult<T> {
        let url = self.url_for(path);

        let mut headers = HeaderMap::new();
        inject_trace_context(&mut headers);
        if let Some(cookie) = &self.cookie {
            headers.insert(COOKIE, cookie.clone());
        }

        let mut request = self.http.request(method.clone(), &url).headers(headers);
        if let Some(body) = body {
            request = request.json(&body);
        }

        tracing::debug!(method = %method, url = %url, "Sending registry request");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Failed to send {} request to {}: {}", method, url, e);
                return handle_error(Failure::from(e));
            }
        };

        let status = response.status().as_u16();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("Failed to read response body from {}: {}", url, e);
                return handle_error(Failure::from(e));
            }
        };

        let payload = decode_body(&bytes);
        if !(200..300).contains(&status) {
            tracing::warn!(status, url = %url, "Registry request failed");
        }

        match handle_response(status, transform_keys(payload, snake_to_camel)) {
            ApiResult::Ok { data } => match serde_json::from_value::<T>(data) {
                Ok(data) => ApiResult::Ok { data },
                Err(e) => {
                    tracing::error!(url = %url, error = %e, "Registry response did not match the expected shape");
                    with_error(
                        Some(DEFAULT_ERROR_STATUS),
                        Some(&Value::String(format!("invalid response payload: {}", e))),
                    )
                }
            },
            ApiResult::Error { message, errors } => ApiResult::Error { message, errors },
        }
    }
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, Failure> {
    serde_json::to_value(body)
        .map(|value| transform_keys(value, camel_to_snake))
        .map_err(|e| Failure::Message(format!("failed to encode request body: {}", e)))
}

/// Empty bodies decode to `null`; non-JSON bodies are kept as a string.
fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }

    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::catalogue::ErrorCode;
    use serde::Deserialize;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Entity {
        id: String,
        policy_url: String,
    }

    fn factory(server: &MockServer) -> ApiClientFactory {
        ApiClientFactory::new(ApiClientConfig {
            registry_url: server.uri(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body(b""), Value::Null);
        assert_eq!(decode_body(b"  \n"), Value::Null);
        assert_eq!(decode_body(b"true"), json!(true));
        assert_eq!(decode_body(b"not json"), json!("not json"));
    }

    #[test]
    fn test_url_for() {
        let factory = ApiClientFactory::new(ApiClientConfig::default()).unwrap();
        let client = factory.create_client("/v1/api/authorities");
        assert_eq!(client.url_for("/1"), "http://localhost:5758/v1/api/authorities/1");
        assert_eq!(client.url_for("https://other/x"), "https://other/x");
    }

    #[tokio::test]
    async fn test_get_converts_response_keys() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/api/things/1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "id": "1", "policy_url": "https://p" })),
            )
            .mount(&server)
            .await;

        let client = factory(&server).create_client("/v1/api/things");
        let result: ApiResult<Entity> = client.get("/1").await;

        assert_eq!(
            result,
            ApiResult::Ok {
                data: Entity {
                    id: "1".into(),
                    policy_url: "https://p".into()
                }
            }
        );
    }

    #[tokio::test]
    async fn test_post_converts_request_keys_and_forwards_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/api/things/"))
            .and(header("cookie", "_sid=abc"))
            .and(body_json(json!({ "id": "", "policy_url": "https://p" })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({ "id": "2", "policy_url": "https://p" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = factory(&server)
            .create_client("/v1/api/things")
            .forwarding(Some(HeaderValue::from_static("_sid=abc")));
        let body = Entity {
            id: String::new(),
            policy_url: "https://p".into(),
        };
        let result: ApiResult<Entity> = client.post("/", &body).await;

        assert_eq!(result.data().map(|e| e.id.as_str()), Some("2"));
    }

    #[tokio::test]
    async fn test_error_status_becomes_error_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "errors": ["gone"] })))
            .mount(&server)
            .await;

        let client = factory(&server).create_client("/v1/api/things");
        let result: ApiResult<bool> = client.delete("/9").await;

        assert!(result.has_code(ErrorCode::NotFound));
    }

    #[tokio::test]
    async fn test_unexpected_shape_becomes_internal_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": 1 })))
            .mount(&server)
            .await;

        let client = factory(&server).create_client("/v1/api/things");
        let result: ApiResult<Entity> = client.get("/1").await;

        assert!(result.has_code(ErrorCode::InternalServerError));
    }

    #[tokio::test]
    async fn test_unreachable_registry_becomes_internal_error() {
        let factory = ApiClientFactory::new(ApiClientConfig {
            registry_url: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_secs(2),
        })
        .unwrap();

        let result: ApiResult<Entity> = factory.create_client("/v1").get("/x").await;
        assert!(result.has_code(ErrorCode::InternalServerError));
    }
}
