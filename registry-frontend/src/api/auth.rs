use async_trait::async_trait;
use registry_core::api::{ApiClient, ApiResult};

use crate::models::SessionDetails;
use crate::session::SessionApi;

/// Client for the registry's session endpoint.
#[derive(Clone, Debug)]
pub struct Auth {
    client: ApiClient,
    session_endpoint: String,
    clear_session_endpoint: String,
}

impl Auth {
    /// `clear_session_endpoint` defaults to the session endpoint itself.
    pub fn new(
        client: ApiClient,
        session_endpoint: &str,
        clear_session_endpoint: Option<&str>,
    ) -> Self {
        Self {
            client,
            session_endpoint: session_endpoint.to_string(),
            clear_session_endpoint: clear_session_endpoint
                .filter(|e| !e.is_empty())
                .unwrap_or(session_endpoint)
                .to_string(),
        }
    }
}

#[async_trait]
impl SessionApi for Auth {
    async fn get_session(&self) -> ApiResult<SessionDetails> {
        self.client.get(&self.session_endpoint).await
    }

    async fn clear_session(&self) -> ApiResult<bool> {
        self.client.delete(&self.clear_session_endpoint).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registry_core::api::{ApiClientConfig, ApiClientFactory, ErrorCode};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn auth(server: &MockServer, clear: Option<&str>) -> Auth {
        let factory = ApiClientFactory::new(ApiClientConfig {
            registry_url: server.uri(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        Auth::new(factory.create_client(""), "/v1/api/auth/session", clear)
    }

    #[tokio::test]
    async fn test_get_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/api/auth/session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "authority_id": "a1",
                "name": "jane",
                "email": "jane@example.com"
            })))
            .mount(&server)
            .await;

        let details = auth(&server, None).await.get_session().await.into_view().unwrap();
        assert_eq!(details.name, "jane");
        assert_eq!(details.authority_id.as_deref(), Some("a1"));
        assert!(details.groups.is_empty());
    }

    #[tokio::test]
    async fn test_missing_session_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = auth(&server, None).await.get_session().await;
        assert!(result.has_code(ErrorCode::NotFound));
    }

    #[tokio::test]
    async fn test_clear_session_prefers_dedicated_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/api/auth/logout"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(true)))
            .expect(1)
            .mount(&server)
            .await;

        let result = auth(&server, Some("/v1/api/auth/logout"))
            .await
            .clear_session()
            .await;
        assert_eq!(result.data(), Some(&true));
    }
}
