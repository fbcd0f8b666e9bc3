use registry_core::api::{bad_request, ApiClient, ApiResult};

use crate::models::{ApiKey, NewApiKey};

/// API keys, nested under `/authorities/{id}/api-keys`.
#[derive(Clone, Debug)]
pub struct ApiKeys {
    client: ApiClient,
}

impl ApiKeys {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn get_all(&self, authority_id: &str) -> ApiResult<Vec<ApiKey>> {
        if authority_id.is_empty() {
            return bad_request("authority id is required");
        }

        self.client
            .get(&format!("/{}/api-keys", authority_id))
            .await
    }

    pub async fn get_one(&self, authority_id: &str, id: &str) -> ApiResult<ApiKey> {
        if authority_id.is_empty() || id.is_empty() {
            return bad_request("authority id and api key id are required");
        }

        self.client
            .get(&format!("/{}/api-keys/{}", authority_id, id))
            .await
    }

    pub async fn create(&self, authority_id: &str, api_key: &NewApiKey) -> ApiResult<ApiKey> {
        if authority_id.is_empty() {
            return bad_request("authority id is required");
        }

        self.client
            .post(&format!("/{}/api-keys", authority_id), api_key)
            .await
    }

    pub async fn update(&self, authority_id: &str, api_key: &ApiKey) -> ApiResult<ApiKey> {
        if authority_id.is_empty() || api_key.id.is_empty() {
            return bad_request("authority id and api key id are required");
        }

        self.client
            .patch(&format!("/{}/api-keys/{}", authority_id, api_key.id), api_key)
            .await
    }

    pub async fn delete(&self, authority_id: &str, id: &str) -> ApiResult<bool> {
        if authority_id.is_empty() || id.is_empty() {
            return bad_request("authority id and api key id are required");
        }

        self.client
            .delete(&format!("/{}/api-keys/{}", authority_id, id))
            .await
    }
}
