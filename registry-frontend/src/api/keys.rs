use registry_core::api::{bad_request, ApiClient, ApiResult};

use crate::models::{Key, NewKey};

/// Signing keys, nested under `/authorities/{id}/keys`.
#[derive(Clone, Debug)]
pub struct Keys {
    client: ApiClient,
}

impl Keys {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn get_all(&self, authority_id: &str) -> ApiResult<Vec<Key>> {
        if authority_id.is_empty() {
            return bad_request("authority id is required");
        }

        self.client.get(&format!("/{}/keys", authority_id)).await
    }

    pub async fn get_one(&self, authority_id: &str, id: &str) -> ApiResult<Key> {
        if authority_id.is_empty() || id.is_empty() {
            return bad_request("authority id and key id are required");
        }

        self.client
            .get(&format!("/{}/keys/{}", authority_id, id))
            .await
    }

    pub async fn create(&self, authority_id: &str, key: &NewKey) -> ApiResult<Key> {
        if authority_id.is_empty() {
            return bad_request("authority id is required");
        }

        self.client
            .post(&format!("/{}/keys", authority_id), key)
            .await
    }

    pub async fn update(&self, authority_id: &str, key: &Key) -> ApiResult<Key> {
        if authority_id.is_empty() || key.id.is_empty() {
            return bad_request("authority id and key id are required");
        }

        self.client
            .patch(&format!("/{}/keys/{}", authority_id, key.id), key)
            .await
    }

    pub async fn delete(&self, authority_id: &str, id: &str) -> ApiResult<bool> {
        if authority_id.is_empty() || id.is_empty() {
            return bad_request("authority id and key id are required");
        }

        self.client
            .delete(&format!("/{}/keys/{}", authority_id, id))
            .await
    }
}
