use registry_core::api::{bad_request, ApiClient, ApiResult};

use crate::models::{Authority, NewAuthority};

#[derive(Clone, Debug)]
pub struct Authorities {
    client: ApiClient,
}

impl Authorities {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn get_all(&self) -> ApiResult<Vec<Authority>> {
        self.client.get("/").await
    }

    pub async fn get_one(&self, id: &str) -> ApiResult<Authority> {
        if id.is_empty() {
            return bad_request("authority id is required");
        }

        self.client.get(&format!("/{}", id)).await
    }

    pub async fn create(&self, authority: &NewAuthority) -> ApiResult<Authority> {
        self.client.post("/", authority).await
    }

    pub async fn update(&self, authority: &Authority) -> ApiResult<Authority> {
        if authority.id.is_empty() {
            return bad_request("authority id is required");
        }

        self.client
            .patch(&format!("/{}", authority.id), authority)
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<bool> {
        if id.is_empty() {
            return bad_request("authority id is required");
        }

        self.client.delete(&format!("/{}", id)).await
    }
}
