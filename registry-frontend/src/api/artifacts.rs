use registry_core::api::{bad_request, ApiClient, ApiResult};

use crate::models::{Artifact, ArtifactSlug, NewArtifact};
use crate::utils::version::sort_versions_desc;

/// Published providers and modules.
///
/// Version lists are sorted newest first on every fetch.
#[derive(Clone, Debug)]
pub struct Artifacts {
    client: ApiClient,
}

impl Artifacts {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn get_all(&self) -> ApiResult<Vec<Artifact>> {
        self.client
            .get::<Vec<Artifact>>("/")
            .await
            .map(|artifacts| artifacts.into_iter().map(Artifact::normalized).collect())
    }

    pub async fn get_one(&self, slug: &ArtifactSlug) -> ApiResult<Artifact> {
        if slug.is_empty() {
            return bad_request("artifact namespace and name are required");
        }

        self.client
            .get::<Artifact>(&slug.path())
            .await
            .map(Artifact::normalized)
    }

    pub async fn get_all_versions_for_one(&self, slug: &ArtifactSlug) -> ApiResult<Vec<String>> {
        if slug.is_empty() {
            return bad_request("artifact namespace and name are required");
        }

        self.client
            .get::<Vec<String>>(&format!("{}/version", slug.path()))
            .await
            .map(|mut versions| {
                sort_versions_desc(&mut versions);
                versions
            })
    }

    pub async fn create(&self, artifact: &NewArtifact) -> ApiResult<Artifact> {
        self.client
            .post::<_, Artifact>("/", artifact)
            .await
            .map(Artifact::normalized)
    }

    pub async fn update(&self, artifact: &Artifact) -> ApiResult<Artifact> {
        if artifact.id.is_empty() {
            return bad_request("artifact id is required");
        }

        self.client
            .patch::<_, Artifact>(&format!("/{}", artifact.id), artifact)
            .await
            .map(Artifact::normalized)
    }

    pub async fn delete(&self, id: &str) -> ApiResult<bool> {
        if id.is_empty() {
            return bad_request("artifact id is required");
        }

        self.client.delete(&format!("/{}", id)).await
    }
}
