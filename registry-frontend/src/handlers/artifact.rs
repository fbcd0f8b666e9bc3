use askama::Template;
use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use registry_core::api::{ApiResult, ErrorCode};
use registry_core::error::AppError;

use crate::guard::NavigationContext;
use crate::models::{Artifact, ArtifactSlug};
use crate::routes::Navigation;
use crate::utils::time_since;

#[derive(Debug, Deserialize)]
pub struct ModulePath {
    pub namespace: String,
    pub name: String,
    pub provider: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderPath {
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

pub struct VersionLink {
    pub version: String,
    pub url: String,
    pub selected: bool,
}

pub struct ArtifactView {
    pub full_name: String,
    pub kind: &'static str,
    pub namespace: String,
    /// Empty for providers.
    pub provider: String,
    pub version: String,
    pub versions: Vec<VersionLink>,
    pub updated: String,
}

impl ArtifactView {
    /// `None` when `requested` names a version the artifact does not have.
    fn new(artifact: Artifact, requested: Option<&str>, now: chrono::DateTime<chrono::Utc>) -> Option<Self> {
        let version = match requested {
            Some(v) => artifact.versions.iter().find(|known| known.as_str() == v)?.clone(),
            None => artifact.latest_version().unwrap_or_default().to_string(),
        };

        let base = format!("/{}/{}", artifact.kind.category(), artifact.slug().segments().join("/"));
        let versions = artifact
            .versions
            .iter()
            .map(|v| VersionLink {
                version: v.clone(),
                url: format!("{}/{}", base, v).to_lowercase(),
                selected: *v == version,
            })
            .collect();

        Some(Self {
            kind: match artifact.kind.provider() {
                Some(_) => "Module",
                None => "Provider",
            },
            provider: artifact.kind.provider().unwrap_or_default().to_string(),
            updated: time_since(artifact.updated_at, now),
            full_name: artifact.full_name,
            namespace: artifact.namespace,
            version,
            versions,
        })
    }
}

#[derive(Template)]
#[template(path = "artifact.html")]
pub struct ArtifactTemplate {
    pub title: String,
    pub company_name: String,
    pub user_name: String,
    pub artifact: Result<ArtifactView, String>,
}

async fn render(
    context: &NavigationContext,
    slug: ArtifactSlug,
    version: Option<String>,
) -> Result<Response, AppError> {
    let title = slug.segments().join("/");
    let result = context.api().artifacts.get_one(&slug).await;

    let (status, artifact) = match result {
        ApiResult::Ok { data } => match ArtifactView::new(data, version.as_deref(), context.now()) {
            Some(view) => (StatusCode::OK, Ok(view)),
            None => (
                StatusCode::NOT_FOUND,
                Err(format!("Version {} was not found.", version.unwrap_or_default())),
            ),
        },
        ApiResult::Error { message, .. } => {
            let status = if message == ErrorCode::NotFound.message() {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_GATEWAY
            };
            (status, Err(message))
        }
    };

    let template = ArtifactTemplate {
        title,
        company_name: context.runtime().company_name,
        user_name: context.user_name().await?,
        artifact,
    };

    Ok((status, template).into_response())
}

pub async fn module_page(
    Navigation { context }: Navigation,
    Path(path): Path<ModulePath>,
) -> Result<Response, AppError> {
    let slug = ArtifactSlug::module(&path.namespace, &path.name, &path.provider);
    render(&context, slug, path.version).await
}

pub async fn provider_page(
    Navigation { context }: Navigation,
    Path(path): Path<ProviderPath>,
) -> Result<Response, AppError> {
    let slug = ArtifactSlug::provider(&path.namespace, &path.name);
    render(&context, slug, path.version).await
}
