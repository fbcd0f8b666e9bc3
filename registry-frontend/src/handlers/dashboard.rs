use askama::Template;
use axum::response::IntoResponse;

use registry_core::error::AppError;

use crate::models::{Artifact, Authority};
use crate::routes::Navigation;
use crate::utils::{compute_artifact_url, time_since};

/// One line of the dashboard's artifact list.
pub struct ArtifactRow {
    pub full_name: String,
    pub category: &'static str,
    pub latest: String,
    pub url: String,
    pub updated: String,
}

impl ArtifactRow {
    fn new(artifact: &Artifact, now: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            full_name: artifact.full_name.clone(),
            category: artifact.kind.category(),
            latest: artifact.latest_version().unwrap_or_default().to_string(),
            url: compute_artifact_url(artifact),
            updated: time_since(artifact.updated_at, now),
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub company_name: String,
    pub user_name: String,
    pub authorities: Result<Vec<Authority>, String>,
    pub artifacts: Result<Vec<ArtifactRow>, String>,
}

pub async fn dashboard(Navigation { context }: Navigation) -> Result<impl IntoResponse, AppError> {
    let api = context.api();
    let (authorities, artifacts) = tokio::join!(api.authorities.get_all(), api.artifacts.get_all());

    if let Some(reason) = authorities.message().or(artifacts.message()) {
        tracing::warn!(reason = %reason, "Dashboard rendered with partial data");
    }

    let now = context.now();

    Ok(DashboardTemplate {
        company_name: context.runtime().company_name,
        user_name: context.user_name().await?,
        authorities: authorities.into_view(),
        artifacts: artifacts
            .into_view()
            .map(|list| list.iter().map(|a| ArtifactRow::new(a, now)).collect()),
    })
}
