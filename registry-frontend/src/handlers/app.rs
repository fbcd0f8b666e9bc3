use askama::Template;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use registry_core::error::AppError;

use crate::routes::Navigation;

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub path: String,
}

pub async fn not_found(Navigation { context }: Navigation) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            path: context.path().to_string(),
        },
    )
}

#[derive(Template)]
#[template(path = "forbidden.html")]
pub struct ForbiddenTemplate {
    pub company_name: String,
    pub user_name: String,
}

/// Landing page for signed-in users the allow-list refuses. Its guard only
/// requires a session, so the redirect chain ends here.
pub async fn forbidden(Navigation { context }: Navigation) -> Result<Response, AppError> {
    let template = ForbiddenTemplate {
        company_name: context.runtime().company_name,
        user_name: context.user_name().await?,
    };

    Ok((StatusCode::FORBIDDEN, template).into_response())
}

pub async fn health_check() -> &'static str {
    "OK"
}
