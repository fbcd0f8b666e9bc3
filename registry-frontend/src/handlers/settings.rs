//! Authority, signing key and API key management.
//!
//! Every form is validated before the registry is called. Invalid input
//! re-renders the page with a 422; registry failures re-render it with the
//! envelope's message. Successful posts redirect back to the settings page.

use askama::Template;
use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use validator::Validate;

use registry_core::api::ApiResult;
use registry_core::error::AppError;

use crate::guard::NavigationContext;
use crate::models::{ApiKeyForm, Authority, AuthorityForm, KeyForm};
use crate::routes::{Navigation, SETTINGS};
use crate::utils::{field_errors, FieldError};

#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub company_name: String,
    pub user_name: String,
    pub authorities: Result<Vec<Authority>, String>,
    pub errors: Vec<FieldError>,
    /// Registry failure message, empty when there is none.
    pub notice: String,
}

async fn render(
    context: &NavigationContext,
    status: StatusCode,
    errors: Vec<FieldError>,
    notice: Option<String>,
) -> Result<Response, AppError> {
    let template = SettingsTemplate {
        company_name: context.runtime().company_name,
        user_name: context.user_name().await?,
        authorities: context.api().authorities.get_all().await.into_view(),
        errors,
        notice: notice.unwrap_or_default(),
    };

    Ok((status, template).into_response())
}

/// Redirect on success, otherwise re-render with the registry's message.
async fn settle<T>(context: &NavigationContext, action: &str, result: ApiResult<T>) -> Result<Response, AppError> {
    match result {
        ApiResult::Ok { .. } => {
            tracing::info!(action, "Settings updated");
            Ok(Redirect::to(SETTINGS).into_response())
        }
        ApiResult::Error { message, errors } => {
            tracing::warn!(action, reason = %message, details = ?errors, "Registry rejected settings change");
            render(context, StatusCode::BAD_GATEWAY, Vec::new(), Some(message)).await
        }
    }
}

async fn invalid(context: &NavigationContext, errors: validator::ValidationErrors) -> Result<Response, AppError> {
    render(context, StatusCode::UNPROCESSABLE_ENTITY, field_errors(&errors), None).await
}

pub async fn settings_page(Navigation { context }: Navigation) -> Result<Response, AppError> {
    render(&context, StatusCode::OK, Vec::new(), None).await
}

pub async fn create_authority(
    Navigation { context }: Navigation,
    Form(form): Form<AuthorityForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        return invalid(&context, errors).await;
    }

    let result = context.api().authorities.create(&form.into()).await;
    settle(&context, "create_authority", result).await
}

pub async fn delete_authority(
    Navigation { context }: Navigation,
    Path(authority_id): Path<String>,
) -> Result<Response, AppError> {
    let result = context.api().authorities.delete(&authority_id).await;
    settle(&context, "delete_authority", result).await
}

pub async fn create_key(
    Navigation { context }: Navigation,
    Path(authority_id): Path<String>,
    Form(form): Form<KeyForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        return invalid(&context, errors).await;
    }

    let result = context.api().keys.create(&authority_id, &form.into()).await;
    settle(&context, "create_key", result).await
}

pub async fn delete_key(
    Navigation { context }: Navigation,
    Path((authority_id, key_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let result = context.api().keys.delete(&authority_id, &key_id).await;
    settle(&context, "delete_key", result).await
}

pub async fn create_api_key(
    Navigation { context }: Navigation,
    Path(authority_id): Path<String>,
    Form(form): Form<ApiKeyForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        return invalid(&context, errors).await;
    }

    let result = context.api().api_keys.create(&authority_id, &form.into()).await;
    settle(&context, "create_api_key", result).await
}

pub async fn delete_api_key(
    Navigation { context }: Navigation,
    Path((authority_id, api_key_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let result = context.api().api_keys.delete(&authority_id, &api_key_id).await;
    settle(&context, "delete_api_key", result).await
}
