use axum::response::IntoResponse;

use registry_core::error::AppError;

pub async fn metrics() -> Result<impl IntoResponse, AppError> {
    Ok(crate::services::metrics::get_metrics()?)
}
