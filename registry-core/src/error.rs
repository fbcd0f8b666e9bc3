use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Session error: {0}")]
    SessionError(anyhow::Error),

    #[error("Precondition '{name}' failed: {source}")]
    PreconditionError {
        name: &'static str,
        source: anyhow::Error,
    },

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::SessionError(_)
            | AppError::PreconditionError { .. }
            | AppError::InternalError(_)
            | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            details: Option<String>,
        }

        let status = self.status_code();
        let (error_message, details) = match self {
            AppError::SessionError(err) => {
                tracing::error!(error = %err, "Session storage error");
                ("Session error".to_string(), None)
            }
            AppError::PreconditionError { name, source } => {
                tracing::error!(precondition = name, error = %source, "Route precondition failed");
                ("Navigation could not be completed".to_string(), None)
            }
            AppError::InternalError(err) => {
                tracing::error!(error = %err, "Internal error");
                ("Internal server error".to_string(), None)
            }
            AppError::ConfigError(err) => (
                "Configuration error".to_string(),
                Some(err.to_string()),
            ),
        };

        (
            status,
            Json(ErrorResponse {
                error: error_message,
                details,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_is_a_server_error() {
        let errors = [
            AppError::SessionError(anyhow::anyhow!("store down")),
            AppError::PreconditionError {
                name: "refresh_session",
                source: anyhow::anyhow!("storage down"),
            },
            AppError::InternalError(anyhow::anyhow!("boom")),
            AppError::ConfigError(anyhow::anyhow!("bad url")),
        ];

        for error in errors {
            assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[tokio::test]
    async fn test_precondition_error_hides_its_source() {
        let response = AppError::PreconditionError {
            name: "load_runtime_config",
            source: anyhow::anyhow!("secret backend detail"),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8_lossy(&bytes);
        assert!(body.contains("Navigation could not be completed"));
        assert!(!body.contains("secret backend detail"));
    }
}
