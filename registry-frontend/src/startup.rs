use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use registry_core::middleware::{request_id_middleware, security_headers_middleware, REQUEST_ID_HEADER};
use registry_core::observability::extract_traceparent;
use time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::handlers::{
    app::{forbidden, health_check, not_found},
    artifact::{module_page, provider_page},
    auth::{login_page, logout_handler},
    dashboard::dashboard,
    metrics::metrics,
    settings::{
        create_api_key, create_authority, create_key, delete_api_key, delete_authority, delete_key,
        settings_page,
    },
};
use crate::routes::{
    CREATE_API_KEY, CREATE_AUTHORITY, CREATE_KEY, DELETE_API_KEY, DELETE_AUTHORITY, DELETE_KEY, FORBIDDEN,
    HOME, LOGIN, LOGOUT, MODULE, MODULE_VERSION, PROVIDER, PROVIDER_VERSION, SETTINGS,
};
use crate::services::metrics::metrics_middleware;
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    // Session setup
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(state.settings.server.secure_cookies)
        .with_expiry(Expiry::OnInactivity(Duration::hours(24)));

    Router::new()
        .route(HOME, get(dashboard))
        .route(LOGIN, get(login_page))
        .route(LOGOUT, get(logout_handler))
        .route(FORBIDDEN, get(forbidden))
        .route(SETTINGS, get(settings_page))
        .route(CREATE_AUTHORITY, post(create_authority))
        .route(DELETE_AUTHORITY, post(delete_authority))
        .route(CREATE_KEY, post(create_key))
        .route(DELETE_KEY, post(delete_key))
        .route(CREATE_API_KEY, post(create_api_key))
        .route(DELETE_API_KEY, post(delete_api_key))
        .route(MODULE, get(module_page))
        .route(MODULE_VERSION, get(module_page))
        .route(PROVIDER, get(provider_page))
        .route(PROVIDER_VERSION, get(provider_page))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .fallback(not_found)
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        // Add tracing layer
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");
                let traceparent = extract_traceparent(request.headers()).unwrap_or_default();

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    traceparent = %traceparent,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Add tracing middleware for request_id
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
