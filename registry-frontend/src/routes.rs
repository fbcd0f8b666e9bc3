//! Route table and the guard-running extractor.
//!
//! Each route owns a [`Guard`]; handlers receive a [`Navigation`] only after
//! that guard let the request through.

use axum::{
    async_trait,
    extract::{FromRequestParts, MatchedPath},
    http::{header::COOKIE, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use std::collections::HashMap;
use std::sync::Arc;
use tower_sessions::Session;

use registry_core::error::AppError;

use crate::guard::{
    base_conditions, is_authenticated, is_authorized_user, process_log_out, Guard, GuardState,
    NavigationContext, RouteUserData, SharedPrecondition,
};
use crate::services::metrics::record_guard_outcome;
use crate::AppState;

pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";
pub const LOGOUT: &str = "/logout";
pub const FORBIDDEN: &str = "/forbidden";
pub const SETTINGS: &str = "/settings";
pub const CREATE_AUTHORITY: &str = "/settings/authorities";
pub const DELETE_AUTHORITY: &str = "/settings/authorities/:authority_id/delete";
pub const CREATE_KEY: &str = "/settings/authorities/:authority_id/keys";
pub const DELETE_KEY: &str = "/settings/authorities/:authority_id/keys/:key_id/delete";
pub const CREATE_API_KEY: &str = "/settings/authorities/:authority_id/api-keys";
pub const DELETE_API_KEY: &str = "/settings/authorities/:authority_id/api-keys/:api_key_id/delete";
pub const MODULE: &str = "/modules/:namespace/:name/:provider";
pub const MODULE_VERSION: &str = "/modules/:namespace/:name/:provider/:version";
pub const PROVIDER: &str = "/providers/:namespace/:name";
pub const PROVIDER_VERSION: &str = "/providers/:namespace/:name/:version";
pub const CATCH_ALL: &str = "*";

pub struct Route {
    pub name: &'static str,
    pub guard: Guard<NavigationContext>,
}

impl Route {
    fn new(
        name: &'static str,
        extra: Vec<SharedPrecondition<NavigationContext>>,
        fallback: &str,
    ) -> Self {
        let mut conditions = base_conditions();
        conditions.extend(extra);

        Self {
            name,
            guard: Guard::new(conditions, RouteUserData::redirect_to(fallback)),
        }
    }
}

/// Routes keyed by the path pattern the router matched.
pub struct RouteTable {
    routes: HashMap<&'static str, Arc<Route>>,
    catch_all: Arc<Route>,
}

impl RouteTable {
    pub fn new(catch_all: Route) -> Self {
        Self {
            routes: HashMap::new(),
            catch_all: Arc::new(catch_all),
        }
    }

    /// Register `route` under every pattern in `paths`.
    pub fn add(mut self, paths: &[&'static str], route: Route) -> Self {
        let route = Arc::new(route);
        for path in paths {
            self.routes.insert(*path, route.clone());
        }
        self
    }

    /// The console's routes.
    pub fn standard() -> Self {
        let signed_in = || vec![is_authenticated(true), is_authorized_user(FORBIDDEN)];

        Self::new(Route::new("not_found", vec![is_authenticated(true)], LOGIN))
            .add(&[HOME], Route::new("home", signed_in(), LOGIN))
            .add(&[LOGIN], Route::new("login", vec![is_authenticated(false)], HOME))
            .add(
                &[LOGOUT],
                Route::new("logout", vec![is_authenticated(true), process_log_out()], LOGIN),
            )
            .add(
                &[FORBIDDEN],
                Route::new("forbidden", vec![is_authenticated(true)], LOGIN),
            )
            .add(
                &[
                    SETTINGS,
                    CREATE_AUTHORITY,
                    DELETE_AUTHORITY,
                    CREATE_KEY,
                    DELETE_KEY,
                    CREATE_API_KEY,
                    DELETE_API_KEY,
                ],
                Route::new("settings", signed_in(), LOGIN),
            )
            .add(&[MODULE, MODULE_VERSION], Route::new("module", signed_in(), LOGIN))
            .add(
                &[PROVIDER, PROVIDER_VERSION],
                Route::new("provider", signed_in(), LOGIN),
            )
    }

    /// The route registered for `pattern`, or the catch-all.
    pub fn find(&self, pattern: Option<&str>) -> &Route {
        pattern
            .and_then(|p| self.routes.get(p))
            .unwrap_or(&self.catch_all)
    }
}

/// A navigation whose guard resolved to [`GuardState::Proceed`].
pub struct Navigation {
    pub context: NavigationContext,
}

#[async_trait]
impl FromRequestParts<AppState> for Navigation {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|rejection| rejection.into_response())?;

        let pattern = parts
            .extensions
            .get::<MatchedPath>()
            .map(|matched| matched.as_str().to_string());
        let route = state.routes.find(pattern.as_deref());

        let cookie = parts.headers.get(COOKIE).cloned();
        let mut context = state.navigation(parts.uri.path(), Arc::new(session), cookie);

        let outcome = route.guard.evaluate(&mut context).await;
        let label = match &outcome {
            Ok(state) => state.label(),
            Err(_) => "error",
        };
        record_guard_outcome(route.name, label);

        match outcome {
            Ok(GuardState::Proceed) => Ok(Navigation { context }),
            Ok(GuardState::Redirect(path)) => {
                tracing::info!(route = route.name, from = %parts.uri.path(), to = %path, "Navigation redirected");
                Err(Redirect::to(&path).into_response())
            }
            Ok(GuardState::Pending) => Err(AppError::InternalError(anyhow::anyhow!(
                "guard for '{}' did not settle",
                route.name
            ))
            .into_response()),
            Err(e) => {
                tracing::error!(route = route.name, error = %e, "Navigation guard failed");
                Err(e.into_response())
            }
        }
    }
}
