//! Preconditions available to routes.

use async_trait::async_trait;
use std::sync::Arc;

use registry_core::error::AppError;

use super::context::NavigationContext;
use super::{Precondition, SharedPrecondition, Verdict};
use crate::session::StorageError;

fn failed(name: &'static str) -> impl FnOnce(StorageError) -> AppError {
    move |e| AppError::PreconditionError {
        name,
        source: anyhow::Error::new(e),
    }
}

/// Loads the runtime document unless the process already caches it.
pub struct LoadRuntimeConfig;

#[async_trait]
impl Precondition<NavigationContext> for LoadRuntimeConfig {
    fn name(&self) -> &'static str {
        "load_runtime_config"
    }

    async fn check(&self, context: &mut NavigationContext) -> Result<Verdict, AppError> {
        context.load_runtime().await;

        if !context.has_runtime() {
            tracing::warn!(path = %context.path(), "Continuing with default runtime configuration");
        }

        Ok(Verdict::Pass)
    }
}

/// Re-reads the registry session into the snapshot.
pub struct RefreshSession;

#[async_trait]
impl Precondition<NavigationContext> for RefreshSession {
    fn name(&self) -> &'static str {
        "refresh_session"
    }

    async fn check(&self, context: &mut NavigationContext) -> Result<Verdict, AppError> {
        if let Some(store) = context.session_store() {
            store.refresh().await.map_err(failed(self.name()))?;
        }

        Ok(Verdict::Pass)
    }
}

pub struct IsAuthenticated {
    expected: bool,
}

#[async_trait]
impl Precondition<NavigationContext> for IsAuthenticated {
    fn name(&self) -> &'static str {
        if self.expected {
            "is_authenticated"
        } else {
            "is_anonymous"
        }
    }

    async fn check(&self, context: &mut NavigationContext) -> Result<Verdict, AppError> {
        let authenticated = match context.session_store() {
            Some(store) => store.is_available().await.map_err(failed(self.name()))?,
            None => false,
        };

        Ok(Verdict::from(authenticated == self.expected))
    }
}

/// Admits the user only when the runtime allow-list names them. A refused
/// user is sent to `refused_to`, which must not require authorization itself.
pub struct IsAuthorizedUser {
    refused_to: String,
}

#[async_trait]
impl Precondition<NavigationContext> for IsAuthorizedUser {
    fn name(&self) -> &'static str {
        "is_authorized_user"
    }

    async fn check(&self, context: &mut NavigationContext) -> Result<Verdict, AppError> {
        let session = match context.session_store() {
            Some(store) => store.get().await.map_err(failed(self.name()))?,
            None => None,
        };

        let Some(session) = session else {
            return Ok(Verdict::Fail);
        };

        let authorized = context.runtime().is_authorized(&session.user_name);
        if !authorized {
            tracing::warn!(user = %session.user_name, "User is not on the allow-list");
        }

        Ok(Verdict::from(authorized))
    }

    fn redirect_on_failure(&self) -> Option<&str> {
        Some(self.refused_to.as_str())
    }
}

/// Clears the session, then always fails so the route falls back.
pub struct ProcessLogOut;

#[async_trait]
impl Precondition<NavigationContext> for ProcessLogOut {
    fn name(&self) -> &'static str {
        "process_log_out"
    }

    async fn check(&self, context: &mut NavigationContext) -> Result<Verdict, AppError> {
        if let Some(store) = context.session_store() {
            store.clear().await.map_err(failed(self.name()))?;
        }

        Ok(Verdict::Fail)
    }
}

pub fn load_runtime_config() -> SharedPrecondition<NavigationContext> {
    Arc::new(LoadRuntimeConfig)
}

pub fn refresh_session() -> SharedPrecondition<NavigationContext> {
    Arc::new(RefreshSession)
}

pub fn is_authenticated(expected: bool) -> SharedPrecondition<NavigationContext> {
    Arc::new(IsAuthenticated { expected })
}

pub fn is_authorized_user(refused_to: &str) -> SharedPrecondition<NavigationContext> {
    Arc::new(IsAuthorizedUser {
        refused_to: refused_to.to_string(),
    })
}

pub fn process_log_out() -> SharedPrecondition<NavigationContext> {
    Arc::new(ProcessLogOut)
}

/// Preconditions every route runs first.
pub fn base_conditions() -> Vec<SharedPrecondition<NavigationContext>> {
    vec![load_runtime_config(), refresh_session()]
}
