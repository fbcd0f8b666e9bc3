use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use registry_core::error::AppError;

use crate::api::RegistryApi;
use crate::models::Session;
use crate::runtime::{RuntimeConfig, RuntimeConfiguration};
use crate::session::{Clock, SessionApi, SessionStorage, SessionStore};

/// Everything one navigation's preconditions and page handler may touch.
///
/// Built per request from the shared application state and the browser's
/// session; dropped once the response is rendered.
pub struct NavigationContext {
    path: String,
    storage: Arc<dyn SessionStorage>,
    api: RegistryApi,
    runtime_config: Arc<RuntimeConfig>,
    clock: Arc<dyn Clock>,
    session_ttl: Duration,
    runtime: Option<RuntimeConfiguration>,
    session_api: Option<Arc<dyn SessionApi>>,
}

impl NavigationContext {
    pub fn new(
        path: &str,
        storage: Arc<dyn SessionStorage>,
        api: RegistryApi,
        runtime_config: Arc<RuntimeConfig>,
        clock: Arc<dyn Clock>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            path: path.to_string(),
            storage,
            api,
            runtime_config,
            clock,
            session_ttl,
            runtime: None,
            session_api: None,
        }
    }

    /// Use `api` for session calls instead of the endpoints announced at runtime.
    pub fn with_session_api(mut self, api: Arc<dyn SessionApi>) -> Self {
        self.session_api = Some(api);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn api(&self) -> &RegistryApi {
        &self.api
    }

    pub fn storage(&self) -> &Arc<dyn SessionStorage> {
        &self.storage
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// The resolved runtime configuration, or the configured defaults when
    /// none has been loaded.
    pub fn runtime(&self) -> RuntimeConfiguration {
        self.runtime
            .clone()
            .unwrap_or_else(|| RuntimeConfiguration::fallback(self.runtime_config.defaults()))
    }

    pub fn has_runtime(&self) -> bool {
        self.runtime.is_some()
    }

    pub(crate) async fn load_runtime(&mut self) {
        self.runtime = self.runtime_config.init(self.api.root()).await;
    }

    /// Session store for this browser, `None` when no session endpoint is known.
    pub fn session_store(&self) -> Option<SessionStore> {
        let api = match &self.session_api {
            Some(api) => api.clone(),
            None => {
                let runtime = self.runtime();
                if runtime.session_endpoint.is_empty() {
                    return None;
                }
                Arc::new(self.api.auth(&runtime)) as Arc<dyn SessionApi>
            }
        };

        Some(SessionStore::new(
            self.storage.clone(),
            api,
            self.clock.clone(),
            self.session_ttl,
        ))
    }

    /// The current session snapshot, if any.
    pub async fn session(&self) -> Result<Option<Session>, AppError> {
        match self.session_store() {
            Some(store) => store
                .get()
                .await
                .map_err(|e| AppError::SessionError(anyhow::Error::new(e))),
            None => Ok(None),
        }
    }

    /// Display name of the signed-in user, empty when anonymous.
    pub async fn user_name(&self) -> Result<String, AppError> {
        Ok(self.session().await?.map(|s| s.user_name).unwrap_or_default())
    }
}
