pub mod api;
pub mod config;
pub mod guard;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod session;
pub mod startup;
pub mod utils;

use reqwest::header::HeaderValue;
use std::sync::Arc;

use registry_core::api::{ApiClientConfig, ApiClientFactory};
use registry_core::error::AppError;

use api::RegistryApi;
use config::Settings;
use guard::NavigationContext;
use routes::RouteTable;
use runtime::RuntimeConfig;
use session::{Clock, SessionStorage, SystemClock};

/// Shared application state: settings, registry clients and the route table.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub api: RegistryApi,
    pub runtime_config: Arc<RuntimeConfig>,
    pub routes: Arc<RouteTable>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self, AppError> {
        let factory = ApiClientFactory::new(ApiClientConfig {
            registry_url: settings.registry.url.clone(),
            timeout: settings.registry.timeout(),
        })?;

        let runtime_config = RuntimeConfig::new(
            &settings.registry.runtime_path,
            settings.defaults.clone(),
        );

        Ok(Self {
            api: RegistryApi::new(&factory),
            runtime_config: Arc::new(runtime_config),
            routes: Arc::new(RouteTable::standard()),
            clock: Arc::new(SystemClock),
            settings: Arc::new(settings),
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Context for one navigation of the browser owning `storage`.
    pub fn navigation(
        &self,
        path: &str,
        storage: Arc<dyn SessionStorage>,
        cookie: Option<HeaderValue>,
    ) -> NavigationContext {
        NavigationContext::new(
            path,
            storage,
            self.api.forwarding(cookie),
            self.runtime_config.clone(),
            self.clock.clone(),
            chrono::Duration::seconds(self.settings.session.ttl_seconds),
        )
    }
}
