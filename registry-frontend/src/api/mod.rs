//! Typed clients for the registry's REST API.
//!
//! Every operation returns an [`ApiResult`](registry_core::api::ApiResult);
//! none of them fail past their own boundary.

pub mod api_keys;
pub mod artifacts;
pub mod auth;
pub mod authorities;
pub mod keys;

use reqwest::header::HeaderValue;
use registry_core::api::{ApiClient, ApiClientFactory};

pub use api_keys::ApiKeys;
pub use artifacts::Artifacts;
pub use auth::Auth;
pub use authorities::Authorities;
pub use keys::Keys;

use crate::runtime::RuntimeConfiguration;

pub const AUTHORITIES_PATH: &str = "/v1/api/authorities";
pub const ARTIFACTS_PATH: &str = "/v1/api/artifacts";

/// The full set of resource clients, built once at startup.
#[derive(Clone, Debug)]
pub struct RegistryApi {
    pub authorities: Authorities,
    pub keys: Keys,
    pub api_keys: ApiKeys,
    pub artifacts: Artifacts,
    root: ApiClient,
}

impl RegistryApi {
    pub fn new(factory: &ApiClientFactory) -> Self {
        let authorities = factory.create_client(AUTHORITIES_PATH);

        Self {
            authorities: Authorities::new(authorities.clone()),
            keys: Keys::new(authorities.clone()),
            api_keys: ApiKeys::new(authorities),
            artifacts: Artifacts::new(factory.create_client(ARTIFACTS_PATH)),
            root: factory.create_client(""),
        }
    }

    /// Clients that carry the browser's cookie to the registry.
    pub fn forwarding(&self, cookie: Option<HeaderValue>) -> Self {
        Self {
            authorities: Authorities::new(self.authorities.client().forwarding(cookie.clone())),
            keys: Keys::new(self.keys.client().forwarding(cookie.clone())),
            api_keys: ApiKeys::new(self.api_keys.client().forwarding(cookie.clone())),
            artifacts: Artifacts::new(self.artifacts.client().forwarding(cookie.clone())),
            root: self.root.forwarding(cookie),
        }
    }

    /// Client for registry paths outside the resource groups.
    pub fn root(&self) -> &ApiClient {
        &self.root
    }

    /// Session client bound to the endpoints announced by the runtime document.
    pub fn auth(&self, runtime: &RuntimeConfiguration) -> Auth {
        Auth::new(
            self.root.clone(),
            &runtime.session_endpoint,
            runtime.clear_session_endpoint.as_deref(),
        )
    }
}
