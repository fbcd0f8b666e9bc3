//! Runtime configuration announced by the registry.
//!
//! The registry serves a runtime document describing the deployment (host,
//! company name, OAuth providers, session endpoints). Every browser talks to
//! the same registry, so the resolved document is cached once per process
//! and shared by all navigations. Browser sessions never hold a copy.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use registry_core::api::{ApiClient, ApiResult};

use crate::config::RuntimeDefaults;

/// The runtime document as served, after key conversion.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeDocument {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub company: String,
    /// Comma separated user names; empty allows everyone.
    #[serde(default)]
    pub authorized_users: String,
    #[serde(default)]
    pub auth: AuthDocument,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthDocument {
    #[serde(default)]
    pub providers: Vec<String>,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub session_endpoint: String,
    #[serde(default)]
    pub clear_session_endpoint: Option<String>,
}

/// Resolved runtime settings shared by every precondition and page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimeConfiguration {
    pub host_url: String,
    pub canonical_domain: String,
    pub company_name: String,
    pub oauth_providers: Vec<String>,
    pub authorization_endpoint: String,
    pub session_endpoint: String,
    pub clear_session_endpoint: Option<String>,
    pub authorized_users: Vec<String>,
}

impl RuntimeConfiguration {
    /// Resolve a document, replacing empty or unrendered values with `defaults`.
    pub fn resolve(document: RuntimeDocument, defaults: &RuntimeDefaults) -> Self {
        let providers: Vec<String> = document
            .auth
            .providers
            .into_iter()
            .filter(|p| !p.trim().is_empty() && !is_placeholder(p))
            .collect();

        Self {
            host_url: or_default(document.host, ""),
            canonical_domain: or_default(document.domain, ""),
            company_name: or_default(document.company, &defaults.company_name),
            oauth_providers: if providers.is_empty() {
                defaults.oauth_providers.clone()
            } else {
                providers
            },
            authorization_endpoint: or_default(document.auth.endpoint, ""),
            session_endpoint: or_default(document.auth.session_endpoint, ""),
            clear_session_endpoint: document
                .auth
                .clear_session_endpoint
                .map(|e| or_default(e, ""))
                .filter(|e| !e.is_empty()),
            authorized_users: split_users(&or_default(document.authorized_users, "")),
        }
    }

    /// Settings used when the registry cannot be reached.
    pub fn fallback(defaults: &RuntimeDefaults) -> Self {
        Self::resolve(RuntimeDocument::default(), defaults)
    }

    /// Whether `user_name` may use the console. An empty allow-list admits everyone.
    pub fn is_authorized(&self, user_name: &str) -> bool {
        self.authorized_users.is_empty() || self.authorized_users.iter().any(|u| u == user_name)
    }

    /// Login URL for one OAuth provider.
    pub fn login_url(&self, provider: &str) -> String {
        format!("{}?provider={}", self.authorization_endpoint, provider)
    }
}

/// Loads the runtime document and caches the resolved configuration.
#[derive(Debug)]
pub struct RuntimeConfig {
    document_path: String,
    defaults: RuntimeDefaults,
    cached: RwLock<Option<RuntimeConfiguration>>,
}

impl RuntimeConfig {
    pub fn new(document_path: &str, defaults: RuntimeDefaults) -> Self {
        Self {
            document_path: document_path.to_string(),
            defaults,
            cached: RwLock::new(None),
        }
    }

    pub fn defaults(&self) -> &RuntimeDefaults {
        &self.defaults
    }

    /// The cached configuration, fetching it first when nothing is cached.
    ///
    /// Returns `None` when the registry could not provide a document; the
    /// next call tries again.
    pub async fn init(&self, client: &ApiClient) -> Option<RuntimeConfiguration> {
        let cached = self.cached.read().await.clone();
        if cached.is_some() {
            return cached;
        }

        self.refresh(client).await
    }

    /// Fetch the document and replace the cached configuration.
    pub async fn refresh(&self, client: &ApiClient) -> Option<RuntimeConfiguration> {
        match client.get::<RuntimeDocument>(&self.document_path).await {
            ApiResult::Ok { data } => {
                tracing::info!(host = %data.host, "Runtime document loaded");
                Some(self.store(data).await)
            }
            ApiResult::Error { message, errors } => {
                tracing::warn!(reason = %message, details = ?errors, "Runtime document unavailable");
                None
            }
        }
    }

    /// Resolve `document` and make it the cached configuration.
    pub async fn store(&self, document: RuntimeDocument) -> RuntimeConfiguration {
        let runtime = RuntimeConfiguration::resolve(document, &self.defaults);
        *self.cached.write().await = Some(runtime.clone());
        runtime
    }
}

/// An unrendered server-side template placeholder such as `{{.COMPANY_NAME}}`.
fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    let Some(inner) = value
        .strip_prefix("{{")
        .and_then(|v| v.strip_suffix("}}"))
    else {
        return false;
    };

    let Some(name) = inner.trim().strip_prefix('.') else {
        return false;
    };

    !name.is_empty() && name.chars().all(|c| c.is_ascii_uppercase() || c == '_')
}

fn or_default(value: String, default: &str) -> String {
    if value.trim().is_empty() || is_placeholder(&value) {
        default.to_string()
    } else {
        value
    }
}

fn split_users(users: &str) -> Vec<String> {
    users
        .split(',')
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect()
}
