use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub server: ServerSettings,
    pub registry: RegistrySettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub defaults: RuntimeDefaults,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Mark the browser session cookie `Secure`. Enable behind HTTPS.
    #[serde(default)]
    pub secure_cookies: bool,
}

#[derive(Deserialize, Clone, Debug)]
pub struct RegistrySettings {
    /// Registry origin the console talks to, e.g. `http://localhost:5758`.
    pub url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Path of the runtime document served by the registry.
    #[serde(default = "default_runtime_path")]
    pub runtime_path: String,
}

fn default_timeout_seconds() -> u64 {
    120
}

fn default_runtime_path() -> String {
    "/internal/runtime.json".to_string()
}

impl RegistrySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct SessionSettings {
    /// Lifetime of a refreshed session snapshot.
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: i64,
}

fn default_ttl_seconds() -> i64 {
    60
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
        }
    }
}

/// Values used when the runtime document leaves a field empty or unrendered.
#[derive(Deserialize, Clone, Debug)]
pub struct RuntimeDefaults {
    #[serde(default)]
    pub company_name: String,
    #[serde(default = "default_oauth_providers")]
    pub oauth_providers: Vec<String>,
}

fn default_oauth_providers() -> Vec<String> {
    vec![
        "github".to_string(),
        "google".to_string(),
        "bitbucket".to_string(),
    ]
}

impl Default for RuntimeDefaults {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            oauth_providers: default_oauth_providers(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct TelemetrySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP collector endpoint; traces are only exported when set.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("Failed to determine the current directory: {}", e)))?;

    let configuration_directory = configuration_directory(base_path);

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("defaults.oauth_providers")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

/// Works both from the workspace root and from inside the crate directory.
fn configuration_directory(base_path: PathBuf) -> PathBuf {
    if base_path.ends_with("registry-frontend") {
        base_path.join("config")
    } else {
        base_path.join("registry-frontend").join("config")
    }
}
