use std::time::Duration;

use serde::Deserialize;

use crate::infrastructure::verification::{ClientTimings, DEFAULT_AT_LEAST, DEFAULT_TIMEOUT};

/// Admin secret used when none is configured
pub const DEFAULT_ADMIN_KEY: &str = "change-me";
/// Namespace mixed into generated API keys when none is configured
pub const DEFAULT_NAMESPACE: &str = "namespace.authd.bazaar.technology";

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Secret expected in the `X-AdminKey` header
    pub admin_key: String,
    /// Namespace for API key generation
    pub namespace: String,
    /// Require client API keys to be well-formed UUIDs, not just 36 chars
    pub strict_api_keys: bool,
}

/// Settings for the verification client subcommands
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API root of the daemon, e.g. `http://127.0.0.1:8080/api/v1`
    pub base_url: String,
    /// Sent as `X-ApiKey` on every check
    pub api_key: Option<String>,
    pub timeout_ms: u64,
    pub at_least_ms: u64,
    /// PEM file with an extra root certificate
    pub ca_cert: Option<String>,
    pub insecure: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_key: DEFAULT_ADMIN_KEY.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            strict_api_keys: false,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/api/v1".to_string(),
            api_key: None,
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            at_least_ms: DEFAULT_AT_LEAST.as_millis() as u64,
            ca_cert: None,
            insecure: false,
        }
    }
}

impl ClientConfig {
    pub fn timings(&self) -> ClientTimings {
        ClientTimings::new(
            Duration::from_millis(self.timeout_ms),
            Duration::from_millis(self.at_least_ms),
        )
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
