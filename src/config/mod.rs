//! Layered configuration: files, environment, then CLI overrides

mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, ClientConfig, LogFormat, LoggingConfig, ServerConfig,
    DEFAULT_ADMIN_KEY, DEFAULT_NAMESPACE,
};
