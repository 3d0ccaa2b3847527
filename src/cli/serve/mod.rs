//! Serve command - runs the authorization daemon

use std::net::SocketAddr;

use anyhow::Context;
use clap::Args;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use crate::api::create_router;
use crate::config::{AppConfig, DEFAULT_ADMIN_KEY};
use crate::infrastructure::logging::init_logging;

/// Flags that override the loaded configuration
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Listen address, e.g. 127.0.0.1:8080
    #[arg(long)]
    pub addr: Option<SocketAddr>,

    /// Namespace used when generating API keys
    #[arg(long)]
    pub ns: Option<String>,

    /// Admin secret expected in the X-AdminKey header
    #[arg(long)]
    pub admin: Option<String>,

    /// Require client API keys to be well-formed UUIDs
    #[arg(long)]
    pub strict_api_keys: bool,
}

impl ServeArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(addr) = self.addr {
            config.server.host = addr.ip().to_string();
            config.server.port = addr.port();
        }
        if let Some(ns) = &self.ns {
            config.auth.namespace = ns.clone();
        }
        if let Some(admin) = &self.admin {
            config.auth.admin_key = admin.clone();
        }
        if self.strict_api_keys {
            config.auth.strict_api_keys = true;
        }
    }
}

/// Run the daemon until Ctrl+C or SIGTERM
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    args.apply(&mut config);
    init_logging(&config.logging)?;

    if config.auth.admin_key == DEFAULT_ADMIN_KEY {
        warn!("Admin key is the built-in default; set auth.admin_key or pass --admin");
    }

    let state = crate::create_app_state(&config);
    let app = create_router(state);

    let addr = build_socket_addr(&config)?;
    info!(
        %addr,
        namespace = %config.auth.namespace,
        strict_api_keys = config.auth.strict_api_keys,
        "Starting authorization daemon"
    );

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Authorization daemon shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    let ip = config
        .server
        .host
        .parse::<std::net::IpAddr>()
        .with_context(|| format!("Invalid server host '{}'", config.server.host))?;

    Ok(SocketAddr::from((ip, config.server.port)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides() {
        let mut config = AppConfig::default();
        let args = ServeArgs {
            addr: Some("0.0.0.0:9000".parse().unwrap()),
            ns: Some("ns.test".to_string()),
            admin: Some("s3cret".to_string()),
            strict_api_keys: true,
        };

        args.apply(&mut config);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.auth.namespace, "ns.test");
        assert_eq!(config.auth.admin_key, "s3cret");
        assert!(config.auth.strict_api_keys);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let mut config = AppConfig::default();
        ServeArgs::default().apply(&mut config);

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.admin_key, DEFAULT_ADMIN_KEY);
    }

    #[test]
    fn test_build_socket_addr() {
        let config = AppConfig::default();
        assert_eq!(build_socket_addr(&config).unwrap().to_string(), "127.0.0.1:8080");

        let mut bad = AppConfig::default();
        bad.server.host = "localhost".to_string();
        assert!(build_socket_addr(&bad).is_err());
    }
}
