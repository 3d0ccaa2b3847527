//! Client commands - talk to a running daemon, or generate keys offline

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use tracing::debug;

use crate::config::{AppConfig, ClientConfig};
use crate::domain::ApiKey;
use crate::infrastructure::api_key::ApiKeyGenerator;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::verification::{TlsOptions, VerificationClient};

/// Connection flags shared by the client commands
#[derive(Args, Debug, Clone, Default)]
pub struct ClientArgs {
    /// Daemon API root, e.g. http://127.0.0.1:8080/api/v1
    #[arg(long)]
    pub url: Option<String>,

    /// API key sent in the X-ApiKey header
    #[arg(long)]
    pub api_key: Option<String>,

    /// PEM file with an extra root certificate
    #[arg(long)]
    pub ca_cert: Option<PathBuf>,

    /// Accept any server certificate
    #[arg(long)]
    pub insecure: bool,

    /// Hard deadline for one check, in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Minimum duration of an auth check, in milliseconds
    #[arg(long)]
    pub at_least_ms: Option<u64>,
}

impl ClientArgs {
    pub fn apply(&self, config: &mut ClientConfig) {
        if let Some(url) = &self.url {
            config.base_url = url.clone();
        }
        if let Some(api_key) = &self.api_key {
            config.api_key = Some(api_key.clone());
        }
        if let Some(ca_cert) = &self.ca_cert {
            config.ca_cert = Some(ca_cert.display().to_string());
        }
        if self.insecure {
            config.insecure = true;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        if let Some(at_least_ms) = self.at_least_ms {
            config.at_least_ms = at_least_ms;
        }
    }
}

/// Which of the client's check policies to run
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckMode {
    /// Bare round trip
    Plain,
    /// Round trip under the deadline
    Timeout,
    /// Round trip padded to the floor latency
    Auth,
    /// Deadline and floor together
    #[default]
    AuthTimeout,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub client: ClientArgs,

    #[arg(long, value_enum, default_value_t = CheckMode::default())]
    pub mode: CheckMode,

    pub bucket: String,

    pub key: String,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateKeyArgs {
    /// Namespace mixed into the keys (defaults to auth.namespace)
    #[arg(long)]
    pub ns: Option<String>,

    /// How many keys to print
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,
}

/// Run one check and print `yes` or `no`; returns the answer
pub async fn run_check(args: CheckArgs) -> anyhow::Result<bool> {
    let config = load_config(&args.client)?;
    let client = build_client(&config.client).await?;

    let (bucket, key) = (args.bucket.as_str(), args.key.as_str());
    let found = match args.mode {
        CheckMode::Plain => client.check(bucket, key).await?,
        CheckMode::Timeout => client.check_with_timeout(bucket, key).await?,
        CheckMode::Auth => client.auth_check(bucket, key).await?,
        CheckMode::AuthTimeout => client.auth_check_with_timeout(bucket, key).await?,
    };

    debug!(bucket, mode = ?args.mode, found, "Check finished");
    println!("{}", if found { "yes" } else { "no" });
    Ok(found)
}

/// Probe the daemon and print `online` or `offline`; returns the answer
pub async fn run_status(args: ClientArgs) -> anyhow::Result<bool> {
    let config = load_config(&args)?;
    let client = build_client(&config.client).await?;

    let online = client.is_online().await;
    println!("{}", if online { "online" } else { "offline" });
    Ok(online)
}

/// Print `count` fresh API keys, one per line
pub fn run_generate_key(args: GenerateKeyArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let namespace = args.ns.unwrap_or(config.auth.namespace);
    let generator = ApiKeyGenerator::new(namespace);

    for _ in 0..args.count {
        println!("{}", generator.generate()?);
    }

    Ok(())
}

fn load_config(args: &ClientArgs) -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    args.apply(&mut config.client);
    init_logging(&config.logging)?;

    Ok(config)
}

/// Build the verification client described by `config`
pub async fn build_client(config: &ClientConfig) -> anyhow::Result<VerificationClient> {
    let ca_cert_pem = match &config.ca_cert {
        Some(path) => Some(
            tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read CA certificate '{}'", path))?,
        ),
        None => None,
    };

    let tls = TlsOptions {
        ca_cert_pem,
        insecure: config.insecure,
    };
    let api_key = config.api_key.as_deref().map(ApiKey::from);

    Ok(VerificationClient::http(
        &config.base_url,
        api_key,
        &tls,
        config.timings(),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_apply_client_overrides() {
        let mut config = ClientConfig::default();
        let args = ClientArgs {
            url: Some("https://auth.example:8443/api/v1".to_string()),
            api_key: Some("6ba7b811-9dad-11d1-80b4-00c04fd430c8".to_string()),
            insecure: true,
            timeout_ms: Some(300),
            at_least_ms: Some(100),
            ..ClientArgs::default()
        };

        args.apply(&mut config);

        assert_eq!(config.base_url, "https://auth.example:8443/api/v1");
        assert!(config.api_key.is_some());
        assert!(config.insecure);
        assert_eq!(config.timings().timeout, Duration::from_millis(300));
        assert_eq!(config.timings().at_least, Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_build_client_rejects_inverted_timings() {
        let config = ClientConfig {
            timeout_ms: 100,
            at_least_ms: 100,
            ..ClientConfig::default()
        };

        assert!(build_client(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_build_client_missing_ca_cert() {
        let config = ClientConfig {
            ca_cert: Some("/nonexistent/authd-ca.pem".to_string()),
            ..ClientConfig::default()
        };

        let err = build_client(&config).await.unwrap_err();
        assert!(err.to_string().contains("CA certificate"));
    }

    #[tokio::test]
    async fn test_built_client_sends_api_key() {
        let server = MockServer::start().await;
        let api_key = "6ba7b811-9dad-11d1-80b4-00c04fd430c8";

        Mock::given(method("GET"))
            .and(path("/api/v1/check/soap/bar/"))
            .and(header("x-apikey", api_key))
            .respond_with(ResponseTemplate::new(200).set_body_string("yes"))
            .mount(&server)
            .await;

        let config = ClientConfig {
            base_url: format!("{}/api/v1", server.uri()),
            api_key: Some(api_key.to_string()),
            ..ClientConfig::default()
        };

        let client = build_client(&config).await.unwrap();
        assert!(client.check("soap", "bar").await.unwrap());
    }
}
