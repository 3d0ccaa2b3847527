//! Wire side of the verification client

use async_trait::async_trait;
use reqwest::{Certificate, StatusCode, Url};
use tracing::debug;

use crate::domain::{ApiKey, DomainError};

/// Header carrying the client API key
const API_KEY_HEADER: &str = "X-ApiKey";

/// Body a daemon sends for an authorized check
const CHECK_YES: &str = "yes";
/// Body a daemon sends from its status endpoint
const STATUS_OK: &str = "ok";

/// One round trip to a remote daemon (for mocking)
#[async_trait]
pub trait CheckTransport: Send + Sync + std::fmt::Debug {
    /// Ask whether `key` exists in `bucket`
    ///
    /// A refusal of any kind is `Ok(false)`; only a failed round trip is an
    /// error.
    async fn check(&self, bucket: &str, key: &str) -> Result<bool, DomainError>;

    /// Whether the remote answers its status probe
    async fn status(&self) -> Result<bool, DomainError>;
}

/// TLS settings for talking to a daemon behind HTTPS
#[derive(Debug, Clone, Default)]
pub struct TlsOptions {
    /// Extra PEM root certificate, e.g. a self-signed daemon certificate
    pub ca_cert_pem: Option<Vec<u8>>,
    /// Skip certificate verification entirely
    pub insecure: bool,
}

/// HTTP transport using reqwest
#[derive(Debug, Clone)]
pub struct HttpCheckTransport {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<ApiKey>,
}

impl HttpCheckTransport {
    /// `base_url` is the daemon's API root, e.g. `http://127.0.0.1:8080/api/v1`
    pub fn new(base_url: &str) -> Result<Self, DomainError> {
        Self::with_tls(base_url, &TlsOptions::default())
    }

    pub fn with_tls(base_url: &str, tls: &TlsOptions) -> Result<Self, DomainError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DomainError::configuration(format!("Invalid base URL '{}': {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(DomainError::configuration(format!(
                "Base URL '{}' cannot carry a path",
                base_url
            )));
        }

        let mut builder = reqwest::Client::builder().danger_accept_invalid_certs(tls.insecure);

        if let Some(pem) = &tls.ca_cert_pem {
            let cert = Certificate::from_pem(pem)
                .map_err(|e| DomainError::configuration(format!("Invalid CA certificate: {}", e)))?;
            builder = builder.add_root_certificate(cert);
        }

        let client = builder
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            api_key: None,
        })
    }

    /// Send `api_key` in the `X-ApiKey` header of every request
    pub fn with_api_key(mut self, api_key: ApiKey) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Build `<base>/<segments..>/`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();

        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments).push("");
        }

        url
    }

    async fn get(&self, url: Url) -> Result<(StatusCode, String), DomainError> {
        let mut request = self.client.get(url);
        if let Some(api_key) = &self.api_key {
            request = request.header(API_KEY_HEADER, api_key.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::transport(format!("Failed to read response: {}", e)))?;

        Ok((status, body))
    }
}

#[async_trait]
impl CheckTransport for HttpCheckTransport {
    async fn check(&self, bucket: &str, key: &str) -> Result<bool, DomainError> {
        let url = self.endpoint(&["check", bucket, key]);
        let (status, body) = self.get(url).await?;

        debug!(bucket = %bucket, status = %status, "Verification round trip finished");

        Ok(status == StatusCode::OK && body.eq_ignore_ascii_case(CHECK_YES))
    }

    async fn status(&self) -> Result<bool, DomainError> {
        let url = self.endpoint(&["status"]);
        let (status, body) = self.get(url).await?;

        Ok(status == StatusCode::OK && body.eq_ignore_ascii_case(STATUS_OK))
    }
}
