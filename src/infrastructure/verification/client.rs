//! Timing-safe verification client
//!
//! Every check can run under two independent policies:
//! - a hard deadline (`timeout`): the check races a timer and loses with a
//!   timeout error if the remote is too slow
//! - a floor latency (`at_least`): the call is padded so it never returns
//!   sooner than `at_least`, whatever path produced the answer
//!
//! The floor keeps an observer from telling a fast local rejection from a
//! full round trip by timing alone.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::{sleep, sleep_until, Instant};
use tracing::{debug, warn};

use super::transport::{CheckTransport, HttpCheckTransport, TlsOptions};
use crate::domain::{ApiKey, DomainError};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_AT_LEAST: Duration = Duration::from_secs(1);
/// Delay before a raced check fires its request
pub const DEFAULT_PRE_DELAY: Duration = Duration::from_millis(50);

/// Deadline and floor applied by a [`VerificationClient`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientTimings {
    pub timeout: Duration,
    pub at_least: Duration,
    pub pre_delay: Duration,
}

impl Default for ClientTimings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            at_least: DEFAULT_AT_LEAST,
            pre_delay: DEFAULT_PRE_DELAY,
        }
    }
}

impl ClientTimings {
    pub fn new(timeout: Duration, at_least: Duration) -> Self {
        Self {
            timeout,
            at_least,
            ..Self::default()
        }
    }

    pub fn with_pre_delay(mut self, pre_delay: Duration) -> Self {
        self.pre_delay = pre_delay;
        self
    }

    /// The deadline must leave room for the floor
    ///
    /// With `timeout <= at_least` a timed-out call could return before the
    /// floor, so such configurations are refused.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.timeout <= self.at_least {
            return Err(DomainError::configuration(format!(
                "timeout ({}ms) must be greater than at_least ({}ms)",
                self.timeout.as_millis(),
                self.at_least.as_millis()
            )));
        }

        Ok(())
    }
}

/// Client for a remote authorization daemon
///
/// Read-only after construction; clone it or share it by reference.
#[derive(Debug, Clone)]
pub struct VerificationClient {
    transport: Arc<dyn CheckTransport>,
    timings: ClientTimings,
}

impl VerificationClient {
    pub fn new(
        transport: Arc<dyn CheckTransport>,
        timings: ClientTimings,
    ) -> Result<Self, DomainError> {
        timings.validate()?;

        Ok(Self { transport, timings })
    }

    /// Client talking HTTP(S) to the daemon API root at `base_url`
    pub fn http(
        base_url: &str,
        api_key: Option<ApiKey>,
        tls: &TlsOptions,
        timings: ClientTimings,
    ) -> Result<Self, DomainError> {
        let mut transport = HttpCheckTransport::with_tls(base_url, tls)?;
        if let Some(api_key) = api_key {
            transport = transport.with_api_key(api_key);
        }

        Self::new(Arc::new(transport), timings)
    }

    pub fn timings(&self) -> &ClientTimings {
        &self.timings
    }

    /// Whether the daemon answers its status probe
    pub async fn is_online(&self) -> bool {
        match self.transport.status().await {
            Ok(online) => online,
            Err(e) => {
                debug!(error = %e, "Status probe failed");
                false
            }
        }
    }

    /// Bare round trip, no deadline and no floor
    pub async fn check(&self, bucket: &str, key: &str) -> Result<bool, DomainError> {
        self.transport.check(bucket, key).await
    }

    /// Round trip raced against `timeout`
    pub async fn check_with_timeout(&self, bucket: &str, key: &str) -> Result<bool, DomainError> {
        self.race(bucket, key).await
    }

    /// Round trip padded to take at least `at_least`
    pub async fn auth_check(&self, bucket: &str, key: &str) -> Result<bool, DomainError> {
        let started = Instant::now();
        let result = self.transport.check(bucket, key).await;

        sleep_until(started + self.timings.at_least).await;
        result
    }

    /// Round trip raced against `timeout`, with answers padded to `at_least`
    ///
    /// A timed-out call returns as soon as the deadline fires; since
    /// `timeout > at_least` that is already past the floor.
    pub async fn auth_check_with_timeout(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<bool, DomainError> {
        let started = Instant::now();

        match self.race(bucket, key).await {
            Err(e) if e.is_timeout() => Err(e),
            result => {
                sleep_until(started + self.timings.at_least).await;
                result
            }
        }
    }

    /// Run one check as a background task and race it against the deadline
    ///
    /// The task delivers into a single-use channel. If the deadline wins the
    /// task is aborted, dropping its in-flight request.
    async fn race(&self, bucket: &str, key: &str) -> Result<bool, DomainError> {
        let started = Instant::now();
        let (tx, rx) = oneshot::channel();

        let transport = Arc::clone(&self.transport);
        let pre_delay = self.timings.pre_delay;
        let (task_bucket, task_key) = (bucket.to_string(), key.to_string());

        let task = tokio::spawn(async move {
            sleep(pre_delay).await;
            let result = transport.check(&task_bucket, &task_key).await;
            // The receiver is gone if the deadline already fired
            let _ = tx.send(result);
        });

        tokio::select! {
            received = rx => received.unwrap_or_else(|_| {
                Err(DomainError::internal("verification task ended without an answer"))
            }),
            _ = sleep(self.timings.timeout) => {
                task.abort();
                warn!(
                    bucket = %bucket,
                    timeout_ms = self.timings.timeout.as_millis() as u64,
                    "Verification timed out"
                );
                Err(DomainError::timeout(started.elapsed()))
            }
        }
    }
}
