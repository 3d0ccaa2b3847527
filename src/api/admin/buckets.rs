//! Bucket management admin endpoints

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tracing::info;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ACTION_DONE, ApiError};
use crate::domain::{ApiKey, ApiKeyPolicy, Bucket, DomainError, Key, SharedBucket};

/// Options accepted by `/set/{bucket}/`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BucketOptions {
    pub enable: Option<String>,
    pub disable: Option<String>,
    pub allow: Option<String>,
    pub revoke: Option<String>,
}

impl BucketOptions {
    /// Reject malformed keys before anything is written
    ///
    /// A granted key must pass `policy`, the same rule clients are held to.
    pub fn validate(&self, policy: &dyn ApiKeyPolicy) -> Result<(), DomainError> {
        if let Some(key) = &self.allow {
            ApiKey::new(key.as_str()).validate_with(policy)?;
        }
        if let Some(key) = &self.revoke {
            ApiKey::new(key.as_str()).validate()?;
        }

        Ok(())
    }

    /// Apply the flags in a fixed order: enable, disable, allow, revoke
    ///
    /// Allowing a key twice or revoking an absent one is not an error here;
    /// a malformed key is, and leaves the bucket untouched.
    pub fn apply(
        &self,
        bucket: &mut Bucket,
        policy: &dyn ApiKeyPolicy,
    ) -> Result<(), DomainError> {
        self.validate(policy)?;

        if is_yes(&self.enable) {
            bucket.enable();
            info!(bucket = %bucket.name(), "Enabled bucket");
        }

        if is_yes(&self.disable) {
            bucket.disable();
            info!(bucket = %bucket.name(), "Disabled bucket");
        }

        if let Some(key) = &self.allow {
            let key = ApiKey::new(key.as_str());
            ignore_idempotent(bucket.allow_api_key(&key))?;
            info!(bucket = %bucket.name(), api_key = %key.for_log(), "Allowed API key on bucket");
        }

        if let Some(key) = &self.revoke {
            let key = ApiKey::new(key.as_str());
            ignore_idempotent(bucket.revoke_api_key(&key))?;
            info!(bucket = %bucket.name(), api_key = %key.for_log(), "Revoked API key on bucket");
        }

        Ok(())
    }
}

fn is_yes(flag: &Option<String>) -> bool {
    flag.as_deref() == Some("yes")
}

fn ignore_idempotent(result: Result<(), DomainError>) -> Result<(), DomainError> {
    match result {
        Err(DomainError::AlreadyPresent { .. }) | Err(DomainError::NotFound { .. }) => Ok(()),
        other => other,
    }
}

/// Look up a bucket or answer 404
pub(super) fn find_bucket(state: &AppState, name: &Key) -> Result<SharedBucket, ApiError> {
    state
        .registry
        .get_bucket(name)
        .ok_or_else(|| ApiError::not_found("Unknown Bucket"))
}

/// /add/{bucket}/
pub async fn add_bucket(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(bucket): Path<String>,
) -> Result<&'static str, ApiError> {
    let name = Key::new(bucket);
    state.registry.add_bucket(&name)?;

    info!(bucket = %name, "Added bucket");
    Ok(ACTION_DONE)
}

/// /set/{bucket}/?enable=yes&disable=yes&allow=<key>&revoke=<key>
pub async fn set_bucket(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(bucket): Path<String>,
    Query(options): Query<BucketOptions>,
) -> Result<&'static str, ApiError> {
    let name = Key::new(bucket);
    let policy = state.api_key_policy.as_ref();
    options.validate(policy)?;

    let shared = state.registry.set_bucket(&name)?;
    options.apply(&mut shared.write(), policy)?;

    info!(bucket = %name, "Set bucket");
    Ok(ACTION_DONE)
}

/// /del/{bucket}/
pub async fn del_bucket(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(bucket): Path<String>,
) -> Result<&'static str, ApiError> {
    let name = Key::new(bucket);
    state.registry.del_bucket(&name)?;

    info!(bucket = %name, "Deleted bucket");
    Ok(ACTION_DONE)
}

/// /enable/{bucket}/
pub async fn enable_bucket(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(bucket): Path<String>,
) -> Result<&'static str, ApiError> {
    let name = Key::new(bucket);
    find_bucket(&state, &name)?.write().enable();

    info!(bucket = %name, "Enabled bucket");
    Ok(ACTION_DONE)
}

/// /disable/{bucket}/
pub async fn disable_bucket(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(bucket): Path<String>,
) -> Result<&'static str, ApiError> {
    let name = Key::new(bucket);
    find_bucket(&state, &name)?.write().disable();

    info!(bucket = %name, "Disabled bucket");
    Ok(ACTION_DONE)
}
