//! API key management admin endpoints

use axum::extract::{Path, State};
use tracing::info;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ACL_CHANGED, ApiError};
use crate::domain::{ApiKey, Key};

use super::buckets::find_bucket;

/// A key may only be granted if clients could present it
fn granted_key(state: &AppState, key: String) -> Result<ApiKey, ApiError> {
    let api_key = ApiKey::new(key);
    api_key.validate_with(state.api_key_policy.as_ref())?;
    Ok(api_key)
}

/// /create/
///
/// The new key is not allowed anywhere yet; buckets with an empty access
/// list already admit it.
pub async fn create_api_key(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<String, ApiError> {
    let api_key = state.generator.generate()?;

    info!(api_key = %api_key.for_log(), "Created API key");
    Ok(api_key.as_str().to_string())
}

/// /allow/{key}/
pub async fn allow_everywhere(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(key): Path<String>,
) -> Result<&'static str, ApiError> {
    let api_key = granted_key(&state, key)?;
    let changed = state.registry.allow_api_key(&api_key)?;

    info!(api_key = %api_key.for_log(), buckets = changed, "Allowed API key globally");
    Ok(ACL_CHANGED)
}

/// /revoke/{key}/
pub async fn revoke_everywhere(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(key): Path<String>,
) -> Result<&'static str, ApiError> {
    let api_key = ApiKey::new(key);
    let changed = state.registry.revoke_api_key(&api_key)?;

    info!(api_key = %api_key.for_log(), buckets = changed, "Revoked API key globally");
    Ok(ACL_CHANGED)
}

/// /allow/{key}/{bucket}/
pub async fn allow_on_bucket(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path((key, bucket)): Path<(String, String)>,
) -> Result<&'static str, ApiError> {
    let (api_key, bucket) = (granted_key(&state, key)?, Key::new(bucket));
    find_bucket(&state, &bucket)?
        .write()
        .allow_api_key(&api_key)?;

    info!(api_key = %api_key.for_log(), bucket = %bucket, "Allowed API key on bucket");
    Ok(ACL_CHANGED)
}

/// /revoke/{key}/{bucket}/
pub async fn revoke_on_bucket(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path((key, bucket)): Path<(String, String)>,
) -> Result<&'static str, ApiError> {
    let (api_key, bucket) = (ApiKey::new(key), Key::new(bucket));
    find_bucket(&state, &bucket)?
        .write()
        .revoke_api_key(&api_key)?;

    info!(api_key = %api_key.for_log(), bucket = %bucket, "Revoked API key on bucket");
    Ok(ACL_CHANGED)
}
