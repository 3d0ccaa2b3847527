//! Record management admin endpoints

use axum::extract::{Path, State};
use tracing::info;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ACTION_DONE, ApiError};
use crate::domain::Key;

use super::buckets::find_bucket;

/// /add/{bucket}/{key}/
pub async fn add_record(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path((bucket, key)): Path<(String, String)>,
) -> Result<&'static str, ApiError> {
    let (bucket, key) = (Key::new(bucket), Key::new(key));
    key.validate()?;

    if !find_bucket(&state, &bucket)?.write().add(&key) {
        return Err(ApiError::conflict("Key Already Present"));
    }

    info!(bucket = %bucket, key = %key, "Added record");
    Ok(ACTION_DONE)
}

/// /set/{bucket}/{key}/
pub async fn set_record(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path((bucket, key)): Path<(String, String)>,
) -> Result<&'static str, ApiError> {
    let (bucket, key) = (Key::new(bucket), Key::new(key));
    key.validate()?;

    find_bucket(&state, &bucket)?.write().set(&key);

    info!(bucket = %bucket, key = %key, "Set record");
    Ok(ACTION_DONE)
}

/// /del/{bucket}/{key}/
pub async fn del_record(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path((bucket, key)): Path<(String, String)>,
) -> Result<&'static str, ApiError> {
    let (bucket, key) = (Key::new(bucket), Key::new(key));
    key.validate()?;

    if !find_bucket(&state, &bucket)?.write().del(&key) {
        return Err(ApiError::not_found("Unknown Key"));
    }

    info!(bucket = %bucket, key = %key, "Deleted record");
    Ok(ACTION_DONE)
}
