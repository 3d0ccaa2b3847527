//! Client endpoints: record checks and bucket emptiness

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::debug;

use crate::api::middleware::RequireApiKey;
use crate::api::state::AppState;
use crate::api::types::{BUCKET_EMPTY, BUCKET_NOT_EMPTY, KEY_FOUND, KEY_NOT_FOUND};
use crate::domain::{ApiKey, Key, SharedBucket};

type TextResponse = (StatusCode, &'static str);

const NOT_FOUND: TextResponse = (StatusCode::NOT_FOUND, KEY_NOT_FOUND);

/// GET /api/v1/check/{bucket}/{key}/
///
/// An unknown bucket, a denied API key and a missing record all answer
/// `404 no`, so a client cannot probe which buckets exist.
pub async fn check_key(
    State(state): State<AppState>,
    RequireApiKey(api_key): RequireApiKey,
    Path((bucket, key)): Path<(String, String)>,
) -> TextResponse {
    let Some(shared) = visible_bucket(&state, &api_key, &Key::new(bucket)) else {
        return NOT_FOUND;
    };

    if shared.read().check(&Key::new(key)) {
        (StatusCode::OK, KEY_FOUND)
    } else {
        NOT_FOUND
    }
}

/// GET /api/v1/bucket/{bucket}/
///
/// Only enabled buckets are listed to clients.
pub async fn bucket_info(
    State(state): State<AppState>,
    RequireApiKey(api_key): RequireApiKey,
    Path(bucket): Path<String>,
) -> TextResponse {
    let Some(shared) = visible_bucket(&state, &api_key, &Key::new(bucket)) else {
        return NOT_FOUND;
    };

    let bucket = shared.read();
    if !bucket.is_enabled() {
        return NOT_FOUND;
    }

    if bucket.is_empty() {
        (StatusCode::OK, BUCKET_EMPTY)
    } else {
        (StatusCode::OK, BUCKET_NOT_EMPTY)
    }
}

/// The bucket called `name`, if it exists and its access list admits `api_key`
fn visible_bucket(state: &AppState, api_key: &ApiKey, name: &Key) -> Option<SharedBucket> {
    let shared = state.registry.get_bucket(name)?;

    let allowed = shared.read().allowed(api_key).unwrap_or(false);
    if !allowed {
        debug!(bucket = %name, api_key = %api_key.for_log(), "API key denied on bucket");
        return None;
    }

    Some(shared)
}
