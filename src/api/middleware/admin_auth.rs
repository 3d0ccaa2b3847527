//! Admin authentication
//!
//! Admin routes require the `X-AdminKey` header to carry the daemon's admin
//! secret.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::DomainError;

/// Header carrying the admin secret
pub const ADMIN_KEY_HEADER: &str = "x-adminkey";

/// Extractor that requires the admin secret
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(ADMIN_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if presented.is_empty() || !constant_time_compare(presented, state.registry.admin_key()) {
            warn!(
                method = %parts.method,
                uri = %parts.uri,
                "Rejected admin request with invalid admin key"
            );
            return Err(DomainError::unauthorized("Invalid Admin Key").into());
        }

        Ok(RequireAdmin)
    }
}

/// Constant-time string comparison to prevent timing attacks
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
