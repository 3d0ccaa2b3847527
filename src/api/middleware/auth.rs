//! Client API key authentication

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::{ApiKey, DomainError};

/// Header carrying the client API key
pub const API_KEY_HEADER: &str = "x-apikey";

/// Extractor that requires a well-formed API key
///
/// Whether the key may see a given bucket is decided by the bucket's
/// access list, not here.
#[derive(Debug, Clone)]
pub struct RequireApiKey(pub ApiKey);

impl FromRequestParts<AppState> for RequireApiKey {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let api_key = extract_api_key_from_headers(&parts.headers)?;

        if let Err(e) = api_key.validate_with(state.api_key_policy.as_ref()) {
            warn!(uri = %parts.uri, error = %e, "Rejected client request with invalid API key");
            return Err(invalid_api_key());
        }

        debug!(api_key = %api_key.for_log(), "Client API key accepted");
        Ok(RequireApiKey(api_key))
    }
}

fn invalid_api_key() -> ApiError {
    DomainError::unauthorized("Invalid Api Key").into()
}

fn extract_api_key_from_headers(headers: &HeaderMap) -> Result<ApiKey, ApiError> {
    let value = headers
        .get(API_KEY_HEADER)
        .ok_or_else(invalid_api_key)?;

    let key = value
        .to_str()
        .map_err(|_| ApiError::bad_request("Invalid X-ApiKey header encoding"))?;

    Ok(ApiKey::new(key.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_extract_api_key() {
        let mut headers = HeaderMap::new();
        headers.insert(
            API_KEY_HEADER,
            " 6ba7b811-9dad-11d1-80b4-00c04fd430c8 ".parse().unwrap(),
        );

        let key = extract_api_key_from_headers(&headers).unwrap();
        assert_eq!(key.as_str(), "6ba7b811-9dad-11d1-80b4-00c04fd430c8");
    }

    #[test]
    fn test_missing_api_key() {
        let headers = HeaderMap::new();

        let err = extract_api_key_from_headers(&headers).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }
}
