//! HTTP error type with terse plain-text bodies

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::domain::{AddBucketError, DomainError, KeyValidationError};

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = match &err {
            DomainError::InvalidKey { .. } => StatusCode::BAD_REQUEST,
            DomainError::AlreadyPresent { .. } => StatusCode::CONFLICT,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            DomainError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            DomainError::Transport { .. } => StatusCode::BAD_GATEWAY,
            DomainError::Configuration { .. } | DomainError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self::new(status, err.to_string())
    }
}

impl From<KeyValidationError> for ApiError {
    fn from(err: KeyValidationError) -> Self {
        DomainError::from(err).into()
    }
}

impl From<AddBucketError> for ApiError {
    fn from(err: AddBucketError) -> Self {
        DomainError::from(err).into()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_domain_error_conversion() {
        let cases = [
            (DomainError::invalid_key("bad"), StatusCode::BAD_REQUEST),
            (DomainError::already_present("dup"), StatusCode::CONFLICT),
            (DomainError::not_found("gone"), StatusCode::NOT_FOUND),
            (DomainError::unauthorized("who"), StatusCode::UNAUTHORIZED),
            (
                DomainError::timeout(Duration::from_millis(5)),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (DomainError::transport("reset"), StatusCode::BAD_GATEWAY),
            (
                DomainError::configuration("nope"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (DomainError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (domain_err, expected) in cases {
            let api_err: ApiError = domain_err.into();
            assert_eq!(api_err.status, expected);
        }
    }

    #[test]
    fn test_key_validation_error_is_bad_request() {
        let api_err: ApiError = KeyValidationError::EmptyKey.into();
        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_message_kept() {
        let api_err: ApiError = DomainError::not_found("Bucket 'x' not found").into();
        assert!(api_err.message.contains("Bucket 'x' not found"));
    }
}
