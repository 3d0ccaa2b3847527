use thiserror::Error;

use super::key::KeyValidationError;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid key: {message}")]
    InvalidKey { message: String },

    #[error("Already present: {message}")]
    AlreadyPresent { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Time out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::InvalidKey {
            message: message.into(),
        }
    }

    pub fn already_present(message: impl Into<String>) -> Self {
        Self::AlreadyPresent {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn timeout(elapsed: std::time::Duration) -> Self {
        Self::Timeout {
            elapsed_ms: elapsed.as_millis() as u64,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the error came from the verification deadline firing
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

impl From<KeyValidationError> for DomainError {
    fn from(err: KeyValidationError) -> Self {
        Self::invalid_key(err.to_string())
    }
}
