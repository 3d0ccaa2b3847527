//! Key and API key validation policies

use std::fmt::Debug;

use thiserror::Error;
use uuid::Uuid;

/// Length every API key must have (hyphenated UUID)
pub const API_KEY_LENGTH: usize = 36;

/// Errors that can occur during key validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KeyValidationError {
    #[error("key cannot be empty")]
    EmptyKey,

    #[error("API key must be {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("API key is not a valid UUID: {0}")]
    MalformedUuid(String),

    #[error("API key of {0} characters is too short to obfuscate")]
    TooShortToObfuscate(usize),
}

/// Validate a bucket or record key
///
/// Any non-empty string is accepted; there is no length cap and no
/// character restriction.
pub fn validate_key(key: &str) -> Result<(), KeyValidationError> {
    if key.is_empty() {
        return Err(KeyValidationError::EmptyKey);
    }

    Ok(())
}

/// Syntactic acceptance rule for API keys
///
/// A policy only decides whether a token is well formed. It never says
/// whether the token is trusted; that is the ACL's job.
pub trait ApiKeyPolicy: Send + Sync + Debug {
    fn validate(&self, key: &str) -> Result<(), KeyValidationError>;

    fn is_valid(&self, key: &str) -> bool {
        self.validate(key).is_ok()
    }
}

/// Accepts any token of exactly 36 characters.
///
/// This is a placeholder format check and intentionally weak: it does not
/// look at the characters at all. Use [`UuidPolicy`] where the structure
/// should be enforced.
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthPolicy;

impl ApiKeyPolicy for LengthPolicy {
    fn validate(&self, key: &str) -> Result<(), KeyValidationError> {
        let actual = key.chars().count();

        if actual != API_KEY_LENGTH {
            return Err(KeyValidationError::InvalidLength {
                expected: API_KEY_LENGTH,
                actual,
            });
        }

        Ok(())
    }
}

/// Accepts hyphenated UUID strings only
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidPolicy;

impl ApiKeyPolicy for UuidPolicy {
    fn validate(&self, key: &str) -> Result<(), KeyValidationError> {
        LengthPolicy.validate(key)?;

        Uuid::try_parse(key)
            .map(|_| ())
            .map_err(|e| KeyValidationError::MalformedUuid(e.to_string()))
    }
}
