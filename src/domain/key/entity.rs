//! Opaque identifier types

use super::validation::{
    validate_key, ApiKeyPolicy, KeyValidationError, LengthPolicy, API_KEY_LENGTH,
};

/// Name of a bucket or of a record inside a bucket
///
/// Keys are not validated on construction: they arrive from the transport
/// as-is and every operation that takes one rejects an empty key before
/// touching state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(String);

impl Key {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(), KeyValidationError> {
        validate_key(&self.0)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bearer token granting access to a bucket's client checks
///
/// Two keys are equal when their strings are equal. Validity is decided by
/// [`LengthPolicy`] unless a caller supplies another [`ApiKeyPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(), KeyValidationError> {
        LengthPolicy.validate(&self.0)
    }

    pub fn validate_with(&self, policy: &dyn ApiKeyPolicy) -> Result<(), KeyValidationError> {
        policy.validate(&self.0)
    }

    /// Display form safe for logs: `abcd..wxyz..123456`
    ///
    /// Reveals the first 4 characters, characters 20 to 24 and the last 6.
    /// Tokens shorter than a full API key are rejected instead of sliced.
    pub fn obfuscated(&self) -> Result<String, KeyValidationError> {
        let chars: Vec<char> = self.0.chars().collect();

        if chars.len() < API_KEY_LENGTH {
            return Err(KeyValidationError::TooShortToObfuscate(chars.len()));
        }

        let head: String = chars[..4].iter().collect();
        let middle: String = chars[20..24].iter().collect();
        let tail: String = chars[chars.len() - 6..].iter().collect();

        Ok(format!("{}..{}..{}", head, middle, tail))
    }

    /// Obfuscated form, or a fixed marker for malformed tokens
    pub fn for_log(&self) -> String {
        self.obfuscated()
            .unwrap_or_else(|_| format!("<invalid:{}>", self.0.chars().count()))
    }
}

impl From<&str> for ApiKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ApiKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::key::UuidPolicy;

    const GOOD: &str = "6ba7b811-9dad-11d1-80b4-00c04fd430c8";

    #[test]
    fn test_key_validity() {
        assert!(Key::from("soap").is_valid());
        assert!(!Key::from("").is_valid());
        assert_eq!(Key::from("").validate(), Err(KeyValidationError::EmptyKey));
    }

    #[test]
    fn test_api_key_validity() {
        assert!(ApiKey::from(GOOD).is_valid());
        assert!(!ApiKey::from("too-short").is_valid());
        assert!(!ApiKey::from("").is_valid());
    }

    #[test]
    fn test_api_key_validate_with_policy() {
        let fake = ApiKey::new("x".repeat(36));
        assert!(fake.is_valid());
        assert!(fake.validate_with(&UuidPolicy).is_err());
        assert!(ApiKey::from(GOOD).validate_with(&UuidPolicy).is_ok());
    }

    #[test]
    fn test_api_key_equality_is_exact() {
        assert_eq!(ApiKey::from(GOOD), ApiKey::from(GOOD));
        assert_ne!(ApiKey::from(GOOD), ApiKey::from(GOOD.to_uppercase()));
    }

    #[test]
    fn test_obfuscated() {
        let key = ApiKey::from(GOOD);
        assert_eq!(key.obfuscated().unwrap(), "6ba7..0b4-..d430c8");
    }

    #[test]
    fn test_obfuscated_reveals_tail_of_long_tokens() {
        let key = ApiKey::new(format!("{}wxyz", GOOD));
        assert_eq!(key.obfuscated().unwrap(), "6ba7..0b4-..c8wxyz");
    }

    #[test]
    fn test_obfuscated_rejects_short_keys() {
        assert_eq!(
            ApiKey::from("abc").obfuscated(),
            Err(KeyValidationError::TooShortToObfuscate(3))
        );
        assert_eq!(
            ApiKey::from("").obfuscated(),
            Err(KeyValidationError::TooShortToObfuscate(0))
        );
    }

    #[test]
    fn test_obfuscated_multibyte_does_not_panic() {
        let key = ApiKey::new("é".repeat(36));
        assert_eq!(key.obfuscated().unwrap(), "éééé..éééé..éééééé");
    }

    #[test]
    fn test_for_log() {
        assert_eq!(ApiKey::from("abc").for_log(), "<invalid:3>");
        assert_eq!(ApiKey::from(GOOD).for_log(), "6ba7..0b4-..d430c8");
    }
}
