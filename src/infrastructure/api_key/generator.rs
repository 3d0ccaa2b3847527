//! API Key generation
//!
//! Keys are name-based (v5) UUIDs derived from 4 random bytes and the
//! deployment namespace. The namespace is a discriminator, not a secret.

use rand::RngCore;
use uuid::Uuid;

use crate::domain::{ApiKey, DomainError};

/// Number of random bytes mixed into each key
const RANDOM_BYTES: usize = 4;

/// Generator for API keys within one namespace
#[derive(Debug, Clone)]
pub struct ApiKeyGenerator {
    namespace: String,
}

impl ApiKeyGenerator {
    /// Create a new API key generator
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Generate a new API key
    pub fn generate(&self) -> Result<ApiKey, DomainError> {
        let mut random_bytes = [0u8; RANDOM_BYTES];
        rand::thread_rng()
            .try_fill_bytes(&mut random_bytes)
            .map_err(|e| DomainError::internal(format!("Failed to read random bytes: {}", e)))?;

        Ok(self.derive(&random_bytes))
    }

    /// Derive the key for a known seed (deterministic, for tests and tooling)
    pub fn derive(&self, seed: &[u8]) -> ApiKey {
        let name = format!("{}.{}", hex::encode(seed), self.namespace);
        let uuid = Uuid::new_v5(&Uuid::NAMESPACE_URL, name.as_bytes());

        ApiKey::new(uuid.hyphenated().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UuidPolicy;

    #[test]
    fn test_generate_key() {
        let generator = ApiKeyGenerator::new("ns.test");
        let key = generator.generate().unwrap();

        assert_eq!(key.as_str().len(), 36);
        assert!(key.is_valid());
        assert!(key.validate_with(&UuidPolicy).is_ok());
    }

    #[test]
    fn test_key_uniqueness() {
        let generator = ApiKeyGenerator::new("ns.test");
        let key1 = generator.generate().unwrap();
        let key2 = generator.generate().unwrap();

        assert!(key1.is_valid());
        assert!(key2.is_valid());
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_derive_deterministic() {
        let generator = ApiKeyGenerator::new("ns.test");
        let seed = [0xde, 0xad, 0xbe, 0xef];

        assert_eq!(generator.derive(&seed), generator.derive(&seed));
    }

    #[test]
    fn test_derive_is_v5_of_hex_seed_and_namespace() {
        let generator = ApiKeyGenerator::new("ns.test");
        let seed = [0xde, 0xad, 0xbe, 0xef];

        let expected = Uuid::new_v5(&Uuid::NAMESPACE_URL, b"deadbeef.ns.test");
        let key = generator.derive(&seed);

        assert_eq!(key.as_str(), expected.hyphenated().to_string());
        assert_eq!(Uuid::parse_str(key.as_str()).unwrap().get_version_num(), 5);
    }

    #[test]
    fn test_namespace_discriminates() {
        let seed = [1, 2, 3, 4];
        let a = ApiKeyGenerator::new("ns.a").derive(&seed);
        let b = ApiKeyGenerator::new("ns.b").derive(&seed);

        assert_ne!(a, b);
    }
}
