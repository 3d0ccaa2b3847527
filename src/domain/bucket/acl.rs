//! Per-bucket access control list

use crate::domain::key::ApiKey;
use crate::domain::DomainError;

/// Ordered set of API keys allowed on a bucket
///
/// An empty list means global access. Lookups are linear scans; lists hold
/// tens of keys, not millions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessControlList {
    keys: Vec<ApiKey>,
}

impl AccessControlList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key, keeping insertion order
    pub fn allow(&mut self, key: &ApiKey) -> Result<(), DomainError> {
        key.validate()?;

        if self.contains(key) {
            return Err(DomainError::already_present(format!(
                "API key {} already allowed",
                key.for_log()
            )));
        }

        self.keys.push(key.clone());
        Ok(())
    }

    /// Remove a key; the survivors keep their relative order
    pub fn revoke(&mut self, key: &ApiKey) -> Result<(), DomainError> {
        key.validate()?;

        let before = self.keys.len();
        self.keys.retain(|k| k != key);

        if self.keys.len() == before {
            return Err(DomainError::not_found(format!(
                "API key {} not in access list",
                key.for_log()
            )));
        }

        Ok(())
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Whether `key` may use the bucket
    pub fn allows(&self, key: &ApiKey) -> Result<bool, DomainError> {
        key.validate()?;

        if self.keys.is_empty() {
            return Ok(true);
        }

        Ok(self.contains(key))
    }

    pub fn contains(&self, key: &ApiKey) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ApiKey> {
        self.keys.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: u8) -> ApiKey {
        ApiKey::new(format!("{:0>36}", n))
    }

    #[test]
    fn test_allow_keeps_insertion_order() {
        let mut acl = AccessControlList::new();
        acl.allow(&key(3)).unwrap();
        acl.allow(&key(1)).unwrap();
        acl.allow(&key(2)).unwrap();

        let order: Vec<_> = acl.iter().cloned().collect();
        assert_eq!(order, vec![key(3), key(1), key(2)]);
    }

    #[test]
    fn test_revoke_preserves_survivor_order() {
        let mut acl = AccessControlList::new();
        for n in 1..=4 {
            acl.allow(&key(n)).unwrap();
        }

        acl.revoke(&key(2)).unwrap();

        let order: Vec<_> = acl.iter().cloned().collect();
        assert_eq!(order, vec![key(1), key(3), key(4)]);
    }

    #[test]
    fn test_invalid_key_rejected_everywhere() {
        let mut acl = AccessControlList::new();
        let bad = ApiKey::from("nope");

        assert!(matches!(acl.allow(&bad), Err(DomainError::InvalidKey { .. })));
        assert!(matches!(acl.revoke(&bad), Err(DomainError::InvalidKey { .. })));
        assert!(matches!(acl.allows(&bad), Err(DomainError::InvalidKey { .. })));
        assert!(acl.is_empty());
    }

    #[test]
    fn test_allows_when_empty() {
        let acl = AccessControlList::new();
        assert!(acl.allows(&key(9)).unwrap());
    }
}
