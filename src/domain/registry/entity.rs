//! Registry of buckets

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use super::shared::SharedBucket;
use crate::domain::bucket::Bucket;
use crate::domain::key::{ApiKey, Key, KeyValidationError};
use crate::domain::DomainError;

/// Failure of [`Registry::add_bucket`]
#[derive(Debug, Error)]
pub enum AddBucketError {
    #[error(transparent)]
    InvalidKey(#[from] KeyValidationError),

    /// The name is taken; the bucket already registered under it is handed
    /// back untouched.
    #[error("bucket '{name}' already present")]
    AlreadyPresent { name: Key, existing: SharedBucket },
}

impl AddBucketError {
    pub fn existing(&self) -> Option<&SharedBucket> {
        match self {
            Self::AlreadyPresent { existing, .. } => Some(existing),
            Self::InvalidKey(_) => None,
        }
    }
}

impl From<AddBucketError> for DomainError {
    fn from(err: AddBucketError) -> Self {
        match err {
            AddBucketError::InvalidKey(e) => e.into(),
            e @ AddBucketError::AlreadyPresent { .. } => DomainError::already_present(e.to_string()),
        }
    }
}

/// Owner of every bucket plus the daemon-wide admin secret and the
/// namespace used to derive API keys
///
/// State lives for the lifetime of the process only.
#[derive(Debug)]
pub struct Registry {
    admin_key: String,
    namespace: String,
    buckets: RwLock<HashMap<Key, SharedBucket>>,
}

impl Registry {
    pub fn new(admin_key: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            admin_key: admin_key.into(),
            namespace: namespace.into(),
            buckets: RwLock::new(HashMap::new()),
        }
    }

    pub fn admin_key(&self) -> &str {
        &self.admin_key
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn buckets(&self) -> RwLockReadGuard<'_, HashMap<Key, SharedBucket>> {
        self.buckets.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn buckets_mut(&self) -> RwLockWriteGuard<'_, HashMap<Key, SharedBucket>> {
        self.buckets.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look a bucket up by name; unknown and invalid names both give `None`
    pub fn get_bucket(&self, name: &Key) -> Option<SharedBucket> {
        if !name.is_valid() {
            return None;
        }

        self.buckets().get(name).cloned()
    }

    /// Create a bucket, failing if the name is taken
    pub fn add_bucket(&self, name: &Key) -> Result<SharedBucket, AddBucketError> {
        name.validate()?;

        let mut buckets = self.buckets_mut();

        if let Some(existing) = buckets.get(name) {
            return Err(AddBucketError::AlreadyPresent {
                name: name.clone(),
                existing: existing.clone(),
            });
        }

        let bucket = SharedBucket::new(Bucket::new(name.clone()));
        buckets.insert(name.clone(), bucket.clone());
        Ok(bucket)
    }

    /// Get the bucket called `name`, creating it if needed
    pub fn set_bucket(&self, name: &Key) -> Result<SharedBucket, DomainError> {
        name.validate()?;

        let bucket = self
            .buckets_mut()
            .entry(name.clone())
            .or_insert_with(|| SharedBucket::new(Bucket::new(name.clone())))
            .clone();

        Ok(bucket)
    }

    /// Remove a bucket together with its records and access list
    pub fn del_bucket(&self, name: &Key) -> Result<(), DomainError> {
        name.validate()?;

        match self.buckets_mut().remove(name) {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(format!("Bucket '{}' not found", name))),
        }
    }

    /// Allow `key` on every registered bucket
    ///
    /// Buckets that already allow the key are skipped silently. Returns how
    /// many buckets changed.
    pub fn allow_api_key(&self, key: &ApiKey) -> Result<usize, DomainError> {
        key.validate()?;

        let buckets = self.buckets();
        let changed = buckets
            .values()
            .filter(|b| b.write().allow_api_key(key).is_ok())
            .count();

        Ok(changed)
    }

    /// Revoke `key` from every registered bucket
    ///
    /// Buckets that never had the key are skipped silently. Returns how many
    /// buckets changed.
    pub fn revoke_api_key(&self, key: &ApiKey) -> Result<usize, DomainError> {
        key.validate()?;

        let buckets = self.buckets();
        let changed = buckets
            .values()
            .filter(|b| b.write().revoke_api_key(key).is_ok())
            .count();

        Ok(changed)
    }

    pub fn len(&self) -> usize {
        self.buckets().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const K1: &str = "6ba7b811-9dad-11d1-80b4-00c04fd430c8";

    fn registry() -> Registry {
        Registry::new("change-me", "ns.test")
    }

    #[test]
    fn test_new_registry() {
        let r = registry();
        assert_eq!(r.admin_key(), "change-me");
        assert_eq!(r.namespace(), "ns.test");
        assert!(r.is_empty());
    }

    #[test]
    fn test_get_bucket() {
        let r = registry();
        assert!(r.get_bucket(&Key::from("x")).is_none());
        assert!(r.get_bucket(&Key::from("")).is_none());

        r.add_bucket(&Key::from("x")).unwrap();
        assert!(r.get_bucket(&Key::from("x")).is_some());
    }

    #[test]
    fn test_add_bucket_twice() {
        let r = registry();
        let name = Key::from("x");

        let first = r.add_bucket(&name).unwrap();
        first.write().set(&Key::from("bar"));

        let err = r.add_bucket(&name).unwrap_err();
        assert!(matches!(err, AddBucketError::AlreadyPresent { .. }));

        let existing = err.existing().unwrap();
        assert!(existing.ptr_eq(&first));
        assert!(existing.read().check(&Key::from("bar")));
        assert_eq!(r.len(), 1);

        let domain: DomainError = err.into();
        assert!(matches!(domain, DomainError::AlreadyPresent { .. }));
    }

    #[test]
    fn test_add_bucket_invalid_name() {
        let r = registry();
        let err = r.add_bucket(&Key::from("")).unwrap_err();
        assert!(matches!(err, AddBucketError::InvalidKey(_)));
        assert!(err.existing().is_none());
        assert!(r.is_empty());
    }

    #[test]
    fn test_set_bucket_is_idempotent() {
        let r = registry();
        let name = Key::from("x");

        let added = r.add_bucket(&name).unwrap();
        let set = r.set_bucket(&name).unwrap();
        assert!(set.ptr_eq(&added));
        assert_eq!(r.len(), 1);

        let created = r.set_bucket(&Key::from("y")).unwrap();
        assert_eq!(created.read().name().as_str(), "y");
        assert_eq!(r.len(), 2);

        assert!(matches!(
            r.set_bucket(&Key::from("")),
            Err(DomainError::InvalidKey { .. })
        ));
    }

    #[test]
    fn test_del_bucket() {
        let r = registry();
        let name = Key::from("x");

        assert!(matches!(r.del_bucket(&name), Err(DomainError::NotFound { .. })));
        assert!(matches!(
            r.del_bucket(&Key::from("")),
            Err(DomainError::InvalidKey { .. })
        ));

        r.add_bucket(&name).unwrap();
        r.del_bucket(&name).unwrap();
        assert!(r.get_bucket(&name).is_none());
    }

    #[test]
    fn test_del_bucket_discards_contents() {
        let r = registry();
        let name = Key::from("x");

        let b = r.add_bucket(&name).unwrap();
        b.write().set(&Key::from("bar"));
        b.write().allow_api_key(&ApiKey::from(K1)).unwrap();

        r.del_bucket(&name).unwrap();

        let fresh = r.set_bucket(&name).unwrap();
        assert!(!fresh.read().check(&Key::from("bar")));
        assert!(fresh.read().has_global_access());
    }

    #[test]
    fn test_global_allow_fans_out() {
        let r = registry();
        let key = ApiKey::from(K1);

        let a = r.add_bucket(&Key::from("a")).unwrap();
        let b = r.add_bucket(&Key::from("b")).unwrap();
        a.write().allow_api_key(&key).unwrap();

        assert_eq!(r.allow_api_key(&key).unwrap(), 1);
        assert!(a.read().acl().contains(&key));
        assert!(b.read().acl().contains(&key));
        assert_eq!(a.read().acl().len(), 1);
    }

    #[test]
    fn test_global_revoke_fans_out() {
        let r = registry();
        let key = ApiKey::from(K1);

        let a = r.add_bucket(&Key::from("a")).unwrap();
        r.add_bucket(&Key::from("b")).unwrap();
        a.write().allow_api_key(&key).unwrap();

        assert_eq!(r.revoke_api_key(&key).unwrap(), 1);
        assert!(a.read().has_global_access());
        assert_eq!(r.revoke_api_key(&key).unwrap(), 0);
    }

    #[test]
    fn test_global_key_ops_reject_invalid_key() {
        let r = registry();
        r.add_bucket(&Key::from("a")).unwrap();

        let bad = ApiKey::from("bad");
        assert!(matches!(r.allow_api_key(&bad), Err(DomainError::InvalidKey { .. })));
        assert!(matches!(r.revoke_api_key(&bad), Err(DomainError::InvalidKey { .. })));
    }
}
