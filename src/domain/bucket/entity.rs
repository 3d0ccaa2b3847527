//! Bucket entity and records

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::acl::AccessControlList;
use crate::domain::key::{ApiKey, Key};
use crate::domain::DomainError;

/// Existence marker for one key inside one bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    created_at: DateTime<Utc>,
}

impl Record {
    fn now() -> Self {
        Self {
            created_at: Utc::now(),
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Named namespace of records guarded by an access control list
#[derive(Debug, Clone)]
pub struct Bucket {
    name: Key,
    /// Visibility to client listing paths; has no bearing on the ACL
    enabled: bool,
    acl: AccessControlList,
    records: HashMap<Key, Record>,
}

impl Bucket {
    pub fn new(name: Key) -> Self {
        Self {
            name,
            enabled: false,
            acl: AccessControlList::new(),
            records: HashMap::new(),
        }
    }

    pub fn name(&self) -> &Key {
        &self.name
    }

    // Access control

    /// True while no API key has been allowed on this bucket
    pub fn has_global_access(&self) -> bool {
        self.acl.is_empty()
    }

    pub fn allow_api_key(&mut self, key: &ApiKey) -> Result<(), DomainError> {
        self.acl.allow(key)
    }

    pub fn revoke_api_key(&mut self, key: &ApiKey) -> Result<(), DomainError> {
        self.acl.revoke(key)
    }

    /// Drop every API key, returning the bucket to global access
    pub fn revoke_all_api_keys(&mut self) {
        self.acl.clear();
    }

    pub fn allowed(&self, key: &ApiKey) -> Result<bool, DomainError> {
        self.acl.allows(key)
    }

    pub fn acl(&self) -> &AccessControlList {
        &self.acl
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    // Records. An invalid key never reaches the map: add, set and del
    // report false for it.

    /// Insert `key` unless it already exists
    pub fn add(&mut self, key: &Key) -> bool {
        if !key.is_valid() || self.check(key) {
            return false;
        }

        self.records.insert(key.clone(), Record::now());
        true
    }

    /// Insert or refresh `key`
    pub fn set(&mut self, key: &Key) -> bool {
        if !key.is_valid() {
            return false;
        }

        self.records.insert(key.clone(), Record::now());
        true
    }

    pub fn del(&mut self, key: &Key) -> bool {
        self.records.remove(key).is_some()
    }

    pub fn check(&self, key: &Key) -> bool {
        self.records.contains_key(key)
    }

    pub fn record(&self, key: &Key) -> Option<&Record> {
        self.records.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}
