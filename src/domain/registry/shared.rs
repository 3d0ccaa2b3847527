use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::bucket::Bucket;

/// Handle to a bucket owned by a [`Registry`](super::Registry)
///
/// Each bucket has its own lock. When both are needed the registry lock is
/// taken first.
#[derive(Debug, Clone)]
pub struct SharedBucket(Arc<RwLock<Bucket>>);

impl SharedBucket {
    pub fn new(bucket: Bucket) -> Self {
        Self(Arc::new(RwLock::new(bucket)))
    }

    // Bucket methods never panic half way through a mutation, so a poisoned
    // lock still guards a consistent bucket.

    pub fn read(&self) -> RwLockReadGuard<'_, Bucket> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Bucket> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether both handles point at the same bucket
    pub fn ptr_eq(&self, other: &SharedBucket) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
