//! Registry domain
//!
//! The registry exclusively owns all buckets. Callers get short-lived
//! [`SharedBucket`] handles and must not hold them across requests.

mod entity;
mod shared;

pub use entity::{AddBucketError, Registry};
pub use shared::SharedBucket;
