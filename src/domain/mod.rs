//! Domain layer - identifiers, buckets and the registry that owns them

pub mod bucket;
pub mod error;
pub mod key;
pub mod registry;

pub use bucket::{AccessControlList, Bucket, Record};
pub use error::DomainError;
pub use key::{ApiKey, ApiKeyPolicy, Key, KeyValidationError, LengthPolicy, UuidPolicy};
pub use registry::{AddBucketError, Registry, SharedBucket};
