//! Wire vocabulary shared by the daemon handlers

pub mod error;

pub use error::ApiError;

/// Body of a successful admin mutation
pub const ACTION_DONE: &str = "ok";
/// Body of a successful ACL change
pub const ACL_CHANGED: &str = "OK";
/// Body of a positive check
pub const KEY_FOUND: &str = "yes";
/// Body of a negative check, whatever the reason
pub const KEY_NOT_FOUND: &str = "no";
pub const BUCKET_EMPTY: &str = "empty";
pub const BUCKET_NOT_EMPTY: &str = "not empty";
