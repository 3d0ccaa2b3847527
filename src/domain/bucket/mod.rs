//! Bucket domain
//!
//! A bucket is a named set of records plus the access control list that
//! decides which API keys may query it.

mod acl;
mod entity;

pub use acl::AccessControlList;
pub use entity::{Bucket, Record};
