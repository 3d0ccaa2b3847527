//! Identifier domain
//!
//! Bucket/record keys and API keys, with the syntactic policies that decide
//! whether they are well formed.

mod entity;
mod validation;

pub use entity::{ApiKey, Key};
pub use validation::{
    validate_key, ApiKeyPolicy, KeyValidationError, LengthPolicy, UuidPolicy, API_KEY_LENGTH,
};
