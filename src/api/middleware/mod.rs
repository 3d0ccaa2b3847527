//! API middleware components

pub mod admin_auth;
pub mod auth;

pub use admin_auth::{ADMIN_KEY_HEADER, RequireAdmin};
pub use auth::{API_KEY_HEADER, RequireApiKey};
