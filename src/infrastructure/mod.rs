//! Infrastructure layer - key generation, logging and the verification client

pub mod api_key;
pub mod logging;
pub mod verification;
