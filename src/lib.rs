//! authd
//!
//! A minimal authorization daemon. Callers ask whether a key exists inside a
//! bucket and get a terse yes or no back. Supports:
//! - Buckets with default-open, explicitly restricted API key access lists
//! - Global and bucket-scoped API key grants
//! - A verification client that races checks against a deadline and pads
//!   answers to a floor latency

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::{Registry, UuidPolicy};

/// Build the daemon state from configuration
///
/// The registry starts empty; nothing survives a restart.
pub fn create_app_state(config: &AppConfig) -> AppState {
    let registry = Registry::new(config.auth.admin_key.clone(), config.auth.namespace.clone());
    let state = AppState::new(registry);

    if config.auth.strict_api_keys {
        state.with_api_key_policy(Arc::new(UuidPolicy))
    } else {
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_app_state() {
        let mut config = AppConfig::default();
        config.auth.admin_key = "s3cret".to_string();
        config.auth.namespace = "ns.test".to_string();

        let state = create_app_state(&config);

        assert_eq!(state.registry.admin_key(), "s3cret");
        assert_eq!(state.generator.namespace(), "ns.test");
        assert!(state.registry.is_empty());
        assert!(state.api_key_policy.is_valid(&"z".repeat(36)));
    }

    #[test]
    fn test_strict_api_keys() {
        let mut config = AppConfig::default();
        config.auth.strict_api_keys = true;

        let state = create_app_state(&config);

        assert!(!state.api_key_policy.is_valid(&"z".repeat(36)));
        assert!(state.api_key_policy.is_valid("6ba7b811-9dad-11d1-80b4-00c04fd430c8"));
    }
}
