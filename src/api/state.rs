//! Application state shared by every handler

use std::sync::Arc;

use crate::domain::{ApiKeyPolicy, LengthPolicy, Registry};
use crate::infrastructure::api_key::ApiKeyGenerator;

/// Daemon state: the registry plus the services around it
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub generator: Arc<ApiKeyGenerator>,
    /// Policy a client `X-ApiKey` must pass
    pub api_key_policy: Arc<dyn ApiKeyPolicy>,
}

impl AppState {
    /// Build the state around `registry`, generating keys in its namespace
    pub fn new(registry: Registry) -> Self {
        let generator = ApiKeyGenerator::new(registry.namespace());

        Self {
            registry: Arc::new(registry),
            generator: Arc::new(generator),
            api_key_policy: Arc::new(LengthPolicy),
        }
    }

    pub fn with_api_key_policy(mut self, policy: Arc<dyn ApiKeyPolicy>) -> Self {
        self.api_key_policy = policy;
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("buckets", &self.registry.len())
            .field("namespace", &self.generator.namespace())
            .field("api_key_policy", &self.api_key_policy)
            .finish()
    }
}
