//! API Key infrastructure implementations

mod generator;

pub use generator::ApiKeyGenerator;
