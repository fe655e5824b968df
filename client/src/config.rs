//! Configuration for the CropKeeper client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. An optional `config/client.toml`
//! 3. Environment variable overrides with the CROPKEEPER prefix

use config::{builder::DefaultState, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

/// Main client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Where farm records come from
    pub directory: DirectoryConfig,

    /// Where the selected farm is remembered
    pub storage: StorageConfig,
}

/// Farm directory implementations
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryKind {
    /// CropKeeper record API
    Http,
    /// In-memory fixture data
    Fixture,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DirectoryConfig {
    pub kind: DirectoryKind,

    /// Record API base URL, including the version prefix
    pub base_url: String,

    /// Per-request timeout for the record API
    pub timeout_secs: u64,

    /// JSON array of farms for the fixture directory
    pub fixture_path: Option<String>,

    /// Simulated latency for the fixture directory
    pub latency_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Preference file path
    pub path: String,
}

impl ClientConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::with_name("config/client").required(false))
            .add_source(
                Environment::with_prefix("CROPKEEPER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Builder seeded with the default values
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("directory.kind", "http")?
            .set_default("directory.base_url", "http://localhost:3000/api/v1")?
            .set_default("directory.timeout_secs", 10)?
            .set_default("directory.latency_ms", 0)?
            .set_default("storage.path", ".cropkeeper/preferences.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deserialize() {
        let config: ClientConfig = ClientConfig::defaults()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.directory.kind, DirectoryKind::Http);
        assert_eq!(config.directory.timeout_secs, 10);
        assert!(config.directory.fixture_path.is_none());
        assert_eq!(config.storage.path, ".cropkeeper/preferences.json");
    }

    #[test]
    fn test_fixture_override() {
        let config: ClientConfig = ClientConfig::defaults()
            .unwrap()
            .set_override("directory.kind", "fixture")
            .unwrap()
            .set_override("directory.fixture_path", "fixtures/farms.json")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.directory.kind, DirectoryKind::Fixture);
        assert_eq!(
            config.directory.fixture_path.as_deref(),
            Some("fixtures/farms.json")
        );
    }
}
