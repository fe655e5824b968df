//! Farm directories: where farm records live
//!
//! The selection store only ever calls [`FarmDirectory::list`]; the other
//! operations serve the screens that create, edit and delete farms.

mod fixture;
mod http;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use shared::{Farm, FarmId, FarmInput};

use crate::config::{DirectoryConfig, DirectoryKind};
use crate::error::DirectoryResult;

pub use fixture::FixtureFarmDirectory;
pub use http::HttpFarmDirectory;

/// Record store owning farms
#[async_trait]
pub trait FarmDirectory: Send + Sync {
    /// All farms, in the store's order
    async fn list(&self) -> DirectoryResult<Vec<Farm>>;

    async fn get_by_id(&self, id: &FarmId) -> DirectoryResult<Farm>;

    /// Create a farm; the store assigns `id` and `created_at`
    async fn create(&self, input: FarmInput) -> DirectoryResult<Farm>;

    async fn update(&self, id: &FarmId, input: FarmInput) -> DirectoryResult<Farm>;

    /// Returns true if a record was removed
    async fn delete(&self, id: &FarmId) -> DirectoryResult<bool>;
}

/// Build the directory selected by configuration
pub fn from_config(config: &DirectoryConfig) -> DirectoryResult<Arc<dyn FarmDirectory>> {
    match config.kind {
        DirectoryKind::Http => {
            tracing::debug!("Using farm record API at {}", config.base_url);
            let directory = HttpFarmDirectory::new(
                config.base_url.clone(),
                Duration::from_secs(config.timeout_secs),
            )?;
            Ok(Arc::new(directory))
        }
        DirectoryKind::Fixture => {
            let directory = match &config.fixture_path {
                Some(path) => {
                    tracing::debug!("Using farm fixture {}", path);
                    FixtureFarmDirectory::from_file(path)?
                }
                None => FixtureFarmDirectory::new(Vec::new()),
            };
            Ok(Arc::new(
                directory.with_latency(Duration::from_millis(config.latency_ms)),
            ))
        }
    }
}
