//! In-memory farm directory seeded from fixture data
//!
//! Stands in for the record API during development and in tests. An optional
//! latency makes loading states observable.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use shared::{validate_farm_input, Farm, FarmId, FarmInput};
use tokio::sync::RwLock;

use super::FarmDirectory;
use crate::error::{DirectoryError, DirectoryResult};

/// Fixture-backed farm directory
#[derive(Debug, Default)]
pub struct FixtureFarmDirectory {
    farms: RwLock<Vec<Farm>>,
    latency: Duration,
}

impl FixtureFarmDirectory {
    pub fn new(farms: Vec<Farm>) -> Self {
        Self {
            farms: RwLock::new(farms),
            latency: Duration::ZERO,
        }
    }

    /// Load farms from a JSON array file
    pub fn from_file(path: impl AsRef<Path>) -> DirectoryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DirectoryError::Unreachable(format!(
                "Failed to read farm fixture ({}): {}",
                path.display(),
                e
            ))
        })?;
        let farms: Vec<Farm> = serde_json::from_str(&content).map_err(|e| {
            DirectoryError::Malformed(format!(
                "Invalid farm fixture ({}): {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self::new(farms))
    }

    /// Delay every operation by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Next id: one past the largest numeric id
    fn next_id(farms: &[Farm]) -> FarmId {
        let max = farms
            .iter()
            .filter_map(|farm| farm.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        FarmId::new((max + 1).to_string())
    }
}

#[async_trait]
impl FarmDirectory for FixtureFarmDirectory {
    async fn list(&self) -> DirectoryResult<Vec<Farm>> {
        self.simulate_latency().await;
        Ok(self.farms.read().await.clone())
    }

    async fn get_by_id(&self, id: &FarmId) -> DirectoryResult<Farm> {
        self.simulate_latency().await;
        self.farms
            .read()
            .await
            .iter()
            .find(|farm| &farm.id == id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(id.clone()))
    }

    async fn create(&self, input: FarmInput) -> DirectoryResult<Farm> {
        self.simulate_latency().await;
        validate_farm_input(&input)?;

        let mut farms = self.farms.write().await;
        let farm = Farm {
            id: Self::next_id(&farms),
            name: input.name.trim().to_string(),
            size: input.size,
            size_unit: input.unit_or_default(),
            location: input.location_or_default(),
            created_at: Utc::now(),
        };
        farms.push(farm.clone());

        tracing::debug!("Created fixture farm {}", farm.id);
        Ok(farm)
    }

    async fn update(&self, id: &FarmId, input: FarmInput) -> DirectoryResult<Farm> {
        self.simulate_latency().await;
        validate_farm_input(&input)?;

        let mut farms = self.farms.write().await;
        let farm = farms
            .iter_mut()
            .find(|farm| &farm.id == id)
            .ok_or_else(|| DirectoryError::NotFound(id.clone()))?;

        farm.name = input.name.trim().to_string();
        farm.size = input.size;
        farm.size_unit = input.unit_or_default();
        farm.location = input.location_or_default();

        Ok(farm.clone())
    }

    async fn delete(&self, id: &FarmId) -> DirectoryResult<bool> {
        self.simulate_latency().await;
        let mut farms = self.farms.write().await;
        let before = farms.len();
        farms.retain(|farm| &farm.id != id);
        Ok(farms.len() < before)
    }
}
