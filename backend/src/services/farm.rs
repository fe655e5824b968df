//! Farm record service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Farm, FarmInput, SizeUnit};
use shared::{validate_farm_input, FarmId};

/// Farm service owning the `farms` table
#[derive(Clone)]
pub struct FarmService {
    db: PgPool,
}

/// Row in the `farms` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FarmRow {
    pub id: Uuid,
    pub name: String,
    pub size: Decimal,
    pub size_unit: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<FarmRow> for Farm {
    type Error = AppError;

    fn try_from(row: FarmRow) -> Result<Self, Self::Error> {
        let size_unit = SizeUnit::from_code(&row.size_unit).ok_or_else(|| {
            AppError::Internal(format!(
                "Farm {} has unknown size unit '{}'",
                row.id, row.size_unit
            ))
        })?;

        Ok(Farm {
            id: FarmId::new(row.id.to_string()),
            name: row.name,
            size: row.size,
            size_unit,
            location: row.location,
            created_at: row.created_at,
        })
    }
}

/// Parse a farm id from a path; anything that is not a UUID cannot exist
pub fn parse_farm_id(id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::NotFound("Farm".to_string()))
}

const FARM_COLUMNS: &str = "id, name, size, size_unit, location, created_at";

impl FarmService {
    /// Create a new FarmService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all farms, oldest first
    pub async fn list_farms(&self) -> AppResult<Vec<Farm>> {
        let rows = sqlx::query_as::<_, FarmRow>(&format!(
            "SELECT {} FROM farms ORDER BY created_at ASC, id ASC",
            FARM_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(Farm::try_from).collect()
    }

    /// Get a farm by ID
    pub async fn get_farm(&self, farm_id: &str) -> AppResult<Farm> {
        let farm_id = parse_farm_id(farm_id)?;
        let row = sqlx::query_as::<_, FarmRow>(&format!(
            "SELECT {} FROM farms WHERE id = $1",
            FARM_COLUMNS
        ))
        .bind(farm_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Farm".to_string()))?;

        Farm::try_from(row)
    }

    /// Create a new farm
    pub async fn create_farm(&self, input: FarmInput) -> AppResult<Farm> {
        validate_farm_input(&input)?;

        let row = sqlx::query_as::<_, FarmRow>(&format!(
            r#"
            INSERT INTO farms (id, name, size, size_unit, location)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            FARM_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(input.name.trim())
        .bind(input.size)
        .bind(input.unit_or_default().code())
        .bind(input.location_or_default())
        .fetch_one(&self.db)
        .await?;

        tracing::info!("Created farm {} ({})", row.id, row.name);
        Farm::try_from(row)
    }

    /// Replace a farm's attributes; `created_at` is never touched
    pub async fn update_farm(&self, farm_id: &str, input: FarmInput) -> AppResult<Farm> {
        let farm_id = parse_farm_id(farm_id)?;
        validate_farm_input(&input)?;

        let row = sqlx::query_as::<_, FarmRow>(&format!(
            r#"
            UPDATE farms
            SET name = $1, size = $2, size_unit = $3, location = $4
            WHERE id = $5
            RETURNING {}
            "#,
            FARM_COLUMNS
        ))
        .bind(input.name.trim())
        .bind(input.size)
        .bind(input.unit_or_default().code())
        .bind(input.location_or_default())
        .bind(farm_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Farm".to_string()))?;

        Farm::try_from(row)
    }

    /// Delete a farm
    pub async fn delete_farm(&self, farm_id: &str) -> AppResult<()> {
        let farm_id = parse_farm_id(farm_id)?;
        let result = sqlx::query("DELETE FROM farms WHERE id = $1")
            .bind(farm_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Farm".to_string()));
        }

        tracing::info!("Deleted farm {}", farm_id);
        Ok(())
    }
}
