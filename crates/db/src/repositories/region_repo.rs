//! Repository for the `regions` table.

use sangha_core::types::DbId;
use sqlx::PgPool;

use crate::models::region::{CreateRegion, Region};

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides create and read operations for regions.
pub struct RegionRepo;

impl RegionRepo {
    pub async fn create(pool: &PgPool, input: &CreateRegion) -> Result<Region, sqlx::Error> {
        let query = format!("INSERT INTO regions (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Region>(&query)
            .bind(input.name.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Region>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM regions WHERE id = $1");
        sqlx::query_as::<_, Region>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all regions in creation order.
    ///
    /// The dashboard relies on this order: with no sub-groups, the first
    /// region listed is the highlighted one.
    pub async fn list(pool: &PgPool) -> Result<Vec<Region>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM regions ORDER BY id ASC");
        sqlx::query_as::<_, Region>(&query).fetch_all(pool).await
    }
}
