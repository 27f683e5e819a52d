//! Repository for the `sub_groups` table.

use sqlx::PgPool;

use crate::models::sub_group::{CreateSubGroup, SubGroup};

const COLUMNS: &str = "id, name, region_id, created_at, updated_at";

/// Provides create and read operations for sub-groups.
pub struct SubGroupRepo;

impl SubGroupRepo {
    pub async fn create(pool: &PgPool, input: &CreateSubGroup) -> Result<SubGroup, sqlx::Error> {
        let query = format!(
            "INSERT INTO sub_groups (name, region_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SubGroup>(&query)
            .bind(input.name.trim())
            .bind(input.region_id)
            .fetch_one(pool)
            .await
    }

    /// List all sub-groups in creation order.
    ///
    /// Creation order is the scan order of the dashboard's top-region count,
    /// so it decides ties.
    pub async fn list(pool: &PgPool) -> Result<Vec<SubGroup>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sub_groups ORDER BY id ASC");
        sqlx::query_as::<_, SubGroup>(&query).fetch_all(pool).await
    }
}
