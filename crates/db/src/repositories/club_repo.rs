//! Repository for the `clubs` table.

use sangha_core::types::DbId;
use sqlx::PgPool;

use crate::models::club::{Club, CreateClub};

const COLUMNS: &str = "id, name, region_id, member_ids, created_at, updated_at";

/// Provides CRUD operations for clubs and their member lists.
pub struct ClubRepo;

impl ClubRepo {
    pub async fn create(pool: &PgPool, input: &CreateClub) -> Result<Club, sqlx::Error> {
        let query = format!(
            "INSERT INTO clubs (name, region_id, member_ids)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Club>(&query)
            .bind(input.name.trim())
            .bind(input.region_id)
            .bind(&input.member_ids)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Club>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clubs WHERE id = $1");
        sqlx::query_as::<_, Club>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all clubs ordered by name, for display. Club order has no
    /// bearing on dashboard stats, unlike sub-groups which are listed by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Club>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clubs ORDER BY name ASC");
        sqlx::query_as::<_, Club>(&query).fetch_all(pool).await
    }

    /// Append a member to a club's list, initialising the list if absent.
    /// Adding an existing member is a no-op.
    ///
    /// Returns `None` if the club does not exist.
    pub async fn add_member(
        pool: &PgPool,
        club_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Club>, sqlx::Error> {
        let query = format!(
            "UPDATE clubs SET member_ids = CASE
                 WHEN $2 = ANY(COALESCE(member_ids, '{{}}')) THEN member_ids
                 ELSE array_append(COALESCE(member_ids, '{{}}'), $2)
             END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Club>(&query)
            .bind(club_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
