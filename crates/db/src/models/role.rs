//! Role entity model.

use sangha_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Well-known role ids, seeded by the roles migration.
pub const ROLE_ID_ADMIN: DbId = 1;
pub const ROLE_ID_COORDINATOR: DbId = 2;
pub const ROLE_ID_MEMBER: DbId = 3;

/// A row from the `roles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
