//! Book catalog model.

use sangha_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `books` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Book {
    pub id: DbId,
    pub title: String,
    pub isbn: String,
    pub publisher: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a catalog item.
#[derive(Debug, Deserialize)]
pub struct CreateBook {
    pub title: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub publisher: String,
}
