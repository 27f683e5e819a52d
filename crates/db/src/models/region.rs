//! Geographic region model.

use sangha_core::dashboard::RegionRef;
use sangha_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `regions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Region {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a region.
#[derive(Debug, Deserialize)]
pub struct CreateRegion {
    pub name: String,
}

impl From<&Region> for RegionRef {
    fn from(r: &Region) -> Self {
        RegionRef {
            id: r.id,
            name: r.name.clone(),
        }
    }
}
