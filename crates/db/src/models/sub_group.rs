//! Sub-group model. Sub-groups hang off a region by a loose reference.

use sangha_core::dashboard::GroupRef;
use sangha_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sub_groups` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubGroup {
    pub id: DbId,
    pub name: String,
    pub region_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a sub-group.
#[derive(Debug, Deserialize)]
pub struct CreateSubGroup {
    pub name: String,
    pub region_id: Option<DbId>,
}

impl From<&SubGroup> for GroupRef {
    fn from(g: &SubGroup) -> Self {
        GroupRef {
            region_id: g.region_id,
        }
    }
}
