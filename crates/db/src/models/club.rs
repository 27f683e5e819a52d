//! Club model.

use sangha_core::dashboard::ClubRef;
use sangha_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `clubs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Club {
    pub id: DbId,
    pub name: String,
    pub region_id: Option<DbId>,
    /// `None` when the club's member list has never been set.
    pub member_ids: Option<Vec<DbId>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a club.
#[derive(Debug, Deserialize)]
pub struct CreateClub {
    pub name: String,
    pub region_id: Option<DbId>,
    pub member_ids: Option<Vec<DbId>>,
}

impl From<Club> for ClubRef {
    fn from(c: Club) -> Self {
        ClubRef {
            member_ids: c.member_ids,
        }
    }
}
