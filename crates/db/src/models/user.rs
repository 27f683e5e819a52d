//! Member (user) entity model and DTOs.

use sangha_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`ProfileResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub display_name: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub region_id: Option<DbId>,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub last_active_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Member profile as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub region_id: Option<DbId>,
    /// Resolved role name (e.g. `"admin"`, `"member"`).
    pub role: String,
    pub last_active_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl ProfileResponse {
    pub fn from_user(user: &User, role: String) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            phone: user.phone.clone(),
            bio: user.bio.clone(),
            region_id: user.region_id,
            role,
            last_active_at: user.last_active_at,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub display_name: String,
}

/// DTO for a member editing their own profile. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfile {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub region_id: Option<DbId>,
}
