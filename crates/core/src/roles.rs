//! Well-known role name constants.
//!
//! These must match the seed data in `20260301000001_create_roles_and_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_COORDINATOR: &str = "coordinator";
pub const ROLE_MEMBER: &str = "member";

/// Whether the role may upload or delete monthly book reports.
pub fn can_manage_reports(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_COORDINATOR
}
