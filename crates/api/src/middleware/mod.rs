//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the member behind a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.
//! - [`rbac::RequireCoordinator`] -- requires a role that may manage reports.
//! - [`rbac::RequireAuth`] -- any signed-in member.

pub mod auth;
pub mod rbac;
