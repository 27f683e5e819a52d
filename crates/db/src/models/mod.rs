//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Update DTOs (all `Option` fields) where rows are mutable

pub mod book;
pub mod club;
pub mod monthly_report;
pub mod region;
pub mod role;
pub mod session;
pub mod sub_group;
pub mod user;
