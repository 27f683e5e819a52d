//! Domain types and pure logic for the Sangha backend.
//!
//! Nothing in this crate touches the database or the network. The HTTP
//! layer (`sangha-api`) and the persistence layer (`sangha-db`) call into
//! these modules to classify uploaded distribution reports, fold them into
//! monthly totals, and compute dashboard statistics.

pub mod book_points;
pub mod dashboard;
pub mod error;
pub mod monthly_report;
pub mod profile;
pub mod roles;
pub mod spreadsheet;
pub mod types;
