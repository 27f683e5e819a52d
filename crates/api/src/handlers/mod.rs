pub mod auth;
pub mod book_reports;
pub mod dashboard;
pub mod directory;
pub mod profile;
