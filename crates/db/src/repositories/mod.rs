//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod book_repo;
pub mod club_repo;
pub mod dashboard_repo;
pub mod monthly_report_repo;
pub mod region_repo;
pub mod role_repo;
pub mod session_repo;
pub mod sub_group_repo;
pub mod user_repo;

pub use book_repo::BookRepo;
pub use club_repo::ClubRepo;
pub use dashboard_repo::DashboardRepo;
pub use monthly_report_repo::MonthlyReportRepo;
pub use region_repo::RegionRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use sub_group_repo::SubGroupRepo;
pub use user_repo::UserRepo;
