//! Snapshot fetch for the analytics dashboard.

use sangha_core::dashboard::{ClubRef, DashboardSnapshot, GroupRef, RegionRef};
use sangha_core::types::Timestamp;
use sqlx::PgPool;

use super::{BookRepo, ClubRepo, MonthlyReportRepo, RegionRepo, SubGroupRepo, UserRepo};

/// Reads every collection the dashboard folds over.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Fetch all base collections and the month-to-date counts together.
    ///
    /// All queries are in flight at once and the snapshot is only assembled
    /// after every one of them has resolved. The first failure aborts the
    /// whole fetch, so callers never see a partially filled snapshot.
    pub async fn snapshot(
        pool: &PgPool,
        month_start: Timestamp,
    ) -> Result<DashboardSnapshot, sqlx::Error> {
        let (
            total_members,
            clubs,
            total_books,
            regions,
            groups,
            reports,
            members_active_this_month,
            books_added_this_month,
        ) = tokio::try_join!(
            UserRepo::count_active(pool),
            ClubRepo::list(pool),
            BookRepo::count(pool),
            RegionRepo::list(pool),
            SubGroupRepo::list(pool),
            MonthlyReportRepo::aggregate(pool),
            UserRepo::count_active_since(pool, month_start),
            BookRepo::count_created_since(pool, month_start),
        )?;

        tracing::debug!(
            clubs = clubs.len(),
            regions = regions.len(),
            groups = groups.len(),
            reports = reports.report_count,
            "Dashboard snapshot fetched",
        );

        Ok(DashboardSnapshot {
            total_members,
            clubs: clubs.into_iter().map(ClubRef::from).collect(),
            total_books,
            regions: regions.iter().map(RegionRef::from).collect(),
            groups: groups.iter().map(GroupRef::from).collect(),
            total_reports: reports.report_count,
            distributed_books: reports.book_sum,
            distributed_points: reports.point_sum,
            members_active_this_month,
            books_added_this_month,
        })
    }
}
