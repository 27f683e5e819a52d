//! Dashboard statistics computed from collection snapshots.
//!
//! The persistence layer fetches every collection up front; this module
//! only folds the already-fetched data. Stats are recomputed on each request
//! and never stored.

use chrono::{Datelike, TimeZone, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Shown when there is no region to highlight.
pub const NO_REGION: &str = "N/A";

/// A region as needed for name resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRef {
    pub id: DbId,
    pub name: String,
}

/// A sub-group and the region it belongs to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    pub region_id: Option<DbId>,
}

/// A club and its member list, which may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubRef {
    pub member_ids: Option<Vec<DbId>>,
}

/// Everything the dashboard needs, fetched before any computation starts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub total_members: i64,
    pub clubs: Vec<ClubRef>,
    pub total_books: i64,
    pub regions: Vec<RegionRef>,
    pub groups: Vec<GroupRef>,
    pub total_reports: i64,
    /// Sum of `total_books` over all saved monthly reports.
    pub distributed_books: i64,
    /// Sum of `total_points` over all saved monthly reports.
    pub distributed_points: i64,
    pub members_active_this_month: i64,
    pub books_added_this_month: i64,
}

/// Flat statistics record returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_members: i64,
    pub total_clubs: i64,
    pub total_books: i64,
    pub total_regions: i64,
    pub total_groups: i64,
    pub total_reports: i64,
    pub members_active_this_month: i64,
    pub books_added_this_month: i64,
    pub total_club_members: i64,
    pub active_clubs: i64,
    pub avg_members_per_club: i64,
    pub avg_books_per_club: i64,
    pub total_distributed_books: i64,
    pub total_points: i64,
    pub top_region: String,
}

/// Number of members on a club, 0 when the list is absent.
pub fn club_member_count(club: &ClubRef) -> i64 {
    club.member_ids.as_ref().map_or(0, |m| m.len() as i64)
}

/// `round(total / count)`, or 0 when there is nothing to divide by.
pub fn safe_average(total: i64, count: i64) -> i64 {
    if count == 0 {
        return 0;
    }
    (total as f64 / count as f64).round() as i64
}

/// Display name of the region with the most sub-groups.
///
/// Counts are kept in first-seen order and the first region to reach a
/// strictly greater count wins, so ties go to whichever region appeared
/// first. A winning id with no matching region resolves to the id itself.
pub fn top_region(groups: &[GroupRef], regions: &[RegionRef]) -> String {
    let mut counts: IndexMap<DbId, usize> = IndexMap::new();
    for region_id in groups.iter().filter_map(|g| g.region_id) {
        *counts.entry(region_id).or_insert(0) += 1;
    }

    let mut best: Option<(DbId, usize)> = None;
    for (&id, &count) in &counts {
        if best.map_or(true, |(_, max)| count > max) {
            best = Some((id, count));
        }
    }

    match best {
        Some((id, _)) => regions
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.name.clone())
            .unwrap_or_else(|| id.to_string()),
        None => regions
            .first()
            .map(|r| r.name.clone())
            .unwrap_or_else(|| NO_REGION.to_string()),
    }
}

/// First instant of the UTC month containing `now`.
pub fn month_start(now: Timestamp) -> Timestamp {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

/// Fold a snapshot into the dashboard statistics.
pub fn compute_stats(snapshot: &DashboardSnapshot) -> DashboardStats {
    let total_clubs = snapshot.clubs.len() as i64;
    let total_club_members: i64 = snapshot.clubs.iter().map(club_member_count).sum();
    let active_clubs = snapshot
        .clubs
        .iter()
        .filter(|c| club_member_count(c) > 0)
        .count() as i64;

    DashboardStats {
        total_members: snapshot.total_members,
        total_clubs,
        total_books: snapshot.total_books,
        total_regions: snapshot.regions.len() as i64,
        total_groups: snapshot.groups.len() as i64,
        total_reports: snapshot.total_reports,
        members_active_this_month: snapshot.members_active_this_month,
        books_added_this_month: snapshot.books_added_this_month,
        total_club_members,
        active_clubs,
        avg_members_per_club: safe_average(total_club_members, total_clubs),
        avg_books_per_club: safe_average(snapshot.total_books, total_clubs),
        total_distributed_books: snapshot.distributed_books,
        total_points: snapshot.distributed_points,
        top_region: top_region(&snapshot.groups, &snapshot.regions),
    }
}
