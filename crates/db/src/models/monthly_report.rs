//! Monthly book-distribution report model.
//!
//! Reports are immutable once written: there is a create DTO and a delete
//! operation, but no update DTO.

use sangha_core::book_points::BookEntry;
use sangha_core::monthly_report::ReportDraft;
use sangha_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A full row from the `monthly_reports` table, including entries.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MonthlyReport {
    pub id: DbId,
    pub month: String,
    pub year: i32,
    pub total_books: i64,
    pub total_recognized_books: i64,
    pub total_points: i64,
    pub entries: Json<Vec<BookEntry>>,
    pub file_name: String,
    pub uploaded_by: DbId,
    pub uploaded_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// List view of a report without its entry list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MonthlyReportSummary {
    pub id: DbId,
    pub month: String,
    pub year: i32,
    pub total_books: i64,
    pub total_recognized_books: i64,
    pub total_points: i64,
    pub entry_count: i32,
    pub file_name: String,
    pub uploaded_by: DbId,
    pub uploaded_by_name: Option<String>,
    pub uploaded_at: Timestamp,
}

/// DTO for persisting a computed report.
pub type CreateMonthlyReport = ReportDraft;

/// Report-wide sums used by the dashboard.
#[derive(Debug, Clone, Copy, Default, FromRow)]
pub struct ReportAggregate {
    pub report_count: i64,
    pub book_sum: i64,
    pub point_sum: i64,
}
