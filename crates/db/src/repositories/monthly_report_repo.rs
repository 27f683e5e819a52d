//! Repository for the `monthly_reports` table.
//!
//! Reports are written in one INSERT (entries included) and are only ever
//! removed by id afterwards; there is no update path.

use sangha_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::monthly_report::{
    CreateMonthlyReport, MonthlyReport, MonthlyReportSummary, ReportAggregate,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, month, year, total_books, total_recognized_books, total_points, \
                       entries, file_name, uploaded_by, uploaded_at, created_at, updated_at";

/// Provides create, read and delete operations for monthly reports.
pub struct MonthlyReportRepo;

impl MonthlyReportRepo {
    /// Persist a computed report together with its full entry list.
    ///
    /// The uploader's `last_active_at` is stamped in the same transaction,
    /// so either both writes land or neither does.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMonthlyReport,
    ) -> Result<MonthlyReport, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO monthly_reports
                (month, year, total_books, total_recognized_books, total_points,
                 entries, file_name, uploaded_by, uploaded_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let report = sqlx::query_as::<_, MonthlyReport>(&query)
            .bind(&input.month)
            .bind(input.year)
            .bind(input.totals.total_books)
            .bind(input.totals.total_recognized_books)
            .bind(input.totals.total_points)
            .bind(Json(&input.entries))
            .bind(&input.file_name)
            .bind(input.uploaded_by)
            .bind(input.uploaded_at)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE users SET last_active_at = NOW() WHERE id = $1")
            .bind(input.uploaded_by)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(report)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MonthlyReport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM monthly_reports WHERE id = $1");
        sqlx::query_as::<_, MonthlyReport>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List reports newest first, without their entries.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MonthlyReportSummary>, sqlx::Error> {
        sqlx::query_as::<_, MonthlyReportSummary>(
            "SELECT r.id, r.month, r.year, r.total_books, r.total_recognized_books,
                    r.total_points, jsonb_array_length(r.entries) AS entry_count,
                    r.file_name, r.uploaded_by, u.display_name AS uploaded_by_name,
                    r.uploaded_at
             FROM monthly_reports r
             LEFT JOIN users u ON u.id = r.uploaded_by
             ORDER BY r.uploaded_at DESC, r.id DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Delete one report. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM monthly_reports WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Report count and book/point sums across every saved report.
    pub async fn aggregate(pool: &PgPool) -> Result<ReportAggregate, sqlx::Error> {
        sqlx::query_as::<_, ReportAggregate>(
            "SELECT COUNT(*) AS report_count,
                    COALESCE(SUM(total_books), 0)::BIGINT AS book_sum,
                    COALESCE(SUM(total_points), 0)::BIGINT AS point_sum
             FROM monthly_reports",
        )
        .fetch_one(pool)
        .await
    }
}
