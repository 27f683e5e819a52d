//! Integration tests for monthly report persistence.

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use sangha_core::book_points::{BookEntry, ClassifierConfig, RawRow, RowValue, classify_rows};
use sangha_core::monthly_report::build_report;
use sangha_db::models::role::ROLE_ID_COORDINATOR;
use sangha_db::models::user::CreateUser;
use sangha_db::repositories::{MonthlyReportRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn coordinator(pool: &PgPool, username: &str) -> i64 {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.org"),
        password_hash: "not-a-real-hash".to_string(),
        role_id: ROLE_ID_COORDINATOR,
        display_name: username.to_uppercase(),
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

fn sample_entries() -> Vec<BookEntry> {
    let rows = vec![
        RawRow::new()
            .with("Book Title", RowValue::Text("Bhagavad-gita As It Is".into()))
            .with("Quantity", RowValue::Number(3.0))
            .with("Publisher", RowValue::Text("BBT".into())),
        RawRow::new()
            .with("Book Title", RowValue::Text("Unknown Book".into()))
            .with("Quantity", RowValue::Number(2.0))
            .with("Publisher", RowValue::Text("Bhaktivedanta Book Trust".into())),
        RawRow::new()
            .with("Book Title", RowValue::Text("Other Book".into()))
            .with("Quantity", RowValue::Number(4.0))
            .with("Publisher", RowValue::Text("Random House".into())),
    ];
    classify_rows(&rows, &ClassifierConfig::default())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_persists_totals_and_entries(pool: PgPool) {
    let uploader = coordinator(&pool, "uploader").await;
    let now = Utc.with_ymd_and_hms(2026, 10, 5, 12, 0, 0).unwrap();
    let draft = build_report(sample_entries(), uploader, "october.xlsx", now);

    let saved = MonthlyReportRepo::create(&pool, &draft).await.unwrap();

    assert_eq!(saved.month, "October");
    assert_eq!(saved.year, 2026);
    assert_eq!(saved.total_books, 9);
    assert_eq!(saved.total_recognized_books, 5);
    assert_eq!(saved.total_points, 32);
    assert_eq!(saved.entries.0, draft.entries);
    assert_eq!(saved.uploaded_by, uploader);

    let found = MonthlyReportRepo::find_by_id(&pool, saved.id)
        .await
        .unwrap()
        .expect("report should exist");
    assert_eq!(found.entries.0.len(), 3);
    assert_eq!(found.entries.0[0].title, "Bhagavad-gita As It Is");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_returns_summaries_newest_first(pool: PgPool) {
    let uploader = coordinator(&pool, "lister").await;
    let older = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
    let newer = Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap();

    MonthlyReportRepo::create(&pool, &build_report(sample_entries(), uploader, "aug.xlsx", older))
        .await
        .unwrap();
    MonthlyReportRepo::create(&pool, &build_report(vec![], uploader, "sep.xlsx", newer))
        .await
        .unwrap();

    let list = MonthlyReportRepo::list(&pool, 10, 0).await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].file_name, "sep.xlsx");
    assert_eq!(list[0].entry_count, 0);
    assert_eq!(list[1].entry_count, 3);
    assert_eq!(list[1].uploaded_by_name.as_deref(), Some("LISTER"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_removes_exactly_one_report(pool: PgPool) {
    let uploader = coordinator(&pool, "deleter").await;
    let now = Utc::now();

    let mut ids = Vec::new();
    for name in ["a.xlsx", "b.xlsx", "c.xlsx"] {
        let report = MonthlyReportRepo::create(&pool, &build_report(sample_entries(), uploader, name, now))
            .await
            .unwrap();
        ids.push(report.id);
    }
    let before = MonthlyReportRepo::find_by_id(&pool, ids[2]).await.unwrap().unwrap();

    assert!(MonthlyReportRepo::delete(&pool, ids[1]).await.unwrap());

    let remaining = MonthlyReportRepo::list(&pool, 10, 0).await.unwrap();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|r| r.id != ids[1]));

    let after = MonthlyReportRepo::find_by_id(&pool, ids[2]).await.unwrap().unwrap();
    assert_eq!(after.total_points, before.total_points);
    assert_eq!(after.entries.0, before.entries.0);
    assert_eq!(after.updated_at, before.updated_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_stamps_uploader_activity(pool: PgPool) {
    let uploader = coordinator(&pool, "stamped").await;
    let before = UserRepo::find_by_id(&pool, uploader).await.unwrap().unwrap();
    assert!(before.last_active_at.is_none());

    let draft = build_report(sample_entries(), uploader, "october.xlsx", Utc::now());
    MonthlyReportRepo::create(&pool, &draft).await.unwrap();

    let after = UserRepo::find_by_id(&pool, uploader).await.unwrap().unwrap();
    assert!(after.last_active_at.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_failed_create_leaves_nothing_behind(pool: PgPool) {
    let bystander = coordinator(&pool, "bystander").await;
    let draft = build_report(sample_entries(), 9999, "orphan.xlsx", Utc::now());

    let err = MonthlyReportRepo::create(&pool, &draft).await.unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref e) if e.code().as_deref() == Some("23503"));

    let reports = MonthlyReportRepo::list(&pool, 50, 0).await.unwrap();
    assert!(reports.is_empty());
    let user = UserRepo::find_by_id(&pool, bystander).await.unwrap().unwrap();
    assert!(user.last_active_at.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_missing_report_returns_false(pool: PgPool) {
    assert!(!MonthlyReportRepo::delete(&pool, 9999).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_aggregate_sums_all_reports(pool: PgPool) {
    let empty = MonthlyReportRepo::aggregate(&pool).await.unwrap();
    assert_eq!(empty.report_count, 0);
    assert_eq!(empty.book_sum, 0);

    let uploader = coordinator(&pool, "summer").await;
    for name in ["a.xlsx", "b.xlsx"] {
        MonthlyReportRepo::create(&pool, &build_report(sample_entries(), uploader, name, Utc::now()))
            .await
            .unwrap();
    }

    let agg = MonthlyReportRepo::aggregate(&pool).await.unwrap();
    assert_eq!(agg.report_count, 2);
    assert_eq!(agg.book_sum, 18);
    assert_eq!(agg.point_sum, 64);
}
