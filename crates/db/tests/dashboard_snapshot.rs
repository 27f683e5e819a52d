//! Integration tests for the dashboard snapshot fetch.

use chrono::{Duration, Utc};
use sangha_core::dashboard::{compute_stats, month_start};
use sangha_core::monthly_report::build_report;
use sangha_db::models::book::CreateBook;
use sangha_db::models::club::CreateClub;
use sangha_db::models::region::CreateRegion;
use sangha_db::models::role::ROLE_ID_MEMBER;
use sangha_db::models::sub_group::CreateSubGroup;
use sangha_db::models::user::CreateUser;
use sangha_db::repositories::{
    BookRepo, ClubRepo, DashboardRepo, MonthlyReportRepo, RegionRepo, SubGroupRepo, UserRepo,
};
use sqlx::PgPool;

async fn member(pool: &PgPool, username: &str) -> i64 {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.org"),
        password_hash: "hash".to_string(),
        role_id: ROLE_ID_MEMBER,
        display_name: username.to_string(),
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

async fn region(pool: &PgPool, name: &str) -> i64 {
    RegionRepo::create(pool, &CreateRegion { name: name.to_string() })
        .await
        .unwrap()
        .id
}

async fn group(pool: &PgPool, name: &str, region_id: Option<i64>) {
    SubGroupRepo::create(
        pool,
        &CreateSubGroup {
            name: name.to_string(),
            region_id,
        },
    )
    .await
    .unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn test_empty_database_snapshot(pool: PgPool) {
    let snapshot = DashboardRepo::snapshot(&pool, month_start(Utc::now()))
        .await
        .unwrap();
    let stats = compute_stats(&snapshot);

    assert_eq!(stats.total_members, 0);
    assert_eq!(stats.total_clubs, 0);
    assert_eq!(stats.avg_members_per_club, 0);
    assert_eq!(stats.avg_books_per_club, 0);
    assert_eq!(stats.total_reports, 0);
    assert_eq!(stats.top_region, "N/A");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_snapshot_reflects_all_collections(pool: PgPool) {
    let a = member(&pool, "alice").await;
    let b = member(&pool, "bhima").await;
    member(&pool, "chandra").await;
    let inactive = member(&pool, "dormant").await;
    UserRepo::deactivate(&pool, inactive).await.unwrap();

    let north = region(&pool, "North").await;
    let south = region(&pool, "South").await;
    group(&pool, "N1", Some(north)).await;
    group(&pool, "S1", Some(south)).await;
    group(&pool, "S2", Some(south)).await;
    group(&pool, "Loose", None).await;

    ClubRepo::create(
        &pool,
        &CreateClub {
            name: "Gita Circle".into(),
            region_id: Some(north),
            member_ids: Some(vec![a, b]),
        },
    )
    .await
    .unwrap();
    ClubRepo::create(
        &pool,
        &CreateClub {
            name: "Empty Club".into(),
            region_id: None,
            member_ids: None,
        },
    )
    .await
    .unwrap();

    for title in ["One", "Two", "Three"] {
        BookRepo::create(
            &pool,
            &CreateBook {
                title: title.into(),
                isbn: String::new(),
                publisher: "BBT".into(),
            },
        )
        .await
        .unwrap();
    }

    MonthlyReportRepo::create(&pool, &build_report(vec![], a, "empty.xlsx", Utc::now()))
        .await
        .unwrap();

    let snapshot = DashboardRepo::snapshot(&pool, month_start(Utc::now()))
        .await
        .unwrap();
    let stats = compute_stats(&snapshot);

    assert_eq!(stats.total_members, 3);
    assert_eq!(stats.total_clubs, 2);
    assert_eq!(stats.total_club_members, 2);
    assert_eq!(stats.active_clubs, 1);
    assert_eq!(stats.avg_members_per_club, 1);
    assert_eq!(stats.total_books, 3);
    assert_eq!(stats.avg_books_per_club, 2);
    assert_eq!(stats.books_added_this_month, 3);
    assert_eq!(stats.total_regions, 2);
    assert_eq!(stats.total_groups, 4);
    assert_eq!(stats.total_reports, 1);
    assert_eq!(stats.top_region, "South");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_month_to_date_counts_use_activity(pool: PgPool) {
    let active = member(&pool, "active").await;
    member(&pool, "idle").await;
    UserRepo::touch_active(&pool, active).await.unwrap();

    let snapshot = DashboardRepo::snapshot(&pool, month_start(Utc::now()))
        .await
        .unwrap();
    assert_eq!(snapshot.members_active_this_month, 1);

    let future = Utc::now() + Duration::days(1);
    let snapshot = DashboardRepo::snapshot(&pool, future).await.unwrap();
    assert_eq!(snapshot.members_active_this_month, 0);
    assert_eq!(snapshot.books_added_this_month, 0);
}
