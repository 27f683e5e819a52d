//! Handlers for the community directory: regions, clubs, sub-groups and
//! the book catalog.
//!
//! Everyone signed in may read; creating entries is admin-only. Adding a
//! member to a club is open to coordinators as well.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use sangha_core::error::CoreError;
use sangha_core::types::DbId;
use sangha_db::models::book::{Book, CreateBook};
use sangha_db::models::club::{Club, CreateClub};
use sangha_db::models::region::{CreateRegion, Region};
use sangha_db::models::sub_group::{CreateSubGroup, SubGroup};
use sangha_db::repositories::{BookRepo, ClubRepo, RegionRepo, SubGroupRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireCoordinator};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /clubs/{id}/members`.
#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: DbId,
}

fn require_name(name: &str, entity: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "{entity} name must not be empty"
        ))));
    }
    Ok(())
}

async fn ensure_region(state: &AppState, region_id: Option<DbId>) -> AppResult<()> {
    if let Some(id) = region_id {
        RegionRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Region",
                id,
            }))?;
    }
    Ok(())
}

// ── Regions ──────────────────────────────────────────────────────────

/// GET /api/v1/regions
pub async fn list_regions(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Region>>>> {
    let regions = RegionRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: regions }))
}

/// POST /api/v1/regions
pub async fn create_region(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateRegion>,
) -> AppResult<(StatusCode, Json<DataResponse<Region>>)> {
    require_name(&input.name, "Region")?;
    let region = RegionRepo::create(&state.pool, &input).await?;
    tracing::info!(region_id = region.id, user_id = admin.user_id, "Region created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: region })))
}

// ── Clubs ────────────────────────────────────────────────────────────

/// GET /api/v1/clubs
pub async fn list_clubs(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Club>>>> {
    let clubs = ClubRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: clubs }))
}

/// POST /api/v1/clubs
pub async fn create_club(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateClub>,
) -> AppResult<(StatusCode, Json<DataResponse<Club>>)> {
    require_name(&input.name, "Club")?;
    ensure_region(&state, input.region_id).await?;
    let club = ClubRepo::create(&state.pool, &input).await?;
    tracing::info!(club_id = club.id, user_id = admin.user_id, "Club created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: club })))
}

/// POST /api/v1/clubs/{id}/members
///
/// Idempotent: adding an existing member returns the club unchanged.
pub async fn add_club_member(
    RequireCoordinator(user): RequireCoordinator,
    State(state): State<AppState>,
    Path(club_id): Path<DbId>,
    Json(input): Json<AddMemberRequest>,
) -> AppResult<Json<DataResponse<Club>>> {
    UserRepo::find_by_id(&state.pool, input.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.user_id,
        }))?;

    let club = ClubRepo::add_member(&state.pool, club_id, input.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Club",
            id: club_id,
        }))?;

    tracing::info!(
        club_id,
        member_id = input.user_id,
        user_id = user.user_id,
        "Club member added",
    );
    Ok(Json(DataResponse { data: club }))
}

// ── Sub-groups ───────────────────────────────────────────────────────

/// GET /api/v1/groups
pub async fn list_groups(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SubGroup>>>> {
    let groups = SubGroupRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: groups }))
}

/// POST /api/v1/groups
pub async fn create_group(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateSubGroup>,
) -> AppResult<(StatusCode, Json<DataResponse<SubGroup>>)> {
    require_name(&input.name, "Group")?;
    ensure_region(&state, input.region_id).await?;
    let group = SubGroupRepo::create(&state.pool, &input).await?;
    tracing::info!(group_id = group.id, user_id = admin.user_id, "Sub-group created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: group })))
}

// ── Book catalog ─────────────────────────────────────────────────────

/// GET /api/v1/books
pub async fn list_books(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Book>>>> {
    let books = BookRepo::list(&state.pool, params.limit(), params.offset()).await?;
    Ok(Json(DataResponse { data: books }))
}

/// POST /api/v1/books
pub async fn create_book(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<DataResponse<Book>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Book title must not be empty".into(),
        )));
    }
    let book = BookRepo::create(&state.pool, &input).await?;
    tracing::info!(book_id = book.id, user_id = admin.user_id, "Book added to catalog");
    Ok((StatusCode::CREATED, Json(DataResponse { data: book })))
}
