//! Handler for the analytics dashboard.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use sangha_core::dashboard::{compute_stats, month_start, DashboardStats};
use sangha_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/stats
///
/// Recomputed on every call from a fresh snapshot; nothing is cached.
pub async fn get_stats(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let snapshot = DashboardRepo::snapshot(&state.pool, month_start(Utc::now())).await?;
    let stats = compute_stats(&snapshot);

    tracing::debug!(
        user_id = user.user_id,
        total_reports = stats.total_reports,
        top_region = %stats.top_region,
        "Dashboard stats computed",
    );
    Ok(Json(DataResponse { data: stats }))
}
