//! Handlers for the caller's own member profile.

use axum::extract::State;
use axum::Json;
use sangha_core::error::CoreError;
use sangha_core::profile::{check, ProfileUpdate};
use sangha_db::models::user::{ProfileResponse, UpdateProfile};
use sangha_db::repositories::{RegionRepo, RoleRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(Json(DataResponse {
        data: ProfileResponse::from_user(&user, role),
    }))
}

/// PUT /api/v1/profile
///
/// Only fields present in the body change.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ProfileUpdate>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    check(&input)?;

    if let Some(region_id) = input.region_id {
        RegionRepo::find_by_id(&state.pool, region_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Region",
                id: region_id,
            }))?;
    }

    let update = UpdateProfile {
        display_name: input.display_name.map(|s| s.trim().to_string()),
        email: input.email.map(|s| s.trim().to_string()),
        phone: input.phone,
        bio: input.bio,
        region_id: input.region_id,
    };

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    UserRepo::touch_active(&state.pool, user.id).await?;

    tracing::info!(user_id = user.id, "Profile updated");

    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(Json(DataResponse {
        data: ProfileResponse::from_user(&user, role),
    }))
}
