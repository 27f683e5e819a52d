//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects with 403 when the role is
//! not allowed, so authorization is visible in the handler signature.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sangha_core::error::CoreError;
use sangha_core::roles::{can_manage_reports, ROLE_ADMIN};

use crate::error::AppError;
use crate::state::AppState;
use super::auth::AuthUser;

/// Requires the `admin` role.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `coordinator` or `admin`, the roles that upload and delete
/// monthly book reports.
///
/// ```ignore
/// async fn save(RequireCoordinator(user): RequireCoordinator) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireCoordinator(pub AuthUser);

impl FromRequestParts<AppState> for RequireCoordinator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !can_manage_reports(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Coordinator or Admin role required".into(),
            )));
        }
        Ok(RequireCoordinator(user))
    }
}

/// Any signed-in member. Same as [`AuthUser`], named for route readability.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
