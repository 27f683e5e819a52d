pub mod auth;
pub mod book_reports;
pub mod dashboard;
pub mod directory;
pub mod health;
pub mod profile;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register                  register (public)
/// /auth/login                     login (public)
/// /auth/refresh                   refresh (public)
/// /auth/logout                    logout (requires auth)
///
/// /profile                        get, update own profile
///
/// /regions                        list, create (admin)
/// /clubs                          list, create (admin)
/// /clubs/{id}/members             add member (coordinator)
/// /groups                         list, create (admin)
/// /books                          list, create (admin)
///
/// /book-reports                   list, save (coordinator, confirm=true)
/// /book-reports/preview           preview upload (coordinator)
/// /book-reports/{id}              get, delete (coordinator, confirm=true)
///
/// /dashboard/stats                aggregated statistics
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/profile", profile::router())
        .merge(directory::router())
        .nest("/book-reports", book_reports::router())
        .nest("/dashboard", dashboard::router())
}
