//! Route definitions for the community directory.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::directory;
use crate::state::AppState;

/// Directory routes, merged directly into `/api/v1`.
///
/// ```text
/// GET  POST /regions              list (auth), create (admin)
/// GET  POST /clubs                list (auth), create (admin)
/// POST      /clubs/{id}/members   add member (coordinator or admin)
/// GET  POST /groups               list (auth), create (admin)
/// GET  POST /books                list (auth, paginated), create (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/regions",
            get(directory::list_regions).post(directory::create_region),
        )
        .route(
            "/clubs",
            get(directory::list_clubs).post(directory::create_club),
        )
        .route("/clubs/{id}/members", post(directory::add_club_member))
        .route(
            "/groups",
            get(directory::list_groups).post(directory::create_group),
        )
        .route(
            "/books",
            get(directory::list_books).post(directory::create_book),
        )
}
