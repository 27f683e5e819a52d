//! Route definitions for monthly book reports.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::book_reports;
use crate::state::AppState;

/// Routes mounted at `/book-reports`.
///
/// ```text
/// POST   /preview              -> preview_report (multipart, coordinator)
/// POST   /?confirm=true        -> save_report    (multipart, coordinator)
/// GET    /                     -> list_reports
/// GET    /{id}                 -> get_report
/// DELETE /{id}?confirm=true    -> delete_report  (coordinator)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(book_reports::list_reports).post(book_reports::save_report),
        )
        .route("/preview", post(book_reports::preview_report))
        .route(
            "/{id}",
            get(book_reports::get_report).delete(book_reports::delete_report),
        )
}
