//! Handlers for monthly book-distribution reports.
//!
//! An upload goes through decode -> classify -> aggregate. Preview runs that
//! pipeline and returns the draft; save runs it again on the confirmed file
//! and writes one report row. Reports are never edited, only deleted.

use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sangha_core::book_points::{classify_rows, BookEntry, ClassifierConfig};
use sangha_core::error::CoreError;
use sangha_core::monthly_report::{build_report, validate_file_name, ReportDraft};
use sangha_core::spreadsheet::decode_rows;
use sangha_core::types::DbId;
use sangha_db::models::monthly_report::{MonthlyReport, MonthlyReportSummary};
use sangha_db::repositories::MonthlyReportRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireCoordinator};
use crate::query::{ConfirmParams, PaginationParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the workbook.
pub const UPLOAD_FIELD: &str = "file";

/// An uploaded workbook, read fully into memory.
struct Upload {
    file_name: String,
    bytes: Vec<u8>,
}

/// Pull the workbook out of the multipart body.
///
/// Other fields are ignored. The body size is already capped by the
/// request body limit layer.
async fn read_upload(mut multipart: Multipart) -> AppResult<Upload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().trim().to_string();
        validate_file_name(&file_name).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if bytes.is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Uploaded file is empty".into(),
            )));
        }

        return Ok(Upload {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    Err(AppError::BadRequest(format!(
        "Multipart field '{UPLOAD_FIELD}' is required"
    )))
}

/// Decode and classify off the async runtime; workbook parsing is CPU-bound.
async fn classify_upload(
    classifier: Arc<ClassifierConfig>,
    bytes: Vec<u8>,
) -> AppResult<Vec<BookEntry>> {
    tokio::task::spawn_blocking(move || {
        let rows = decode_rows(&bytes)?;
        Ok::<_, CoreError>(classify_rows(&rows, &classifier))
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Spreadsheet task failed: {e}")))?
    .map_err(AppError::from)
}

async fn draft_from_upload(
    state: &AppState,
    user_id: DbId,
    multipart: Multipart,
) -> AppResult<ReportDraft> {
    let upload = read_upload(multipart).await?;
    let entries = classify_upload(Arc::clone(&state.classifier), upload.bytes).await?;
    Ok(build_report(entries, user_id, &upload.file_name, Utc::now()))
}

fn confirmation_required(action: &str) -> AppError {
    AppError::BadRequest(format!("{action} requires explicit confirmation (confirm=true)"))
}

// ── Preview / save ───────────────────────────────────────────────────

/// POST /api/v1/book-reports/preview
///
/// Returns the computed report without persisting anything.
pub async fn preview_report(
    RequireCoordinator(user): RequireCoordinator,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<ReportDraft>>> {
    let draft = draft_from_upload(&state, user.user_id, multipart).await?;
    tracing::debug!(
        user_id = user.user_id,
        file_name = %draft.file_name,
        entries = draft.entries.len(),
        total_points = draft.totals.total_points,
        "Report previewed",
    );
    Ok(Json(DataResponse { data: draft }))
}

/// POST /api/v1/book-reports?confirm=true
///
/// Persist a report and stamp the uploader's activity in one transaction.
/// A second save by the same member
/// while one is in flight is rejected with 409.
pub async fn save_report(
    RequireCoordinator(user): RequireCoordinator,
    State(state): State<AppState>,
    Query(confirm): Query<ConfirmParams>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<MonthlyReport>>)> {
    if !confirm.confirm {
        return Err(confirmation_required("Saving a report"));
    }

    let _slot = state.uploads.try_acquire(user.user_id).ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "A report upload is already in progress".into(),
        ))
    })?;

    let draft = draft_from_upload(&state, user.user_id, multipart).await?;
    let report = MonthlyReportRepo::create(&state.pool, &draft).await?;

    tracing::info!(
        report_id = report.id,
        user_id = user.user_id,
        month = %report.month,
        year = report.year,
        total_books = report.total_books,
        total_points = report.total_points,
        "Monthly report saved",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: report })))
}

// ── Read / delete ────────────────────────────────────────────────────

/// GET /api/v1/book-reports
pub async fn list_reports(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<MonthlyReportSummary>>>> {
    let reports = MonthlyReportRepo::list(&state.pool, params.limit(), params.offset()).await?;
    Ok(Json(DataResponse { data: reports }))
}

/// GET /api/v1/book-reports/{id}
pub async fn get_report(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MonthlyReport>>> {
    let report = MonthlyReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MonthlyReport",
            id,
        }))?;
    Ok(Json(DataResponse { data: report }))
}

/// DELETE /api/v1/book-reports/{id}?confirm=true
pub async fn delete_report(
    RequireCoordinator(user): RequireCoordinator,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(confirm): Query<ConfirmParams>,
) -> AppResult<StatusCode> {
    if !confirm.confirm {
        return Err(confirmation_required("Deleting a report"));
    }

    if !MonthlyReportRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "MonthlyReport",
            id,
        }));
    }

    tracing::info!(report_id = id, user_id = user.user_id, "Monthly report deleted");
    Ok(StatusCode::NO_CONTENT)
}
