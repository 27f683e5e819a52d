use crate::spreadsheet::SpreadsheetError;
use crate::types::DbId;

/// Domain-level failures shared by every layer of the backend.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The uploaded file could not be decoded as tabular data.
    #[error("Unreadable spreadsheet: {0}")]
    Spreadsheet(#[from] SpreadsheetError),

    #[error("Internal error: {0}")]
    Internal(String),
}
