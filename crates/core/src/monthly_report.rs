//! Folding classified book entries into one monthly report.
//!
//! A report is scoped to the calendar month in which it was uploaded. The
//! month and year are taken from the upload clock, never from anything in
//! the spreadsheet itself.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::book_points::BookEntry;
use crate::types::{DbId, Timestamp};

/// File extensions accepted for distribution report uploads.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// Maximum length of a stored upload file name.
pub const MAX_FILE_NAME_LEN: usize = 255;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Quantity and point totals of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub total_books: i64,
    pub total_recognized_books: i64,
    pub total_points: i64,
}

/// A fully computed report that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDraft {
    pub month: String,
    pub year: i32,
    pub file_name: String,
    pub uploaded_by: DbId,
    pub uploaded_at: Timestamp,
    #[serde(flatten)]
    pub totals: ReportTotals,
    pub entries: Vec<BookEntry>,
}

/// English month name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month.checked_sub(1)? as usize).copied()
}

/// Sum quantities and points over the entries in a single pass.
///
/// The recognised total is quantity-weighted, not a row count. Sums
/// saturate at `i64::MAX` instead of wrapping.
pub fn summarize(entries: &[BookEntry]) -> ReportTotals {
    entries.iter().fold(ReportTotals::default(), |mut acc, e| {
        acc.total_books = acc.total_books.saturating_add(e.quantity);
        if e.is_recognized_publisher {
            acc.total_recognized_books =
                acc.total_recognized_books.saturating_add(e.quantity);
        }
        acc.total_points = acc.total_points.saturating_add(e.line_total_points);
        acc
    })
}

/// Build the report for an upload happening at `now`.
pub fn build_report(
    entries: Vec<BookEntry>,
    uploaded_by: DbId,
    file_name: &str,
    now: Timestamp,
) -> ReportDraft {
    let totals = summarize(&entries);
    ReportDraft {
        month: month_name(now.month()).unwrap_or_default().to_string(),
        year: now.year(),
        file_name: file_name.to_string(),
        uploaded_by,
        uploaded_at: now,
        totals,
        entries,
    }
}

/// Check an uploaded file name before any decoding happens.
pub fn validate_file_name(name: &str) -> Result<(), String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("File name must not be empty".to_string());
    }
    if name.len() > MAX_FILE_NAME_LEN {
        return Err(format!(
            "File name must be at most {MAX_FILE_NAME_LEN} characters"
        ));
    }
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    if !ACCEPTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(format!(
            "Unsupported file type. Expected one of: {}",
            ACCEPTED_EXTENSIONS.join(", ")
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn entry(title: &str, quantity: i64, recognized: bool, points: i64) -> BookEntry {
        BookEntry {
            title: title.to_string(),
            isbn: String::new(),
            quantity,
            publisher: String::new(),
            is_recognized_publisher: recognized,
            points_per_unit: points,
            line_total_points: points.saturating_mul(quantity),
        }
    }

    #[test]
    fn test_totals_over_mixed_entries() {
        let entries = vec![
            entry("Bhagavad-gita As It Is", 3, true, 10),
            entry("Unknown Book", 2, true, 1),
            entry("Other Book", 4, false, 0),
        ];
        let totals = summarize(&entries);

        assert_eq!(totals.total_books, 9);
        assert_eq!(totals.total_recognized_books, 5);
        assert_eq!(totals.total_points, 32);
    }

    #[test]
    fn test_large_rows_never_wrap_negative() {
        let entries = vec![
            entry("Bhagavad-gita As It Is", i64::MAX / 2, true, 10),
            entry("Srimad-Bhagavatam", i64::MAX / 2, true, 10),
            entry("Other Book", i64::MAX / 2, false, 0),
        ];
        let totals = summarize(&entries);

        assert_eq!(totals.total_books, i64::MAX);
        assert_eq!(totals.total_recognized_books, i64::MAX - 1);
        assert_eq!(totals.total_points, i64::MAX);
    }

    #[test]
    fn test_classified_upload_at_quantity_limit_sums_cleanly() {
        use crate::book_points::{
            classify_rows, ClassifierConfig, RawRow, RowValue, MAX_QUANTITY,
        };

        let rows: Vec<RawRow> = (0..3)
            .map(|_| {
                RawRow::new()
                    .with("Book Title", RowValue::Text("Bhagavad-gita As It Is".into()))
                    .with("Qty", RowValue::Number(MAX_QUANTITY as f64))
            })
            .chain(std::iter::once(
                RawRow::new()
                    .with("Book Title", RowValue::Text("Srimad-Bhagavatam".into()))
                    .with("Qty", RowValue::Number(1e18)),
            ))
            .collect();
        let entries = classify_rows(&rows, &ClassifierConfig::default());
        let totals = summarize(&entries);

        assert_eq!(entries.len(), 3);
        assert_eq!(totals.total_books, 3 * MAX_QUANTITY);
        assert_eq!(totals.total_points, 30 * MAX_QUANTITY);
    }

    #[test]
    fn test_empty_report_totals_are_zero() {
        assert_eq!(summarize(&[]), ReportTotals::default());
    }

    #[test]
    fn test_month_and_year_come_from_upload_time() {
        let now = chrono::Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();
        let draft = build_report(vec![entry("Coming Back", 2, true, 2)], 7, "oct.xlsx", now);

        assert_eq!(draft.month, "October");
        assert_eq!(draft.year, 2026);
        assert_eq!(draft.uploaded_by, 7);
        assert_eq!(draft.uploaded_at, now);
        assert_eq!(draft.file_name, "oct.xlsx");
        assert_eq!(draft.totals.total_points, 4);
    }

    #[test]
    fn test_entries_keep_input_order() {
        let now = chrono::Utc::now();
        let draft = build_report(
            vec![entry("B", 1, false, 0), entry("A", 1, false, 0)],
            1,
            "r.xlsx",
            now,
        );
        assert_eq!(draft.entries[0].title, "B");
        assert_eq!(draft.entries[1].title, "A");
    }

    #[test]
    fn test_month_name_bounds() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_draft_serializes_flat_totals() {
        let now = chrono::Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        let draft = build_report(vec![entry("A", 2, true, 1)], 1, "r.xlsx", now);
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["total_books"], 2);
        assert_eq!(json["total_recognized_books"], 2);
        assert_eq!(json["month"], "January");
    }

    #[test]
    fn test_file_name_validation() {
        assert!(validate_file_name("october.xlsx").is_ok());
        assert!(validate_file_name("OCTOBER.XLS").is_ok());
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name("report.csv").is_err());
        assert!(validate_file_name("noextension").is_err());
    }
}
