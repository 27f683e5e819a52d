//! Decoding uploaded workbooks into loosely typed rows.
//!
//! Only the first worksheet is read. Its first non-blank row is the header
//! row; every later row becomes a [`RawRow`] keyed by those headers. Cell
//! coercion beyond this point is the classifier's job.

use std::io::Cursor;

use calamine::{Data, Reader};

use crate::book_points::{RawRow, RowValue};

/// Failure to read an upload as tabular data at all.
#[derive(Debug, thiserror::Error)]
pub enum SpreadsheetError {
    #[error("file is not a readable workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("workbook contains no worksheets")]
    NoWorksheet,

    #[error("worksheet has no header row")]
    MissingHeader,
}

/// Convert one calamine cell into the classifier's cell representation.
pub fn cell_value(cell: &Data) -> RowValue {
    match cell {
        Data::Empty | Data::Error(_) => RowValue::Empty,
        Data::String(s) => RowValue::Text(s.clone()),
        Data::Float(f) => RowValue::Number(*f),
        Data::Int(i) => RowValue::Number(*i as f64),
        other => RowValue::Text(other.to_string()),
    }
}

/// Decode workbook bytes (xlsx, xlsm, xls or ods) into header-keyed rows.
pub fn decode_rows(bytes: &[u8]) -> Result<Vec<RawRow>, SpreadsheetError> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(SpreadsheetError::NoWorksheet)?;
    let range = workbook.worksheet_range(&first)?;

    let mut rows = range.rows().skip_while(|r| r.iter().all(is_blank));

    let headers: Vec<String> = rows
        .next()
        .ok_or(SpreadsheetError::MissingHeader)?
        .iter()
        .map(|c| cell_value(c).as_text())
        .collect();

    let decoded = rows
        .map(|cells| {
            headers
                .iter()
                .zip(cells.iter())
                .filter(|(header, _)| !header.is_empty())
                .fold(RawRow::new(), |row, (header, cell)| {
                    row.with(header.clone(), cell_value(cell))
                })
        })
        .filter(|row| !row.is_empty())
        .collect();

    Ok(decoded)
}

fn is_blank(cell: &Data) -> bool {
    cell_value(cell).is_blank()
}
