//! Classification of uploaded distribution-report rows into book entries.
//!
//! A distribution report is a spreadsheet with one row per title handed out
//! during the month. Column headers are not standardised across uploaders, so
//! each logical field accepts a few header synonyms. Every row is turned into
//! a [`BookEntry`] or discarded; malformed cells never raise errors, they fall
//! back to defaults instead.
//!
//! The recognised-publisher list and the title-to-points table are supplied
//! through [`ClassifierConfig`] so classification stays a pure function of
//! `(row, config)`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ── Constants ────────────────────────────────────────────────────────

/// Accepted headers for the title column, in priority order.
pub const TITLE_HEADERS: &[&str] = &["Book Title", "Title", "Book"];

/// Accepted headers for the quantity column, in priority order.
pub const QUANTITY_HEADERS: &[&str] = &["Quantity", "Qty"];

/// Accepted headers for the ISBN column.
pub const ISBN_HEADERS: &[&str] = &["ISBN"];

/// Accepted headers for the publisher column.
pub const PUBLISHER_HEADERS: &[&str] = &["Publisher"];

/// Largest quantity a single row may report. Larger values are treated as
/// unparseable and the row is discarded.
pub const MAX_QUANTITY: i64 = 1_000_000;

/// Points per unit for a recognised book whose title is not in the table.
pub const DEFAULT_RECOGNIZED_POINTS: i64 = 1;

/// Publisher names that mark a row as one of the organisation's own books.
pub const DEFAULT_PUBLISHERS: &[&str] = &["BBT", "Bhaktivedanta Book Trust"];

/// Built-in title-to-points table.
pub const DEFAULT_POINTS_TABLE: &[(&str, i64)] = &[
    ("Bhagavad-gita As It Is", 10),
    ("Srimad-Bhagavatam", 10),
    ("Sri Caitanya-caritamrta", 10),
    ("Krsna, the Supreme Personality of Godhead", 8),
    ("The Nectar of Devotion", 6),
    ("Teachings of Lord Caitanya", 6),
    ("The Science of Self-Realization", 5),
    ("Sri Isopanisad", 3),
    ("The Nectar of Instruction", 3),
    ("Perfect Questions, Perfect Answers", 2),
    ("Beyond Birth and Death", 2),
    ("Easy Journey to Other Planets", 2),
    ("Raja-vidya: The King of Knowledge", 2),
    ("Chant and Be Happy", 2),
    ("Coming Back", 2),
    ("On the Way to Krsna", 2),
    ("The Laws of Nature", 2),
];

// ── Types ────────────────────────────────────────────────────────────

/// A single decoded spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RowValue {
    Text(String),
    Number(f64),
    Empty,
}

impl RowValue {
    /// `true` for [`RowValue::Empty`] and for text that is blank after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
            Self::Empty => true,
        }
    }

    /// Trimmed textual form. Whole numbers render without a fractional part.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.trim().to_string(),
            Self::Number(n) if n.fract() == 0.0 && n.is_finite() => format!("{}", *n as i64),
            Self::Number(n) => n.to_string(),
            Self::Empty => String::new(),
        }
    }

    /// Integer form, truncating decimals. Anything unparseable becomes 0.
    pub fn as_integer(&self) -> i64 {
        match self {
            Self::Number(n) if n.is_finite() => n.trunc() as i64,
            Self::Number(_) => 0,
            Self::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| {
                        s.parse::<f64>()
                            .ok()
                            .filter(|f| f.is_finite())
                            .map(|f| f.trunc() as i64)
                    })
                    .unwrap_or(0)
            }
            Self::Empty => 0,
        }
    }
}

/// One decoded spreadsheet row: column header paired with its cell value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    cells: Vec<(String, RowValue)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell. Later duplicates of a header are shadowed by earlier ones.
    pub fn push(&mut self, header: impl Into<String>, value: RowValue) {
        self.cells.push((header.into(), value));
    }

    /// Builder form of [`RawRow::push`].
    pub fn with(mut self, header: impl Into<String>, value: RowValue) -> Self {
        self.push(header, value);
        self
    }

    /// Look up a cell by header, ignoring surrounding whitespace and case.
    pub fn get(&self, header: &str) -> Option<&RowValue> {
        let wanted = header.trim();
        self.cells
            .iter()
            .find(|(h, _)| h.trim().eq_ignore_ascii_case(wanted))
            .map(|(_, v)| v)
    }

    /// First non-blank value among the given header synonyms.
    pub fn first_present(&self, headers: &[&str]) -> Option<&RowValue> {
        headers
            .iter()
            .filter_map(|h| self.get(h))
            .find(|v| !v.is_blank())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.is_blank())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }
}

/// Lookup tables used to classify rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Publisher names matched case-insensitively as substrings.
    pub recognized_publishers: Vec<String>,
    /// Exact title to points-per-unit.
    pub points_table: HashMap<String, i64>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            recognized_publishers: DEFAULT_PUBLISHERS.iter().map(|p| p.to_string()).collect(),
            points_table: DEFAULT_POINTS_TABLE
                .iter()
                .map(|(title, points)| (title.to_string(), *points))
                .collect(),
        }
    }
}

impl ClassifierConfig {
    /// Whether the publisher string contains any recognised publisher name.
    pub fn is_recognized_publisher(&self, publisher: &str) -> bool {
        let publisher = publisher.to_lowercase();
        self.recognized_publishers
            .iter()
            .filter(|name| !name.trim().is_empty())
            .any(|name| publisher.contains(&name.to_lowercase()))
    }

    /// Points-per-unit for an exact title match.
    pub fn points_for(&self, title: &str) -> Option<i64> {
        self.points_table.get(title).copied()
    }
}

/// One retained row of a distribution report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookEntry {
    pub title: String,
    pub isbn: String,
    pub quantity: i64,
    pub publisher: String,
    pub is_recognized_publisher: bool,
    pub points_per_unit: i64,
    pub line_total_points: i64,
}

// ── Pure Functions ───────────────────────────────────────────────────

/// Classify one decoded row.
///
/// Returns `None` when the row has no title or a quantity outside
/// `1..=MAX_QUANTITY`; such rows never reach the report totals.
pub fn classify_row(row: &RawRow, config: &ClassifierConfig) -> Option<BookEntry> {
    let title = row
        .first_present(TITLE_HEADERS)
        .map(RowValue::as_text)
        .unwrap_or_default();
    let quantity = row
        .first_present(QUANTITY_HEADERS)
        .map(RowValue::as_integer)
        .filter(|q| *q <= MAX_QUANTITY)
        .unwrap_or(0);

    if title.is_empty() || quantity <= 0 {
        return None;
    }

    let isbn = row
        .first_present(ISBN_HEADERS)
        .map(RowValue::as_text)
        .unwrap_or_default();
    let publisher = row
        .first_present(PUBLISHER_HEADERS)
        .map(RowValue::as_text)
        .unwrap_or_default();

    let table_points = config.points_for(&title);
    let is_recognized_publisher =
        config.is_recognized_publisher(&publisher) || table_points.is_some();

    let points_per_unit = match (is_recognized_publisher, table_points) {
        (true, Some(points)) => points,
        (true, None) => DEFAULT_RECOGNIZED_POINTS,
        (false, _) => 0,
    };

    Some(BookEntry {
        title,
        isbn,
        quantity,
        publisher,
        is_recognized_publisher,
        points_per_unit,
        line_total_points: points_per_unit.saturating_mul(quantity),
    })
}

/// Classify every row, keeping input order and dropping discarded rows.
pub fn classify_rows(rows: &[RawRow], config: &ClassifierConfig) -> Vec<BookEntry> {
    rows.iter()
        .filter_map(|row| classify_row(row, config))
        .collect()
}
