use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single auto-typed CSV cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, guessed from the raw CSV text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Guess the type of a raw CSV cell.
    pub fn guess(s: &str) -> Self {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") {
            return CellValue::Bool(s.eq_ignore_ascii_case("true"));
        }
        CellValue::String(s.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Numeric view of the cell. Text is trimmed and stripped of `,`
    /// thousands separators. Booleans and nulls are not numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::String(s) => {
                let cleaned = s.replace(',', "");
                cleaned.trim().parse::<f64>().ok()
            }
            CellValue::Bool(_) | CellValue::Null => None,
        }
    }

    /// Textual view of the cell, `None` for nulls.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            CellValue::String(s) => Some(Cow::Borrowed(s.as_str())),
            CellValue::Null => None,
            other => Some(Cow::Owned(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// RawRecord – one row of the source table
// ---------------------------------------------------------------------------

/// One CSV row: column name → cell. Absent columns simply have no entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub cells: BTreeMap<String, CellValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a column, treating `Null` cells as absent.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column).filter(|v| !v.is_null())
    }

    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        self.cells.insert(column.into(), value);
    }

    #[cfg(test)]
    pub fn with(mut self, column: &str, value: CellValue) -> Self {
        self.insert(column, value);
        self
    }
}

// ---------------------------------------------------------------------------
// ParsedFields – the logical fields inferred from a RawRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFields {
    pub year: Option<i32>,
    pub category: Option<String>,
    pub value: Option<f64>,
}

// ---------------------------------------------------------------------------
// SelectedCategories / WideRow – the pivot output
// ---------------------------------------------------------------------------

/// Labels used when fewer than two categories were observed.
pub const DEFAULT_CATEGORIES: [&str; 2] = ["power", "transport"];

/// Exactly two category labels, highest total first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedCategories([String; 2]);

impl SelectedCategories {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self([first.into(), second.into()])
    }

    pub fn labels(&self) -> &[String; 2] {
        &self.0
    }

    /// Column slot of `label` in a [`WideRow`], if selected.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.0.iter().position(|l| l == label)
    }
}

impl Default for SelectedCategories {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES[0], DEFAULT_CATEGORIES[1])
    }
}

/// One year of the pivot. `values[i]` belongs to the i-th selected category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WideRow {
    pub year: i32,
    pub values: [Option<f64>; 2],
}

impl WideRow {
    pub fn empty(year: i32) -> Self {
        Self {
            year,
            values: [None, None],
        }
    }
}

/// Result of aggregating a record set.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotResult {
    pub categories: SelectedCategories,
    /// Running totals per category, in first-encounter order.
    pub totals: Vec<(String, f64)>,
    /// Ascending by year, at most one row per year.
    pub rows: Vec<WideRow>,
}

// ---------------------------------------------------------------------------
// ChartData – what the presentation layer draws
// ---------------------------------------------------------------------------

/// Series labels plus rows, from either real data or the fallback set.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub series: SelectedCategories,
    pub rows: Vec<WideRow>,
}

impl From<&PivotResult> for ChartData {
    fn from(p: &PivotResult) -> Self {
        ChartData {
            series: p.categories.clone(),
            rows: p.rows.clone(),
        }
    }
}

const FALLBACK_ROWS: [(i32, f64, f64); 5] = [
    (2018, 0.96, 1.12),
    (2019, 1.02, 1.15),
    (2020, 0.88, 1.05),
    (2021, 1.10, 1.18),
    (2022, 1.15, 1.21),
];

impl ChartData {
    /// Placeholder shown when real data is unavailable or empty.
    pub fn fallback() -> Self {
        ChartData {
            series: SelectedCategories::new("Transport", "Power"),
            rows: FALLBACK_ROWS
                .iter()
                .map(|&(year, transport, power)| WideRow {
                    year,
                    values: [Some(transport), Some(power)],
                })
                .collect(),
        }
    }

    /// `(year, value)` points of one series with nulls skipped.
    pub fn series_points(&self, index: usize) -> Vec<[f64; 2]> {
        self.rows
            .iter()
            .filter_map(|r| r.values.get(index).copied().flatten().map(|v| [r.year as f64, v]))
            .collect()
    }
}
