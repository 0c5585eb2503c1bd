use std::fmt;

use serde::Serialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single raw cell as read from a CSV or Excel file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// String form used for roster fields (category, role, identifier).
    /// Integral floats print without a fractional part.
    pub fn to_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.clone(),
            Self::Int(n) => n.to_string(),
            Self::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => if *b { "TRUE".into() } else { "FALSE".into() },
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Self::Empty)
    }
}

/// A loaded table: header names plus row-aligned cells.
#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// Build a dataset, rejecting rows that do not match the header width.
    pub fn new(
        name: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<Self, ReconError> {
        let name = name.into();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(ReconError::RaggedRow {
                    dataset: name,
                    row: i + 1,
                    expected: headers.len(),
                    found: row.len(),
                });
            }
        }
        Ok(Self { name, headers, rows })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a header, matched after trimming surrounding whitespace.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == column)
    }

    pub fn require_column(&self, column: &str) -> Result<usize, ReconError> {
        self.column_index(column).ok_or_else(|| ReconError::MissingColumn {
            dataset: self.name.clone(),
            column: column.to_string(),
        })
    }

    /// All values of one column, in row order.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows.iter().map(move |row| &row[idx])
    }
}

/// One row of the fixed dataset, fields already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRecord {
    pub category: String,
    pub role: String,
    pub identifier: String,
}

/// A roster record annotated with its registration status.
#[derive(Debug, Clone)]
pub struct FlaggedRecord {
    pub record: RosterRecord,
    pub is_registered: bool,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Table 1 row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryAggregate {
    pub category: String,
    pub total_strength: usize,
    pub registered: usize,
    pub registered_percent: String,
}

/// Table 2 row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRoleAggregate {
    pub category: String,
    pub role: String,
    pub total_cadre_members: usize,
    pub registered: usize,
    pub registered_percent: String,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// A rendered table: header row plus string-coerced data rows.
#[derive(Debug, Clone, Serialize)]
pub struct ResultTable {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub roster_records: usize,
    pub roster_unlisted_category: usize,
    pub weekly_records: usize,
    pub weekly_unrecoverable: usize,
    pub weekly_distinct_ids: usize,
    pub weekly_unmatched_ids: usize,
    /// Total cadre across listed categories (Table 1 Total row).
    pub total_strength: usize,
    /// Registered with MID mapped (Table 1 Total row).
    pub registered: usize,
    pub registered_percent: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub config_name: String,
    pub title: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub summary: ReportSummary,
    pub committees: Vec<CategoryAggregate>,
    pub roles: Vec<CategoryRoleAggregate>,
    pub tables: Vec<ResultTable>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_text_drops_integral_fraction() {
        assert_eq!(CellValue::Float(12345.0).to_text(), "12345");
        assert_eq!(CellValue::Float(1.5).to_text(), "1.5");
        assert_eq!(CellValue::Empty.to_text(), "");
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = Dataset::new(
            "fixed",
            vec!["A".into(), "B".into()],
            vec![vec!["x".into(), "y".into()], vec!["z".into()]],
        )
        .unwrap_err();
        assert!(matches!(err, ReconError::RaggedRow { row: 2, expected: 2, found: 1, .. }));
    }

    #[test]
    fn column_lookup_trims_header() {
        let ds = Dataset::new("weekly", vec![" mid ".into()], vec![vec![CellValue::Int(7)]]).unwrap();
        assert_eq!(ds.column_index("mid"), Some(0));
        assert!(matches!(
            ds.require_column("MIMD"),
            Err(ReconError::MissingColumn { ref column, .. }) if column == "MIMD"
        ));
        assert_eq!(ds.column(0).collect::<Vec<_>>(), vec![&CellValue::Int(7)]);
    }
}
