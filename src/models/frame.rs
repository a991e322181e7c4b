//! Tabular data model.
//!
//! A [`Frame`] holds named columns and rows of [`Datum`] values. It is the
//! in-memory shape used to move query results out of the database and to
//! write externally built rows back into a table.

use crate::{Error, Result};
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A single SQLite value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Datum {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

/// Storage class of a [`Datum`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatumKind {
    Null,
    Integer,
    Real,
    Text,
    Blob,
}

impl DatumKind {
    /// Declared type used when a table is created for a column of this kind.
    pub fn declared_type(self) -> &'static str {
        match self {
            DatumKind::Integer => "INTEGER",
            DatumKind::Real => "REAL",
            DatumKind::Text => "TEXT",
            DatumKind::Blob => "BLOB",
            DatumKind::Null => "",
        }
    }
}

impl fmt::Display for DatumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DatumKind::Null => "null",
            DatumKind::Integer => "integer",
            DatumKind::Real => "real",
            DatumKind::Text => "text",
            DatumKind::Blob => "blob",
        };
        f.write_str(name)
    }
}

impl Datum {
    pub fn kind(&self) -> DatumKind {
        match self {
            Datum::Null => DatumKind::Null,
            Datum::Integer(_) => DatumKind::Integer,
            Datum::Real(_) => DatumKind::Real,
            Datum::Text(_) => DatumKind::Text,
            Datum::Blob(_) => DatumKind::Blob,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Null)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Datum::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Datum::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Null => f.write_str("NULL"),
            Datum::Integer(v) => write!(f, "{}", v),
            Datum::Real(v) => write!(f, "{}", v),
            Datum::Text(s) => f.write_str(s),
            Datum::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<Value> for Datum {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Datum::Null,
            Value::Integer(v) => Datum::Integer(v),
            Value::Real(v) => Datum::Real(v),
            Value::Text(s) => Datum::Text(s),
            Value::Blob(b) => Datum::Blob(b),
        }
    }
}

impl From<i64> for Datum {
    fn from(v: i64) -> Self {
        Datum::Integer(v)
    }
}

impl From<i32> for Datum {
    fn from(v: i32) -> Self {
        Datum::Integer(i64::from(v))
    }
}

impl From<f64> for Datum {
    fn from(v: f64) -> Self {
        Datum::Real(v)
    }
}

impl From<&str> for Datum {
    fn from(s: &str) -> Self {
        Datum::Text(s.to_string())
    }
}

impl From<String> for Datum {
    fn from(s: String) -> Self {
        Datum::Text(s)
    }
}

impl<T: Into<Datum>> From<Option<T>> for Datum {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Datum::Null)
    }
}

impl ToSql for Datum {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Datum::Null => ToSqlOutput::Owned(Value::Null),
            Datum::Integer(v) => ToSqlOutput::Owned(Value::Integer(*v)),
            Datum::Real(v) => ToSqlOutput::Owned(Value::Real(*v)),
            Datum::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Datum::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
        })
    }
}

impl FromSql for Datum {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Value::column_result(value).map(Datum::from)
    }
}

/// Serialized layout of a frame: `{"columns": [...], "data": [[...], ...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FrameData {
    columns: Vec<String>,
    #[serde(default)]
    data: Vec<Vec<Datum>>,
}

/// An in-memory table: named columns and rows of values.
///
/// Every row has exactly one value per column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FrameData", into = "FrameData")]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Datum>>,
}

impl TryFrom<FrameData> for Frame {
    type Error = Error;

    fn try_from(data: FrameData) -> Result<Self> {
        Frame::from_rows(data.columns, data.data)
    }
}

impl From<Frame> for FrameData {
    fn from(frame: Frame) -> Self {
        FrameData {
            columns: frame.columns,
            data: frame.rows,
        }
    }
}

impl Frame {
    /// Create an empty frame with the given columns.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Create a frame from columns and rows, checking every row's width.
    pub fn from_rows<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        rows: Vec<Vec<Datum>>,
    ) -> Result<Self> {
        let mut frame = Self::new(columns);
        for row in rows {
            frame.push_row(row)?;
        }
        Ok(frame)
    }

    /// Append a row.
    pub fn push_row(&mut self, row: Vec<Datum>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::other(format!(
                "Row {} has {} values, frame has {} columns",
                self.rows.len(),
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Datum>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<Datum>> {
        self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&Datum>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// The storage class shared by a column's non-null values.
    ///
    /// Integers mixed with reals widen to real. Returns `None` when the column
    /// is all null or mixes unrelated kinds.
    pub fn column_kind(&self, index: usize) -> Option<DatumKind> {
        let mut kind: Option<DatumKind> = None;
        for value in self.rows.iter().map(|row| &row[index]) {
            let next = value.kind();
            if next == DatumKind::Null {
                continue;
            }
            kind = match (kind, next) {
                (None, k) => Some(k),
                (Some(a), b) if a == b => Some(a),
                (Some(DatumKind::Integer), DatumKind::Real)
                | (Some(DatumKind::Real), DatumKind::Integer) => Some(DatumKind::Real),
                _ => return None,
            };
        }
        kind
    }

    /// Load a frame from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let frame = serde_json::from_str(&content)?;
        Ok(frame)
    }

    /// Save a frame to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl fmt::Display for Frame {
    /// Renders an aligned table with a leading row index.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect();

        let index_width = self.rows.len().saturating_sub(1).to_string().len();
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write!(f, "{:>w$}", "", w = index_width)?;
        for (column, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>w$}", column, w = *width)?;
        }
        if cells.is_empty() {
            return write!(f, "\n[0 rows x {} columns]", self.columns.len());
        }
        for (i, row) in cells.iter().enumerate() {
            write!(f, "\n{:>w$}", i, w = index_width)?;
            for (cell, width) in row.iter().zip(&widths) {
                write!(f, "  {:>w$}", cell, w = *width)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enrollment_frame() -> Frame {
        Frame::from_rows(
            ["prefix", "number", "sec", "term", "count"],
            vec![
                vec!["pst".into(), 101.into(), "M001".into(), 1231.into(), 131.into()],
                vec!["pst".into(), 101.into(), "M001".into(), 1232.into(), 87.into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_push_row_rejects_wrong_width() {
        let mut frame = Frame::new(["a", "b"]);
        assert!(frame.push_row(vec![1.into()]).is_err());
        assert!(frame.push_row(vec![1.into(), "x".into()]).is_ok());
        assert_eq!(frame.len(), 1);
    }

    #[test]
    fn test_column_kind() {
        let frame = Frame::from_rows(
            ["i", "mixed_num", "nulls", "mixed"],
            vec![
                vec![1.into(), 1.into(), Datum::Null, 1.into()],
                vec![Datum::Null, 2.5.into(), Datum::Null, "x".into()],
            ],
        )
        .unwrap();
        assert_eq!(frame.column_kind(0), Some(DatumKind::Integer));
        assert_eq!(frame.column_kind(1), Some(DatumKind::Real));
        assert_eq!(frame.column_kind(2), None);
        assert_eq!(frame.column_kind(3), None);
    }

    #[test]
    fn test_column_lookup() {
        let frame = enrollment_frame();
        let terms = frame.column("term").unwrap();
        assert_eq!(terms, vec![&Datum::Integer(1231), &Datum::Integer(1232)]);
        assert!(frame.column("missing").is_none());
    }

    #[test]
    fn test_json_layout() {
        let frame = enrollment_frame();
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["columns"][4], "count");
        assert_eq!(json["data"][1][3], 1232);

        let parsed: Frame = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, frame);
    }

    #[test]
    fn test_json_rejects_ragged_rows() {
        let json = r#"{"columns": ["a", "b"], "data": [[1, 2], [3]]}"#;
        assert!(serde_json::from_str::<Frame>(json).is_err());
    }

    #[test]
    fn test_display_aligns_columns() {
        let frame = enrollment_frame();
        let text = frame.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("count"));
        assert!(lines[1].starts_with('0'));
        assert!(lines[2].ends_with("87"));
    }
}
