#![deny(unsafe_code)]

use std::collections::BTreeMap;

use crate::value::format_numeric;
use crate::{ColumnName, ModelError};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Missing,
}

static MISSING: CellValue = CellValue::Missing;

impl CellValue {
    /// Builds a cell from raw text, mapping blank input to `Missing`.
    pub fn from_text(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Self::Missing
        } else {
            Self::Text(raw.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Exact equality against a categorical answer.
    ///
    /// Numbers compare through their shortest rendering, so a numeric cell
    /// holding `1` matches the answer `"1"`. Missing never matches.
    pub fn matches_text(&self, expected: &str) -> bool {
        match self {
            Self::Text(value) => value == expected,
            Self::Number(value) => format_numeric(*value) == expected,
            Self::Missing => false,
        }
    }

    /// Renders the cell the way it appeared in the source, empty for missing.
    pub fn render(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Number(value) => format_numeric(*value),
            Self::Missing => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Row {
    /// 1-based row number in the source sheet (the header is row 1).
    pub number: usize,
    pub cells: BTreeMap<ColumnName, CellValue>,
}

impl Row {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            cells: BTreeMap::new(),
        }
    }

    pub fn with_cell(mut self, column: ColumnName, value: CellValue) -> Self {
        self.cells.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: ColumnName, value: CellValue) {
        self.cells.insert(column, value);
    }

    /// Cell for `column`; absent columns read as missing.
    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&MISSING)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(CellValue::is_missing)
    }
}

/// Rows loaded from one sheet, restricted to a known set of columns.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Dataset {
    columns: Vec<ColumnName>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(columns: Vec<ColumnName>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a dataset and checks that every row carries every declared column.
    pub fn from_rows(columns: Vec<ColumnName>, rows: Vec<Row>) -> Result<Self, ModelError> {
        for row in &rows {
            if let Some(column) = columns.iter().find(|c| !row.cells.contains_key(c.as_str())) {
                return Err(ModelError::RowShape {
                    row: row.number,
                    column: column.to_string(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[ColumnName] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.as_str() == name)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Copies the rows accepted by `keep` into a new dataset with the same columns.
    pub fn select<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&Row) -> bool,
    {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|row| keep(row)).cloned().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
