use std::path::Path;

use tracing::{debug, info_span};

use survey_model::{CellValue, ColumnName, Dataset, Row};

use crate::{IngestError, Result, SourceFormat, csv_sheet, workbook};

/// A sheet as read from disk: the header row and every data row, untyped by column.
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// One data row and the 1-based sheet row (CSV line) it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub number: usize,
    pub cells: Vec<CellValue>,
}

impl RawRow {
    pub fn new(number: usize, cells: Vec<CellValue>) -> Self {
        Self { number, cells }
    }
}

/// Opens the survey file at `path` and keeps only `columns`.
///
/// Fails with [`IngestError::FileNotFound`] before any read when `path` is not
/// a file, and with [`IngestError::SchemaMismatch`] when any requested column
/// is absent from the header row.
pub fn load_columns(path: &Path, columns: &[ColumnName]) -> Result<Dataset> {
    let span = info_span!("load_columns", path = %path.display());
    let _guard = span.enter();

    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let sheet = match SourceFormat::from_path(path)? {
        SourceFormat::Workbook => workbook::read_first_sheet(path)?,
        SourceFormat::Csv => csv_sheet::read_csv_sheet(path)?,
    };
    debug!(
        headers = sheet.headers.len(),
        rows = sheet.rows.len(),
        "read sheet"
    );
    let dataset = select_columns(path, &sheet, columns)?;
    debug!(
        columns = dataset.columns().len(),
        rows = dataset.len(),
        "selected columns"
    );
    Ok(dataset)
}

/// Projects `sheet` onto `columns`.
///
/// Headers match exactly; when a header repeats, the first occurrence wins.
/// Rows whose selected cells are all empty are dropped.
pub fn select_columns(path: &Path, sheet: &RawSheet, columns: &[ColumnName]) -> Result<Dataset> {
    let mut wanted: Vec<ColumnName> = Vec::with_capacity(columns.len());
    for column in columns {
        if !wanted.contains(column) {
            wanted.push(column.clone());
        }
    }

    let mut indices = Vec::with_capacity(wanted.len());
    let mut missing = Vec::new();
    for column in &wanted {
        match sheet.headers.iter().position(|h| h == column.as_str()) {
            Some(idx) => indices.push(idx),
            None => missing.push(column.to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(IngestError::SchemaMismatch {
            path: path.to_path_buf(),
            missing,
        });
    }

    let mut dataset = Dataset::new(wanted.clone());
    for raw in &sheet.rows {
        let mut row = Row::new(raw.number);
        for (column, &idx) in wanted.iter().zip(&indices) {
            let value = raw.cells.get(idx).cloned().unwrap_or(CellValue::Missing);
            row.insert(column.clone(), value);
        }
        if row.is_blank() {
            continue;
        }
        dataset.push_row(row);
    }
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(name: &str) -> ColumnName {
        ColumnName::new(name).unwrap()
    }

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    fn sheet() -> RawSheet {
        RawSheet {
            headers: vec![
                "Name".to_string(),
                "Systolic".to_string(),
                "Systolic".to_string(),
                "Diastolic".to_string(),
            ],
            rows: vec![
                RawRow::new(
                    2,
                    vec![text("a"), CellValue::Number(130.0), text("dup"), CellValue::Number(85.0)],
                ),
                RawRow::new(
                    3,
                    vec![text("b"), CellValue::Missing, CellValue::Missing, CellValue::Missing],
                ),
                RawRow::new(4, vec![text("c"), CellValue::Number(110.0)]),
            ],
        }
    }

    #[test]
    fn first_duplicate_header_wins() {
        let dataset = select_columns(Path::new("s.csv"), &sheet(), &[col("Systolic")]).unwrap();
        assert_eq!(dataset.rows()[0].get("Systolic"), &CellValue::Number(130.0));
    }

    #[test]
    fn blank_projected_rows_are_dropped_and_numbers_kept() {
        let dataset = select_columns(
            Path::new("s.csv"),
            &sheet(),
            &[col("Systolic"), col("Diastolic")],
        )
        .unwrap();
        let numbers: Vec<usize> = dataset.iter().map(|row| row.number).collect();
        assert_eq!(numbers, vec![2, 4]);
        assert!(dataset.rows()[1].get("Diastolic").is_missing());
    }

    #[test]
    fn requested_duplicates_collapse() {
        let dataset = select_columns(
            Path::new("s.csv"),
            &sheet(),
            &[col("Name"), col("Name")],
        )
        .unwrap();
        assert_eq!(dataset.columns(), &[col("Name")]);
    }

    #[test]
    fn reports_every_missing_column() {
        let err = select_columns(
            Path::new("s.csv"),
            &sheet(),
            &[col("Glucose Levels"), col("Name"), col("systolic")],
        )
        .unwrap_err();
        match err {
            IngestError::SchemaMismatch { missing, .. } => {
                assert_eq!(missing, vec!["Glucose Levels", "systolic"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
