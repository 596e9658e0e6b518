//! Workbook reading through calamine.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use survey_model::{CellValue, format_numeric};

use crate::loader::{RawRow, RawSheet};
use crate::{IngestError, Result};

/// Reads the first worksheet; its first used row is the header.
pub fn read_first_sheet(path: &Path) -> Result<RawSheet> {
    let workbook_error = |err: calamine::Error| IngestError::Workbook {
        path: path.to_path_buf(),
        message: err.to_string(),
    };
    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(workbook_error)?;

    // NOTE: calamine ranges start at the first used cell, not at A1.
    let first_row = range.start().map_or(0, |(row, _)| row as usize);
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Err(IngestError::EmptySheet {
            path: path.to_path_buf(),
        });
    };
    let headers = header.iter().map(header_text).collect();
    // Header sits on sheet row `first_row + 1`; data starts right below it.
    let rows = rows
        .enumerate()
        .map(|(offset, cells)| {
            RawRow::new(
                first_row + 2 + offset,
                cells.iter().map(convert_value).collect(),
            )
        })
        .collect();

    Ok(RawSheet { headers, rows })
}

fn header_text(value: &Data) -> String {
    match value {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(v) => v.to_string(),
        Data::Float(v) => format_numeric(*v),
        Data::Bool(v) => bool_text(*v).to_string(),
        Data::DateTime(v) => format_numeric(v.as_f64()),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

fn convert_value(value: &Data) -> CellValue {
    match value {
        Data::Empty | Data::Error(_) => CellValue::Missing,
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Float(v) => CellValue::Number(*v),
        Data::DateTime(v) => CellValue::Number(v.as_f64()),
        Data::String(s) => CellValue::from_text(s),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from_text(s),
        Data::Bool(v) => CellValue::Text(bool_text(*v).to_string()),
    }
}

fn bool_text(value: bool) -> &'static str {
    if value { "TRUE" } else { "FALSE" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_scalar_cells() {
        assert_eq!(convert_value(&Data::Int(127)), CellValue::Number(127.0));
        assert_eq!(convert_value(&Data::Float(80.5)), CellValue::Number(80.5));
        assert_eq!(convert_value(&Data::Empty), CellValue::Missing);
        assert_eq!(convert_value(&Data::String(" ".to_string())), CellValue::Missing);
        assert_eq!(
            convert_value(&Data::Bool(true)),
            CellValue::Text("TRUE".to_string())
        );
        assert_eq!(
            convert_value(&Data::Error(calamine::CellErrorType::NA)),
            CellValue::Missing
        );
    }

    #[test]
    fn numeric_headers_render_without_fraction() {
        assert_eq!(header_text(&Data::Float(2023.0)), "2023");
        assert_eq!(header_text(&Data::Empty), "");
    }
}
