use std::path::Path;

use csv::ReaderBuilder;

use survey_model::CellValue;

use crate::loader::{RawRow, RawSheet};
use crate::{IngestError, Result};

fn strip_bom(raw: &str) -> &str {
    raw.trim_start_matches('\u{feff}')
}

/// Reads a CSV export of a survey sheet; the first record is the header.
///
/// All cells load as text; numeric predicates parse them on demand. Rows are
/// numbered by the line their record starts on, so blank lines and quoted
/// multi-line cells do not shift later row numbers.
pub fn read_csv_sheet(path: &Path) -> Result<RawSheet> {
    let csv_error = |source: csv::Error| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => record.map_err(csv_error)?,
        None => {
            return Err(IngestError::EmptySheet {
                path: path.to_path_buf(),
            });
        }
    };
    let headers = header.iter().map(|h| strip_bom(h).to_string()).collect();

    let mut last_line = header.position().map_or(1, |pos| pos.line() as usize);
    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(csv_error)?;
        let number = record
            .position()
            .map_or(last_line + 1, |pos| pos.line() as usize);
        last_line = number;
        rows.push(RawRow::new(
            number,
            record.iter().map(CellValue::from_text).collect(),
        ));
    }
    Ok(RawSheet { headers, rows })
}
