//! Error types for survey data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a survey file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// The path does not point to a readable file.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The file extension is not a spreadsheet or CSV format we can read.
    #[error("unsupported file format '{extension}': {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    // === Parsing Errors ===
    /// The workbook could not be opened or its first sheet could not be read.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// The workbook has no worksheet.
    #[error("workbook has no worksheets: {path}")]
    NoWorksheet { path: PathBuf },

    /// Failed to parse the CSV file.
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The sheet has no header row.
    #[error("sheet is empty: {path}")]
    EmptySheet { path: PathBuf },

    // === Schema Errors ===
    /// One or more requested columns are absent from the header row.
    #[error("column(s) not found in {path}: {}", .missing.join(", "))]
    SchemaMismatch { path: PathBuf, missing: Vec<String> },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/surveys/2023.xlsx"),
        };
        assert_eq!(err.to_string(), "file not found: /surveys/2023.xlsx");
    }

    #[test]
    fn test_schema_mismatch_lists_columns() {
        let err = IngestError::SchemaMismatch {
            path: PathBuf::from("survey.xlsx"),
            missing: vec!["Systolic".to_string(), "Diastolic".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "column(s) not found in survey.xlsx: Systolic, Diastolic"
        );
    }
}
