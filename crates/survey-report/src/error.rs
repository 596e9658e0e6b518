//! Report failures and their kinds.

use std::path::PathBuf;

use thiserror::Error;

use survey_ingest::IngestError;
use survey_model::ModelError;

/// Coarse classification of a failure, for callers that map errors to
/// user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    FileNotFound,
    SchemaMismatch,
    ArityMismatch,
    /// Row-level and non-fatal; carried by [`crate::CoercionIssue`], never by [`ReportError`].
    TypeCoercion,
    UnsupportedFormat,
    Workbook,
    Config,
}

impl ErrorKind {
    /// Short message suitable for a dialog title or status line.
    pub const fn label(&self) -> &'static str {
        match self {
            ErrorKind::FileNotFound => "File Not Found",
            ErrorKind::SchemaMismatch => "Missing Columns",
            ErrorKind::ArityMismatch => "Invalid Combination",
            ErrorKind::TypeCoercion => "Unreadable Value",
            ErrorKind::UnsupportedFormat => "Unsupported File",
            ErrorKind::Workbook => "Unreadable File",
            ErrorKind::Config => "Invalid Schema",
        }
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// A combination does not name one value per condition column.
    #[error("combination has {values} value(s) for {columns} condition column(s)")]
    ArityMismatch { columns: usize, values: usize },

    /// The survey schema file could not be read or parsed.
    #[error("invalid survey schema {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// The survey schema is well-formed but unusable.
    #[error("invalid survey schema: {message}")]
    Schema { message: String },

    #[error("invalid survey schema: {0}")]
    Model(#[from] ModelError),
}

impl ReportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::Ingest(err) => match err {
                IngestError::FileNotFound { .. } => ErrorKind::FileNotFound,
                IngestError::SchemaMismatch { .. } => ErrorKind::SchemaMismatch,
                IngestError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
                IngestError::Workbook { .. }
                | IngestError::NoWorksheet { .. }
                | IngestError::Csv { .. }
                | IngestError::EmptySheet { .. } => ErrorKind::Workbook,
            },
            ReportError::ArityMismatch { .. } => ErrorKind::ArityMismatch,
            ReportError::Config { .. } | ReportError::Schema { .. } | ReportError::Model(_) => {
                ErrorKind::Config
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_errors_keep_their_kind() {
        let err: ReportError = IngestError::FileNotFound {
            path: PathBuf::from("survey.xlsx"),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert_eq!(err.kind().label(), "File Not Found");
        assert_eq!(err.to_string(), "file not found: survey.xlsx");
    }

    #[test]
    fn config_errors_name_the_file() {
        let err = ReportError::Config {
            path: PathBuf::from("schema.toml"),
            message: "expected a table".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid survey schema schema.toml: expected a table"
        );
        assert_eq!(err.kind(), ErrorKind::Config);
        let err = ReportError::Schema {
            message: "threshold must be finite".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid survey schema: threshold must be finite"
        );
    }
}
