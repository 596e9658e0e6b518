use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid column name: {0:?}")]
    InvalidColumnName(String),
    #[error("unknown report type: {0}")]
    UnknownReportType(String),
    #[error("row {row} has no value for column '{column}' declared by the dataset")]
    RowShape { row: usize, column: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
