//! Loading survey spreadsheets into a [`survey_model::Dataset`].
//!
//! The first worksheet (or the CSV file) is read with its first row as the
//! header; only the requested columns are kept.

pub mod csv_sheet;
pub mod error;
pub mod format;
pub mod loader;
pub mod workbook;

pub use error::{IngestError, Result};
pub use format::SourceFormat;
pub use loader::{RawRow, RawSheet, load_columns, select_columns};
