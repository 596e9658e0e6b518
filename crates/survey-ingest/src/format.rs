use std::path::Path;

use crate::{IngestError, Result};

/// Input formats accepted by [`crate::load_columns`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Any workbook calamine can open (xlsx, xlsm, xlsb, xls, ods).
    Workbook,
    Csv,
}

const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

impl SourceFormat {
    /// Picks the reader from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
            Ok(Self::Workbook)
        } else if extension == "csv" {
            Ok(Self::Csv)
        } else {
            Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            })
        }
    }
}
