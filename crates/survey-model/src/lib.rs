//! Data model for survey reports.
//!
//! Holds the in-memory [`Dataset`] loaded from a spreadsheet, the report
//! selector, the labeled counts produced by aggregation, and the chart
//! descriptor handed to renderers.

pub mod chart;
pub mod counts;
pub mod error;
pub mod ids;
pub mod report_type;
pub mod table;
pub mod value;

pub use chart::{BarSeries, ChartSpec};
pub use counts::{CategoryCount, CategoryEntry};
pub use error::{ModelError, Result};
pub use ids::ColumnName;
pub use report_type::ReportType;
pub use table::{CellValue, Dataset, Row};
pub use value::{format_numeric, parse_f64, try_parse_number};
