//! Health-condition reports over survey data.
//!
//! A report loads the columns its [`ConditionSpec`] needs, keeps the rows
//! that meet the condition, and counts them per physician/coverage
//! combination. The result maps directly onto a bar chart ([`to_chart`]).

pub mod aggregate;
pub mod chart;
pub mod condition;
pub mod error;
pub mod output;
pub mod privacy;
pub mod report;
pub mod schema;
pub mod svg;

pub use aggregate::{
    CoercionIssue, count_by_combination, filter_by_condition, filter_with_diagnostics, tabulate,
};
pub use chart::{COMBO_Y_LABEL, combo_chart, to_chart};
pub use condition::{Combination, ComputedSpec, ConditionSpec, Predicate, StaticSpec};
pub use error::{ErrorKind, ReportError, Result};
pub use output::{write_chart_json, write_chart_svg};
pub use report::{Report, build_combo_chart, build_report, run_report};
pub use schema::{AccessColumns, BloodPressureRules, SurveySchema, ThresholdRule, YesNoColumn};
pub use svg::render_chart_svg;
