//! Report orchestration: load, filter, count.

use std::path::Path;

use tracing::{debug, info, info_span};

use survey_ingest::{IngestError, load_columns};
use survey_model::{CategoryCount, ChartSpec, ReportType};

use crate::aggregate::{CoercionIssue, filter_with_diagnostics, tabulate};
use crate::chart::{combo_chart, to_chart};
use crate::condition::ConditionSpec;
use crate::{Result, SurveySchema};

/// Outcome of one report run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub report_type: ReportType,
    pub counts: CategoryCount,
    /// Non-blank rows read from the file (zero for static reports).
    pub rows_loaded: usize,
    pub coercions: Vec<CoercionIssue>,
}

impl Report {
    pub fn title(&self) -> &'static str {
        self.report_type.title()
    }

    pub fn to_chart(&self) -> ChartSpec {
        to_chart(&self.counts, self.title())
    }
}

/// Builds `report_type` from the file at `path` using the default survey schema.
pub fn build_report(path: &Path, report_type: ReportType) -> Result<CategoryCount> {
    run_report(path, report_type, &SurveySchema::default()).map(|report| report.counts)
}

/// Builds `report_type` from the file at `path`.
///
/// The path is checked even for static reports, so a caller never gets a
/// chart for a file that does not exist. Any load or schema failure aborts
/// the run; there are no partial counts.
pub fn run_report(path: &Path, report_type: ReportType, schema: &SurveySchema) -> Result<Report> {
    let span = info_span!("report", report = %report_type, path = %path.display());
    let _guard = span.enter();

    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let report = match ConditionSpec::for_report(report_type, schema)? {
        ConditionSpec::Static(spec) => {
            debug!("static report; file contents not read");
            Report {
                report_type,
                counts: spec.counts,
                rows_loaded: 0,
                coercions: Vec::new(),
            }
        }
        ConditionSpec::Computed(spec) => {
            let dataset = load_columns(path, &spec.columns_to_load())?;
            let (filtered, coercions) = filter_with_diagnostics(&dataset, &spec.predicate);
            debug!(
                loaded = dataset.len(),
                matched = filtered.len(),
                "applied inclusion filter"
            );
            Report {
                report_type,
                counts: tabulate(&filtered, &spec)?,
                rows_loaded: dataset.len(),
                coercions,
            }
        }
    };
    info!(
        total = report.counts.total_count(),
        bucketed = report.counts.bucketed(),
        "report built"
    );
    Ok(report)
}

/// Diabetes and blood-pressure buckets side by side.
pub fn build_combo_chart(path: &Path, schema: &SurveySchema) -> Result<ChartSpec> {
    let diabetes = run_report(path, ReportType::Diabetes, schema)?;
    let blood_pressure = run_report(path, ReportType::BloodPressure, schema)?;
    Ok(combo_chart(&diabetes.counts, &blood_pressure.counts))
}
