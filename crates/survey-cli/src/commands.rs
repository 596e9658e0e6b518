use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use survey_model::{ChartSpec, ReportType, format_numeric};
use survey_report::{
    Report, ReportError, SurveySchema, build_combo_chart, write_chart_json, write_chart_svg,
};

use crate::cli::{ComboArgs, OutputArgs, ReportArgs};
use crate::summary::{apply_table_style, header_cell};

/// A finished `report` command.
#[derive(Debug)]
pub struct ReportOutcome {
    pub report: Report,
    pub written: Vec<PathBuf>,
}

/// A finished `combo` command.
#[derive(Debug)]
pub struct ComboOutcome {
    pub chart: ChartSpec,
    pub written: Vec<PathBuf>,
}

pub fn run_report(args: &ReportArgs) -> Result<ReportOutcome> {
    let span = info_span!("command", name = "report", report = %args.report_type);
    let _guard = span.enter();
    let schema = load_schema(args.output.schema.as_deref())?;
    let report = survey_report::run_report(&args.file, args.report_type, &schema)?;
    let written = write_outputs(&report.to_chart(), &args.output)?;
    Ok(ReportOutcome { report, written })
}

pub fn run_combo(args: &ComboArgs) -> Result<ComboOutcome> {
    let span = info_span!("command", name = "combo");
    let _guard = span.enter();
    let schema = load_schema(args.output.schema.as_deref())?;
    let chart = build_combo_chart(&args.file, &schema)?;
    let written = write_outputs(&chart, &args.output)?;
    Ok(ComboOutcome { chart, written })
}

pub fn run_types() -> Result<()> {
    println!("{}", types_table(&SurveySchema::default()));
    Ok(())
}

/// Report types with their chart titles and inclusion rules.
pub fn types_table(schema: &SurveySchema) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Type"),
        header_cell("Title"),
        header_cell("Counts"),
    ]);
    apply_table_style(&mut table);
    for report_type in ReportType::ALL {
        table.add_row(vec![
            report_type.as_str().to_string(),
            report_type.title().to_string(),
            describe_filter(report_type, schema),
        ]);
    }
    table
}

fn describe_filter(report_type: ReportType, schema: &SurveySchema) -> String {
    match report_type {
        ReportType::Diabetes => format!(
            "{} > {}",
            schema.diabetes.column,
            format_numeric(schema.diabetes.threshold)
        ),
        ReportType::BloodPressure => {
            let rules = &schema.blood_pressure;
            format!(
                "{} > {} or {} > {}",
                rules.systolic.column,
                format_numeric(rules.systolic.threshold),
                rules.diastolic.column,
                format_numeric(rules.diastolic.threshold)
            )
        }
        ReportType::Cholesterol => "fixed demonstration counts".to_string(),
    }
}

fn load_schema(path: Option<&Path>) -> Result<SurveySchema, ReportError> {
    match path {
        Some(path) => SurveySchema::load(path),
        None => Ok(SurveySchema::default()),
    }
}

fn write_outputs(chart: &ChartSpec, output: &OutputArgs) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    if let Some(path) = &output.svg {
        write_chart_svg(chart, path).context("write svg chart")?;
        written.push(path.clone());
    }
    if let Some(path) = &output.json {
        write_chart_json(chart, path).context("write json chart")?;
        written.push(path.clone());
    }
    if !written.is_empty() {
        info!(files = written.len(), "chart outputs written");
    }
    Ok(written)
}

/// User-facing message for a failed command.
///
/// Report failures lead with their kind ("File Not Found: ..."); anything else
/// prints its context chain.
pub fn error_message(error: &anyhow::Error) -> String {
    match error.downcast_ref::<ReportError>() {
        Some(report_error) => format!("{}: {report_error}", report_error.kind().label()),
        None => format!("{error:#}"),
    }
}
