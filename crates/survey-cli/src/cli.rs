//! CLI argument definitions for the survey grapher.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use survey_model::ReportType;

#[derive(Parser)]
#[command(
    name = "survey-grapher",
    version,
    about = "Health survey reports - count at-risk respondents by access to care",
    long_about = "Count survey respondents with a health condition, grouped by whether they\n\
                  have a primary care physician and medical coverage.\n\n\
                  Reads the first worksheet of an Excel/ODS workbook or a CSV file and\n\
                  writes bar charts as SVG or JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include survey cell values in logs. They are health data and are
    /// redacted unless this is set.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build one condition report and print its counts.
    Report(ReportArgs),

    /// Compare diabetes and blood pressure counts in one grouped chart.
    Combo(ComboArgs),

    /// List the available report types.
    Types,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Survey file (.xlsx, .xls, .ods or .csv).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Report to build: diabetes, blood-pressure or cholesterol.
    #[arg(long = "type", value_name = "TYPE", default_value = "diabetes")]
    pub report_type: ReportType,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser)]
pub struct ComboArgs {
    /// Survey file (.xlsx, .xls, .ods or .csv).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Default)]
pub struct OutputArgs {
    /// TOML file overriding survey column names, answers and thresholds.
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Write the chart as an SVG image.
    #[arg(long = "svg", value_name = "PATH")]
    pub svg: Option<PathBuf>,

    /// Write the chart descriptor as JSON.
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_defaults_to_diabetes() {
        let cli = Cli::try_parse_from(["survey-grapher", "report", "survey.xlsx"]).unwrap();
        let Command::Report(args) = cli.command else {
            panic!("expected report command");
        };
        assert_eq!(args.report_type, ReportType::Diabetes);
        assert!(args.output.svg.is_none());
    }

    #[test]
    fn report_type_accepts_captions() {
        for raw in ["blood-pressure", "Blood Pressure", "bloodPressure"] {
            let cli = Cli::try_parse_from(["survey-grapher", "report", "s.csv", "--type", raw])
                .unwrap();
            let Command::Report(args) = cli.command else {
                panic!("expected report command");
            };
            assert_eq!(args.report_type, ReportType::BloodPressure);
        }
    }

    #[test]
    fn unknown_report_type_is_rejected() {
        assert!(
            Cli::try_parse_from(["survey-grapher", "report", "s.csv", "--type", "asthma"])
                .is_err()
        );
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "survey-grapher",
            "combo",
            "s.csv",
            "--svg",
            "out.svg",
            "--log-data",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert!(cli.log_data);
        assert!(matches!(cli.log_format, LogFormatArg::Json));
        let Command::Combo(args) = cli.command else {
            panic!("expected combo command");
        };
        assert_eq!(args.output.svg, Some(PathBuf::from("out.svg")));
    }
}
