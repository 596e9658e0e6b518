//! Report selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// The health condition a report summarizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportType {
    /// Respondents whose glucose level is above the diabetic threshold.
    Diabetes,
    /// Respondents with an elevated systolic or diastolic reading.
    BloodPressure,
    /// Placeholder report backed by fixed demo counts.
    Cholesterol,
}

impl ReportType {
    /// All report types, in the order they are offered to users.
    pub const ALL: [ReportType; 3] = [
        ReportType::Diabetes,
        ReportType::Cholesterol,
        ReportType::BloodPressure,
    ];

    /// Display name, matching the captions used by the report picker.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReportType::Diabetes => "Diabetes",
            ReportType::BloodPressure => "Blood Pressure",
            ReportType::Cholesterol => "Cholesterol",
        }
    }

    /// Chart title used when the report is rendered.
    pub const fn title(&self) -> &'static str {
        match self {
            ReportType::Diabetes => "Diabetes Data",
            ReportType::BloodPressure => "Blood Pressure Data",
            ReportType::Cholesterol => "Cholesterol Data",
        }
    }

    /// Label of the final (total) entry; doubles as the chart's y-axis label.
    pub const fn total_label(&self) -> &'static str {
        match self {
            ReportType::Diabetes => "People with Diabetes",
            ReportType::BloodPressure => "People with High Blood Pressure",
            ReportType::Cholesterol => "People with Cholesterol",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = ModelError;

    /// Accepts display names ("Blood Pressure"), kebab/snake case
    /// ("blood-pressure") and camel case ("BloodPressure"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "diabetes" => Ok(ReportType::Diabetes),
            "bloodpressure" => Ok(ReportType::BloodPressure),
            "cholesterol" => Ok(ReportType::Cholesterol),
            _ => Err(ModelError::UnknownReportType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_caption_and_cli_spellings() {
        for input in ["Blood Pressure", "blood-pressure", "BloodPressure", "blood_pressure"] {
            assert_eq!(input.parse::<ReportType>(), Ok(ReportType::BloodPressure));
        }
        assert_eq!("DIABETES".parse::<ReportType>(), Ok(ReportType::Diabetes));
        assert_eq!(
            "Glucose".parse::<ReportType>(),
            Err(ModelError::UnknownReportType("Glucose".to_string()))
        );
    }

    #[test]
    fn display_round_trips() {
        for report in ReportType::ALL {
            assert_eq!(report.to_string().parse::<ReportType>(), Ok(report));
        }
    }
}
