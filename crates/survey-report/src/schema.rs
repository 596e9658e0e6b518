//! Survey schema: which columns and answers the reports read.
//!
//! The defaults match the health-fair survey export. A TOML file overrides
//! any subset of fields, down to a single answer or threshold; everything it
//! leaves out keeps its default:
//!
//! ```toml
//! [diabetes]
//! column = "Fasting Glucose"
//! threshold = 126
//!
//! [access.coverage]
//! column = "Insured?"
//! yes = "Yes"
//! no = "No"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use survey_model::ColumnName;

use crate::{ReportError, Result};

/// A categorical yes/no question and its two recorded answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct YesNoColumn {
    pub column: String,
    pub yes: String,
    pub no: String,
}

/// A numeric column and the value a reading must exceed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdRule {
    pub column: String,
    pub threshold: f64,
}

/// The two access-to-care questions every computed report cross-tabulates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccessColumns {
    pub physician: YesNoColumn,
    pub coverage: YesNoColumn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BloodPressureRules {
    pub systolic: ThresholdRule,
    pub diastolic: ThresholdRule,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurveySchema {
    pub access: AccessColumns,
    pub diabetes: ThresholdRule,
    pub blood_pressure: BloodPressureRules,
}

impl Default for AccessColumns {
    fn default() -> Self {
        Self {
            physician: YesNoColumn {
                column: "Do you have a primary care physician".to_string(),
                yes: "Yes, I do have a primary care physician".to_string(),
                no: "No, I do not have a primary care physician".to_string(),
            },
            coverage: YesNoColumn {
                column: "Do you have Medical Coverage".to_string(),
                yes: "Yes, I do have medical coverage".to_string(),
                no: "No, I do not have medical coverage".to_string(),
            },
        }
    }
}

impl Default for BloodPressureRules {
    fn default() -> Self {
        Self {
            systolic: ThresholdRule {
                column: "Systolic".to_string(),
                threshold: 120.0,
            },
            diastolic: ThresholdRule {
                column: "Diastolic".to_string(),
                threshold: 80.0,
            },
        }
    }
}

impl Default for SurveySchema {
    fn default() -> Self {
        Self {
            access: AccessColumns::default(),
            diabetes: ThresholdRule {
                column: "Glucose Levels".to_string(),
                threshold: 126.0,
            },
            blood_pressure: BloodPressureRules::default(),
        }
    }
}

impl SurveySchema {
    /// Parses and validates a schema from TOML text.
    ///
    /// The text is layered over the default schema table by table, so a
    /// partial `[access.coverage]` or a lone `threshold` keeps every sibling
    /// field at its default.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let overrides: toml::Table = content.parse().map_err(schema_error)?;
        let toml::Value::Table(mut merged) =
            toml::Value::try_from(SurveySchema::default()).map_err(schema_error)?
        else {
            return Err(ReportError::Schema {
                message: "default schema is not a table".to_string(),
            });
        };
        merge_tables(&mut merged, overrides);
        let schema: SurveySchema = toml::Value::Table(merged)
            .try_into()
            .map_err(schema_error)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Loads a schema file, failing when it is unreadable or invalid.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ReportError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let schema = Self::from_toml_str(&content).map_err(|err| match err {
            ReportError::Schema { message } => ReportError::Config {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;
        info!(path = %path.display(), "loaded survey schema");
        Ok(schema)
    }

    /// Checks column names, answers and thresholds.
    pub fn validate(&self) -> Result<()> {
        for answers in [&self.access.physician, &self.access.coverage] {
            ColumnName::new(answers.column.as_str())?;
            if answers.yes == answers.no {
                return Err(ReportError::Schema {
                    message: format!(
                        "'{}' uses the same answer for yes and no",
                        answers.column
                    ),
                });
            }
        }
        if self.access.physician.column == self.access.coverage.column {
            return Err(ReportError::Schema {
                message: "physician and coverage must be different columns".to_string(),
            });
        }
        for rule in [
            &self.diabetes,
            &self.blood_pressure.systolic,
            &self.blood_pressure.diastolic,
        ] {
            ColumnName::new(rule.column.as_str())?;
            if !rule.threshold.is_finite() {
                return Err(ReportError::Schema {
                    message: format!("threshold for '{}' must be a finite number", rule.column),
                });
            }
        }
        Ok(())
    }
}

fn schema_error(err: impl std::fmt::Display) -> ReportError {
    ReportError::Schema {
        message: err.to_string(),
    }
}

/// Recursively overlays `overrides` onto `base`; non-table values replace.
fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        let toml::Value::Table(table) = value else {
            base.insert(key, value);
            continue;
        };
        if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
            merge_tables(existing, table);
        } else {
            base.insert(key, toml::Value::Table(table));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schema_is_valid() {
        SurveySchema::default().validate().unwrap();
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let schema = SurveySchema::from_toml_str(
            r#"
            [diabetes]
            column = "Fasting Glucose"
            threshold = 100
            "#,
        )
        .unwrap();
        assert_eq!(schema.diabetes.column, "Fasting Glucose");
        assert_eq!(schema.diabetes.threshold, 100.0);
        assert_eq!(schema.access, AccessColumns::default());
        assert_eq!(schema.blood_pressure, BloodPressureRules::default());
    }

    #[test]
    fn module_example_overrides_nested_table() {
        let schema = SurveySchema::from_toml_str(
            "[diabetes]\n\
             column = \"Fasting Glucose\"\n\
             threshold = 126\n\
             \n\
             [access.coverage]\n\
             column = \"Insured?\"\n\
             yes = \"Yes\"\n\
             no = \"No\"\n",
        )
        .unwrap();
        let defaults = SurveySchema::default();
        assert_eq!(schema.diabetes.column, "Fasting Glucose");
        assert_eq!(schema.access.coverage.column, "Insured?");
        assert_eq!(schema.access.coverage.yes, "Yes");
        assert_eq!(schema.access.physician, defaults.access.physician);
        assert_eq!(schema.blood_pressure, defaults.blood_pressure);
    }

    #[test]
    fn coverage_table_alone_keeps_physician() {
        let schema = SurveySchema::from_toml_str(
            "[access.coverage]\ncolumn = \"Insured?\"\nyes = \"Yes\"\nno = \"No\"\n",
        )
        .unwrap();
        assert_eq!(schema.access.physician, AccessColumns::default().physician);
        assert_eq!(schema.access.coverage.no, "No");
    }

    #[test]
    fn single_leaf_field_keeps_its_siblings() {
        let schema =
            SurveySchema::from_toml_str("[blood_pressure.systolic]\nthreshold = 130\n").unwrap();
        let defaults = BloodPressureRules::default();
        assert_eq!(schema.blood_pressure.systolic.column, "Systolic");
        assert_eq!(schema.blood_pressure.systolic.threshold, 130.0);
        assert_eq!(schema.blood_pressure.diastolic, defaults.diastolic);
    }

    #[test]
    fn wrong_value_type_is_rejected() {
        let err = SurveySchema::from_toml_str("[diabetes]\nthreshold = \"high\"\n").unwrap_err();
        assert!(matches!(err, ReportError::Schema { .. }));
        let err = SurveySchema::from_toml_str("diabetes = 5\n").unwrap_err();
        assert!(matches!(err, ReportError::Schema { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = SurveySchema::from_toml_str("[diabetes]\ncolumn = \"G\"\nthreshhold = 1\n")
            .unwrap_err();
        assert!(matches!(err, ReportError::Schema { .. }));
    }

    #[test]
    fn blank_column_is_rejected() {
        let mut schema = SurveySchema::default();
        schema.blood_pressure.systolic.column = " ".to_string();
        let err = schema.validate().unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Config);
    }

    #[test]
    fn identical_answers_are_rejected() {
        let mut schema = SurveySchema::default();
        schema.access.coverage.no = schema.access.coverage.yes.clone();
        assert!(schema.validate().is_err());
    }
}
