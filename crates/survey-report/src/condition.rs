//! Condition specifications: what each report loads, keeps and counts.

use survey_model::{CategoryCount, CategoryEntry, ColumnName, ReportType, Row, try_parse_number};

use crate::aggregate::CoercionIssue;
use crate::{Result, SurveySchema};

/// Row-inclusion test over numeric columns.
///
/// A cell that is missing or does not parse as a number never satisfies a
/// comparison; unparseable text is additionally reported as a coercion issue.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    GreaterThan { column: ColumnName, threshold: f64 },
    Any(Vec<Predicate>),
    All(Vec<Predicate>),
}

impl Predicate {
    pub fn greater_than(column: ColumnName, threshold: f64) -> Self {
        Predicate::GreaterThan { column, threshold }
    }

    /// Columns read by this predicate, in first-use order.
    pub fn columns(&self) -> Vec<&ColumnName> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a ColumnName>) {
        match self {
            Predicate::GreaterThan { column, .. } => {
                if !out.contains(&column) {
                    out.push(column);
                }
            }
            Predicate::Any(branches) | Predicate::All(branches) => {
                for branch in branches {
                    branch.collect_columns(out);
                }
            }
        }
    }

    /// Evaluates every branch (no short-circuit) so that each unreadable cell
    /// is reported once per row.
    pub fn evaluate(&self, row: &Row, issues: &mut Vec<CoercionIssue>) -> bool {
        match self {
            Predicate::GreaterThan { column, threshold } => {
                let cell = row.get(column.as_str());
                match try_parse_number(cell) {
                    Some(value) => value > *threshold,
                    None => {
                        if !cell.is_missing() {
                            issues.push(CoercionIssue {
                                row: row.number,
                                column: column.clone(),
                                value: cell.render(),
                            });
                        }
                        false
                    }
                }
            }
            Predicate::Any(branches) => branches
                .iter()
                .fold(false, |acc, branch| branch.evaluate(row, issues) || acc),
            Predicate::All(branches) => branches
                .iter()
                .fold(true, |acc, branch| branch.evaluate(row, issues) && acc),
        }
    }
}

/// One bucket of the cross-tabulation: a label and the answer required in
/// each condition column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination {
    pub label: String,
    pub values: Vec<String>,
}

impl Combination {
    pub fn new(label: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// A report computed from the survey file.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedSpec {
    pub predicate: Predicate,
    pub condition_columns: Vec<ColumnName>,
    pub combinations: Vec<Combination>,
    pub total_label: String,
}

impl ComputedSpec {
    /// Predicate columns followed by condition columns, without repeats.
    pub fn columns_to_load(&self) -> Vec<ColumnName> {
        let mut columns: Vec<ColumnName> = Vec::new();
        let predicate_columns = self.predicate.columns().into_iter();
        for column in predicate_columns.chain(self.condition_columns.iter()) {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
        columns
    }
}

/// A report whose counts are fixed and never read from the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSpec {
    pub counts: CategoryCount,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConditionSpec {
    Computed(ComputedSpec),
    Static(StaticSpec),
}

/// Bucket labels for the access combinations, in evaluation order.
pub const ACCESS_LABELS: [&str; 4] = [
    "Medical Coverage & a Physician",
    "Physician Only",
    "Medical Coverage Only",
    "Have Neither",
];

const CHOLESTEROL_DEMO: [(&str, usize); 3] = [("X", 15), ("Y", 25), ("Z", 35)];

impl ConditionSpec {
    /// Builds the spec for `report_type` from the column names in `schema`.
    pub fn for_report(report_type: ReportType, schema: &SurveySchema) -> Result<Self> {
        let predicate = match report_type {
            ReportType::Diabetes => Predicate::greater_than(
                ColumnName::new(schema.diabetes.column.as_str())?,
                schema.diabetes.threshold,
            ),
            ReportType::BloodPressure => {
                let rules = &schema.blood_pressure;
                Predicate::Any(vec![
                    Predicate::greater_than(
                        ColumnName::new(rules.systolic.column.as_str())?,
                        rules.systolic.threshold,
                    ),
                    Predicate::greater_than(
                        ColumnName::new(rules.diastolic.column.as_str())?,
                        rules.diastolic.threshold,
                    ),
                ])
            }
            ReportType::Cholesterol => return Ok(Self::cholesterol_placeholder()),
        };

        let physician = &schema.access.physician;
        let coverage = &schema.access.coverage;
        let answers = [
            (&physician.yes, &coverage.yes),
            (&physician.yes, &coverage.no),
            (&physician.no, &coverage.yes),
            (&physician.no, &coverage.no),
        ];
        let combinations = ACCESS_LABELS
            .iter()
            .zip(answers)
            .map(|(label, (p, c))| Combination::new(*label, vec![p.clone(), c.clone()]))
            .collect();

        Ok(ConditionSpec::Computed(ComputedSpec {
            predicate,
            condition_columns: vec![
                ColumnName::new(physician.column.as_str())?,
                ColumnName::new(coverage.column.as_str())?,
            ],
            combinations,
            total_label: report_type.total_label().to_string(),
        }))
    }

    fn cholesterol_placeholder() -> Self {
        let categories: Vec<CategoryEntry> = CHOLESTEROL_DEMO
            .iter()
            .map(|(label, count)| CategoryEntry::new(*label, *count))
            .collect();
        let total = categories.iter().map(|entry| entry.count).sum();
        ConditionSpec::Static(StaticSpec {
            counts: CategoryCount::new(
                categories,
                CategoryEntry::new(ReportType::Cholesterol.total_label(), total),
            ),
        })
    }
}
