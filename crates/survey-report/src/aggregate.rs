//! Filtering and counting over a loaded dataset.

use serde::Serialize;
use tracing::{debug, warn};

use survey_model::{CategoryCount, CategoryEntry, ColumnName, Dataset};

use crate::condition::{ComputedSpec, Predicate};
use crate::privacy::redact_value;
use crate::{ErrorKind, ReportError, Result};

/// A non-empty cell that a numeric predicate could not read and treated as
/// missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoercionIssue {
    pub row: usize,
    pub column: ColumnName,
    pub value: String,
}

impl CoercionIssue {
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::TypeCoercion
    }
}

/// Rows satisfying `predicate`, in source order, plus every cell that had to
/// be coerced to missing along the way.
pub fn filter_with_diagnostics(
    dataset: &Dataset,
    predicate: &Predicate,
) -> (Dataset, Vec<CoercionIssue>) {
    let mut issues = Vec::new();
    let filtered = dataset.select(|row| predicate.evaluate(row, &mut issues));
    for issue in &issues {
        debug!(
            row = issue.row,
            column = %issue.column,
            value = redact_value(&issue.value),
            "non-numeric value treated as missing"
        );
    }
    if !issues.is_empty() {
        warn!(
            cells = issues.len(),
            "treated non-numeric cells as missing"
        );
    }
    (filtered, issues)
}

/// Rows satisfying `predicate`. Unreadable numbers exclude their comparison,
/// never the whole call.
pub fn filter_by_condition(dataset: &Dataset, predicate: &Predicate) -> Dataset {
    filter_with_diagnostics(dataset, predicate).0
}

/// Number of rows whose `condition_columns` equal `combination`, pairwise.
///
/// Fails with [`ReportError::ArityMismatch`] when the two slices differ in
/// length, whatever the dataset holds.
pub fn count_by_combination<S: AsRef<str>>(
    dataset: &Dataset,
    condition_columns: &[ColumnName],
    combination: &[S],
) -> Result<usize> {
    if condition_columns.len() != combination.len() {
        return Err(ReportError::ArityMismatch {
            columns: condition_columns.len(),
            values: combination.len(),
        });
    }
    let count = dataset
        .iter()
        .filter(|row| {
            condition_columns
                .iter()
                .zip(combination)
                .all(|(column, value)| row.get(column.as_str()).matches_text(value.as_ref()))
        })
        .count();
    Ok(count)
}

/// Counts an already filtered dataset into the spec's buckets; the total is
/// the filtered row count.
pub fn tabulate(filtered: &Dataset, spec: &ComputedSpec) -> Result<CategoryCount> {
    let mut categories = Vec::with_capacity(spec.combinations.len());
    for combination in &spec.combinations {
        let count = count_by_combination(filtered, &spec.condition_columns, &combination.values)?;
        categories.push(CategoryEntry::new(combination.label.as_str(), count));
    }
    Ok(CategoryCount::new(
        categories,
        CategoryEntry::new(spec.total_label.as_str(), filtered.len()),
    ))
}
