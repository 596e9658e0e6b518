//! Labeled counts produced by a report.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub label: String,
    pub count: usize,
}

impl CategoryEntry {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Ordered category counts followed by a final total entry.
///
/// The total counts every row that passed the report's inclusion filter, so it
/// can exceed the sum of the categories when some rows fall in no bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    categories: Vec<CategoryEntry>,
    total: CategoryEntry,
}

impl CategoryCount {
    pub fn new(categories: Vec<CategoryEntry>, total: CategoryEntry) -> Self {
        Self { categories, total }
    }

    /// Category entries in report order, without the total.
    pub fn categories(&self) -> &[CategoryEntry] {
        &self.categories
    }

    pub fn total(&self) -> &CategoryEntry {
        &self.total
    }

    pub fn total_count(&self) -> usize {
        self.total.count
    }

    /// Sum of the category counts (rows that landed in some bucket).
    pub fn bucketed(&self) -> usize {
        self.categories.iter().map(|entry| entry.count).sum()
    }

    /// Count for a category label, or for the total label.
    pub fn get(&self, label: &str) -> Option<usize> {
        self.entries()
            .find(|entry| entry.label == label)
            .map(|entry| entry.count)
    }

    /// Every entry in order, the total last.
    pub fn entries(&self) -> impl Iterator<Item = &CategoryEntry> {
        self.categories.iter().chain(std::iter::once(&self.total))
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries().map(|entry| entry.label.as_str()).collect()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.entries().map(|entry| entry.count).collect()
    }
}
