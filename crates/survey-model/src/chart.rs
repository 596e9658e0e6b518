//! Renderer-neutral bar chart descriptor.

use serde::{Deserialize, Serialize};

/// One set of bars, one value per x-axis label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarSeries {
    pub name: String,
    pub values: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl BarSeries {
    pub fn new(name: impl Into<String>, values: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            values,
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Everything a charting backend needs to draw a (possibly grouped) bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub x_labels: Vec<String>,
    pub y_label: String,
    /// Fixed y-axis limits; `None` lets the renderer fit the data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_range: Option<(f64, f64)>,
    pub series: Vec<BarSeries>,
    #[serde(default)]
    pub show_legend: bool,
}

impl ChartSpec {
    /// Values of the first series; single-series charts keep their bars here.
    pub fn bars(&self) -> &[usize] {
        self.series
            .first()
            .map(|series| series.values.as_slice())
            .unwrap_or(&[])
    }

    /// Largest bar across all series.
    pub fn max_value(&self) -> usize {
        self.series
            .iter()
            .flat_map(|series| series.values.iter().copied())
            .max()
            .unwrap_or(0)
    }
}
