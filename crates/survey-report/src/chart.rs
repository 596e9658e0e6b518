//! Mapping report counts onto bar chart descriptors.

use survey_model::{BarSeries, CategoryCount, ChartSpec};

/// Y-axis label of the combined diabetes/blood-pressure chart.
pub const COMBO_Y_LABEL: &str = "High Risk Patients";

/// Single-series bar chart of `counts`.
///
/// Bars are the categories in order; the total entry labels the y-axis and
/// fixes its range to `[-0.5, total - 0.5]`, which centres unit-height bars
/// on their gridlines.
pub fn to_chart(counts: &CategoryCount, title: &str) -> ChartSpec {
    let total = counts.total();
    ChartSpec {
        title: Some(title.to_string()),
        x_labels: counts
            .categories()
            .iter()
            .map(|entry| entry.label.clone())
            .collect(),
        y_label: total.label.clone(),
        y_range: Some((-0.5, total.count as f64 - 0.5)),
        series: vec![BarSeries::new(
            total.label.as_str(),
            counts.categories().iter().map(|entry| entry.count).collect(),
        )],
        show_legend: false,
    }
}

/// Grouped chart comparing the diabetes and blood-pressure buckets.
///
/// Labels come from `diabetes`; both reports are built from the same access
/// combinations, so their categories line up.
pub fn combo_chart(diabetes: &CategoryCount, blood_pressure: &CategoryCount) -> ChartSpec {
    let values = |counts: &CategoryCount| -> Vec<usize> {
        counts.categories().iter().map(|entry| entry.count).collect()
    };
    ChartSpec {
        title: None,
        x_labels: diabetes
            .categories()
            .iter()
            .map(|entry| entry.label.clone())
            .collect(),
        y_label: COMBO_Y_LABEL.to_string(),
        y_range: None,
        series: vec![
            BarSeries::new("Diabetes", values(diabetes)).with_color("blue"),
            BarSeries::new("Blood Pressure", values(blood_pressure)).with_color("red"),
        ],
        show_legend: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_model::CategoryEntry;

    fn counts(values: [usize; 4], total: usize) -> CategoryCount {
        let labels = ["A", "B", "C", "D"];
        CategoryCount::new(
            labels
                .iter()
                .zip(values)
                .map(|(label, count)| CategoryEntry::new(*label, count))
                .collect(),
            CategoryEntry::new("Total", total),
        )
    }

    #[test]
    fn chart_drops_total_from_bars() {
        let chart = to_chart(&counts([2, 1, 1, 0], 4), "Diabetes Data");
        assert_eq!(chart.title.as_deref(), Some("Diabetes Data"));
        assert_eq!(chart.x_labels, vec!["A", "B", "C", "D"]);
        assert_eq!(chart.bars(), &[2, 1, 1, 0]);
        assert_eq!(chart.y_label, "Total");
        assert_eq!(chart.y_range, Some((-0.5, 3.5)));
    }

    #[test]
    fn empty_total_gives_negative_upper_bound() {
        let chart = to_chart(&counts([0, 0, 0, 0], 0), "Empty");
        assert_eq!(chart.y_range, Some((-0.5, -0.5)));
    }

    #[test]
    fn combo_has_two_coloured_series() {
        let chart = combo_chart(&counts([2, 1, 1, 0], 4), &counts([3, 0, 2, 1], 7));
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[1].values, vec![3, 0, 2, 1]);
        assert_eq!(chart.series[0].color.as_deref(), Some("blue"));
        assert_eq!(chart.y_label, COMBO_Y_LABEL);
        assert!(chart.y_range.is_none());
        assert!(chart.show_legend);
    }
}
