use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use survey_model::ChartSpec;

use crate::commands::{ComboOutcome, ReportOutcome};

pub fn print_report_summary(outcome: &ReportOutcome) {
    let report = &outcome.report;
    println!("Report: {}", report.title());
    if report.rows_loaded > 0 {
        println!("Rows read: {}", report.rows_loaded);
    }
    println!("{}", report_table(outcome));
    if !report.coercions.is_empty() {
        eprintln!(
            "{} cell(s) could not be read as numbers and were skipped (run with -vv for rows).",
            report.coercions.len()
        );
    }
    print_written(&outcome.written);
}

pub fn print_combo_summary(outcome: &ComboOutcome) {
    println!("{}", combo_table(&outcome.chart));
    print_written(&outcome.written);
}

/// Category counts followed by the highlighted total row.
pub fn report_table(outcome: &ReportOutcome) -> Table {
    let counts = &outcome.report.counts;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Category"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for entry in counts.categories() {
        table.add_row(vec![Cell::new(&entry.label), count_cell(entry.count)]);
    }
    let total = counts.total();
    table.add_row(vec![
        Cell::new(&total.label)
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total.count).add_attribute(Attribute::Bold),
    ]);
    table
}

/// One row per category, one column per series.
pub fn combo_table(chart: &ChartSpec) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Category")];
    header.extend(chart.series.iter().map(|series| header_cell(&series.name)));
    table.set_header(header);
    apply_table_style(&mut table);
    for index in 1..=chart.series.len() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (i, label) in chart.x_labels.iter().enumerate() {
        let mut row = vec![Cell::new(label)];
        row.extend(
            chart
                .series
                .iter()
                .map(|series| count_cell(series.values.get(i).copied().unwrap_or_default())),
        );
        table.add_row(row);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn print_written(paths: &[std::path::PathBuf]) {
    for path in paths {
        println!("Wrote {}", path.display());
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}
