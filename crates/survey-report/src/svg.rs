//! Standalone SVG rendering of a [`ChartSpec`].

use std::io::Write;

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use survey_model::{ChartSpec, format_numeric};

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 540.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 70.0;
/// Share of each category slot covered by its bars.
const GROUP_WIDTH: f64 = 0.8;
const PALETTE: [&str; 4] = ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728"];
const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Plot area and value-to-pixel mapping.
struct Frame {
    y_min: f64,
    y_max: f64,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Frame {
    fn new(chart: &ChartSpec) -> Self {
        let (y_min, y_max) = axis_range(chart);
        Self {
            y_min,
            y_max,
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: WIDTH - MARGIN_LEFT - MARGIN_RIGHT,
            height: HEIGHT - MARGIN_TOP - MARGIN_BOTTOM,
        }
    }

    /// Pixel row of `value`, clipped to the plot area.
    fn y(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.y_min, self.y_max);
        self.top + (self.y_max - clamped) / (self.y_max - self.y_min) * self.height
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

fn axis_range(chart: &ChartSpec) -> (f64, f64) {
    match chart.y_range {
        Some((lo, hi)) if hi > lo => (lo, hi),
        // Degenerate range (e.g. a report with no matching rows).
        Some((lo, _)) => (lo, lo + 1.0),
        None => (0.0, chart.max_value().max(1) as f64 * 1.1),
    }
}

fn ticks(lo: f64, hi: f64) -> Vec<f64> {
    let step = ((hi - lo) / 8.0).ceil().max(1.0);
    let mut out = Vec::new();
    let mut value = (lo / step).ceil() * step;
    while value <= hi + f64::EPSILON {
        out.push(if value == 0.0 { 0.0 } else { value });
        value += step;
    }
    out
}

fn px(value: f64) -> String {
    format!("{value:.1}")
}

fn start_tag(name: &str, attrs: &[(&str, String)]) -> BytesStart<'static> {
    let mut tag = BytesStart::new(name.to_string());
    for (key, value) in attrs {
        tag.push_attribute((*key, value.as_str()));
    }
    tag
}

fn write_empty<W: Write>(xml: &mut Writer<W>, name: &str, attrs: &[(&str, String)]) -> Result<()> {
    xml.write_event(Event::Empty(start_tag(name, attrs)))?;
    Ok(())
}

fn write_text<W: Write>(xml: &mut Writer<W>, attrs: &[(&str, String)], text: &str) -> Result<()> {
    xml.write_event(Event::Start(start_tag("text", attrs)))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new("text")))?;
    Ok(())
}

/// Renders `chart` as an SVG document.
pub fn render_chart_svg(chart: &ChartSpec) -> Result<String> {
    let frame = Frame::new(chart);
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    xml.write_event(Event::Start(start_tag(
        "svg",
        &[
            ("xmlns", SVG_NS.to_string()),
            ("width", format_numeric(WIDTH)),
            ("height", format_numeric(HEIGHT)),
            ("viewBox", format!("0 0 {WIDTH} {HEIGHT}")),
            ("font-family", "sans-serif".to_string()),
            ("font-size", "12".to_string()),
        ],
    )))?;
    write_empty(
        &mut xml,
        "rect",
        &[
            ("width", "100%".to_string()),
            ("height", "100%".to_string()),
            ("fill", "white".to_string()),
        ],
    )?;

    if let Some(title) = chart.title.as_deref() {
        write_text(
            &mut xml,
            &[
                ("x", px(WIDTH / 2.0)),
                ("y", px(MARGIN_TOP / 2.0)),
                ("text-anchor", "middle".to_string()),
                ("font-size", "16".to_string()),
                ("font-weight", "bold".to_string()),
            ],
            title,
        )?;
    }

    for tick in ticks(frame.y_min, frame.y_max) {
        let y = frame.y(tick);
        write_empty(
            &mut xml,
            "line",
            &[
                ("x1", px(frame.left)),
                ("x2", px(frame.left + frame.width)),
                ("y1", px(y)),
                ("y2", px(y)),
                ("stroke", "#dddddd".to_string()),
            ],
        )?;
        write_text(
            &mut xml,
            &[
                ("x", px(frame.left - 8.0)),
                ("y", px(y + 4.0)),
                ("text-anchor", "end".to_string()),
            ],
            &format_numeric(tick),
        )?;
    }

    let slot = frame.width / chart.x_labels.len().max(1) as f64;
    let series_count = chart.series.len().max(1) as f64;
    let bar_width = slot * GROUP_WIDTH / series_count;
    let baseline = frame.y(0.0);
    for (s, series) in chart.series.iter().enumerate() {
        let fill = series
            .color
            .clone()
            .unwrap_or_else(|| PALETTE[s % PALETTE.len()].to_string());
        for (i, value) in series.values.iter().enumerate().take(chart.x_labels.len()) {
            let x = frame.left + slot * i as f64 + slot * (1.0 - GROUP_WIDTH) / 2.0;
            let top = frame.y(*value as f64);
            xml.write_event(Event::Start(start_tag(
                "rect",
                &[
                    ("x", px(x + bar_width * s as f64)),
                    ("y", px(top.min(baseline))),
                    ("width", px(bar_width)),
                    ("height", px((baseline - top).abs())),
                    ("fill", fill.clone()),
                ],
            )))?;
            xml.write_event(Event::Start(BytesStart::new("title")))?;
            xml.write_event(Event::Text(BytesText::new(&format!(
                "{}: {value}",
                series.name
            ))))?;
            xml.write_event(Event::End(BytesEnd::new("title")))?;
            xml.write_event(Event::End(BytesEnd::new("rect")))?;
        }
    }

    write_empty(
        &mut xml,
        "line",
        &[
            ("x1", px(frame.left)),
            ("x2", px(frame.left)),
            ("y1", px(frame.top)),
            ("y2", px(frame.bottom())),
            ("stroke", "black".to_string()),
        ],
    )?;
    write_empty(
        &mut xml,
        "line",
        &[
            ("x1", px(frame.left)),
            ("x2", px(frame.left + frame.width)),
            ("y1", px(frame.bottom())),
            ("y2", px(frame.bottom())),
            ("stroke", "black".to_string()),
        ],
    )?;

    for (i, label) in chart.x_labels.iter().enumerate() {
        write_text(
            &mut xml,
            &[
                ("x", px(frame.left + slot * (i as f64 + 0.5))),
                ("y", px(frame.bottom() + 20.0)),
                ("text-anchor", "middle".to_string()),
            ],
            label,
        )?;
    }

    let y_center = frame.top + frame.height / 2.0;
    write_text(
        &mut xml,
        &[
            ("x", px(24.0)),
            ("y", px(y_center)),
            ("text-anchor", "middle".to_string()),
            ("transform", format!("rotate(-90 24 {})", px(y_center))),
        ],
        &chart.y_label,
    )?;

    if chart.show_legend {
        let legend_x = frame.left + frame.width - 160.0;
        for (s, series) in chart.series.iter().enumerate() {
            let y = frame.top + 10.0 + 18.0 * s as f64;
            let fill = series
                .color
                .clone()
                .unwrap_or_else(|| PALETTE[s % PALETTE.len()].to_string());
            write_empty(
                &mut xml,
                "rect",
                &[
                    ("x", px(legend_x)),
                    ("y", px(y)),
                    ("width", "12".to_string()),
                    ("height", "12".to_string()),
                    ("fill", fill),
                ],
            )?;
            write_text(
                &mut xml,
                &[("x", px(legend_x + 18.0)), ("y", px(y + 10.0))],
                &series.name,
            )?;
        }
    }

    xml.write_event(Event::End(BytesEnd::new("svg")))?;
    String::from_utf8(xml.into_inner()).context("svg output is not UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_model::BarSeries;

    fn chart(values: Vec<usize>, y_range: Option<(f64, f64)>) -> ChartSpec {
        ChartSpec {
            title: Some("Diabetes Data".to_string()),
            x_labels: vec![
                "Medical Coverage & a Physician".to_string(),
                "Physician Only".to_string(),
            ],
            y_label: "People with Diabetes".to_string(),
            y_range,
            series: vec![BarSeries::new("People with Diabetes", values)],
            show_legend: false,
        }
    }

    #[test]
    fn ticks_cover_fixed_range() {
        assert_eq!(ticks(-0.5, 3.5), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(ticks(0.0, 40.0), vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0]);
    }

    #[test]
    fn renders_one_rect_per_bar_and_escapes_labels() {
        let svg = render_chart_svg(&chart(vec![2, 1], Some((-0.5, 3.5)))).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert_eq!(svg.matches("<title>").count(), 2);
        assert!(svg.contains("Medical Coverage &amp; a Physician"));
        assert!(svg.contains(">Diabetes Data</text>"));
        assert!(svg.contains("People with Diabetes: 2"));
    }

    #[test]
    fn degenerate_range_still_renders() {
        let svg = render_chart_svg(&chart(vec![0, 0], Some((-0.5, -0.5)))).unwrap();
        assert!(!svg.contains("NaN"));
        assert!(!svg.contains("inf"));
    }

    #[test]
    fn legend_lists_series_names() {
        let mut spec = chart(vec![1, 2], None);
        spec.series.push(BarSeries::new("Blood Pressure", vec![3, 4]).with_color("red"));
        spec.show_legend = true;
        let svg = render_chart_svg(&spec).unwrap();
        assert!(svg.contains(">Blood Pressure</text>"));
        assert!(svg.contains("fill=\"red\""));
    }
}
