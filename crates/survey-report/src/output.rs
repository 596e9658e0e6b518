//! Chart files on disk.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use survey_model::ChartSpec;

use crate::svg::render_chart_svg;

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}

/// Writes `chart` as an SVG image.
pub fn write_chart_svg(chart: &ChartSpec, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let svg = render_chart_svg(chart)?;
    fs::write(path, svg).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "wrote chart svg");
    Ok(())
}

/// Writes `chart` as pretty-printed JSON for external chart front ends.
pub fn write_chart_json(chart: &ChartSpec, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(chart).context("serialize chart")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "wrote chart json");
    Ok(())
}
