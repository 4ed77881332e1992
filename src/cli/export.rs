use crate::core::chart::Chart;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes each chart as pretty JSON to `<dir>/<name>.json`.
pub fn export_charts(dir: &Path, charts: &[(&str, &Chart)]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let mut written = Vec::with_capacity(charts.len());
    for (name, chart) in charts {
        let path = dir.join(format!("{name}.json"));
        let json = serde_json::to_string_pretty(chart)
            .with_context(|| format!("Failed to serialise chart {name}"))?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write chart to {}", path.display()))?;
        info!("Exported chart to {}", path.display());
        written.push(path);
    }
    Ok(written)
}
