//! Charting collaborator: turns evaluated curves into SVG figures and JSON data.

pub mod chart;
pub mod export;
pub mod figures;
pub mod svg;

use std::io;
use std::path::{Path, PathBuf};

pub use chart::ChartSpec;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("invalid chart {chart}: {reason}")]
    InvalidChart { chart: String, reason: String },
    #[error("creating {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("writing chart: {0}")]
    Io(#[from] io::Error),
    #[error("serializing chart data: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Writes the chart as SVG into `dir` and, when asked, its data as JSON.
pub fn publish(spec: &ChartSpec, dir: &Path, export_json: bool) -> Result<Vec<PathBuf>, RenderError> {
    let mut written = vec![svg::write_svg(spec, dir)?];
    if export_json {
        written.push(export::write_json(spec, dir)?);
    }
    Ok(written)
}
