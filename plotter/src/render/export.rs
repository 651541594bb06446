use crate::render::chart::ChartSpec;
use crate::render::RenderError;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes the chart's axes, series and markers as pretty JSON next to its SVG.
pub fn write_json(spec: &ChartSpec, dir: &Path) -> Result<PathBuf, RenderError> {
    let path = dir.join(format!("{}.json", spec.file_stem));
    let file = fs::File::create(&path).map_err(|source| RenderError::Create {
        path: path.clone(),
        source,
    })?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, spec)?;
    out.flush()?;
    log::info!("wrote {}", path.display());
    Ok(path)
}
