use std::path::Path;

use serde::Serialize;

use crate::errors::{FluorkinError, Result};

/// Per-column QA dump: the trimmed trace with detected peaks and boundary
/// chords, enough for any external plotting tool to reproduce the visual
/// check the bench workflow relies on.
#[derive(Clone, Debug, Serialize)]
pub struct QaTrace {
    pub channel: String,
    pub column: String,
    pub time: Vec<f64>,
    pub signal: Vec<f32>,
    pub peaks: Vec<usize>,
    pub bounds: Vec<(usize, usize)>,
}

pub fn write_qa_traces_json(path: &Path, traces: &[QaTrace]) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| FluorkinError::Io {
        source: e,
        path: Some(path.to_path_buf()),
    })?;
    serde_json::to_writer_pretty(file, traces)?;
    Ok(())
}
