//! JSON chart source — reads the chart file format into a validated `Chart`.
//!
//! ```json
//! { "bpm": 150.0,
//!   "notes": [ { "type": "tap", "time": 1.0, "position": 0.5 },
//!              { "type": "speed", "time": 2.0, "time_scale": 1.5 } ] }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{ChartError, Result};
use crate::model::{Chart, Note};

#[derive(Deserialize)]
struct ChartFile {
    bpm: f64,
    notes: Vec<Note>,
}

/// Parse a chart from its JSON text.
pub fn parse_chart_json(json: &str) -> Result<Chart> {
    let file: ChartFile = serde_json::from_str(json)?;
    let chart = Chart::new(file.bpm, file.notes)?;
    log::info!(
        "loaded chart: {} notes, base {} bpm, {:.3}s long",
        chart.notes().len(),
        chart.base_bpm(),
        chart.max_time()
    );
    Ok(chart)
}

/// Parse a chart file from a path.
pub fn parse_chart_file<P: AsRef<Path>>(path: P) -> Result<Chart> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| ChartError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_chart_json(&json)
}
