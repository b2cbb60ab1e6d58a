use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Chart contains no notes")]
    EmptyChart,

    #[error("Base BPM must be positive, got {0}")]
    InvalidBaseBpm(f64),

    #[error("Tempo change at note {index} (t={time}s) has non-positive BPM {bpm}")]
    InvalidTempo { index: usize, time: f64, bpm: f64 },

    #[error("Note {index} has invalid time {time}")]
    InvalidTime { index: usize, time: f64 },

    #[error("Note {index} links to missing note {next}")]
    DanglingLink { index: usize, next: usize },

    #[error("Note {index} (t={time}s) links backwards to note {next} (t={next_time}s)")]
    BackwardLink {
        index: usize,
        time: f64,
        next: usize,
        next_time: f64,
    },

    #[error("Invalid render config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, ChartError>;
