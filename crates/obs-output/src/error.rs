//! Error type for emitter I/O and serialization failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("io error writing {path}: {source}")]
    Io { path: String, #[source] source: std::io::Error },

    #[error("serializing geojson: {0}")]
    Json(#[from] serde_json::Error),

    #[error("writing gpx: {0}")]
    Gpx(String),
}

pub type OutputResult<T> = Result<T, OutputError>;
