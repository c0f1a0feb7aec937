//! OSM-subsystem error type.

use thiserror::Error;

use crate::tile::Tile;

#[derive(Debug, Error)]
pub enum OsmError {
    #[error("tile {0} failed to load after {1} attempts")]
    TileFetchFailed(Tile, u32),

    #[error("malformed intermediate record: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "online")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[cfg(feature = "sqlite")]
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type OsmResult<T> = Result<T, OsmError>;
