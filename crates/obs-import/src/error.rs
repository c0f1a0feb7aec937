//! Errors raised while reading a track file (§4.4, §7 `InvalidInput`).

#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    #[error("unrecognized CSV format: {0}")]
    InvalidFormat(String),
    #[error("malformed row: {0}")]
    MalformedRow(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type ImportResult<T> = Result<T, ImportError>;
