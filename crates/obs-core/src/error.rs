//! Base error type shared across `obs-*` crates.
//!
//! Sub-crates define their own narrower error enums for their own failure
//! modes and convert into `CoreError` (or wrap it as one variant) only when
//! they genuinely reuse a core-level failure, rather than funneling
//! everything through one all-purpose enum.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
