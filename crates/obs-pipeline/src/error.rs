//! The pipeline crate's error enum: the one place the top-level error
//! taxonomy (§7) is actually named. `TimeClock` and `MatchingDegenerate`
//! are listed for completeness but are never constructed — §7 describes
//! both as "not an error" (a dropped-row counter and a zero-result success
//! respectively), so no code path here ever returns them.

use thiserror::Error;

use obs_filter::FilterError;
use obs_import::ImportError;
use obs_match::MatchError;
use obs_osm::OsmError;
use obs_output::OutputError;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Unreadable CSV, unknown format, missing mandatory column, or a
    /// duplicate track file (identical content hash).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ImportError),

    /// Rows dropped for predating 2018-01-01 — counted by the importer,
    /// never raised. Kept as a variant only to name the taxonomy kind.
    #[error("rows dropped for predating the epoch cutoff")]
    TimeClock,

    /// Tile fetch failed after retries; aborts the current track only.
    #[error("map data unavailable: {0}")]
    MapUnavailable(#[from] OsmError),

    /// Zero candidates for every sample in the track. Not actually raised:
    /// the track still completes, with `num_events = 0`.
    #[error("no candidate ways were found for any sample in this track")]
    MatchingDegenerate,

    /// Concurrent deletion of the track row during processing.
    #[error("store conflict: {0}")]
    StoreConflict(String),

    /// Cooperative shutdown requested mid-track; no state change is
    /// committed for the in-flight track.
    #[error("cancelled")]
    Cancelled,

    /// Anything else — recorded verbatim in the track's `processing_log`.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl From<MatchError> for PipelineError {
    fn from(e: MatchError) -> Self {
        PipelineError::Unexpected(e.to_string())
    }
}

impl From<OutputError> for PipelineError {
    fn from(e: OutputError) -> Self {
        PipelineError::Unexpected(e.to_string())
    }
}

impl From<FilterError> for PipelineError {
    fn from(e: FilterError) -> Self {
        PipelineError::Unexpected(e.to_string())
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
