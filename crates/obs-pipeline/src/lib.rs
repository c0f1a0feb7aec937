//! `obs-pipeline` — wires the rest of the `obs-*` crates into the
//! per-track job that a worker runs (C4 → C12), the worker pool that
//! runs it (C11), and the track-record store contract each claimed job
//! reads from and writes back to.
//!
//! | Module        | Contents                                                |
//! |---------------|-------------------------------------------------------------|
//! | [`config`]     | `PipelineConfig` and its nested sub-configs                |
//! | [`store`]      | `TrackStore` trait, `InMemoryTrackStore`, `TrackRecord`      |
//! | [`event`]      | `OvertakingEventRecord`, `build_events`                      |
//! | [`orchestrate`]| `process_track` — the single-track C4-C12 pipeline           |
//! | [`worker`]     | `spawn` — the claim/process/commit worker pool (C11)         |
//! | [`error`]      | `PipelineError`, the top-level §7 error taxonomy             |

pub mod config;
pub mod error;
pub mod event;
pub mod orchestrate;
pub mod store;
pub mod worker;


pub use config::{PipelineConfig, PrivacyZoneConfig, PseudonymizationConfig};
pub use error::{PipelineError, PipelineResult};
pub use event::{build_events, OvertakingEventRecord};
pub use orchestrate::{process_track, ProcessedTrack};
pub use store::{InMemoryTrackStore, TrackId, TrackRecord, TrackStats, TrackStatus, TrackStore};
pub use worker::{spawn, ShutdownHandle};
