//! `obs-core` — foundational types for the track-processing pipeline.
//!
//! This crate is a dependency of every other `obs-*` crate. It intentionally
//! has no `obs-*` dependencies and minimal external ones (`thiserror`,
//! `chrono`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|---------------------------------------------------------|
//! | [`ids`]      | `WayId`                                               |
//! | [`geo`]      | `GeoPoint`, haversine distance                        |
//! | [`time`]     | leap-second table, the 2018-01-01 cutoff, GPS→UTC conversion |
//! | [`sample`]   | `Sample`, `Candidate`, `OsmTags`                      |
//! | [`error`]    | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod sample;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::WayId;
pub use sample::{Candidate, OsmTags, Sample};
