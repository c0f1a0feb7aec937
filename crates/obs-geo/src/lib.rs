//! `obs-geo` — local map projections, way storage, and candidate generation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-------------------------------------------------------------|
//! | [`projector`] | `EquirectangularFast`, `AzimuthalEquidistant`              |
//! | [`way`]       | `Way`, directionality, point-to-polyline distance           |
//! | [`store`]     | `WayStore` (id→way map + R-tree + loaded-tile set)         |
//! | [`candidate`] | `generate_candidates`, `CandidateParams`                   |
//! | [`error`]     | `GeoError`, `GeoResult<T>`                                  |

pub mod candidate;
pub mod error;
pub mod projector;
pub mod store;
pub mod way;

#[cfg(test)]
mod tests;

pub use candidate::{generate_candidates, CandidateParams};
pub use error::{GeoError, GeoResult};
pub use projector::{AzimuthalEquidistant, EquirectangularFast};
pub use store::WayStore;
pub use way::Way;
