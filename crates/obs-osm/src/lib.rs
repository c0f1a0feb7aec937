//! `obs-osm` — on-demand OSM tile loading (§4.3, C3).
//!
//! # Crate layout
//!
//! | Module         | Contents                                                |
//! |----------------|-------------------------------------------------------------|
//! | [`tile`]       | `Tile`, slippy-map tile/bbox math                           |
//! | [`intermediate`] | Decoding of the MessagePack `(type_tag, array)` wire format (§6) |
//! | [`provider`]   | `TileSource` trait, `MapProvider::ensure_coverage`           |
//! | [`online`]     | HTTP tile source (feature = `"online"`, default)             |
//! | [`database`]   | Pre-imported-database tile source (feature = `"sqlite"`)    |
//! | [`error`]      | `OsmError`, `OsmResult<T>`                                   |
//!
//! # Feature flags
//!
//! | Flag     | Effect                                                      |
//! |----------|---------------------------------------------------------------|
//! | `online` | Enables [`online::OnlineTileSource`] (default on).            |
//! | `sqlite` | Enables [`database::DatabaseTileSource`].                     |

pub mod error;
pub mod intermediate;
pub mod provider;
pub mod tile;

#[cfg(feature = "online")]
pub mod online;

#[cfg(feature = "sqlite")]
pub mod database;

#[cfg(test)]
mod tests;

pub use error::{OsmError, OsmResult};
pub use intermediate::RoadRecord;
pub use provider::{MapProvider, TileSource};
pub use tile::Tile;
