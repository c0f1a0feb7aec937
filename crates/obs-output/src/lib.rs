//! `obs-output` — GeoJSON and GPX emitters for a processed track (§4.12, C12).
//!
//! | Module       | Contents                                                |
//! |--------------|----------------------------------------------------------|
//! | [`geojson`]   | RFC 7946 FeatureCollection builders (points/events/lines) |
//! | [`gpx`]       | GPX 1.1 `<trk>` builder and writer                        |
//! | [`paths`]     | The `<base>/<author>/<slug>/{...}` output layout          |
//! | [`writer`]    | Ties the above together, writing all five artifacts       |
//! | [`error`]     | `OutputError`, `OutputResult`                             |

pub mod error;
pub mod geojson;
pub mod gpx;
pub mod paths;
pub mod writer;

#[cfg(test)]
mod tests;

pub use error::{OutputError, OutputResult};
pub use writer::write_track;
