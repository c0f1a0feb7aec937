//! Overtaking-event records (§6): the subset of a processed track's
//! samples worth handing to an external store as individual rows, one per
//! confirmed, distance-measured, way-matched overtaking event.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDateTime, Utc};
use obs_core::ids::WayId;
use obs_core::sample::Sample;
use sha2::{Digest, Sha256};

use crate::store::TrackId;

/// Spherical-pseudo-Mercator projection (EPSG:3857), the conventional
/// storage SRID for point geometry alongside WGS84 lat/lon columns.
fn web_mercator_3857(lat: f64, lon: f64) -> (f64, f64) {
    const R: f64 = 6_378_137.0;
    let x = lon.to_radians() * R;
    let y = (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln() * R;
    (x, y)
}

#[derive(Clone, Debug, PartialEq)]
pub struct OvertakingEventRecord {
    pub track_id: TrackId,
    /// Unique within a track: `sha256(lat, lon, unix_seconds)`, hex-encoded.
    pub hex_hash: String,
    pub way_id: WayId,
    pub direction_reversed: bool,
    /// EPSG:3857 (x, y) in metres.
    pub point_3857: (f64, f64),
    pub latitude: f64,
    pub longitude: f64,
    pub time: NaiveDateTime,
    pub distance_overtaker: f64,
    pub distance_stationary: Option<f64>,
    pub course: Option<f64>,
    pub speed: Option<f64>,
}

fn hex_hash(lat: f64, lon: f64, time: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(lat.to_bits().to_be_bytes());
    hasher.update(lon.to_bits().to_be_bytes());
    hasher.update(time.timestamp().to_be_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for b in digest {
        use std::fmt::Write;
        write!(hex, "{b:02x}").unwrap();
    }
    hex
}

fn to_event(track_id: TrackId, sample: &Sample) -> Option<OvertakingEventRecord> {
    let lat = sample.latitude?;
    let lon = sample.longitude?;
    let distance_overtaker = sample.distance_overtaker?;
    let way_id = sample.way_id?;

    Some(OvertakingEventRecord {
        track_id,
        hex_hash: hex_hash(lat, lon, sample.time),
        way_id,
        direction_reversed: sample.way_orientation.unwrap_or(1) < 0,
        point_3857: web_mercator_3857(lat, lon),
        latitude: lat,
        longitude: lon,
        time: sample.time.naive_utc(),
        distance_overtaker,
        distance_stationary: sample.distance_stationary,
        course: sample.course,
        speed: sample.speed,
    })
}

/// Builds the event rows an external store would persist. A sample only
/// yields a row when it is confirmed, carries a measured overtaker
/// distance, and was matched to a way — a track with no way matches at
/// all (a degenerate matching pass) naturally yields zero rows here
/// rather than raising an error.
///
/// `hex_hash` is unique within a track: two samples that round to the same
/// (lat, lon, unix-second) collide, and only the first one seen keeps its
/// row.
pub fn build_events(track_id: TrackId, samples: &[Sample]) -> Vec<OvertakingEventRecord> {
    let mut seen = HashSet::new();
    samples
        .iter()
        .filter(|s| s.confirmed)
        .filter_map(|s| to_event(track_id, s))
        .filter(|event| seen.insert(event.hex_hash.clone()))
        .collect()
}
