//! The per-row sample type that flows through the whole pipeline.
//!
//! The source keeps one dictionary per row and grows it with extra keys as
//! annotation stages run. Here that becomes a single struct: the fields that
//! are always meaningful are typed directly; the fields only C6/C7/C8 ever
//! populate start out empty and are filled in place. A small tag-map
//! (`OsmTags`) carries the handful of copied-verbatim OSM tags instead of
//! giving each one its own struct field, since the set is open-ended only in
//! principle (the annotator only ever writes five known keys) but doesn't
//! deserve five additional `Option<String>` fields on every sample.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::ids::WayId;

/// A handful of OSM tags copied onto an annotated sample (§4.8). Backed by a
/// sorted map so iteration order — and therefore any serialized form — is
/// stable across runs.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OsmTags(BTreeMap<String, String>);

impl OsmTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One candidate way produced by the candidate generator (C6) for a single
/// sample. Kept on the sample only transiently: the chain solver (C7)
/// consumes `candidates` and clears it once a way is chosen.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    pub way_id: WayId,
    /// Snapped WGS84 position (the projection of the sample onto the way).
    pub latitude: f64,
    pub longitude: f64,
    /// Position in the way's local (metre) frame, for downstream reuse
    /// without re-projecting.
    pub local_x: f64,
    pub local_y: f64,
    /// Perpendicular distance from the sample to the way, in metres.
    pub lateral_distance_m: f64,
    /// Angular difference between the sample's course and the way's
    /// heading at the matched point, radians, wrapped to [0, π].
    pub direction_error_rad: f64,
    /// +1 if the sample's course agrees with the way's forward traversal
    /// direction, -1 if it agrees with the reverse direction.
    pub orientation: i8,
    /// The discrete label used by the chain solver's pairwise potential:
    /// the way's name if it has one, else its stringified id.
    pub matching_id: String,
}

/// One row of a track recording, carried through ingestion, ego-motion
/// derivation, map matching, annotation, and filtering.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    // ── Identity ────────────────────────────────────────────────────────
    pub measurement_id: String,
    pub user_id: Option<String>,
    pub device_id: Option<String>,

    // ── Raw sensor data ─────────────────────────────────────────────────
    pub time: DateTime<Utc>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Radians, counter-clockwise from east.
    pub course: Option<f64>,
    /// Metres per second.
    pub speed: Option<f64>,
    pub distance_overtaker: Option<f64>,
    pub distance_stationary: Option<f64>,
    pub confirmed: bool,
    pub in_privacy_zone: bool,
    pub egomotion_is_derived: bool,

    /// Raw ultrasonic echoes for format-2.x rows, one per configured sensor
    /// slot. Not required by any downstream component; carried only so a
    /// future consumer can inspect the unprocessed sensor readings.
    pub raw_measurements: Vec<RawUltrasonicEcho>,

    // ── Map matching (C6/C7) ────────────────────────────────────────────
    pub candidates: Vec<Candidate>,
    pub way_id: Option<WayId>,
    pub way_orientation: Option<i8>,
    pub latitude_projected: Option<f64>,
    pub longitude_projected: Option<f64>,
    pub distance_projected: Option<f64>,

    // ── Annotation (C8) ─────────────────────────────────────────────────
    pub has_osm_annotations: bool,
    pub latitude_gps: Option<f64>,
    pub longitude_gps: Option<f64>,
    pub osm_tags: OsmTags,
}

/// One raw ultrasonic echo triple from a format-2.x row (`Tms_i`, `Lus_i`,
/// `Rus_i`; `Cus_i` when a confirmation-button column is split per slot).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawUltrasonicEcho {
    pub offset_ms: i32,
    pub left_us: Option<f64>,
    pub right_us: Option<f64>,
    pub confirmed: bool,
}

impl Sample {
    /// A sample is usable by the candidate generator only if it has both a
    /// position and a course (§4.6: "If the sample lacks position or
    /// course, return the empty candidate list").
    pub fn has_position_and_course(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some() && self.course.is_some()
    }

    /// Clear every map-matching/annotation field, leaving raw sensor data
    /// untouched. Used for samples with zero candidates (§4.7, §8).
    pub fn clear_annotation(&mut self) {
        self.candidates.clear();
        self.way_id = None;
        self.way_orientation = None;
        self.latitude_projected = None;
        self.longitude_projected = None;
        self.distance_projected = None;
        self.has_osm_annotations = false;
        self.latitude_gps = None;
        self.longitude_gps = None;
        self.osm_tags = OsmTags::new();
    }
}
