//! Unit tests for obs-output.

use chrono::{TimeZone, Utc};
use obs_core::sample::{OsmTags, Sample};
use obs_core::WayId;

use crate::geojson as geo_out;
use crate::{gpx, writer};

fn bare_sample(lat: f64, lon: f64, confirmed: bool, distance_overtaker: Option<f64>) -> Sample {
    Sample {
        measurement_id: "m1".to_string(),
        user_id: Some("alice".to_string()),
        device_id: None,
        time: Utc.with_ymd_and_hms(2021, 6, 26, 14, 39, 39).unwrap(),
        latitude: Some(lat),
        longitude: Some(lon),
        course: Some(0.0),
        speed: Some(2.0),
        distance_overtaker,
        distance_stationary: None,
        confirmed,
        in_privacy_zone: false,
        egomotion_is_derived: false,
        raw_measurements: Vec::new(),
        candidates: Vec::new(),
        way_id: Some(WayId(1)),
        way_orientation: Some(1),
        latitude_projected: Some(lat + 0.0001),
        longitude_projected: Some(lon + 0.0001),
        distance_projected: Some(0.5),
        has_osm_annotations: true,
        latitude_gps: Some(lat),
        longitude_gps: Some(lon),
        osm_tags: OsmTags::new(),
    }
}

#[test]
fn measurements_drops_rows_without_distance_or_confirmation() {
    let confirmed_no_distance = bare_sample(48.77, 9.18, true, None);
    let unconfirmed_with_distance = bare_sample(48.78, 9.19, false, Some(1.2));
    let mut neither = bare_sample(48.79, 9.20, false, None);
    neither.latitude = None;

    let fc = geo_out::measurements(&[confirmed_no_distance, unconfirmed_with_distance, neither]);
    assert_eq!(fc.features.len(), 2);
}

#[test]
fn events_keeps_only_confirmed_samples_with_a_distance() {
    let event = bare_sample(48.77, 9.18, true, Some(1.23));
    let not_confirmed = bare_sample(48.78, 9.19, false, Some(0.9));
    let fc = geo_out::events(&[event, not_confirmed]);
    assert_eq!(fc.features.len(), 1);
    let props = fc.features[0].properties.as_ref().unwrap();
    assert_eq!(props["distance_overtaker"], serde_json::json!(1.23));
    assert_eq!(props["direction"], serde_json::json!(1));
}

#[test]
fn track_line_uses_projected_position_when_annotated() {
    let samples = vec![bare_sample(48.77, 9.18, true, Some(1.0)), bare_sample(48.78, 9.19, true, Some(1.0))];
    let fc = geo_out::track_line(&samples);
    assert_eq!(fc.features.len(), 1);
    if let geojson::Value::LineString(coords) = &fc.features[0].geometry.as_ref().unwrap().value {
        assert_eq!(coords.len(), 2);
    } else {
        panic!("expected a LineString geometry");
    }
}

#[test]
fn raw_track_line_falls_back_to_latitude_when_no_gps_position_was_recorded() {
    let mut s = bare_sample(48.77, 9.18, true, Some(1.0));
    s.latitude_gps = None;
    s.longitude_gps = None;
    let fc = geo_out::raw_track_line(&[s]);
    assert_eq!(fc.features.len(), 1);
}

#[test]
fn gpx_build_emits_one_segment_with_a_point_per_positioned_sample() {
    let samples = vec![bare_sample(48.77, 9.18, true, Some(1.0)), bare_sample(48.78, 9.19, true, Some(1.0))];
    let doc = gpx::build(&samples, "my-track").unwrap();
    assert_eq!(doc.tracks.len(), 1);
    assert_eq!(doc.tracks[0].segments.len(), 1);
    assert_eq!(doc.tracks[0].segments[0].points.len(), 2);
    assert!(doc.tracks[0].segments[0].points[0].time.is_some());
}

#[test]
fn write_track_creates_all_five_artifacts() {
    let tmp = tempfile::tempdir().unwrap();
    let samples = vec![bare_sample(48.77, 9.18, true, Some(1.0))];
    writer::write_track(tmp.path(), "alice", "track-1", &samples).unwrap();

    let dir = tmp.path().join("alice").join("track-1");
    for name in ["measurements.json", "overtakingEvents.json", "track.json", "trackRaw.json", "track.gpx"] {
        assert!(dir.join(name).is_file(), "missing {name}");
    }
}
