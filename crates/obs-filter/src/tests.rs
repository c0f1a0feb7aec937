//! Unit tests for obs-filter.

use chrono::{TimeZone, Utc};
use obs_core::geo::GeoPoint;
use obs_core::sample::{OsmTags, Sample};

use crate::filter::{Chain, Confirmed, DistanceMeasured, Filter, RequiredFields};
use crate::privacy::{PrivacyZone, PrivacyZones};
use crate::pseudonym::{AnonymizationMode, Pseudonymization};

fn sample_at(lat: f64, lon: f64, confirmed: bool, distance_overtaker: Option<f64>) -> Sample {
    Sample {
        measurement_id: "m1".to_string(),
        user_id: Some("alice".to_string()),
        device_id: Some("dev-1".to_string()),
        time: Utc.with_ymd_and_hms(2021, 6, 26, 14, 39, 39).unwrap(),
        latitude: Some(lat),
        longitude: Some(lon),
        course: None,
        speed: None,
        distance_overtaker,
        distance_stationary: None,
        confirmed,
        in_privacy_zone: false,
        egomotion_is_derived: false,
        raw_measurements: Vec::new(),
        candidates: Vec::new(),
        way_id: None,
        way_orientation: None,
        latitude_projected: None,
        longitude_projected: None,
        distance_projected: None,
        has_osm_annotations: false,
        latitude_gps: None,
        longitude_gps: None,
        osm_tags: OsmTags::new(),
    }
}

#[test]
fn required_fields_drops_positionless_rows() {
    let mut no_pos = sample_at(48.77, 9.18, true, Some(1.5));
    no_pos.latitude = None;
    let kept = RequiredFields.apply(vec![sample_at(48.77, 9.18, true, None), no_pos]);
    assert_eq!(kept.len(), 1);
}

#[test]
fn distance_measured_keeps_only_rows_with_a_distance() {
    let kept = DistanceMeasured.apply(vec![sample_at(48.77, 9.18, true, Some(1.2)), sample_at(48.77, 9.18, true, None)]);
    assert_eq!(kept.len(), 1);
}

#[test]
fn confirmed_keeps_only_confirmed_rows() {
    let kept = Confirmed.apply(vec![sample_at(48.77, 9.18, true, None), sample_at(48.77, 9.18, false, None)]);
    assert_eq!(kept.len(), 1);
}

#[test]
fn privacy_zone_drops_samples_within_radius() {
    let zone = PrivacyZone::new(GeoPoint::new(48.77, 9.18), 50.0);
    let filter = PrivacyZones::new(vec![zone]);
    let inside = sample_at(48.77001, 9.18001, true, None);
    let outside = sample_at(48.9, 9.5, true, None);
    let kept = filter.apply(vec![inside, outside]);
    assert_eq!(kept.len(), 1);
    assert!((kept[0].latitude.unwrap() - 48.9).abs() < 1e-6);
}

#[test]
fn jittered_zone_is_deterministic_for_the_same_secret() {
    let zone = PrivacyZone::new(GeoPoint::new(48.77, 9.18), 200.0);
    let a = zone.jittered("secret", 50.0);
    let b = zone.jittered("secret", 50.0);
    assert!((a.center.lat - b.center.lat).abs() < 1e-12);
    assert!((a.center.lon - b.center.lon).abs() < 1e-12);
}

#[test]
fn pseudonymization_requires_salt_when_hashed() {
    let result = Pseudonymization::new(None, AnonymizationMode::Hashed, AnonymizationMode::Keep);
    assert!(result.is_err());
}

#[test]
fn pseudonymization_hashes_user_id_with_a_stable_prefix() {
    let filter = Pseudonymization::new(Some("pepper".to_string()), AnonymizationMode::Hashed, AnonymizationMode::Keep).unwrap();
    let kept = filter.apply(vec![sample_at(48.77, 9.18, true, None)]);
    let hashed = kept[0].user_id.as_deref().unwrap();
    assert!(hashed.starts_with("user_"));
    assert_eq!(hashed.len(), "user_".len() + 64);
}

#[test]
fn chain_applies_stages_in_order() {
    let chain = Chain::new(vec![Box::new(RequiredFields), Box::new(Confirmed)]);
    let mut missing_pos = sample_at(48.77, 9.18, true, None);
    missing_pos.latitude = None;
    let kept = chain.apply(vec![sample_at(48.77, 9.18, true, None), sample_at(48.77, 9.18, false, None), missing_pos]);
    assert_eq!(kept.len(), 1);
}
