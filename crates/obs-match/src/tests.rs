//! Unit tests for obs-match.

use chrono::{TimeZone, Utc};
use obs_core::sample::{Candidate, OsmTags, Sample};
use obs_core::WayId;

use crate::annotate::normalize_zone;
use crate::chain::solve_chains;

fn bare_sample(id: &str) -> Sample {
    Sample {
        measurement_id: id.to_string(),
        user_id: None,
        device_id: None,
        time: Utc.with_ymd_and_hms(2021, 6, 26, 14, 39, 39).unwrap(),
        latitude: Some(48.77),
        longitude: Some(9.18),
        course: Some(0.0),
        speed: Some(5.0),
        distance_overtaker: None,
        distance_stationary: None,
        confirmed: true,
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

fn candidate(way_id: i64, matching_id: &str, lateral_distance_m: f64) -> Candidate {
    Candidate {
        way_id: WayId(way_id),
        latitude: 48.77,
        longitude: 9.18,
        local_x: 0.0,
        local_y: 0.0,
        lateral_distance_m,
        direction_error_rad: 0.0,
        orientation: 1,
        matching_id: matching_id.to_string(),
    }
}

#[test]
fn chain_prefers_same_name_over_locally_closer_candidate() {
    let mut samples = vec![bare_sample("a"), bare_sample("b"), bare_sample("c")];
    samples[0].candidates = vec![candidate(1, "Main", 2.0), candidate(2, "Side", 6.0)];
    samples[1].candidates = vec![candidate(2, "Side", 3.9), candidate(1, "Main", 4.1)];
    samples[2].candidates = vec![candidate(1, "Main", 2.0), candidate(2, "Side", 6.0)];

    solve_chains(&mut samples);

    for s in &samples {
        assert_eq!(s.way_id, Some(WayId(1)), "all three samples should be labeled the 'Main' way");
    }
}

#[test]
fn a_user_device_change_starts_a_new_chain() {
    let mut samples = vec![bare_sample("a"), bare_sample("b")];
    samples[0].device_id = Some("dev-1".to_string());
    samples[1].device_id = Some("dev-2".to_string());
    samples[0].candidates = vec![candidate(1, "Main", 1.0)];
    samples[1].candidates = vec![candidate(1, "Main", 1.0)];

    solve_chains(&mut samples);

    assert_eq!(samples[0].way_id, Some(WayId(1)));
    assert_eq!(samples[1].way_id, Some(WayId(1)));
}

#[test]
fn zero_candidate_samples_are_left_unmatched_without_poisoning_neighbors() {
    let mut samples = vec![bare_sample("a"), bare_sample("b"), bare_sample("c")];
    samples[0].candidates = vec![candidate(1, "Main", 1.0)];
    samples[1].candidates = Vec::new();
    samples[2].candidates = vec![candidate(1, "Main", 1.0)];

    solve_chains(&mut samples);

    assert_eq!(samples[0].way_id, Some(WayId(1)));
    assert_eq!(samples[1].way_id, None);
    assert_eq!(samples[2].way_id, Some(WayId(1)));
}

#[test]
fn zone_traffic_country_prefix_is_stripped() {
    assert_eq!(normalize_zone("DE:urban"), "urban");
    assert_eq!(normalize_zone("DE:rural"), "rural");
    assert_eq!(normalize_zone("motorway"), "motorway");
    assert_eq!(normalize_zone("unknown"), "unknown");
}
