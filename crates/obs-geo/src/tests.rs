//! Unit tests for obs-geo.

#[cfg(test)]
mod projector {
    use crate::projector::EquirectangularFast;

    #[test]
    fn roundtrip_within_one_cm() {
        let p = EquirectangularFast::new(48.77, 9.18);
        let (lat, lon) = (48.7723, 9.1844);
        let (x, y) = p.to_local(lat, lon);
        let (lat2, lon2) = p.from_local(x, y);
        // 1 cm in degrees at this latitude is well under 1e-7.
        assert!((lat - lat2).abs() < 1e-7);
        assert!((lon - lon2).abs() < 1e-7);
    }

    #[test]
    fn accurate_within_5km() {
        let anchor = (48.77, 9.18);
        let p = EquirectangularFast::new(anchor.0, anchor.1);
        let target = (48.80, 9.21); // a few km away
        let (x, y) = p.to_local(target.0, target.1);
        let straight_line = (x * x + y * y).sqrt();

        use obs_core::GeoPoint;
        let haversine = GeoPoint::new(anchor.0, anchor.1).distance_m(GeoPoint::new(target.0, target.1));
        let rel_err = (straight_line - haversine).abs() / haversine;
        assert!(rel_err < 0.001, "rel_err={rel_err}");
    }
}

#[cfg(test)]
mod way {
    use std::collections::BTreeMap;

    use obs_core::GeoPoint;

    use crate::way::Way;

    fn bidirectional_way() -> Way {
        let vertices = vec![
            GeoPoint::new(48.7700, 9.1800),
            GeoPoint::new(48.7705, 9.1810),
        ];
        let mut tags = BTreeMap::new();
        tags.insert("oneway".to_string(), "no".to_string());
        tags.insert("name".to_string(), "Main".to_string());
        Way::new(1.into(), vertices, tags).unwrap()
    }

    #[test]
    fn directionality_bidirectional() {
        let way = bidirectional_way();
        assert_eq!(way.directionality, 0);
    }

    #[test]
    fn single_bidirectional_match_scenario() {
        // Scenario 3: a sample near the midpoint, course matching the
        // forward direction, should match with small lateral distance and
        // direction error.
        let way = bidirectional_way();
        let sample = (48.77025, 9.18050);
        let course = (1f64).atan2(1f64);

        let (segment_index, lateral_distance_m, local_point, _lambda) = way.nearest_segment(sample.0, sample.1);
        assert_eq!(segment_index, 0);
        assert!(lateral_distance_m < 5.0, "got {lateral_distance_m}");

        let heading = way.heading_of_segment(segment_index);
        let direction_error = crate::way::angular_distance(course, heading);
        assert!(direction_error < 30f64.to_radians(), "got {direction_error}");

        let _ = local_point;
    }

    #[test]
    fn oneway_yes_is_forward() {
        let vertices = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.001, 0.001)];
        let mut tags = BTreeMap::new();
        tags.insert("oneway".to_string(), "yes".to_string());
        let way = Way::new(2.into(), vertices, tags).unwrap();
        assert_eq!(way.directionality, 1);
    }

    #[test]
    fn motorway_implies_forward_without_oneway_tag() {
        let vertices = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.001, 0.001)];
        let mut tags = BTreeMap::new();
        tags.insert("highway".to_string(), "motorway".to_string());
        let way = Way::new(3.into(), vertices, tags).unwrap();
        assert_eq!(way.directionality, 1);
    }
}

#[cfg(test)]
mod store_and_candidates {
    use std::collections::BTreeMap;

    use obs_core::GeoPoint;

    use crate::candidate::{generate_candidates, CandidateParams};
    use crate::store::WayStore;
    use crate::way::Way;

    #[test]
    fn single_bidirectional_way_candidate() {
        let store = WayStore::new();
        let vertices = vec![
            GeoPoint::new(48.7700, 9.1800),
            GeoPoint::new(48.7705, 9.1810),
        ];
        let mut tags = BTreeMap::new();
        tags.insert("oneway".to_string(), "no".to_string());
        let way = Way::new(42.into(), vertices, tags).unwrap();
        store.insert(way).unwrap();

        let course = (1f64).atan2(1f64);
        let candidates = generate_candidates(48.77025, 9.18050, course, &store, &CandidateParams::default());

        assert_eq!(candidates.len(), 1);
        let c = &candidates[0];
        assert_eq!(c.way_id.0, 42);
        assert_eq!(c.orientation, 1);
        assert!(c.lateral_distance_m < 5.0);
        assert!(c.direction_error_rad < 30f64.to_radians());
    }

    #[test]
    fn no_nearby_way_returns_empty() {
        let store = WayStore::new();
        let candidates = generate_candidates(10.0, 10.0, 0.0, &store, &CandidateParams::default());
        assert!(candidates.is_empty());
    }

    #[test]
    fn duplicate_way_id_rejected() {
        let store = WayStore::new();
        let vertices = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.001, 0.001)];
        let way_a = Way::new(1.into(), vertices.clone(), BTreeMap::new()).unwrap();
        let way_b = Way::new(1.into(), vertices, BTreeMap::new()).unwrap();
        store.insert(way_a).unwrap();
        assert!(store.insert(way_b).is_err());
    }
}
