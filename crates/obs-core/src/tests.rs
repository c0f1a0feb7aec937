//! Unit tests for obs-core primitives.

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(48.77, 9.18);
        assert!(p.distance_m(p) < 0.01);
    }

    #[test]
    fn one_degree_latitude_is_about_111km() {
        let a = GeoPoint::new(48.0, 9.18);
        let b = GeoPoint::new(49.0, 9.18);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
    }

    #[test]
    fn zero_zero_is_implausible() {
        assert!(!GeoPoint::new(0.0, 0.0).is_plausible());
        assert!(GeoPoint::new(48.77, 9.18).is_plausible());
    }

    #[test]
    fn out_of_range_is_implausible() {
        assert!(!GeoPoint::new(91.0, 9.18).is_plausible());
        assert!(!GeoPoint::new(48.77, 181.0).is_plausible());
    }
}

#[cfg(test)]
mod time {
    use chrono::TimeZone;

    use crate::time::{gps_minus_utc_seconds, gps_to_utc, reject_before};

    #[test]
    fn gps_offset_at_2021_is_18_seconds() {
        let at = chrono::Utc.with_ymd_and_hms(2021, 6, 26, 14, 39, 39).unwrap();
        assert_eq!(gps_minus_utc_seconds(at), 18);
    }

    #[test]
    fn gps_to_utc_matches_fixture() {
        let apparent = chrono::Utc.with_ymd_and_hms(2021, 6, 26, 14, 39, 39).unwrap();
        let utc = gps_to_utc(apparent);
        assert_eq!(utc, chrono::Utc.with_ymd_and_hms(2021, 6, 26, 14, 39, 21).unwrap());
    }

    #[test]
    fn reject_before_is_2018() {
        let cutoff = reject_before();
        assert_eq!(cutoff.to_rfc3339(), "2018-01-01T00:00:00+00:00");
    }
}

#[cfg(test)]
mod sample {
    use chrono::Utc;

    use crate::sample::{OsmTags, Sample};

    fn blank_sample() -> Sample {
        Sample {
            measurement_id: "m1".into(),
            user_id: None,
            device_id: None,
            time: Utc::now(),
            latitude: None,
            longitude: None,
            course: None,
            speed: None,
            distance_overtaker: None,
            distance_stationary: None,
            confirmed: false,
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
    fn requires_both_position_and_course() {
        let mut s = blank_sample();
        assert!(!s.has_position_and_course());
        s.latitude = Some(48.77);
        s.longitude = Some(9.18);
        assert!(!s.has_position_and_course());
        s.course = Some(0.5);
        assert!(s.has_position_and_course());
    }

    #[test]
    fn clear_annotation_leaves_raw_fields() {
        let mut s = blank_sample();
        s.latitude = Some(48.77);
        s.way_id = Some(42.into());
        s.has_osm_annotations = true;
        s.osm_tags.set("name", "Main Street");
        s.clear_annotation();
        assert_eq!(s.latitude, Some(48.77));
        assert!(s.way_id.is_none());
        assert!(!s.has_osm_annotations);
        assert!(s.osm_tags.is_empty());
    }
}
