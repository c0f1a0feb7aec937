//! Unit tests for obs-import.

use chrono::{TimeZone, Utc};

use crate::egomotion::derive_egomotion;
use crate::format::{identify_format, split_metadata_and_header};
use crate::reader::{import_csv_reader, ImporterConfig};

fn header_record(line: &str) -> csv::StringRecord {
    csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .unwrap()
        .unwrap()
}

#[cfg(test)]
mod format_detection {
    use super::*;
    use crate::format::{CsvFormatVersion, Metadata};

    #[test]
    fn v1_0_header_is_recognized() {
        let header = header_record("Date;Time;Latitude;Longitude;Case;Lid");
        let version = identify_format(&Metadata::default(), &header).unwrap();
        assert_eq!(version, CsvFormatVersion::V1_0);
    }

    #[test]
    fn v1_3_header_is_recognized_by_privacy_column() {
        let header = header_record("Date;Time;Latitude;Longitude;Left;Right;Course;Speed;insidePrivacyArea");
        let version = identify_format(&Metadata::default(), &header).unwrap();
        assert_eq!(version, CsvFormatVersion::V1_3);
    }

    #[test]
    fn metadata_line_declares_format_2() {
        let (metadata, consumed) = split_metadata_and_header("OBSDataFormat=2&MaximumMeasurementsPerLine=3", Some("Date;Time"));
        assert!(consumed);
        assert_eq!(metadata.get("OBSDataFormat"), Some("2"));
    }

    #[test]
    fn unrecognizable_header_is_an_error() {
        let header = header_record("Foo;Bar");
        assert!(identify_format(&Metadata::default(), &header).is_err());
    }
}

#[cfg(test)]
mod row_parsing {
    use super::*;

    const V1_2_HEADER: &str = "Date;Time;Latitude;Longitude;Course;Speed;Left;Right;Confirmed";

    fn csv_body(rows: &[&str]) -> String {
        let mut text = String::from(V1_2_HEADER);
        text.push('\n');
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        text
    }

    #[test]
    fn zero_zero_rows_are_dropped() {
        let text = csv_body(&[
            "26.06.2021;14:39:39;0;0;90;10;50;50;0",
            "26.06.2021;14:39:40;48.77;9.18;90;10;50;50;0",
        ]);
        let (samples, stats) = import_csv_reader(text.as_bytes(), &ImporterConfig::default()).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(stats.n_measurements, 2);
        assert_eq!(stats.n_valid, 1);
        assert!((samples[0].latitude.unwrap() - 48.77).abs() < 1e-9);
    }

    #[test]
    fn gps_time_metadata_converts_to_utc() {
        let text = format!(
            "OBSDataFormat=2&MaximumMeasurementsPerLine=0&TimeZone=GPS\n{V1_2_HEADER}\n26.06.2021;14:39:39;48.77;9.18;90;10;50;50;0\n"
        );
        let (samples, _) = import_csv_reader(text.as_bytes(), &ImporterConfig::default()).unwrap();
        assert_eq!(samples.len(), 1);
        let expected = Utc.with_ymd_and_hms(2021, 6, 26, 14, 39, 21).unwrap();
        assert_eq!(samples[0].time, expected);
    }

    #[test]
    fn sentinel_distances_become_missing() {
        let text = csv_body(&["26.06.2021;14:39:39;48.77;9.18;90;10;255;999;1"]);
        let (samples, _) = import_csv_reader(text.as_bytes(), &ImporterConfig::default()).unwrap();
        assert_eq!(samples[0].distance_overtaker, None);
        assert_eq!(samples[0].distance_stationary, None);
        assert!(samples[0].confirmed);
    }

    #[test]
    fn right_hand_traffic_takes_right_column_as_overtaker() {
        let text = csv_body(&["26.06.2021;14:39:39;48.77;9.18;90;10;111;222;0"]);
        let config = ImporterConfig {
            right_hand_traffic: true,
            left_right_is_swapped: false,
        };
        let (samples, _) = import_csv_reader(text.as_bytes(), &config).unwrap();
        assert_eq!(samples[0].distance_overtaker, Some(222.0));
        assert_eq!(samples[0].distance_stationary, Some(111.0));
    }

    #[test]
    fn pre_2018_rows_are_dropped() {
        let text = csv_body(&["26.06.2015;14:39:39;48.77;9.18;90;10;50;50;0"]);
        let (samples, _) = import_csv_reader(text.as_bytes(), &ImporterConfig::default()).unwrap();
        assert!(samples.is_empty());
    }
}

#[cfg(test)]
mod egomotion {
    use super::*;
    use obs_core::sample::{OsmTags, Sample};

    fn bare_sample(time: chrono::DateTime<Utc>, lat: Option<f64>, lon: Option<f64>) -> Sample {
        Sample {
            measurement_id: "m".to_string(),
            user_id: None,
            device_id: None,
            time,
            latitude: lat,
            longitude: lon,
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
    fn fills_course_and_speed_from_neighbors_one_second_apart() {
        let t0 = Utc.with_ymd_and_hms(2021, 6, 26, 14, 39, 38).unwrap();
        let mut samples = vec![
            bare_sample(t0, Some(48.7700), Some(9.1800)),
            bare_sample(t0 + chrono::Duration::seconds(1), Some(48.77025), Some(9.18025)),
            bare_sample(t0 + chrono::Duration::seconds(2), Some(48.7705), Some(9.1805)),
        ];
        derive_egomotion(&mut samples);
        assert!(samples[1].egomotion_is_derived);
        assert!(samples[1].speed.unwrap() > 0.0);
        assert!(samples[1].course.is_some());
    }

    #[test]
    fn never_overwrites_a_present_course() {
        let t0 = Utc.with_ymd_and_hms(2021, 6, 26, 14, 39, 38).unwrap();
        let mut s1 = bare_sample(t0 + chrono::Duration::seconds(1), Some(48.77025), Some(9.18025));
        s1.course = Some(1.234);
        s1.speed = Some(5.0);
        let mut samples = vec![bare_sample(t0, Some(48.7700), Some(9.1800)), s1, bare_sample(t0 + chrono::Duration::seconds(2), Some(48.7705), Some(9.1805))];
        derive_egomotion(&mut samples);
        assert_eq!(samples[1].course, Some(1.234));
        assert!(!samples[1].egomotion_is_derived);
    }

    #[test]
    fn skips_when_neighbor_gap_is_not_one_second() {
        let t0 = Utc.with_ymd_and_hms(2021, 6, 26, 14, 39, 38).unwrap();
        let mut samples = vec![
            bare_sample(t0, Some(48.7700), Some(9.1800)),
            bare_sample(t0 + chrono::Duration::seconds(3), Some(48.77025), Some(9.18025)),
            bare_sample(t0 + chrono::Duration::seconds(4), Some(48.7705), Some(9.1805)),
        ];
        derive_egomotion(&mut samples);
        assert!(samples[1].course.is_none());
        assert!(!samples[1].egomotion_is_derived);
    }
}
