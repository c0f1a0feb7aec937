//! RFC 7946 FeatureCollection builders (§4.12).
//!
//! Coordinates are always `[longitude, latitude]`. `course` is stored on
//! `Sample` as radians counter-clockwise from east; every emitted property
//! converts it to a compass bearing (degrees clockwise from north) the way
//! the source's GeoJSON exporter does.

use geojson::{Feature, FeatureCollection, Geometry, Value as GeoValue};
use obs_core::sample::Sample;

fn compass_bearing_deg(course_rad: f64) -> f64 {
    (90.0 - course_rad.to_degrees()).rem_euclid(360.0)
}

fn point_feature(lon: f64, lat: f64) -> Feature {
    Feature::from(Geometry::new(GeoValue::Point(vec![lon, lat])))
}

fn set_opt<T: Into<serde_json::Value>>(feature: &mut Feature, key: &str, value: Option<T>) {
    feature.set_property(key, value.map(Into::into).unwrap_or(serde_json::Value::Null));
}

/// Properties mirroring the full annotated attribute set (§4.8), shared by
/// the measurements and events collections.
fn sample_properties(feature: &mut Feature, sample: &Sample) {
    feature.set_property("time", sample.time.to_rfc3339());
    set_opt(feature, "distance_overtaker", sample.distance_overtaker);
    set_opt(feature, "distance_stationary", sample.distance_stationary);
    feature.set_property("confirmed", sample.confirmed);
    set_opt(feature, "course", sample.course.map(compass_bearing_deg));
    set_opt(feature, "speed", sample.speed);
    set_opt(feature, "user_id", sample.user_id.clone());
    feature.set_property("measurement_id", sample.measurement_id.clone());
    feature.set_property("egomotion_is_derived", sample.egomotion_is_derived);
    set_opt(feature, "latitude_gps", sample.latitude_gps);
    set_opt(feature, "longitude_gps", sample.longitude_gps);
    set_opt(feature, "latitude_projected", sample.latitude_projected);
    set_opt(feature, "longitude_projected", sample.longitude_projected);
    feature.set_property("has_osm_annotations", sample.has_osm_annotations);
    set_opt(feature, "way_id", sample.way_id.map(|id| id.0));
    set_opt(feature, "way_orientation", sample.way_orientation.map(i64::from));
    set_opt(feature, "zone", sample.osm_tags.get("zone:traffic").map(str::to_string));
    set_opt(feature, "maxspeed", sample.osm_tags.get("maxspeed").map(str::to_string));
    set_opt(feature, "name", sample.osm_tags.get("name").map(str::to_string));
    set_opt(feature, "oneway", sample.osm_tags.get("oneway").map(str::to_string));
    set_opt(feature, "lanes", sample.osm_tags.get("lanes").map(str::to_string));
    set_opt(feature, "highway", sample.osm_tags.get("highway").map(str::to_string));
}

/// One Point feature per sample kept through `RequiredFields` with a
/// distance present or confirmed (`measurements.json`).
pub fn measurements(samples: &[Sample]) -> FeatureCollection {
    let features = samples
        .iter()
        .filter(|s| s.latitude.is_some() && s.longitude.is_some())
        .filter(|s| s.distance_overtaker.is_some() || s.confirmed)
        .map(|s| {
            let mut feature = point_feature(s.longitude.unwrap(), s.latitude.unwrap());
            sample_properties(&mut feature, s);
            feature
        })
        .collect();
    FeatureCollection { bbox: None, features, foreign_members: None }
}

/// Point features for confirmed overtaking events only (`overtakingEvents.json`).
pub fn events(samples: &[Sample]) -> FeatureCollection {
    let features = samples
        .iter()
        .filter(|s| s.confirmed && s.distance_overtaker.is_some())
        .filter(|s| s.latitude.is_some() && s.longitude.is_some())
        .map(|s| {
            let mut feature = point_feature(s.longitude.unwrap(), s.latitude.unwrap());
            sample_properties(&mut feature, s);
            feature.set_property("direction", s.way_orientation.map(i64::from).unwrap_or(0));
            feature
        })
        .collect();
    FeatureCollection { bbox: None, features, foreign_members: None }
}

fn line_feature(coords: Vec<(f64, f64)>) -> Feature {
    let line = coords.into_iter().map(|(lon, lat)| vec![lon, lat]).collect();
    Feature::from(Geometry::new(GeoValue::LineString(line)))
}

/// Single LineString of snapped (annotated) coordinates (`track.json`).
pub fn track_line(samples: &[Sample]) -> FeatureCollection {
    let coords: Vec<(f64, f64)> = samples
        .iter()
        .filter_map(|s| Some((s.longitude?, s.latitude?)))
        .collect();
    let features = if coords.is_empty() { Vec::new() } else { vec![line_feature(coords)] };
    FeatureCollection { bbox: None, features, foreign_members: None }
}

/// Single LineString of raw GPS coordinates (`trackRaw.json`). Annotated
/// samples keep their raw position in `latitude_gps`/`longitude_gps`;
/// unannotated ones never had it overwritten, so `latitude`/`longitude` is
/// already the raw position.
pub fn raw_track_line(samples: &[Sample]) -> FeatureCollection {
    let coords: Vec<(f64, f64)> = samples
        .iter()
        .filter_map(|s| {
            let lat = s.latitude_gps.or(s.latitude)?;
            let lon = s.longitude_gps.or(s.longitude)?;
            Some((lon, lat))
        })
        .collect();
    let features = if coords.is_empty() { Vec::new() } else { vec![line_feature(coords)] };
    FeatureCollection { bbox: None, features, foreign_members: None }
}
