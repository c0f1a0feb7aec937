//! Per-file aggregate statistics (§4.4, second paragraph).

use chrono::{DateTime, Utc};
use obs_core::GeoPoint;

use crate::Sample;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportStats {
    pub n_measurements: u64,
    pub n_valid: u64,
    pub n_confirmed: u64,
    pub t_min: Option<DateTime<Utc>>,
    pub t_max: Option<DateTime<Utc>>,
    pub continuous_length_m: f64,
    pub continuous_duration_s: f64,
    pub continuous_segment_count: u64,
}

/// A sub-segment breaks when `dt > 60s`, or when the implied speed between
/// consecutive fixes exceeds 100 km/h (expressed per the two `dt` regimes
/// the rule gives to avoid dividing by a near-zero `dt`).
fn breaks_segment(dt_s: f64, dist_m: f64) -> bool {
    const MAX_SPEED_MPS: f64 = 100.0 / 3.6;
    dt_s > 60.0 || (dt_s >= 0.5 && dist_m > dt_s * MAX_SPEED_MPS) || (dt_s < 0.5 && dist_m > MAX_SPEED_MPS)
}

pub fn compute_stats(samples: &[Sample], n_measurements: u64) -> ImportStats {
    let mut stats = ImportStats {
        n_measurements,
        n_valid: samples.len() as u64,
        n_confirmed: samples.iter().filter(|s| s.confirmed).count() as u64,
        t_min: samples.first().map(|s| s.time),
        t_max: samples.last().map(|s| s.time),
        ..Default::default()
    };

    let mut in_segment = false;
    for pair in samples.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let (Some(a_lat), Some(a_lon), Some(b_lat), Some(b_lon)) = (a.latitude, a.longitude, b.latitude, b.longitude)
        else {
            in_segment = false;
            continue;
        };
        let dt_s = (b.time - a.time).num_milliseconds() as f64 / 1000.0;
        let dist_m = GeoPoint::new(a_lat, a_lon).distance_m(GeoPoint::new(b_lat, b_lon));

        if breaks_segment(dt_s, dist_m) {
            in_segment = false;
            continue;
        }
        if !in_segment {
            stats.continuous_segment_count += 1;
            in_segment = true;
        }
        stats.continuous_length_m += dist_m;
        stats.continuous_duration_s += dt_s;
    }

    stats
}
