//! Candidate-way generation for one sample (§4.6, C6).

use std::f64::consts::PI;

use obs_core::{Candidate, Sample};

use crate::store::WayStore;
use crate::way::angular_distance;

/// Tunable limits for candidate generation. Defaults match §4.6.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CandidateParams {
    /// Maximum lateral distance, metres.
    pub d_max: f64,
    /// Maximum direction error, radians.
    pub d_phi_max: f64,
    /// Maximum number of candidates returned, sorted nearest-first.
    pub max_candidates: usize,
}

impl Default for CandidateParams {
    fn default() -> Self {
        CandidateParams {
            d_max: 40.0,
            d_phi_max: 90f64.to_radians(),
            max_candidates: 3,
        }
    }
}

/// Generate up to `params.max_candidates` candidates for a bare
/// position+course, nearest-first (§4.6 steps 1-5).
pub fn generate_candidates(
    lat: f64,
    lon: f64,
    course: f64,
    store: &WayStore,
    params: &CandidateParams,
) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = store
        .query_near(lat, lon, params.d_max)
        .into_iter()
        .filter_map(|way| {
            let (segment_index, lateral_distance_m, (qx, qy), _lambda) = way.nearest_segment(lat, lon);
            if lateral_distance_m > params.d_max {
                return None;
            }

            let heading = way.heading_of_segment(segment_index);
            let (direction_error_rad, orientation) = if way.directionality != 0 {
                let allowed = if way.directionality == 1 { heading } else { heading + PI };
                (angular_distance(course, allowed), way.directionality)
            } else {
                let fwd = angular_distance(course, heading);
                let bwd = angular_distance(course, heading + PI);
                if fwd <= bwd {
                    (fwd, 1)
                } else {
                    (bwd, -1)
                }
            };

            if direction_error_rad > params.d_phi_max {
                return None;
            }

            let (snapped_lat, snapped_lon) = way.local_to_geo(qx, qy);

            Some(Candidate {
                way_id: way.id,
                latitude: snapped_lat,
                longitude: snapped_lon,
                local_x: qx,
                local_y: qy,
                lateral_distance_m,
                direction_error_rad,
                orientation,
                matching_id: way.matching_id(),
            })
        })
        .collect();

    candidates.sort_by(|a, b| a.lateral_distance_m.total_cmp(&b.lateral_distance_m));
    candidates.truncate(params.max_candidates);
    candidates
}

/// Generate candidates for a `Sample`, returning the empty list if it lacks
/// a position or course (§4.6 final paragraph).
pub fn generate_candidates_for_sample(sample: &Sample, store: &WayStore, params: &CandidateParams) -> Vec<Candidate> {
    if !sample.has_position_and_course() {
        return Vec::new();
    }
    generate_candidates(
        sample.latitude.unwrap(),
        sample.longitude.unwrap(),
        sample.course.unwrap(),
        store,
        params,
    )
}
