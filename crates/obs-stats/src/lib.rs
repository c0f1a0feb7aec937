//! `obs-stats` — per-road aggregation of overtaker distances (§4.10, C10).
//!
//! Consumes confirmed, annotated samples that carry a distance, groups by
//! `(way_id, way_orientation)`, and streams each group's distances into a
//! running `count`/`mean`/`min` plus a fixed-edge histogram, finalizing to
//! `median`/`below_limit_count`/`at_or_above_limit_count` once every sample
//! is seen.

use std::collections::HashMap;

use obs_core::sample::Sample;
use obs_core::WayId;
use obs_geo::WayStore;

/// `forward = 0`, `backward = 1` (§4.10).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

const HISTOGRAM_EDGES: &[f64] = &[0.00, 0.25, 0.50, 0.75, 1.00, 1.25, 1.50, 1.75, 2.00, 2.25];

fn legal_limit_m(zone: Option<&str>) -> f64 {
    match zone {
        Some("rural") => 2.0,
        _ => 1.5,
    }
}

fn histogram_bucket(distance_m: f64) -> usize {
    HISTOGRAM_EDGES.iter().rposition(|&edge| distance_m >= edge).map(|i| i + 1).unwrap_or(0).min(HISTOGRAM_EDGES.len())
}

#[derive(Clone, Debug)]
pub struct RoadBucket {
    pub way_id: WayId,
    pub direction: Direction,
    pub bearing_rad: f64,
    distances: Vec<f64>,
    limit_m: f64,
}

#[derive(Clone, Debug)]
pub struct RoadBucketSummary {
    pub way_id: WayId,
    pub direction: Direction,
    pub bearing_rad: f64,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub below_limit_count: usize,
    pub at_or_above_limit_count: usize,
    /// One count per `HISTOGRAM_EDGES` bucket plus the overflow bucket
    /// (`+inf`), in ascending order.
    pub histogram: Vec<usize>,
    pub limit_m: f64,
}

impl RoadBucket {
    fn push(&mut self, distance_m: f64) {
        self.distances.push(distance_m);
    }

    fn finalize(self) -> RoadBucketSummary {
        let count = self.distances.len();
        let sum: f64 = self.distances.iter().sum();
        let mean = sum / count as f64;
        let min = self.distances.iter().cloned().fold(f64::INFINITY, f64::min);

        let mut sorted = self.distances.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let median = if count % 2 == 1 {
            sorted[count / 2]
        } else {
            0.5 * (sorted[count / 2 - 1] + sorted[count / 2])
        };

        let below_limit_count = self.distances.iter().filter(|&&d| d < self.limit_m).count();
        let at_or_above_limit_count = count - below_limit_count;

        let mut histogram = vec![0usize; HISTOGRAM_EDGES.len() + 1];
        for &d in &self.distances {
            histogram[histogram_bucket(d)] += 1;
        }

        RoadBucketSummary {
            way_id: self.way_id,
            direction: self.direction,
            bearing_rad: self.bearing_rad,
            count,
            mean,
            median,
            min,
            below_limit_count,
            at_or_above_limit_count,
            histogram,
            limit_m: self.limit_m,
        }
    }
}

/// Aggregate overtaker distances over a set of samples into per-way,
/// per-direction summaries (§4.10). Samples lacking a chosen way, a
/// direction, or an overtaker distance are skipped.
pub fn aggregate(samples: &[Sample], store: &WayStore) -> Vec<RoadBucketSummary> {
    let mut buckets: HashMap<(WayId, Direction), RoadBucket> = HashMap::new();

    for sample in samples {
        let (Some(way_id), Some(orientation), Some(distance_m)) = (sample.way_id, sample.way_orientation, sample.distance_overtaker) else {
            continue;
        };
        let Some(way) = store.get(way_id) else {
            continue;
        };
        let direction = if orientation >= 0 { Direction::Forward } else { Direction::Backward };

        let bucket = buckets.entry((way_id, direction)).or_insert_with(|| RoadBucket {
            way_id,
            direction,
            bearing_rad: way.overall_bearing(),
            distances: Vec::new(),
            limit_m: legal_limit_m(way.tags.get("zone:traffic").map(String::as_str)),
        });
        bucket.push(distance_m);
    }

    buckets.into_values().map(RoadBucket::finalize).collect()
}
