//! A single OSM road polyline usable for map matching (§3 "Way", §4.6).

use std::collections::BTreeMap;

use obs_core::{GeoPoint, WayId};

use crate::error::{GeoError, GeoResult};
use crate::projector::EquirectangularFast;

/// Axis-aligned WGS84 bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BBox {
    fn of(vertices: &[GeoPoint]) -> Self {
        let mut b = BBox {
            min_lat: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
            min_lon: f64::INFINITY,
            max_lon: f64::NEG_INFINITY,
        };
        for v in vertices {
            b.min_lat = b.min_lat.min(v.lat);
            b.max_lat = b.max_lat.max(v.lat);
            b.min_lon = b.min_lon.min(v.lon);
            b.max_lon = b.max_lon.max(v.lon);
        }
        b
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.min_lat + self.max_lat) * 0.5, (self.min_lon + self.max_lon) * 0.5)
    }

    /// Grow the box by `radius_m` metres in every direction, using the
    /// local degree-per-metre scale at the box's own latitude span.
    pub fn grown_by_meters(&self, radius_m: f64) -> Self {
        let (dlat_lo, dlon_lo) = crate::projector::scale_at(self.min_lat);
        let (dlat_hi, dlon_hi) = crate::projector::scale_at(self.max_lat);
        let dlat = dlat_lo.max(dlat_hi) * radius_m;
        let dlon = dlon_lo.max(dlon_hi) * radius_m;
        BBox {
            min_lat: self.min_lat - dlat,
            max_lat: self.max_lat + dlat,
            min_lon: self.min_lon - dlon,
            max_lon: self.max_lon + dlon,
        }
    }

    pub fn overlaps(&self, other: &BBox) -> bool {
        self.min_lat <= other.max_lat
            && self.max_lat >= other.min_lat
            && self.min_lon <= other.max_lon
            && self.max_lon >= other.min_lon
    }
}

/// One OSM road polyline, with its tags, bounding box, a local projector
/// anchored at its own bbox centre, and per-segment headings in that local
/// frame.
#[derive(Clone, Debug)]
pub struct Way {
    pub id: WayId,
    pub vertices: Vec<GeoPoint>,
    pub tags: BTreeMap<String, String>,
    pub bbox: BBox,
    /// -1 reverse-only, 0 bidirectional, +1 forward-only.
    pub directionality: i8,
    projector: EquirectangularFast,
    /// Vertices projected into the local frame, cached at construction.
    points_local: Vec<(f64, f64)>,
    /// Heading of segment `i` (between vertex `i` and `i+1`), radians CCW
    /// from east in the local frame. `headings.len() == vertices.len() - 1`.
    headings: Vec<f64>,
}

impl Way {
    pub fn new(id: WayId, vertices: Vec<GeoPoint>, tags: BTreeMap<String, String>) -> GeoResult<Self> {
        if vertices.len() < 2 {
            return Err(GeoError::DegenerateWay(id));
        }
        let bbox = BBox::of(&vertices);
        let (center_lat, center_lon) = bbox.center();
        let projector = EquirectangularFast::new(center_lat, center_lon);

        let points_local: Vec<(f64, f64)> = vertices
            .iter()
            .map(|v| projector.to_local(v.lat, v.lon))
            .collect();

        let headings: Vec<f64> = points_local
            .windows(2)
            .map(|w| {
                let (x0, y0) = w[0];
                let (x1, y1) = w[1];
                (y1 - y0).atan2(x1 - x0)
            })
            .collect();

        let directionality = directionality_from_tags(&tags);

        Ok(Way {
            id,
            vertices,
            tags,
            bbox,
            directionality,
            projector,
            points_local,
            headings,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.tags.get("name").map(String::as_str)
    }

    /// The discrete label the chain solver compares across samples: the
    /// way's name if present, else its stringified id (§3 "Matching-id").
    pub fn matching_id(&self) -> String {
        self.name().map(str::to_owned).unwrap_or_else(|| self.id.0.to_string())
    }

    /// Closed-form point-to-polyline distance (§4.6 step 2): project the
    /// point onto each segment in the local frame, clamping the line
    /// parameter to `[0, 1]`, and keep the minimum.
    ///
    /// Returns `(segment_index, lateral_distance_m, local_point, lambda)`.
    pub fn nearest_segment(&self, lat: f64, lon: f64) -> (usize, f64, (f64, f64), f64) {
        let (px, py) = self.projector.to_local(lat, lon);

        let mut best = (0usize, f64::INFINITY, (0.0, 0.0), 0.0);
        for i in 0..self.headings.len() {
            let (ax, ay) = self.points_local[i];
            let (bx, by) = self.points_local[i + 1];
            let (dx, dy) = (bx - ax, by - ay);
            let seg_len_sq = dx * dx + dy * dy;

            let lambda = if seg_len_sq > 1e-12 {
                (((px - ax) * dx + (py - ay) * dy) / seg_len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };

            let (qx, qy) = (ax + lambda * dx, ay + lambda * dy);
            let dist = ((px - qx).powi(2) + (py - qy).powi(2)).sqrt();

            if dist < best.1 {
                best = (i, dist, (qx, qy), lambda);
            }
        }
        best
    }

    pub fn local_to_geo(&self, x: f64, y: f64) -> (f64, f64) {
        self.projector.from_local(x, y)
    }

    pub fn heading_of_segment(&self, segment_index: usize) -> f64 {
        self.headings[segment_index]
    }

    /// First-to-last-vertex bearing, radians CCW from east in the way's
    /// local frame — used by output consumers to orient a direction bucket
    /// (§4.10).
    pub fn overall_bearing(&self) -> f64 {
        let (x0, y0) = self.points_local[0];
        let (x1, y1) = *self.points_local.last().unwrap();
        (y1 - y0).atan2(x1 - x0)
    }
}

/// `+1 forward, -1 reverse, 0 bidirectional`, derived from `oneway` with
/// the usual OSM implied-oneway exceptions for roundabouts/motorways.
fn directionality_from_tags(tags: &BTreeMap<String, String>) -> i8 {
    match tags.get("oneway").map(String::as_str) {
        Some("yes") | Some("true") | Some("1") => 1,
        Some("-1") | Some("reverse") => -1,
        Some("no") | Some("0") | Some("false") => 0,
        _ => {
            let is_roundabout = tags.get("junction").map(String::as_str) == Some("roundabout");
            let is_motorway = matches!(tags.get("highway").map(String::as_str), Some("motorway") | Some("motorway_link"));
            if is_roundabout || is_motorway {
                1
            } else {
                0
            }
        }
    }
}

/// Wrap an angular difference into `[0, π]` (§4.6 step 3).
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let two_pi = std::f64::consts::TAU;
    let mut diff = (a - b) % two_pi;
    if diff > std::f64::consts::PI {
        diff -= two_pi;
    } else if diff < -std::f64::consts::PI {
        diff += two_pi;
    }
    diff.abs()
}
