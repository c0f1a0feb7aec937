//! Privacy zones (§4.9 `PrivacyZones`): drop any sample within `radius_m`
//! of a configured center. Grounded on the source's `PrivacyZonesFilter`
//! (a geodesic `contains` check per zone per sample), generalized with an
//! optional deterministic jitter so a configured zone's true center need
//! not be recoverable from the published filter configuration.

use obs_core::geo::GeoPoint;
use rand::{Rng, SeedableRng};
use rand::rngs::SmallRng;

use crate::filter::Filter;

#[derive(Clone, Copy, Debug)]
pub struct PrivacyZone {
    pub center: GeoPoint,
    pub radius_m: f64,
}

impl PrivacyZone {
    pub fn new(center: GeoPoint, radius_m: f64) -> Self {
        PrivacyZone { center, radius_m }
    }

    fn contains(&self, point: GeoPoint) -> bool {
        self.center.distance_m(point) <= self.radius_m
    }

    /// Move the zone's center by a random bearing and a random distance up
    /// to `radius_m * ofs_pct / 100`, seeded deterministically from
    /// `(lat, lon, secret)` so the same configuration always produces the
    /// same jittered zone.
    pub fn jittered(&self, secret: &str, ofs_pct: f64) -> PrivacyZone {
        let mut hasher_input = format!("{:.6}:{:.6}:{secret}", self.center.lat, self.center.lon);
        hasher_input.push_str(&self.radius_m.to_bits().to_string());
        let seed = seed_from_str(&hasher_input);
        let mut rng = SmallRng::seed_from_u64(seed);

        let bearing_deg: f64 = rng.gen_range(0.0..360.0);
        let max_offset_m = self.radius_m * ofs_pct / 100.0;
        let offset_m: f64 = rng.gen_range(0.0..=max_offset_m.max(0.0));

        let bearing_rad = bearing_deg.to_radians();
        let (dlat, dlon) = obs_geo_scale(self.center.lat);
        let new_lat = self.center.lat + bearing_rad.cos() * offset_m * dlat;
        let new_lon = self.center.lon + bearing_rad.sin() * offset_m * dlon;

        PrivacyZone {
            center: GeoPoint::new(new_lat, new_lon),
            radius_m: self.radius_m,
        }
    }
}

/// Degrees-per-metre scale at a latitude, duplicated from `obs_geo` so this
/// crate doesn't have to depend on it just for a one-line formula used only
/// here.
fn obs_geo_scale(lat_deg: f64) -> (f64, f64) {
    const EARTH_RADIUS_M: f64 = 6_371_000.0;
    let deg_per_rad = 180.0 / std::f64::consts::PI;
    let dlat = deg_per_rad / EARTH_RADIUS_M;
    let dlon = deg_per_rad / (EARTH_RADIUS_M * lat_deg.to_radians().cos());
    (dlat, dlon)
}

fn seed_from_str(s: &str) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    s.hash(&mut hasher);
    hasher.finish()
}

pub struct PrivacyZones {
    zones: Vec<PrivacyZone>,
}

impl PrivacyZones {
    pub fn new(zones: Vec<PrivacyZone>) -> Self {
        PrivacyZones { zones }
    }
}

impl Filter for PrivacyZones {
    fn name(&self) -> &'static str {
        "PrivacyZones"
    }

    fn apply(&self, samples: Vec<obs_core::sample::Sample>) -> Vec<obs_core::sample::Sample> {
        samples
            .into_iter()
            .filter(|s| {
                let Some((lat, lon)) = s.latitude.zip(s.longitude) else {
                    return true;
                };
                let point = GeoPoint::new(lat, lon);
                !self.zones.iter().any(|z| z.contains(point))
            })
            .collect()
    }
}
