//! Bijective lat/lon ↔ planar-metre conversions (§4.1).
//!
//! Two projections are provided. `EquirectangularFast` precomputes
//! degree-per-metre scale factors once at construction and then does a pure
//! linear transform per point — this is the projection used for per-way
//! local frames (`Way`) and per-sample snapping, where points never stray
//! more than a few tens of metres from the anchor and the linear
//! approximation's error stays well under 0.1%. `AzimuthalEquidistant` is
//! the exact (trig-per-call) projection, reached for only where distance
//! fidelity over a larger extent matters — offsetting road polylines for
//! visualization.

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Degrees-per-metre scale factors at an arbitrary latitude, used to grow a
/// WGS84 bounding box by a metre radius without constructing a full
/// projector (§4.1's `scale_at`).
pub fn scale_at(lat_deg: f64) -> (f64, f64) {
    let deg_per_rad = 180.0 / std::f64::consts::PI;
    let deg_per_meter_lat = deg_per_rad / EARTH_RADIUS_M;
    let deg_per_meter_lon = deg_per_rad / (EARTH_RADIUS_M * lat_deg.to_radians().cos());
    (deg_per_meter_lat, deg_per_meter_lon)
}

/// Equirectangular approximation anchored at a reference point. Bijective
/// and accurate to well under 0.1% within ~5 km of the anchor.
#[derive(Clone, Copy, Debug)]
pub struct EquirectangularFast {
    anchor_lat: f64,
    anchor_lon: f64,
    /// Metres per degree of latitude (constant everywhere on the sphere).
    lat_scale: f64,
    /// Metres per degree of longitude at the anchor's latitude.
    lon_scale: f64,
}

impl EquirectangularFast {
    pub fn new(anchor_lat: f64, anchor_lon: f64) -> Self {
        let rad_per_deg = std::f64::consts::PI / 180.0;
        let lat_scale = EARTH_RADIUS_M * rad_per_deg;
        let lon_scale = EARTH_RADIUS_M * rad_per_deg * anchor_lat.to_radians().cos();
        Self {
            anchor_lat,
            anchor_lon,
            lat_scale,
            lon_scale,
        }
    }

    /// `(x, y)` in metres, x east, y north.
    #[inline]
    pub fn to_local(&self, lat: f64, lon: f64) -> (f64, f64) {
        let x = (lon - self.anchor_lon) * self.lon_scale;
        let y = (lat - self.anchor_lat) * self.lat_scale;
        (x, y)
    }

    /// Exact inverse of `to_local`.
    #[inline]
    pub fn from_local(&self, x: f64, y: f64) -> (f64, f64) {
        let lat = self.anchor_lat + y / self.lat_scale;
        let lon = self.anchor_lon + x / self.lon_scale;
        (lat, lon)
    }

    pub fn anchor(&self) -> (f64, f64) {
        (self.anchor_lat, self.anchor_lon)
    }
}

/// Exact azimuthal-equidistant projection anchored at a reference point.
/// Preserves distance and bearing from the anchor to any other point —
/// used where a local linear approximation would distort offsets over a
/// larger extent.
#[derive(Clone, Copy, Debug)]
pub struct AzimuthalEquidistant {
    anchor_lat_rad: f64,
    anchor_lon_rad: f64,
}

impl AzimuthalEquidistant {
    pub fn new(anchor_lat: f64, anchor_lon: f64) -> Self {
        Self {
            anchor_lat_rad: anchor_lat.to_radians(),
            anchor_lon_rad: anchor_lon.to_radians(),
        }
    }

    pub fn to_local(&self, lat: f64, lon: f64) -> (f64, f64) {
        let phi1 = self.anchor_lat_rad;
        let phi = lat.to_radians();
        let d_lambda = lon.to_radians() - self.anchor_lon_rad;

        let cos_c = phi1.sin() * phi.sin() + phi1.cos() * phi.cos() * d_lambda.cos();
        let c = cos_c.clamp(-1.0, 1.0).acos();

        if c.abs() < 1e-12 {
            return (0.0, 0.0);
        }

        let k = c / c.sin();
        let x = EARTH_RADIUS_M * k * phi.cos() * d_lambda.sin();
        let y = EARTH_RADIUS_M * k * (phi1.cos() * phi.sin() - phi1.sin() * phi.cos() * d_lambda.cos());
        (x, y)
    }

    pub fn from_local(&self, x: f64, y: f64) -> (f64, f64) {
        let phi1 = self.anchor_lat_rad;
        let rho = (x * x + y * y).sqrt();
        if rho < 1e-9 {
            return (phi1.to_degrees(), self.anchor_lon_rad.to_degrees());
        }
        let c = rho / EARTH_RADIUS_M;
        let (sin_c, cos_c) = c.sin_cos();

        let phi = (cos_c * phi1.sin() + y * sin_c * phi1.cos() / rho).asin();
        let lambda = self.anchor_lon_rad
            + (x * sin_c).atan2(rho * phi1.cos() * cos_c - y * phi1.sin() * sin_c);
        (phi.to_degrees(), lambda.to_degrees())
    }
}
