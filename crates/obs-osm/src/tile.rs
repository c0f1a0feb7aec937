//! Slippy-map tile addressing (§4.3).

use std::fmt;

/// A zoom/x/y OSM tile triple.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Tile {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// Default zoom used by `ensure_coverage` (§4.3).
pub const DEFAULT_ZOOM: u8 = 14;

/// The slippy-map tile containing `(lat, lon)` at `zoom`.
pub fn tile_containing(lat: f64, lon: f64, zoom: u8) -> Tile {
    let n = 2f64.powi(zoom as i32);
    let x = ((lon + 180.0) / 360.0 * n).floor().clamp(0.0, n - 1.0) as u32;
    let lat_rad = lat.to_radians();
    let y = ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0 * n)
        .floor()
        .clamp(0.0, n - 1.0) as u32;
    Tile { z: zoom, x, y }
}

/// Every distinct tile intersecting any of `points` (each `(lat, lon)`),
/// optionally expanded by `buffer_m` metres (§4.3 `ensure_coverage`).
pub fn tiles_covering(points: &[(f64, f64)], buffer_m: f64, zoom: u8) -> Vec<Tile> {
    let mut tiles: Vec<Tile> = Vec::new();
    for &(lat, lon) in points {
        if buffer_m <= 0.0 {
            push_unique(&mut tiles, tile_containing(lat, lon, zoom));
            continue;
        }
        let (dlat, dlon) = obs_geo::projector::scale_at(lat);
        for &(sy, sx) in &[(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0), (0.0, 0.0)] {
            let plat = lat + sy * dlat * buffer_m;
            let plon = lon + sx * dlon * buffer_m;
            push_unique(&mut tiles, tile_containing(plat, plon, zoom));
        }
    }
    tiles
}

fn push_unique(tiles: &mut Vec<Tile>, tile: Tile) {
    if !tiles.contains(&tile) {
        tiles.push(tile);
    }
}

/// WGS84 bounds of a slippy-map tile: `(min_lat, max_lat, min_lon, max_lon)`.
pub fn tile_bounds(tile: Tile) -> (f64, f64, f64, f64) {
    let n = 2f64.powi(tile.z as i32);
    let lon_of = |x: u32| x as f64 / n * 360.0 - 180.0;
    let lat_of = |y: u32| {
        let unit = std::f64::consts::PI * (1.0 - 2.0 * y as f64 / n);
        unit.sinh().atan().to_degrees()
    };
    let min_lon = lon_of(tile.x);
    let max_lon = lon_of(tile.x + 1);
    let max_lat = lat_of(tile.y);
    let min_lat = lat_of(tile.y + 1);
    (min_lat, max_lat, min_lon, max_lon)
}
