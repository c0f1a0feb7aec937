//! Way storage and spatial indexing (§4.2).
//!
//! Holds the id→way map, an R-tree over way bounding boxes, and the set of
//! already-loaded map tiles, all behind one `RwLock` so the three update
//! atomically together (§5: "Insertion must be protected by a mutex or
//! equivalent so that the AABB tree and the id→way map update atomically").
//! An `RwLock` rather than a plain `Mutex` matches the read-mostly, rarely-
//! written access pattern described in §5 without changing the atomicity
//! guarantee, since every mutation still takes the single write lock.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use obs_core::WayId;
use rstar::{RTree, RTreeObject, AABB};

use crate::error::{GeoError, GeoResult};
use crate::projector::scale_at;
use crate::way::Way;

#[derive(Clone)]
struct WayEntry(Arc<Way>);

impl RTreeObject for WayEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let b = self.0.bbox;
        AABB::from_corners([b.min_lon, b.min_lat], [b.max_lon, b.max_lat])
    }
}

struct Inner {
    ways: HashMap<WayId, Arc<Way>>,
    tree: RTree<WayEntry>,
    loaded_tiles: HashSet<(u8, u32, u32)>,
}

/// A mapping from way-id to `Way`, plus an AABB tree for bbox queries
/// (§3 "Way store", §4.2).
pub struct WayStore {
    inner: RwLock<Inner>,
}

impl WayStore {
    pub fn new() -> Self {
        WayStore {
            inner: RwLock::new(Inner {
                ways: HashMap::new(),
                tree: RTree::new(),
                loaded_tiles: HashSet::new(),
            }),
        }
    }

    /// Add a way if its id is not already present.
    pub fn insert(&self, way: Way) -> GeoResult<()> {
        let mut inner = self.inner.write().unwrap();
        if inner.ways.contains_key(&way.id) {
            return Err(GeoError::DuplicateWay(way.id));
        }
        let way = Arc::new(way);
        inner.tree.insert(WayEntry(way.clone()));
        inner.ways.insert(way.id, way);
        Ok(())
    }

    pub fn get(&self, way_id: WayId) -> Option<Arc<Way>> {
        self.inner.read().unwrap().ways.get(&way_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().ways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every way whose bbox overlaps a WGS84 box of
    /// `± scale_at(lat)·radius_m` around the point (§4.2). An
    /// over-approximation; the caller computes the precise per-segment
    /// distance.
    pub fn query_near(&self, lat: f64, lon: f64, radius_m: f64) -> Vec<Arc<Way>> {
        let (dlat, dlon) = scale_at(lat);
        let (half_lat, half_lon) = (dlat * radius_m, dlon * radius_m);
        let envelope = AABB::from_corners([lon - half_lon, lat - half_lat], [lon + half_lon, lat + half_lat]);

        self.inner
            .read()
            .unwrap()
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.0.clone())
            .collect()
    }

    /// `true` if the tile was already marked loaded (at-most-once loading,
    /// §4.3/§5).
    pub fn is_tile_loaded(&self, z: u8, x: u32, y: u32) -> bool {
        self.inner.read().unwrap().loaded_tiles.contains(&(z, x, y))
    }

    /// Mark a tile loaded. Returns `true` if this call was the one that
    /// newly inserted it (i.e. the caller should actually fetch it).
    pub fn mark_tile_loaded(&self, z: u8, x: u32, y: u32) -> bool {
        self.inner.write().unwrap().loaded_tiles.insert((z, x, y))
    }
}

impl Default for WayStore {
    fn default() -> Self {
        Self::new()
    }
}
