//! Map provider: on-demand tile loading into a shared `WayStore` (§4.3).

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use obs_geo::{Way, WayStore};

use crate::error::{OsmError, OsmResult};
use crate::intermediate::RoadRecord;
use crate::tile::{tiles_covering, Tile, DEFAULT_ZOOM};

/// A source of way geometry for one tile, backed by either an online query
/// service or a pre-imported database (§4.3).
pub trait TileSource: Send + Sync {
    fn fetch_tile(&self, tile: Tile) -> OsmResult<Vec<RoadRecord>>;
}

/// Wraps a `TileSource` with retry-with-backoff and idempotent, at-most-
/// once-per-tile loading into a shared `WayStore`.
pub struct MapProvider<S: TileSource> {
    store: Arc<WayStore>,
    source: S,
    zoom: u8,
    retry_attempts: u32,
    retry_base_delay: Duration,
}

impl<S: TileSource> MapProvider<S> {
    pub fn new(store: Arc<WayStore>, source: S) -> Self {
        MapProvider {
            store,
            source,
            zoom: DEFAULT_ZOOM,
            retry_attempts: 3,
            retry_base_delay: Duration::from_secs(3),
        }
    }

    /// Override the retry schedule — used by tests to avoid real sleeps.
    pub fn with_retry(mut self, attempts: u32, base_delay: Duration) -> Self {
        self.retry_attempts = attempts;
        self.retry_base_delay = base_delay;
        self
    }

    pub fn store(&self) -> &Arc<WayStore> {
        &self.store
    }

    /// Load every not-yet-loaded tile intersecting `samples` (§4.3). Safe
    /// to call concurrently from multiple workers: loading a tile is
    /// idempotent because `WayStore::mark_tile_loaded` only returns `true`
    /// for the worker that actually claims it.
    pub fn ensure_coverage(&self, samples: &[(f64, f64)], buffer_m: f64) -> OsmResult<()> {
        for tile in tiles_covering(samples, buffer_m, self.zoom) {
            if !self.store.mark_tile_loaded(tile.z, tile.x, tile.y) {
                continue;
            }
            let records = self.fetch_with_retry(tile)?;
            for record in records {
                let way = road_record_to_way(record);
                // Two tiles can share a way that straddles their boundary;
                // the second insertion losing the race is expected, not an error.
                let _ = self.store.insert(way);
            }
        }
        Ok(())
    }

    fn fetch_with_retry(&self, tile: Tile) -> OsmResult<Vec<RoadRecord>> {
        let mut delay = self.retry_base_delay;
        let mut last_err = None;
        for attempt in 1..=self.retry_attempts {
            match self.source.fetch_tile(tile) {
                Ok(records) => return Ok(records),
                Err(e) => {
                    tracing::warn!(%tile, attempt, error = %e, "tile fetch failed, retrying");
                    last_err = Some(e);
                    if attempt < self.retry_attempts {
                        std::thread::sleep(delay);
                        delay *= 2;
                    }
                }
            }
        }
        tracing::error!(%tile, attempts = self.retry_attempts, "tile fetch exhausted retries");
        Err(last_err.unwrap_or(OsmError::TileFetchFailed(tile, self.retry_attempts)))
    }
}

fn road_record_to_way(record: RoadRecord) -> Way {
    let mut tags = BTreeMap::new();
    if let Some(name) = record.name {
        tags.insert("name".to_string(), name);
    }
    if let Some(zone) = record.zone {
        tags.insert("zone:traffic".to_string(), zone);
    }
    // `directionality` (-1/0/+1) is the authoritative field; `oneway` only
    // says whether it's restricted at all, so a reverse-only way
    // (directionality -1, oneway true) must carry the `-1` tag, not `yes`.
    let oneway_tag = match record.directionality {
        _ if !record.oneway => "no",
        d if d < 0 => "-1",
        _ => "yes",
    };
    tags.insert("oneway".to_string(), oneway_tag.to_string());

    Way::new(record.way_id, record.geometry, tags)
        .unwrap_or_else(|_| degenerate_placeholder_way(record.way_id))
}

/// A one-point way is geometrically meaningless but keeps `ensure_coverage`
/// from failing the whole tile over one malformed record; it will never be
/// returned as a candidate since it has no segments to project onto.
fn degenerate_placeholder_way(way_id: obs_core::WayId) -> Way {
    use obs_core::GeoPoint;
    Way::new(way_id, vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.0)], BTreeMap::new())
        .expect("two identical points still form a valid (zero-length) way")
}
