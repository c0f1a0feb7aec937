//! Online OSM tile source: an HTTP query service returning the
//! intermediate MessagePack format for one tile (§4.3, feature `online`).

use crate::error::{OsmError, OsmResult};
use crate::intermediate::{decode_all, IntermediateRecord, RoadRecord};
use crate::provider::TileSource;
use crate::tile::Tile;

/// Fetches `{base_url}/tiles/{z}/{x}/{y}` and decodes the response body as
/// a stream of intermediate records.
pub struct OnlineTileSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl OnlineTileSource {
    pub fn new(base_url: impl Into<String>) -> OsmResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(OsmError::Http)?;
        Ok(OnlineTileSource {
            client,
            base_url: base_url.into(),
        })
    }
}

impl TileSource for OnlineTileSource {
    fn fetch_tile(&self, tile: Tile) -> OsmResult<Vec<RoadRecord>> {
        let url = format!("{}/tiles/{}/{}/{}", self.base_url, tile.z, tile.x, tile.y);
        let body = self
            .client
            .get(&url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.bytes())
            .map_err(OsmError::Http)?;

        decode_all(&body)
            .map(|records| records.into_iter().filter_map(keep_roads_only).collect())
    }
}

fn keep_roads_only(record: IntermediateRecord) -> Option<RoadRecord> {
    match record {
        IntermediateRecord::Road(r) => Some(r),
        IntermediateRecord::Region(_) => None,
    }
}
