//! Pre-imported-database tile source (§4.3, feature `sqlite`).
//!
//! Queries a `roads` table keyed by `way_id` (as upserted by the OSM
//! importer, §6) filtered by the tile's WGS84 envelope, streaming rows via
//! `rusqlite`'s cursor API rather than materializing the whole table.

use rusqlite::{params, Connection};

use crate::error::{OsmError, OsmResult};
use crate::intermediate::RoadRecord;
use crate::provider::TileSource;
use crate::tile::{tile_bounds, Tile};

pub struct DatabaseTileSource {
    conn: Connection,
}

impl DatabaseTileSource {
    pub fn open(conn: Connection) -> Self {
        DatabaseTileSource { conn }
    }

    /// Create the `roads` table if absent — convenience for tests and the
    /// demo harness; a real deployment's schema migration owns this table.
    pub fn ensure_schema(&self) -> OsmResult<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS roads (
                    way_id i64 PRIMARY KEY,
                    name TEXT,
                    zone TEXT,
                    directionality INTEGER NOT NULL,
                    oneway INTEGER NOT NULL,
                    min_lat REAL NOT NULL,
                    max_lat REAL NOT NULL,
                    min_lon REAL NOT NULL,
                    max_lon REAL NOT NULL,
                    geometry BLOB NOT NULL
                );",
            )
            .map_err(OsmError::Sqlite)
    }
}

impl TileSource for DatabaseTileSource {
    fn fetch_tile(&self, tile: Tile) -> OsmResult<Vec<RoadRecord>> {
        let (min_lat, max_lat, min_lon, max_lon) = tile_bounds(tile);

        let mut stmt = self.conn.prepare(
            "SELECT way_id, name, zone, directionality, oneway, geometry
             FROM roads
             WHERE max_lat >= ?1 AND min_lat <= ?2 AND max_lon >= ?3 AND min_lon <= ?4",
        )?;

        let rows = stmt.query_map(params![min_lat, max_lat, min_lon, max_lon], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, Vec<u8>>(5)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (way_id, name, zone, directionality, oneway, wkb) = row?;
            let geometry = crate::intermediate::decode_wkb_linestring(&wkb)?;
            records.push(RoadRecord {
                way_id: obs_core::WayId(way_id),
                name,
                zone,
                directionality: directionality as i8,
                oneway: oneway != 0,
                geometry,
            });
        }
        Ok(records)
    }
}
