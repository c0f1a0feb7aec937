//! Unit tests for obs-osm.

#[cfg(test)]
mod tile_math {
    use crate::tile::{tile_bounds, tile_containing, tiles_covering, DEFAULT_ZOOM};

    #[test]
    fn tile_containing_stuttgart_is_stable() {
        let t1 = tile_containing(48.77, 9.18, DEFAULT_ZOOM);
        let t2 = tile_containing(48.7701, 9.1801, DEFAULT_ZOOM);
        assert_eq!(t1, t2, "nearby points within the same tile should map identically");
    }

    #[test]
    fn tile_bounds_contains_its_own_center() {
        let t = tile_containing(48.77, 9.18, DEFAULT_ZOOM);
        let (min_lat, max_lat, min_lon, max_lon) = tile_bounds(t);
        assert!(min_lat <= 48.77 && 48.77 <= max_lat);
        assert!(min_lon <= 9.18 && 9.18 <= max_lon);
    }

    #[test]
    fn covering_a_single_point_with_no_buffer_yields_one_tile() {
        let tiles = tiles_covering(&[(48.77, 9.18)], 0.0, DEFAULT_ZOOM);
        assert_eq!(tiles.len(), 1);
    }
}

#[cfg(test)]
mod intermediate {
    use obs_core::WayId;

    use crate::intermediate::{decode_all, IntermediateRecord};

    fn encode_road_record(way_id: i64, name: &str, directionality: i8, oneway: bool, points: &[(f64, f64)]) -> Vec<u8> {
        // Build WKB LineString in little-endian, EPSG:3857 Web Mercator coords.
        let mut wkb = Vec::new();
        wkb.push(1u8); // little-endian
        wkb.extend_from_slice(&2u32.to_le_bytes()); // LineString
        wkb.extend_from_slice(&(points.len() as u32).to_le_bytes());
        for &(lat, lon) in points {
            let x = lon.to_radians() * 6_378_137.0;
            let y = (lat.to_radians() / 2.0 + std::f64::consts::FRAC_PI_4).tan().ln() * 6_378_137.0;
            wkb.extend_from_slice(&x.to_le_bytes());
            wkb.extend_from_slice(&y.to_le_bytes());
        }

        let fields = rmpv::Value::Array(vec![
            rmpv::Value::from(0x01u64),
            rmpv::Value::Array(vec![
                rmpv::Value::from(way_id),
                rmpv::Value::from(name),
                rmpv::Value::Nil,
                rmpv::Value::from(directionality as i64),
                rmpv::Value::from(oneway),
                rmpv::Value::Binary(wkb),
            ]),
        ]);
        // Flatten: our wire format is `(tag, array)` as a single msgpack
        // array whose first element is the tag and remaining elements are
        // the record's own array — match decode_value's expectations.
        let flat = match fields {
            rmpv::Value::Array(v) => {
                let tag = v[0].clone();
                let mut inner = match v[1].clone() {
                    rmpv::Value::Array(inner) => inner,
                    _ => unreachable!(),
                };
                let mut out = vec![tag];
                out.append(&mut inner);
                rmpv::Value::Array(out)
            }
            _ => unreachable!(),
        };

        let mut buf = Vec::new();
        rmpv::encode::write_value(&mut buf, &flat).unwrap();
        buf
    }

    #[test]
    fn decode_road_record_roundtrip() {
        let bytes = encode_road_record(42, "Main", 0, false, &[(48.77, 9.18), (48.7705, 9.181)]);
        let records = decode_all(&bytes).unwrap();
        assert_eq!(records.len(), 1);
        match &records[0] {
            IntermediateRecord::Road(r) => {
                assert_eq!(r.way_id, WayId(42));
                assert_eq!(r.name.as_deref(), Some("Main"));
                assert_eq!(r.directionality, 0);
                assert!(!r.oneway);
                assert_eq!(r.geometry.len(), 2);
                assert!((r.geometry[0].lat - 48.77).abs() < 1e-6);
                assert!((r.geometry[0].lon - 9.18).abs() < 1e-6);
            }
            _ => panic!("expected a Road record"),
        }
    }
}

#[cfg(test)]
mod provider {
    use std::sync::Arc;

    use obs_core::{GeoPoint, WayId};
    use obs_geo::WayStore;

    use crate::intermediate::RoadRecord;
    use crate::provider::{MapProvider, TileSource};
    use crate::tile::Tile;
    use crate::OsmResult;

    struct FixedTileSource(Vec<RoadRecord>);

    impl TileSource for FixedTileSource {
        fn fetch_tile(&self, _tile: Tile) -> OsmResult<Vec<RoadRecord>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn a_reverse_only_road_record_is_stored_as_reverse_not_forward() {
        let record = RoadRecord {
            way_id: WayId(7),
            name: Some("One Way St".to_string()),
            zone: None,
            directionality: -1,
            oneway: true,
            geometry: vec![GeoPoint::new(48.77, 9.18), GeoPoint::new(48.7705, 9.181)],
        };

        let store = Arc::new(WayStore::new());
        let provider = MapProvider::new(Arc::clone(&store), FixedTileSource(vec![record]));
        provider.ensure_coverage(&[(48.77, 9.18)], 0.0).unwrap();

        let way = store.get(WayId(7)).expect("the record should have been stored");
        assert_eq!(way.directionality, -1);
    }
}
