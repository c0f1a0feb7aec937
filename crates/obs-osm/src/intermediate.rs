//! The intermediate OSM binary interchange format (§6): a stream of
//! MessagePack-encoded `(type_tag, array)` records.

use obs_core::{GeoPoint, WayId};

use crate::error::{OsmError, OsmResult};

/// A decoded `0x01` (Road) record.
#[derive(Clone, Debug)]
pub struct RoadRecord {
    pub way_id: WayId,
    pub name: Option<String>,
    pub zone: Option<String>,
    pub directionality: i8,
    pub oneway: bool,
    pub geometry: Vec<GeoPoint>,
}

/// A decoded `0x02` (Region) record.
#[derive(Clone, Debug)]
pub struct RegionRecord {
    pub relation_id: i64,
    pub name: String,
    pub admin_level: i32,
    pub geometry: Vec<GeoPoint>,
}

pub enum IntermediateRecord {
    Road(RoadRecord),
    Region(RegionRecord),
}

const TAG_ROAD: u64 = 0x01;
const TAG_REGION: u64 = 0x02;

/// Decode one `(type_tag, array)` record from a MessagePack stream.
pub fn decode_record(reader: &mut impl std::io::Read) -> OsmResult<IntermediateRecord> {
    let value = rmpv::decode::read_value(reader).map_err(|e| OsmError::Decode(e.to_string()))?;
    decode_value(value)
}

/// Decode every record in a byte slice until exhausted.
pub fn decode_all(mut bytes: &[u8]) -> OsmResult<Vec<IntermediateRecord>> {
    let mut records = Vec::new();
    while !bytes.is_empty() {
        let value = rmpv::decode::read_value(&mut bytes).map_err(|e| OsmError::Decode(e.to_string()))?;
        records.push(decode_value(value)?);
    }
    Ok(records)
}

fn decode_value(value: rmpv::Value) -> OsmResult<IntermediateRecord> {
    let items = value.as_array().ok_or_else(|| OsmError::Decode("record is not an array".into()))?;
    let (tag, fields) = items
        .split_first()
        .ok_or_else(|| OsmError::Decode("empty record".into()))?;
    let tag = tag.as_u64().ok_or_else(|| OsmError::Decode("tag is not an integer".into()))?;

    match tag {
        TAG_ROAD => decode_road(fields).map(IntermediateRecord::Road),
        TAG_REGION => decode_region(fields).map(IntermediateRecord::Region),
        other => Err(OsmError::Decode(format!("unknown type tag {other}"))),
    }
}

fn decode_road(fields: &[rmpv::Value]) -> OsmResult<RoadRecord> {
    let err = || OsmError::Decode("malformed Road record".to_string());
    let way_id = fields.first().and_then(|v| v.as_i64()).ok_or_else(err)?;
    let name = fields.get(1).and_then(|v| v.as_str()).map(str::to_owned);
    let zone = fields.get(2).and_then(|v| v.as_str()).map(str::to_owned);
    let directionality = fields.get(3).and_then(|v| v.as_i64()).ok_or_else(err)? as i8;
    let oneway = fields.get(4).and_then(|v| v.as_bool()).ok_or_else(err)?;
    let wkb = fields.get(5).and_then(|v| v.as_slice()).ok_or_else(err)?;
    let geometry = decode_wkb_linestring(wkb)?;

    Ok(RoadRecord {
        way_id: WayId(way_id),
        name,
        zone,
        directionality,
        oneway,
        geometry,
    })
}

fn decode_region(fields: &[rmpv::Value]) -> OsmResult<RegionRecord> {
    let err = || OsmError::Decode("malformed Region record".to_string());
    let relation_id = fields.first().and_then(|v| v.as_i64()).ok_or_else(err)?;
    let name = fields.get(1).and_then(|v| v.as_str()).ok_or_else(err)?.to_owned();
    let admin_level = fields.get(2).and_then(|v| v.as_i64()).ok_or_else(err)? as i32;
    let wkb = fields.get(3).and_then(|v| v.as_slice()).ok_or_else(err)?;
    let geometry = decode_wkb_linestring(wkb)?;

    Ok(RegionRecord {
        relation_id,
        name,
        admin_level,
        geometry,
    })
}

/// Web Mercator (EPSG:3857) → WGS84.
const WEB_MERCATOR_RADIUS: f64 = 6_378_137.0;

fn mercator_to_wgs84(x: f64, y: f64) -> GeoPoint {
    let lon = x / WEB_MERCATOR_RADIUS * 180.0 / std::f64::consts::PI;
    let lat = (2.0 * (y / WEB_MERCATOR_RADIUS).exp().atan() - std::f64::consts::FRAC_PI_2) * 180.0 / std::f64::consts::PI;
    GeoPoint::new(lat, lon)
}

/// Minimal WKB decoder for a single `LineString` geometry, EPSG:3857.
/// Supports both byte orders; no SRID-embedded ("EWKB") variant, matching
/// the plain WKB the intermediate format declares.
pub(crate) fn decode_wkb_linestring(wkb: &[u8]) -> OsmResult<Vec<GeoPoint>> {
    let err = || OsmError::Decode("truncated WKB LineString".to_string());
    let mut cursor = wkb;

    let byte_order = *cursor.first().ok_or_else(err)?;
    cursor = &cursor[1..];
    let little_endian = byte_order == 1;

    let read_u32 = |c: &mut &[u8]| -> OsmResult<u32> {
        if c.len() < 4 {
            return Err(err());
        }
        let bytes: [u8; 4] = c[..4].try_into().unwrap();
        *c = &c[4..];
        Ok(if little_endian { u32::from_le_bytes(bytes) } else { u32::from_be_bytes(bytes) })
    };
    let read_f64 = |c: &mut &[u8]| -> OsmResult<f64> {
        if c.len() < 8 {
            return Err(err());
        }
        let bytes: [u8; 8] = c[..8].try_into().unwrap();
        *c = &c[8..];
        Ok(if little_endian { f64::from_le_bytes(bytes) } else { f64::from_be_bytes(bytes) })
    };

    let geom_type = read_u32(&mut cursor)?;
    if geom_type != 2 {
        return Err(OsmError::Decode(format!("expected WKB LineString (type 2), got {geom_type}")));
    }

    let num_points = read_u32(&mut cursor)?;
    let mut points = Vec::with_capacity(num_points as usize);
    for _ in 0..num_points {
        let x = read_f64(&mut cursor)?;
        let y = read_f64(&mut cursor)?;
        points.push(mercator_to_wgs84(x, y));
    }
    Ok(points)
}
