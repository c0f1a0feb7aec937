//! CSV ingestion (§4.4, C4): gzip detection, metadata/header parsing, and
//! per-row extraction into typed [`Sample`]s.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use obs_core::sample::{RawUltrasonicEcho, Sample};
use obs_core::time::{gps_to_utc, reject_before};

use crate::error::{ImportError, ImportResult};
use crate::extractor::{distance_or_missing, header_index, RowContext};
use crate::format::{self, CsvFormatVersion, Metadata};
use crate::stats::{compute_stats, ImportStats};

/// Hardware/tagging choices that change which raw columns feed which
/// logical field. `right_hand_traffic ^ left_right_is_swapped` decides
/// whether the `Right` or `Left` column is the overtaker-side sensor
/// (§4.4's `L`/`R` note).
#[derive(Clone, Copy, Debug, serde::Deserialize)]
pub struct ImporterConfig {
    pub right_hand_traffic: bool,
    pub left_right_is_swapped: bool,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        ImporterConfig {
            right_hand_traffic: true,
            left_right_is_swapped: false,
        }
    }
}

impl ImporterConfig {
    fn overtaker_is_right(&self) -> bool {
        self.right_hand_traffic ^ self.left_right_is_swapped
    }
}

pub fn import_csv(path: &Path, config: &ImporterConfig) -> ImportResult<(Vec<Sample>, ImportStats)> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    import_csv_bytes(&bytes, config)
}

pub fn import_csv_reader<R: Read>(mut reader: R, config: &ImporterConfig) -> ImportResult<(Vec<Sample>, ImportStats)> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    import_csv_bytes(&bytes, config)
}

fn maybe_gunzip(bytes: &[u8]) -> ImportResult<Vec<u8>> {
    const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
    if bytes.len() >= 2 && bytes[..2] == GZIP_MAGIC {
        let mut decoder = flate2::read::GzDecoder::new(bytes);
        let mut out = Vec::new();
        decoder.read_to_end(&mut out)?;
        Ok(out)
    } else {
        Ok(bytes.to_vec())
    }
}

fn import_csv_bytes(raw: &[u8], config: &ImporterConfig) -> ImportResult<(Vec<Sample>, ImportStats)> {
    let plain = maybe_gunzip(raw)?;
    let text = String::from_utf8_lossy(&plain);

    let mut lines = text.lines();
    let first_line = lines.next().ok_or_else(|| ImportError::InvalidFormat("empty file".to_string()))?;
    let mut peek = lines.clone();
    let (metadata, has_metadata_line) = format::split_metadata_and_header(first_line, peek.next());

    let header_line = if has_metadata_line {
        lines.next().ok_or_else(|| ImportError::InvalidFormat("metadata line with no header row".to_string()))?
    } else {
        first_line
    };

    let header = parse_single_record(header_line)?;
    let version = format::identify_format(&metadata, &header)?;
    let index = header_index(&header);

    let body: String = lines.collect::<Vec<_>>().join("\n");
    let mut body_reader = csv::ReaderBuilder::new().delimiter(b';').has_headers(false).from_reader(body.as_bytes());

    let mut samples = Vec::new();
    let mut n_measurements: u64 = 0;
    for (row_number, result) in body_reader.records().enumerate() {
        let record = result?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        n_measurements += 1;
        let ctx = RowContext::new(&index, &record);
        if let Some(sample) = parse_row(&ctx, version, &metadata, config, row_number as u64)? {
            samples.push(sample);
        }
    }

    let stats = compute_stats(&samples, n_measurements);
    Ok((samples, stats))
}

fn parse_single_record(line: &str) -> ImportResult<csv::StringRecord> {
    let mut reader = csv::ReaderBuilder::new().delimiter(b';').has_headers(false).from_reader(line.as_bytes());
    reader
        .records()
        .next()
        .ok_or_else(|| ImportError::InvalidFormat("missing header row".to_string()))?
        .map_err(ImportError::from)
}

fn parse_timestamp(ctx: &RowContext) -> Option<NaiveDateTime> {
    let date_str = ctx.raw("Date")?;
    let time_str = ctx.raw("Time")?;
    let date = NaiveDate::parse_from_str(date_str, "%d.%m.%Y").ok()?;
    let time = NaiveTime::parse_from_str(time_str, "%H:%M:%S").ok()?;
    let millis: i64 = ctx.parse("Millis").unwrap_or(0);
    Some(NaiveDateTime::new(date, time) + chrono::Duration::milliseconds(millis))
}

fn parse_row(
    ctx: &RowContext,
    version: CsvFormatVersion,
    metadata: &Metadata,
    config: &ImporterConfig,
    row_number: u64,
) -> ImportResult<Option<Sample>> {
    let Some(naive_time) = parse_timestamp(ctx) else {
        return Ok(None);
    };
    let mut time = Utc.from_utc_datetime(&naive_time);
    if metadata.get("TimeZone") == Some("GPS") {
        time = gps_to_utc(time);
    }
    if time < reject_before() {
        return Ok(None);
    }

    let latitude: Option<f64> = ctx.parse("Latitude");
    let longitude: Option<f64> = ctx.parse("Longitude");
    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        return Ok(None);
    };
    if !latitude.is_finite() || !longitude.is_finite() || latitude.abs() > 90.0 || longitude.abs() > 180.0 || (latitude == 0.0 && longitude == 0.0) {
        return Ok(None);
    }

    let in_privacy_zone = ctx.parse::<f64>("insidePrivacyArea").map(|v| v != 0.0).unwrap_or(false);
    if in_privacy_zone {
        return Ok(None);
    }

    let course = if version.has_course_speed() {
        ctx.parse::<f64>("Course").map(|heading_deg| (90.0 - heading_deg).to_radians())
    } else {
        None
    };
    let speed = if version.has_course_speed() {
        ctx.parse::<f64>("Speed").map(|kmh| kmh / 3.6)
    } else {
        None
    };

    let (distance_overtaker, distance_stationary) = if version.has_left_right_columns() {
        let left: Option<f64> = ctx.parse("Left");
        let right: Option<f64> = ctx.parse("Right");
        if config.overtaker_is_right() {
            (distance_or_missing(right), distance_or_missing(left))
        } else {
            (distance_or_missing(left), distance_or_missing(right))
        }
    } else {
        (distance_or_missing(ctx.parse("Lid")), None)
    };

    let confirmed = ctx
        .parse::<f64>("Confirmed")
        .map(|v| v != 0.0)
        .unwrap_or_else(|| ctx.parse::<f64>("Case").map(|v| v != 0.0).unwrap_or(false));

    let measurement_id = ctx.raw("MeasurementId").map(str::to_string).unwrap_or_else(|| format!("row-{row_number}"));
    let user_id = ctx.raw("UserId").map(str::to_string);
    let device_id = ctx.raw("DeviceId").map(str::to_string);

    let raw_measurements = if matches!(version, CsvFormatVersion::V2) {
        extract_raw_echoes(ctx, metadata)
    } else {
        Vec::new()
    };

    Ok(Some(Sample {
        measurement_id,
        user_id,
        device_id,
        time,
        latitude: Some(latitude),
        longitude: Some(longitude),
        course,
        speed,
        distance_overtaker,
        distance_stationary,
        confirmed,
        in_privacy_zone: false,
        egomotion_is_derived: false,
        raw_measurements,
        candidates: Vec::new(),
        way_id: None,
        way_orientation: None,
        latitude_projected: None,
        longitude_projected: None,
        distance_projected: None,
        has_osm_annotations: false,
        latitude_gps: None,
        longitude_gps: None,
        osm_tags: obs_core::sample::OsmTags::new(),
    }))
}

fn extract_raw_echoes(ctx: &RowContext, metadata: &Metadata) -> Vec<RawUltrasonicEcho> {
    let max_slots: usize = metadata.get("MaximumMeasurementsPerLine").and_then(|s| s.parse().ok()).unwrap_or(0);
    let mut echoes = Vec::new();
    for slot in 0..max_slots {
        let offset_col = format!("Tms_{slot}");
        if !ctx.has_column(&offset_col) {
            break;
        }
        let Some(offset_ms) = ctx.parse::<i32>(&offset_col) else {
            continue;
        };
        let left_us = distance_or_missing(ctx.parse(&format!("Lus_{slot}")));
        let right_us = distance_or_missing(ctx.parse(&format!("Rus_{slot}")));
        let confirmed = ctx.parse::<f64>(&format!("Cus_{slot}")).map(|v| v != 0.0).unwrap_or(false);
        echoes.push(RawUltrasonicEcho {
            offset_ms,
            left_us,
            right_us,
            confirmed,
        });
    }
    echoes
}
