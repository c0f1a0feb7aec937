//! Format-version detection (§4.4 step 1-2).
//!
//! OBS recordings evolved their CSV layout over several hardware
//! generations; a file declares its own shape either implicitly (by which
//! columns its header carries) or explicitly (a leading `key=value&...`
//! metadata line, introduced with format 2).

use std::collections::HashMap;

use crate::error::{ImportError, ImportResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CsvFormatVersion {
    V1_0,
    V1_1,
    V1_2,
    V1_3,
    V2,
}

#[derive(Clone, Debug, Default)]
pub struct Metadata(HashMap<String, String>);

impl Metadata {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parse a `key=value&key=value...` metadata line. Not every value needs to
/// be present; unknown keys are kept but never consulted.
fn parse_metadata_line(line: &str) -> Metadata {
    let mut map = HashMap::new();
    for pair in line.trim().split('&') {
        if let Some((k, v)) = pair.split_once('=') {
            map.insert(k.trim().to_string(), v.trim().to_string());
        }
    }
    Metadata(map)
}

/// A line counts as a metadata line if it declares `OBSDataFormat`, rather
/// than being the semicolon-separated header row itself.
fn looks_like_metadata(line: &str) -> bool {
    line.contains("OBSDataFormat=")
}

/// Split the leading bytes of a file into an optional metadata line and the
/// header line that follows it (or the first line, if there is no
/// metadata), returning the offset at which the data rows begin.
pub fn split_metadata_and_header(first_line: &str, second_line: Option<&str>) -> (Metadata, bool) {
    if looks_like_metadata(first_line) {
        (parse_metadata_line(first_line), true)
    } else {
        let _ = second_line;
        (Metadata::default(), false)
    }
}

/// Decide the format version from metadata and header column names.
pub fn identify_format(metadata: &Metadata, header: &csv::StringRecord) -> ImportResult<CsvFormatVersion> {
    let has = |name: &str| header.iter().any(|col| col.eq_ignore_ascii_case(name));

    if metadata.get("OBSDataFormat") == Some("2") {
        return Ok(CsvFormatVersion::V2);
    }

    if has("insidePrivacyArea") {
        return Ok(CsvFormatVersion::V1_3);
    }
    if has("Left") && has("Right") && has("Course") && has("Speed") {
        return Ok(CsvFormatVersion::V1_2);
    }
    if has("Lid") && has("Course") && has("Speed") {
        return Ok(CsvFormatVersion::V1_1);
    }
    if has("Lid") && has("Case") {
        return Ok(CsvFormatVersion::V1_0);
    }

    Err(ImportError::InvalidFormat(
        "neither OBSDataFormat metadata nor a recognizable header was found".to_string(),
    ))
}

impl CsvFormatVersion {
    pub fn has_left_right_columns(self) -> bool {
        matches!(self, CsvFormatVersion::V1_2 | CsvFormatVersion::V1_3 | CsvFormatVersion::V2)
    }

    pub fn has_course_speed(self) -> bool {
        !matches!(self, CsvFormatVersion::V1_0)
    }
}
