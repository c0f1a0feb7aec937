//! GPX 1.1 track emission (§4.12): one `<trk>` with one `<trkseg>`, one
//! `<trkpt>` per sample in recorded order, each carrying an ISO-8601 `<time>`.

use chrono::{DateTime, Utc};
use geo_types::Point;
use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};

use obs_core::sample::Sample;

use crate::error::{OutputError, OutputResult};

fn to_offset_datetime(t: DateTime<Utc>) -> OutputResult<time::OffsetDateTime> {
    time::OffsetDateTime::from_unix_timestamp(t.timestamp())
        .and_then(|odt| odt.replace_nanosecond(t.timestamp_subsec_nanos()))
        .map_err(|e| OutputError::Gpx(e.to_string()))
}

/// Builds the in-memory `Gpx` document for one track. `name` is the track's
/// slug, used as both `<trk><name>` and the document's metadata name.
pub fn build(samples: &[Sample], name: &str) -> OutputResult<Gpx> {
    let mut segment = TrackSegment::default();
    for sample in samples {
        let (Some(lat), Some(lon)) = (sample.latitude, sample.longitude) else {
            continue;
        };
        let mut waypoint = Waypoint::new(Point::new(lon, lat));
        waypoint.time = Some(to_offset_datetime(sample.time)?.into());
        segment.points.push(waypoint);
    }

    let track = Track {
        name: Some(name.to_string()),
        type_: Some("Cycling".to_string()),
        segments: vec![segment],
        ..Default::default()
    };

    Ok(Gpx { version: GpxVersion::Gpx11, tracks: vec![track], ..Default::default() })
}

/// Serializes `gpx` to `writer` as GPX 1.1 XML.
pub fn write(gpx: &Gpx, writer: impl std::io::Write) -> OutputResult<()> {
    gpx::write(gpx, writer).map_err(|e| OutputError::Gpx(e.to_string()))
}
