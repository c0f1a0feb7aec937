//! Writes the five per-track artifacts to `<base>/<author>/<slug>/` (§4.12).

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use obs_core::sample::Sample;

use crate::error::{OutputError, OutputResult};
use crate::{geojson, gpx, paths};

fn write_json(path: &Path, value: &impl serde::Serialize) -> OutputResult<()> {
    let file = File::create(path).map_err(|e| OutputError::Io { path: path.display().to_string(), source: e })?;
    serde_json::to_writer(BufWriter::new(file), value)?;
    Ok(())
}

/// Writes `measurements.json`, `overtakingEvents.json`, `track.json`,
/// `trackRaw.json`, and `track.gpx` for one track into
/// `<base>/<author>/<slug>/`, creating the directory if absent.
pub fn write_track(base: &Path, author: &str, slug: &str, samples: &[Sample]) -> OutputResult<()> {
    let dir = paths::track_dir(base, author, slug);
    paths::ensure_dir(&dir).map_err(|e| OutputError::Io { path: dir.display().to_string(), source: e })?;

    write_json(&dir.join(paths::MEASUREMENTS_FILE), &geojson::measurements(samples))?;
    write_json(&dir.join(paths::EVENTS_FILE), &geojson::events(samples))?;
    write_json(&dir.join(paths::TRACK_FILE), &geojson::track_line(samples))?;
    write_json(&dir.join(paths::TRACK_RAW_FILE), &geojson::raw_track_line(samples))?;

    let gpx_doc = gpx::build(samples, slug)?;
    let gpx_path = dir.join(paths::GPX_FILE);
    let file = File::create(&gpx_path).map_err(|e| OutputError::Io { path: gpx_path.display().to_string(), source: e })?;
    gpx::write(&gpx_doc, BufWriter::new(file))?;

    Ok(())
}
