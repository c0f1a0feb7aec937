//! The `<processing_output_dir>/<author>/<slug>/{...}` layout (§4.12).

use std::path::{Path, PathBuf};

pub const MEASUREMENTS_FILE: &str = "measurements.json";
pub const EVENTS_FILE: &str = "overtakingEvents.json";
pub const TRACK_FILE: &str = "track.json";
pub const TRACK_RAW_FILE: &str = "trackRaw.json";
pub const GPX_FILE: &str = "track.gpx";

/// The per-track output directory, `<base>/<author>/<slug>`. Does not touch
/// the filesystem; callers create it via [`ensure_dir`].
pub fn track_dir(base: &Path, author: &str, slug: &str) -> PathBuf {
    base.join(author).join(slug)
}

/// Create `dir` and all missing parents, matching the source's
/// `os.makedirs(..., exist_ok=True)`.
pub fn ensure_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)
}
