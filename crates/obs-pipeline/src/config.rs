//! Worker/runtime configuration (§10.3, C15): a plain `Deserialize` struct
//! with documented defaults, overridable by loading a file and then by
//! explicit field overrides — not a live-reload system.

use obs_filter::AnonymizationMode;
use obs_geo::CandidateParams;
use obs_import::ImporterConfig;
use obs_match::AnnotatorConfig;
use serde::Deserialize;

/// A privacy zone given in plain lat/lon/radius, before the per-run jitter
/// in `obs_filter::privacy` is applied.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PrivacyZoneConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_m: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PseudonymizationConfig {
    pub salt: Option<String>,
    pub user_id_mode: AnonymizationMode,
    pub measurement_id_mode: AnonymizationMode,
}

impl Default for PseudonymizationConfig {
    fn default() -> Self {
        PseudonymizationConfig { salt: None, user_id_mode: AnonymizationMode::Keep, measurement_id_mode: AnonymizationMode::Keep }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct PipelineConfig {
    /// Seconds a worker sleeps after finding no queued track before retrying.
    pub queue_poll_delay_s: u64,
    pub worker_threads: usize,
    pub candidate_params: CandidateParams,
    pub annotator: AnnotatorConfig,
    pub importer: ImporterConfig,
    /// Root of `<processing_output_dir>/<author>/<slug>/...` (§4.12).
    pub output_dir: std::path::PathBuf,
    /// Buffer, in metres, `ensure_coverage` expands a track's bbox by.
    pub map_coverage_buffer_m: f64,
    pub privacy_zones: Vec<PrivacyZoneConfig>,
    pub pseudonymization: PseudonymizationConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            queue_poll_delay_s: 5,
            worker_threads: 4,
            candidate_params: CandidateParams::default(),
            annotator: AnnotatorConfig::default(),
            importer: ImporterConfig::default(),
            output_dir: std::path::PathBuf::from("./output"),
            map_coverage_buffer_m: 50.0,
            privacy_zones: Vec::new(),
            pseudonymization: PseudonymizationConfig::default(),
        }
    }
}
