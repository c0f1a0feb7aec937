//! Single-track orchestration (C4 → C12): wires the importer, map
//! provider, candidate generator, chain solver, annotator, filters, and
//! output writers into the ordered pipeline a worker runs once per
//! claimed track.

use std::sync::Arc;

use obs_core::GeoPoint;
use obs_filter::{Chain, Confirmed, DistanceMeasured, Filter, PrivacyZone, PrivacyZones, Pseudonymization, RequiredFields};
use obs_geo::WayStore;
use obs_geo::candidate::generate_candidates_for_sample;
use obs_import::{derive_egomotion, import_csv};
use obs_match::{annotate, solve_chains};
use obs_osm::{MapProvider, TileSource};

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::event::{build_events, OvertakingEventRecord};
use crate::store::{TrackRecord, TrackStats};

pub struct ProcessedTrack {
    pub stats: TrackStats,
    pub events: Vec<OvertakingEventRecord>,
}

pub fn process_track<S: TileSource>(
    record: &TrackRecord,
    config: &PipelineConfig,
    way_store: &Arc<WayStore>,
    map_provider: &MapProvider<S>,
) -> PipelineResult<ProcessedTrack> {
    let (mut samples, import_stats) = import_csv(&record.csv_path, &config.importer)?;

    derive_egomotion(&mut samples);

    let positions: Vec<(f64, f64)> = samples.iter().filter_map(|s| s.latitude.zip(s.longitude)).collect();
    map_provider.ensure_coverage(&positions, config.map_coverage_buffer_m)?;

    for sample in samples.iter_mut() {
        sample.candidates = generate_candidates_for_sample(sample, way_store, &config.candidate_params);
    }

    solve_chains(&mut samples);

    annotate(&mut samples, way_store, &config.annotator);

    if !config.privacy_zones.is_empty() {
        let zones = config
            .privacy_zones
            .iter()
            .map(|z| PrivacyZone::new(GeoPoint::new(z.latitude, z.longitude), z.radius_m))
            .collect();
        samples = PrivacyZones::new(zones).apply_logged(samples);
    }

    let pseudonymization = Pseudonymization::new(
        config.pseudonymization.salt.clone(),
        config.pseudonymization.user_id_mode,
        config.pseudonymization.measurement_id_mode,
    )?;
    samples = pseudonymization.apply_logged(samples);

    let all_valid = Chain::new(vec![Box::new(RequiredFields)]);
    let distance_measured = Chain::new(vec![Box::new(RequiredFields), Box::new(DistanceMeasured)]);
    let confirmed_events_only = Chain::new(vec![Box::new(RequiredFields), Box::new(DistanceMeasured), Box::new(Confirmed)]);

    let num_valid = all_valid.apply_logged(samples.clone()).len() as u64;
    let num_measured = distance_measured.apply_logged(samples.clone()).len();
    let num_confirmed_events = confirmed_events_only.apply_logged(samples.clone()).len();
    tracing::debug!(num_measured, num_confirmed_events, "C9 filter chains counted");

    obs_output::write_track(&config.output_dir, &record.author_id, &record.slug, &samples)?;

    let events = build_events(record.id, &samples);

    let stats = TrackStats {
        recorded_at: import_stats.t_min,
        recorded_until: import_stats.t_max,
        duration_s: import_stats.continuous_duration_s,
        length_m: import_stats.continuous_length_m,
        segments: import_stats.continuous_segment_count,
        num_events: events.len() as u64,
        num_measurements: import_stats.n_measurements,
        num_valid,
    };

    Ok(ProcessedTrack { stats, events })
}
