//! worker-demo — an embedded end-to-end walkthrough of one track moving
//! through the whole pipeline: CSV import, on-demand map loading, chain
//! solving, annotation, filtering, and GeoJSON/GPX export.
//!
//! Uses a fixture `TileSource` instead of a real OSM query service, so
//! this runs offline and deterministically.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

use obs_core::GeoPoint;
use obs_geo::WayStore;
use obs_osm::{MapProvider, OsmResult, RoadRecord, Tile, TileSource};
use obs_pipeline::store::{InMemoryTrackStore, TrackStore};
use obs_pipeline::{orchestrate::process_track, PipelineConfig};

// ── Embedded fixture track ──────────────────────────────────────────────────

// One straight-line ride north along a single OSM way, with one confirmed
// overtaking event on the second fix.
const TRACK_CSV: &str = "\
Date;Time;Latitude;Longitude;Course;Speed;Left;Right;Confirmed\n\
01.06.2024;08:00:00;48.00000;9.00000;0;5.0;999;999;0\n\
01.06.2024;08:00:01;48.00010;9.00001;0;5.0;999;120;1\n\
01.06.2024;08:00:02;48.00020;9.00001;0;5.0;999;999;0\n\
01.06.2024;08:00:03;48.00030;9.00001;0;5.0;999;999;0\n\
";

/// A `TileSource` backed by one hand-authored straight road, standing in
/// for a real OSM query service so the demo never touches the network.
struct FixtureTileSource;

impl TileSource for FixtureTileSource {
    fn fetch_tile(&self, _tile: Tile) -> OsmResult<Vec<RoadRecord>> {
        Ok(vec![RoadRecord {
            way_id: obs_core::WayId(1),
            name: Some("Fixture Street".to_string()),
            zone: Some("urban".to_string()),
            directionality: 0,
            oneway: false,
            geometry: vec![GeoPoint::new(47.999, 9.0000), GeoPoint::new(48.001, 9.0000)],
        }])
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== worker-demo — one track through the obs-* pipeline ===");
    println!();

    // 1. Write the embedded fixture to a temp CSV file (the importer reads
    //    from a path, matching how a real job would point at an uploaded
    //    recording).
    let csv_dir = tempfile_dir()?;
    let csv_path = csv_dir.join("fixture.csv");
    std::fs::write(&csv_path, TRACK_CSV)?;

    // 2. Enqueue one track in an in-memory store and claim it, the way a
    //    worker would pull the next job off a real queue.
    let store = InMemoryTrackStore::new();
    store.enqueue("fixture-ride".to_string(), "demo-rider".to_string(), csv_path);
    let record = store.claim_next().expect("just enqueued one track");
    println!("Claimed track {} (slug {:?})", record.id, record.slug);

    // 3. Map infrastructure: an empty shared way store, populated on demand
    //    by `ensure_coverage` from the fixture tile source.
    let way_store = Arc::new(WayStore::new());
    let map_provider = MapProvider::new(Arc::clone(&way_store), FixtureTileSource);

    // 4. Output goes under ./output, same layout a real deployment writes.
    let mut config = PipelineConfig::default();
    config.output_dir = std::path::PathBuf::from("output");

    // 5. Run the pipeline.
    let t0 = Instant::now();
    let processed = process_track(&record, &config, &way_store, &map_provider)?;
    let elapsed = t0.elapsed();

    store.mark_complete(record.id, processed.stats.clone());

    // 6. Summary.
    println!("Processed in {:.3} ms", elapsed.as_secs_f64() * 1000.0);
    println!("  valid samples   : {}", processed.stats.num_valid);
    println!("  measurements    : {}", processed.stats.num_measurements);
    println!("  segments        : {}", processed.stats.segments);
    println!("  overtaking events: {}", processed.events.len());
    for event in &processed.events {
        println!(
            "    way {} at ({:.5}, {:.5}), distance {:.2} m",
            event.way_id, event.latitude, event.longitude, event.distance_overtaker
        );
    }
    println!();
    println!(
        "Artifacts written under {}/demo-rider/fixture-ride/",
        config.output_dir.display()
    );

    Ok(())
}

fn tempfile_dir() -> Result<std::path::PathBuf> {
    let dir = std::env::temp_dir().join(format!("worker-demo-{}", std::process::id()));
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
