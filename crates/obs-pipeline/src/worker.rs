//! Worker pool (C11, §10.2): a fixed number of threads that each loop
//! claim → process → commit-or-rollback until told to stop.
//!
//! `rayon`'s usual `join`/`spawn`/parallel-iterator API is built for
//! short, data-parallel tasks, not a handful of persistent long-running
//! loops. `ThreadPoolBuilder` + `scope` still gets the fixed-size pool
//! this wants: build a pool sized to `worker_threads`, then spawn one
//! claim-loop task per thread inside a single `scope` call. `scope`
//! blocks until every worker returns, so the whole thing runs on its own
//! background thread (`spawn`) and hands the caller a handle to request
//! shutdown and a `JoinHandle` to wait for it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use obs_geo::WayStore;
use obs_osm::{MapProvider, TileSource};

use crate::config::PipelineConfig;
use crate::orchestrate::process_track;
use crate::store::TrackStore;

/// Shared handle a caller keeps to ask a running pool to stop.
#[derive(Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandle {
    pub fn request(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

fn worker_loop<T, S>(id: usize, store: &T, config: &PipelineConfig, way_store: &Arc<WayStore>, map_provider: &MapProvider<S>, stop: &AtomicBool)
where
    T: TrackStore,
    S: TileSource,
{
    let poll_delay = Duration::from_secs(config.queue_poll_delay_s);
    loop {
        if stop.load(Ordering::SeqCst) {
            tracing::info!(worker = id, "stopping on shutdown request");
            return;
        }

        let Some(record) = store.claim_next() else {
            std::thread::sleep(poll_delay);
            continue;
        };

        tracing::info!(worker = id, track = %record.id, slug = %record.slug, "claimed track");

        if stop.load(Ordering::SeqCst) {
            store.rollback_to_queued(record.id);
            tracing::info!(worker = id, track = %record.id, "rolled back for shutdown");
            return;
        }

        match process_track(&record, config, way_store, map_provider) {
            Ok(processed) => {
                tracing::info!(
                    worker = id,
                    track = %record.id,
                    num_events = processed.events.len(),
                    num_valid = processed.stats.num_valid,
                    "track processed"
                );
                store.mark_complete(record.id, processed.stats);
            }
            Err(err) => {
                tracing::warn!(worker = id, track = %record.id, error = %err, "track failed");
                store.mark_error(record.id, err.to_string());
            }
        }
    }
}

/// Spawns `config.worker_threads` claim loops onto a background thread
/// pool. Returns immediately with a handle to request shutdown and a
/// `JoinHandle` that resolves once every worker has returned.
pub fn spawn<T, S>(store: Arc<T>, config: Arc<PipelineConfig>, way_store: Arc<WayStore>, map_provider: Arc<MapProvider<S>>) -> (ShutdownHandle, JoinHandle<()>)
where
    T: TrackStore + 'static,
    S: TileSource + 'static,
{
    let stop = Arc::new(AtomicBool::new(false));
    let handle = ShutdownHandle { flag: Arc::clone(&stop) };

    let join = std::thread::spawn(move || {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_threads)
            .thread_name(|i| format!("obs-pipeline-worker-{i}"))
            .build()
            .expect("building the worker thread pool");

        pool.scope(|scope| {
            for id in 0..config.worker_threads {
                let store = &store;
                let config = &config;
                let way_store = &way_store;
                let map_provider = &map_provider;
                let stop = &stop;
                scope.spawn(move |_| {
                    worker_loop(id, store.as_ref(), config, way_store, map_provider.as_ref(), stop);
                });
            }
        });
    });

    (handle, join)
}
