//! External track record: an opaque entity keyed by id/slug with a
//! processing status and denormalized stats. The core reads the next
//! queued row atomically and writes back status + stats when it finishes
//! (or rolls the row back to `Queued` on a retryable failure).

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use chrono::{DateTime, Utc};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub i64);

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrackStatus {
    Created,
    Queued,
    Processing,
    Complete,
    Error,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackStats {
    pub recorded_at: Option<DateTime<Utc>>,
    pub recorded_until: Option<DateTime<Utc>>,
    pub duration_s: f64,
    pub length_m: f64,
    pub segments: u64,
    pub num_events: u64,
    pub num_measurements: u64,
    pub num_valid: u64,
}

#[derive(Clone, Debug)]
pub struct TrackRecord {
    pub id: TrackId,
    pub slug: String,
    pub author_id: String,
    pub csv_path: std::path::PathBuf,
    pub status: TrackStatus,
    pub stats: TrackStats,
    pub error: Option<String>,
}

/// Everything the core needs from a track-record backend. A real
/// implementation would claim the next queued row with a
/// `FOR UPDATE SKIP LOCKED`-style query so concurrent workers never race
/// each other onto the same track; `InMemoryTrackStore` gets the same
/// property from a single mutex around a FIFO queue.
pub trait TrackStore: Send + Sync {
    /// Atomically take the oldest `Queued` record and mark it `Processing`.
    /// Returns `None` when the queue is empty.
    fn claim_next(&self) -> Option<TrackRecord>;

    fn mark_complete(&self, id: TrackId, stats: TrackStats);

    fn mark_error(&self, id: TrackId, message: String);

    /// Returns a claimed record to the queue, for cooperative cancellation
    /// or a transient failure that should be retried later.
    fn rollback_to_queued(&self, id: TrackId);

    fn get(&self, id: TrackId) -> Option<TrackRecord>;
}

struct Inner {
    records: HashMap<TrackId, TrackRecord>,
    queue: VecDeque<TrackId>,
}

pub struct InMemoryTrackStore {
    inner: Mutex<Inner>,
}

impl InMemoryTrackStore {
    pub fn new() -> Self {
        InMemoryTrackStore {
            inner: Mutex::new(Inner {
                records: HashMap::new(),
                queue: VecDeque::new(),
            }),
        }
    }

    /// Enqueues a new track for processing, returning its assigned id.
    pub fn enqueue(&self, slug: String, author_id: String, csv_path: std::path::PathBuf) -> TrackId {
        let mut inner = self.inner.lock().unwrap();
        let id = TrackId(inner.records.len() as i64 + 1);
        inner.records.insert(
            id,
            TrackRecord {
                id,
                slug,
                author_id,
                csv_path,
                status: TrackStatus::Queued,
                stats: TrackStats::default(),
                error: None,
            },
        );
        inner.queue.push_back(id);
        id
    }
}

impl Default for InMemoryTrackStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackStore for InMemoryTrackStore {
    fn claim_next(&self) -> Option<TrackRecord> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.queue.pop_front()?;
        let record = inner.records.get_mut(&id)?;
        record.status = TrackStatus::Processing;
        Some(record.clone())
    }

    fn mark_complete(&self, id: TrackId, stats: TrackStats) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(record) = inner.records.get_mut(&id) {
            record.status = TrackStatus::Complete;
            record.stats = stats;
            record.error = None;
        }
    }

    fn mark_error(&self, id: TrackId, message: String) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(record) = inner.records.get_mut(&id) {
            record.status = TrackStatus::Error;
            record.error = Some(message);
        }
    }

    fn rollback_to_queued(&self, id: TrackId) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(record) = inner.records.get_mut(&id) {
            record.status = TrackStatus::Queued;
        }
        inner.queue.push_back(id);
    }

    fn get(&self, id: TrackId) -> Option<TrackRecord> {
        self.inner.lock().unwrap().records.get(&id).cloned()
    }
}
