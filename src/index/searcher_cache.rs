//! Thread-scoped reader cache
//!
//! Binds one reader snapshot to each calling thread for the duration of a
//! logical unit of work (one incoming request). The first `get_reader`
//! of a request opens from the currently published snapshot; every later
//! call on the same thread reuses it, regardless of what writers publish
//! meanwhile. `release_current` marks the request boundary.
//!
//! This is not an eviction cache: the only invalidation event is an
//! index-writing collaborator publishing after a commit, and even that
//! never touches readers already leased to in-flight threads.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::thread::{self, ThreadId};

use crate::observability::Logger;

use super::reader::IndexReader;

/// Opens reader snapshots for the cache
pub trait SnapshotSource: Send + Sync {
    /// Opens a reader over the source's current state
    fn open_snapshot(&self) -> Arc<dyn IndexReader>;
}

/// A leased reader snapshot, tagged with its publish generation
#[derive(Clone)]
pub struct ReaderHandle {
    generation: u64,
    reader: Arc<dyn IndexReader>,
}

impl ReaderHandle {
    /// Publish generation the snapshot was opened at
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The snapshot itself
    pub fn reader(&self) -> &Arc<dyn IndexReader> {
        &self.reader
    }
}

/// Per-thread snapshot lease manager
pub struct SearcherCache {
    source: Arc<dyn SnapshotSource>,
    published: RwLock<(u64, Arc<dyn IndexReader>)>,
    leases: RwLock<HashMap<ThreadId, ReaderHandle>>,
}

impl SearcherCache {
    /// Creates a cache publishing the source's current snapshot as
    /// generation zero
    pub fn new(source: Arc<dyn SnapshotSource>) -> Self {
        let initial = source.open_snapshot();
        Self {
            source,
            published: RwLock::new((0, initial)),
            leases: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the reader bound to the calling thread, opening one from
    /// the published snapshot on the thread's first access
    pub fn get_reader(&self) -> ReaderHandle {
        let thread = thread::current().id();
        if let Some(handle) = self.leases.read().unwrap().get(&thread) {
            return handle.clone();
        }

        let handle = {
            let published = self.published.read().unwrap();
            ReaderHandle {
                generation: published.0,
                reader: Arc::clone(&published.1),
            }
        };
        self.leases.write().unwrap().insert(thread, handle.clone());
        handle
    }

    /// Publishes a fresh snapshot for all future first accesses.
    ///
    /// Readers already leased to in-flight threads are untouched; each
    /// holder keeps its view until it releases at its request boundary.
    pub fn invalidate_all(&self) {
        let mut published = self.published.write().unwrap();
        published.0 += 1;
        published.1 = self.source.open_snapshot();
        Logger::info(
            "SNAPSHOT_PUBLISHED",
            &[("generation", published.0.to_string().as_str())],
        );
    }

    /// Ends the calling thread's unit of work; its next `get_reader`
    /// opens from the currently published snapshot
    pub fn release_current(&self) {
        self.leases.write().unwrap().remove(&thread::current().id());
    }

    /// Generation of the currently published snapshot
    pub fn current_generation(&self) -> u64 {
        self.published.read().unwrap().0
    }
}
