//! Resolution cache: normalized path → resolved match.
//!
//! # Design Decisions
//! - Backed by `DashMap`: sharded reader/writer locks, so lookups for
//!   different (or the same) paths proceed in parallel and inserts only
//!   contend within one shard
//! - Only successful matches are stored; there is no eviction
//! - Two first requests racing on a new path may both run the matcher; the
//!   later insert wins and both values are equivalent

use dashmap::DashMap;
use std::sync::Arc;

use crate::observability::metrics;
use crate::routing::matcher::Match;

/// A thread-safe memo of path resolutions.
#[derive(Default)]
pub struct ResolutionCache {
    storage: DashMap<String, Arc<Match>>,
}

impl ResolutionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a previously resolved path.
    pub fn get(&self, path: &str) -> Option<Arc<Match>> {
        let hit = self.storage.get(path).map(|r| Arc::clone(r.value()));
        metrics::record_cache_lookup(hit.is_some());
        hit
    }

    /// Store a successful resolution.
    pub fn put(&self, path: &str, resolved: Arc<Match>) {
        self.storage.insert(path.to_string(), resolved);
        metrics::record_cache_size(self.storage.len());
    }

    pub fn contains(&self, path: &str) -> bool {
        self.storage.contains_key(path)
    }

    /// Number of cached paths.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}
