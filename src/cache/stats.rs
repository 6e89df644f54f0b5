//! Cache Statistics Module
//!
//! Tracks shard activity: hits, misses, evictions and rejected inserts.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache activity for one shard, or the sum over all shards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of lookups that found their id
    pub hits: u64,
    /// Number of lookups or updates that found nothing
    pub misses: u64,
    /// Number of items removed to make room
    pub evictions: u64,
    /// Number of inserts or updates refused (too large or duplicate id)
    pub rejections: u64,
    /// Current number of held items
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_rejection(&mut self) {
        self.rejections += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }

    // == Merge ==
    /// Adds another shard's counters into this one.
    pub fn merge(&mut self, other: &CacheStats) {
        self.hits += other.hits;
        self.misses += other.misses;
        self.evictions += other.evictions;
        self.rejections += other.rejections;
        self.total_entries += other.total_entries;
    }
}
