//! Response DTOs for the command driver
//!
//! Every response is a JSON object carrying a `status` field.

use serde::Serialize;

use crate::cache::{CacheSnapshot, CacheStats, Outcome};

/// Response to insert, retrieve and update commands.
///
/// Serializes the outcome's own `status` tag (`success`, `too_large`,
/// `duplicate_id`, `miss`) next to a readable message.
#[derive(Debug, Clone, Serialize)]
pub struct OutcomeResponse {
    #[serde(flatten)]
    pub outcome: Outcome,
    pub message: String,
}

impl From<Outcome> for OutcomeResponse {
    fn from(outcome: Outcome) -> Self {
        Self {
            message: outcome.describe(),
            outcome,
        }
    }
}

/// Response to the clear command
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub status: String,
    pub message: String,
}

impl ClearResponse {
    pub fn new(shard_count: usize) -> Self {
        Self {
            status: "cleared".to_string(),
            message: format!("Cleared {} shards", shard_count),
        }
    }
}

/// Response to the stats command
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub status: String,
    /// Number of lookups that hit
    pub hits: u64,
    /// Number of lookups or updates that missed
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Number of refused inserts and updates
    pub rejections: u64,
    /// Items currently held across all shards
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            status: "stats".to_string(),
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            rejections: stats.rejections,
            total_entries: stats.total_entries,
        }
    }
}

/// Response to the snapshot command
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotResponse {
    pub status: String,
    #[serde(flatten)]
    pub snapshot: CacheSnapshot,
}

impl From<CacheSnapshot> for SnapshotResponse {
    fn from(snapshot: CacheSnapshot) -> Self {
        Self {
            status: "snapshot".to_string(),
            snapshot,
        }
    }
}

/// Response to the dump command
#[derive(Debug, Clone, Serialize)]
pub struct DumpResponse {
    pub status: String,
    /// Text rendering of every shard
    pub text: String,
}

impl DumpResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            status: "dump".to_string(),
            text: text.into(),
        }
    }
}

/// Error response body for malformed or invalid commands
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: String,
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            error: error.into(),
        }
    }
}

/// Any response the driver can write.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Response {
    Outcome(OutcomeResponse),
    Cleared(ClearResponse),
    Stats(StatsResponse),
    Snapshot(SnapshotResponse),
    Dump(DumpResponse),
    Error(ErrorResponse),
}
