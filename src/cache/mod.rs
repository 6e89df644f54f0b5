//! Cache Module
//!
//! Provides a sharded in-memory cache with per-shard size budgets and
//! LRU or MRU eviction.

mod item;
mod list;
mod outcome;
mod policy;
mod sharded;
mod snapshot;
mod stats;


// Re-export public types
pub use item::{CacheItem, ItemId};
pub use list::{CacheList, Iter};
pub use outcome::Outcome;
pub use policy::{EvictionPolicy, LRU_MARKER, MRU_MARKER};
pub use sharded::{route_index, Cache};
pub use snapshot::{CacheSnapshot, ShardSnapshot};
pub use stats::CacheStats;

// == Public Constants ==
/// Shard count used when none is configured
pub const DEFAULT_SHARD_COUNT: usize = 3;

/// Per-shard capacity used when none is configured
pub const DEFAULT_SHARD_CAPACITY: u64 = 200;
