//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;

use crate::cache::{EvictionPolicy, DEFAULT_SHARD_CAPACITY, DEFAULT_SHARD_COUNT};
use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of independent shards
    pub shard_count: usize,
    /// Total size budget of each shard
    pub shard_capacity: u64,
    /// Policy applied to inserts that do not name one
    pub default_policy: EvictionPolicy,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SHARD_COUNT` - Number of shards (default: 3)
    /// - `SHARD_CAPACITY` - Capacity of each shard (default: 200)
    /// - `EVICTION_POLICY` - `mru` or `lru` (default: lru; anything but `mru` means lru)
    pub fn from_env() -> Self {
        Self {
            shard_count: env::var("SHARD_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SHARD_COUNT),
            shard_capacity: env::var("SHARD_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SHARD_CAPACITY),
            default_policy: env::var("EVICTION_POLICY")
                .ok()
                .map(|v| EvictionPolicy::from_marker(&v))
                .unwrap_or_default(),
        }
    }

    /// Checks that the configuration can build a cache.
    pub fn validate(&self) -> Result<()> {
        if self.shard_count == 0 {
            return Err(CacheError::InvalidConfig(
                "shard count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shard_count: DEFAULT_SHARD_COUNT,
            shard_capacity: DEFAULT_SHARD_CAPACITY,
            default_policy: EvictionPolicy::Lru,
        }
    }
}
