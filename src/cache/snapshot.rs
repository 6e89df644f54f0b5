//! Snapshot Module
//!
//! Serializable point-in-time view of every shard, used for diagnostics.

use serde::Serialize;

use crate::cache::{Cache, CacheItem, CacheList, CacheStats};

/// Contents and occupancy of one shard.
#[derive(Debug, Clone, Serialize)]
pub struct ShardSnapshot {
    pub index: usize,
    pub capacity: u64,
    pub remaining: u64,
    pub count: usize,
    /// Items ordered from most to least recently used
    pub items: Vec<CacheItem>,
}

impl ShardSnapshot {
    fn capture(index: usize, shard: &CacheList) -> Self {
        Self {
            index,
            capacity: shard.capacity(),
            remaining: shard.remaining(),
            count: shard.len(),
            items: shard.iter().cloned().collect(),
        }
    }
}

/// Contents of the whole cache at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct CacheSnapshot {
    /// Capture time in RFC 3339 format
    pub taken_at: String,
    pub shards: Vec<ShardSnapshot>,
    pub stats: CacheStats,
}

impl CacheSnapshot {
    pub fn capture(cache: &Cache) -> Self {
        Self {
            taken_at: chrono::Utc::now().to_rfc3339(),
            shards: cache
                .shards()
                .iter()
                .enumerate()
                .map(|(index, shard)| ShardSnapshot::capture(index, shard))
                .collect(),
            stats: cache.stats(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::EvictionPolicy;

    #[test]
    fn test_snapshot_reflects_shards() {
        let mut cache = Cache::new(3, 200).unwrap();
        cache.insert(CacheItem::new(1, 50, "a", "x"), EvictionPolicy::Lru);
        cache.insert(CacheItem::new(2, 20, "a", "y"), EvictionPolicy::Lru);

        let snapshot = cache.snapshot();

        assert_eq!(snapshot.shards.len(), 3);
        let shard = &snapshot.shards[1];
        assert_eq!(shard.index, 1);
        assert_eq!(shard.remaining, 130);
        assert_eq!(shard.count, 2);
        let ids: Vec<u64> = shard.items.iter().map(CacheItem::id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(snapshot.stats.total_entries, 2);
    }

    #[test]
    fn test_snapshot_serializes() {
        let cache = Cache::new(1, 10).unwrap();
        let json = serde_json::to_value(cache.snapshot()).unwrap();

        assert!(json["taken_at"].is_string());
        assert_eq!(json["shards"][0]["capacity"], 10);
        assert!(chrono::DateTime::parse_from_rfc3339(json["taken_at"].as_str().unwrap()).is_ok());
    }
}
