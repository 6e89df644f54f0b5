//! Sharded Cache Module
//!
//! Routes items to a fixed set of independent shards by a header hash.

use std::fmt;

use tracing::{debug, info};

use crate::cache::{CacheItem, CacheList, CacheSnapshot, CacheStats, EvictionPolicy, Outcome};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Routing ==
/// Maps a header to a shard index: the sum of its code points modulo
/// `shard_count`.
///
/// This is a distribution aid, not an identity: unrelated headers may share
/// a shard. `shard_count` must be non-zero.
pub fn route_index(header: &str, shard_count: usize) -> usize {
    let total: u64 = header.chars().map(|c| u64::from(u32::from(c))).sum();
    (total % shard_count as u64) as usize
}

// == Cache ==
/// A fixed array of shards with identical capacity.
///
/// Shards never share state; every operation touches exactly one shard
/// except [`Cache::clear_all`].
#[derive(Debug, Clone)]
pub struct Cache {
    shards: Vec<CacheList>,
}

impl Cache {
    // == Constructor ==
    /// Creates a cache of `shard_count` shards, each holding up to
    /// `shard_capacity` units of size.
    pub fn new(shard_count: usize, shard_capacity: u64) -> Result<Self> {
        if shard_count == 0 {
            return Err(CacheError::InvalidConfig(
                "shard count must be at least 1".to_string(),
            ));
        }

        info!(
            "Creating cache with {} shards of capacity {}",
            shard_count, shard_capacity
        );
        let shards = (0..shard_count)
            .map(|_| CacheList::new(shard_capacity))
            .collect();
        Ok(Self { shards })
    }

    /// Creates a cache from validated configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::new(config.shard_count, config.shard_capacity)
    }

    // == Insert ==
    /// Inserts into the shard selected by the item's header.
    pub fn insert(&mut self, item: CacheItem, policy: EvictionPolicy) -> Outcome {
        let index = self.shard_index(item.header());
        debug!(
            "insert item {} into shard {} (policy {})",
            item.id(),
            index,
            policy
        );
        self.shards[index].insert(item, policy)
    }

    // == Retrieve ==
    /// Checks the routed shard for the item's id, promoting it on a hit.
    ///
    /// A hit echoes back the caller's item rather than the stored one.
    pub fn retrieve(&mut self, item: &CacheItem) -> Outcome {
        let index = self.shard_index(item.header());
        debug!("retrieve item {} from shard {}", item.id(), index);
        if self.shards[index].find(item.id()).is_some() {
            Outcome::Success { item: item.clone() }
        } else {
            Outcome::Miss { id: item.id() }
        }
    }

    // == Update ==
    /// Replaces the stored item with the same id in the routed shard.
    pub fn update(&mut self, item: CacheItem) -> Outcome {
        let index = self.shard_index(item.header());
        debug!("update item {} in shard {}", item.id(), index);
        self.shards[index].update(item.id(), item)
    }

    // == Clear All ==
    pub fn clear_all(&mut self) {
        for shard in &mut self.shards {
            shard.clear();
        }
        info!("Cleared all {} shards", self.shards.len());
    }

    // == Accessors ==
    /// Index of the shard that owns `header`.
    pub fn shard_index(&self, header: &str) -> usize {
        route_index(header, self.shards.len())
    }

    /// The shard that owns `header`.
    pub fn shard_for(&self, header: &str) -> &CacheList {
        &self.shards[self.shard_index(header)]
    }

    pub fn shard(&self, index: usize) -> Option<&CacheList> {
        self.shards.get(index)
    }

    pub fn shards(&self) -> &[CacheList] {
        &self.shards
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Total number of items across all shards.
    pub fn len(&self) -> usize {
        self.shards.iter().map(CacheList::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(CacheList::is_empty)
    }

    /// Statistics summed over every shard.
    pub fn stats(&self) -> CacheStats {
        self.shards.iter().fold(CacheStats::new(), |mut acc, shard| {
            acc.merge(&shard.stats());
            acc
        })
    }

    /// Point-in-time copy of every shard's contents.
    pub fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot::capture(self)
    }
}

impl fmt::Display for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, shard) in self.shards.iter().enumerate() {
            writeln!(f, "SHARD {}:", index)?;
            writeln!(f, "{}", shard)?;
        }
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, size: u64, header: &str) -> CacheItem {
        CacheItem::new(id, size, header, "content")
    }

    #[test]
    fn test_route_index_sums_code_points() {
        // 'a' = 97, 97 % 3 = 1
        assert_eq!(route_index("a", 3), 1);
        // 'a' + 'b' = 195, 195 % 3 = 0
        assert_eq!(route_index("ab", 3), 0);
        assert_eq!(route_index("", 3), 0);
        assert_eq!(route_index("anything", 1), 0);
    }

    #[test]
    fn test_route_index_is_order_insensitive() {
        assert_eq!(route_index("ab", 5), route_index("ba", 5));
    }

    #[test]
    fn test_route_index_non_ascii() {
        // 'é' = 233, 233 % 4 = 1
        assert_eq!(route_index("é", 4), 1);
    }

    #[test]
    fn test_new_rejects_zero_shards() {
        assert!(matches!(
            Cache::new(0, 100),
            Err(CacheError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let cache = Cache::from_config(&Config::default()).unwrap();
        assert_eq!(cache.shard_count(), 3);
        assert!(cache.shards().iter().all(|s| s.capacity() == 200));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_lands_in_routed_shard() {
        let mut cache = Cache::new(3, 200).unwrap();

        assert!(cache.insert(item(1, 50, "a"), EvictionPolicy::Lru).is_success());

        assert_eq!(cache.shard(1).map(CacheList::len), Some(1));
        assert_eq!(cache.shard(0).map(CacheList::len), Some(0));
        assert_eq!(cache.shard(2).map(CacheList::len), Some(0));
        assert_eq!(cache.shard_for("a").remaining(), 150);
    }

    #[test]
    fn test_same_id_in_different_shards() {
        let mut cache = Cache::new(3, 200).unwrap();

        assert!(cache.insert(item(1, 10, "a"), EvictionPolicy::Lru).is_success());
        assert!(cache.insert(item(1, 10, "ab"), EvictionPolicy::Lru).is_success());

        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_retrieve_echoes_caller_item() {
        let mut cache = Cache::new(3, 200).unwrap();
        cache.insert(item(1, 50, "a"), EvictionPolicy::Lru);

        let probe = CacheItem::key(1, "a");
        assert_eq!(
            cache.retrieve(&probe),
            Outcome::Success {
                item: probe.clone()
            }
        );
    }

    #[test]
    fn test_retrieve_wrong_header_misses() {
        let mut cache = Cache::new(3, 200).unwrap();
        cache.insert(item(1, 50, "a"), EvictionPolicy::Lru);

        // "ab" routes to shard 0, the item lives in shard 1
        assert_eq!(
            cache.retrieve(&CacheItem::key(1, "ab")),
            Outcome::Miss { id: 1 }
        );
    }

    #[test]
    fn test_retrieve_promotes() {
        let mut cache = Cache::new(1, 30).unwrap();
        cache.insert(item(1, 10, "x"), EvictionPolicy::Lru);
        cache.insert(item(2, 10, "x"), EvictionPolicy::Lru);
        cache.insert(item(3, 10, "x"), EvictionPolicy::Lru);

        cache.retrieve(&CacheItem::key(1, "x"));
        cache.insert(item(4, 10, "x"), EvictionPolicy::Lru);

        // 2 was least recently used after 1 was promoted
        let ids: Vec<u64> = cache.shard_for("x").iter().map(CacheItem::id).collect();
        assert_eq!(ids, vec![4, 1, 3]);
    }

    #[test]
    fn test_update_routes_and_replaces() {
        let mut cache = Cache::new(3, 200).unwrap();
        cache.insert(item(1, 50, "a"), EvictionPolicy::Lru);

        let replacement = CacheItem::new(1, 80, "a", "v2");
        assert!(cache.update(replacement.clone()).is_success());

        assert_eq!(cache.shard_for("a").front(), Some(&replacement));
        assert_eq!(cache.shard_for("a").remaining(), 120);
    }

    #[test]
    fn test_update_miss() {
        let mut cache = Cache::new(3, 200).unwrap();
        assert_eq!(cache.update(item(5, 1, "a")), Outcome::Miss { id: 5 });
    }

    #[test]
    fn test_clear_all() {
        let mut cache = Cache::new(3, 200).unwrap();
        cache.insert(item(1, 50, "a"), EvictionPolicy::Lru);
        cache.insert(item(2, 50, "b"), EvictionPolicy::Lru);
        cache.insert(item(3, 50, "c"), EvictionPolicy::Lru);

        cache.clear_all();

        assert!(cache.is_empty());
        assert!(cache.shards().iter().all(|s| s.remaining() == 200));
    }

    #[test]
    fn test_stats_aggregate_shards() {
        let mut cache = Cache::new(3, 200).unwrap();
        cache.insert(item(1, 50, "a"), EvictionPolicy::Lru);
        cache.insert(item(2, 50, "b"), EvictionPolicy::Lru);
        cache.retrieve(&CacheItem::key(1, "a"));
        cache.retrieve(&CacheItem::key(2, "a"));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 2);
    }

    #[test]
    fn test_display_labels_shards() {
        let cache = Cache::new(2, 10).unwrap();
        let text = cache.to_string();
        assert!(text.contains("SHARD 0:"));
        assert!(text.contains("SHARD 1:"));
        assert!(!text.contains("SHARD 2:"));
    }
}
