//! Eviction Policy Module
//!
//! Selects which end of a shard's recency list gives up space.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CacheError;

/// Marker that selects MRU eviction in textual form.
pub const MRU_MARKER: &str = "mru";

/// Marker that selects LRU eviction in textual form.
pub const LRU_MARKER: &str = "lru";

// == Eviction Policy ==
/// Which end of the recency list is evicted to make room for an insert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionPolicy {
    /// Evict the least recently used item first
    #[default]
    Lru,
    /// Evict the most recently used item first
    Mru,
}

impl EvictionPolicy {
    // == Lenient Parse ==
    /// Converts a textual policy, treating everything except the exact
    /// `"mru"` marker as LRU.
    ///
    /// Matching is case-sensitive: `"MRU"` selects LRU. Unknown markers are
    /// logged but never rejected. Use [`str::parse`] for strict parsing.
    pub fn from_marker(marker: &str) -> Self {
        match marker {
            MRU_MARKER => EvictionPolicy::Mru,
            LRU_MARKER => EvictionPolicy::Lru,
            other => {
                warn!("Unrecognized eviction policy {:?}, falling back to lru", other);
                EvictionPolicy::Lru
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionPolicy::Lru => LRU_MARKER,
            EvictionPolicy::Mru => MRU_MARKER,
        }
    }
}

impl FromStr for EvictionPolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            MRU_MARKER => Ok(EvictionPolicy::Mru),
            LRU_MARKER => Ok(EvictionPolicy::Lru),
            other => Err(CacheError::InvalidRequest(format!(
                "unknown eviction policy: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_lru() {
        assert_eq!(EvictionPolicy::default(), EvictionPolicy::Lru);
    }

    #[test]
    fn test_from_marker_exact_mru() {
        assert_eq!(EvictionPolicy::from_marker("mru"), EvictionPolicy::Mru);
        assert_eq!(EvictionPolicy::from_marker("lru"), EvictionPolicy::Lru);
    }

    #[test]
    fn test_from_marker_falls_back_to_lru() {
        assert_eq!(EvictionPolicy::from_marker("MRU"), EvictionPolicy::Lru);
        assert_eq!(EvictionPolicy::from_marker("fifo"), EvictionPolicy::Lru);
        assert_eq!(EvictionPolicy::from_marker(""), EvictionPolicy::Lru);
        assert_eq!(EvictionPolicy::from_marker(" mru"), EvictionPolicy::Lru);
    }

    #[test]
    fn test_strict_parse() {
        assert_eq!("mru".parse::<EvictionPolicy>().unwrap(), EvictionPolicy::Mru);
        assert_eq!("lru".parse::<EvictionPolicy>().unwrap(), EvictionPolicy::Lru);
        assert!(matches!(
            "random".parse::<EvictionPolicy>(),
            Err(CacheError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&EvictionPolicy::Mru).unwrap();
        assert_eq!(json, "\"mru\"");
        let policy: EvictionPolicy = serde_json::from_str("\"lru\"").unwrap();
        assert_eq!(policy, EvictionPolicy::Lru);
    }
}
