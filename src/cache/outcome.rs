//! Operation Outcome Module
//!
//! Expected results of cache operations. None of these are errors.

use serde::Serialize;

use crate::cache::{CacheItem, ItemId};

// == Outcome ==
/// Result of an insert, retrieve or update against a shard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The operation completed; carries the resulting item
    Success { item: CacheItem },
    /// The item can never fit in the shard
    TooLarge { id: ItemId, size: u64, capacity: u64 },
    /// Another item with this id already occupies the shard
    DuplicateId { id: ItemId },
    /// No item with this id is held by the routed shard
    Miss { id: ItemId },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn is_miss(&self) -> bool {
        matches!(self, Outcome::Miss { .. })
    }

    /// Returns the item carried by a successful outcome.
    pub fn item(&self) -> Option<&CacheItem> {
        match self {
            Outcome::Success { item } => Some(item),
            _ => None,
        }
    }

    pub fn into_item(self) -> Option<CacheItem> {
        match self {
            Outcome::Success { item } => Some(item),
            _ => None,
        }
    }

    /// Short human-readable description of the outcome.
    pub fn describe(&self) -> String {
        match self {
            Outcome::Success { item } => format!("ok: {}", item),
            Outcome::TooLarge { id, size, capacity } => format!(
                "item {} not inserted: size {} exceeds shard capacity {}",
                id, size, capacity
            ),
            Outcome::DuplicateId { id } => {
                format!("item {} not inserted: id already in shard", id)
            }
            Outcome::Miss { id } => format!("cache miss for item {}", id),
        }
    }
}
