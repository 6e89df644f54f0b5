//! Cache Item Module
//!
//! Defines the immutable value object stored in a shard.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an item, unique within a single shard.
pub type ItemId = u64;

// == Cache Item ==
/// A single cached object with its routing header and size cost.
///
/// Items are never mutated once built; replacing cached content means
/// building a new item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheItem {
    /// Identifier, unique within its shard
    id: ItemId,
    /// Capacity cost charged against the shard
    size: u64,
    /// Routing header, only used to pick a shard
    header: String,
    /// Opaque content
    #[serde(default)]
    payload: String,
}

impl CacheItem {
    // == Constructor ==
    /// Creates a new cache item.
    ///
    /// # Arguments
    /// * `id` - Identifier, unique within the target shard
    /// * `size` - Capacity cost of the item
    /// * `header` - Header used to compute the routing shard
    /// * `payload` - Content stored alongside, never inspected
    pub fn new(
        id: ItemId,
        size: u64,
        header: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            id,
            size,
            header: header.into(),
            payload: payload.into(),
        }
    }

    /// Creates a zero-size item with an empty payload, suitable as a lookup key.
    pub fn key(id: ItemId, header: impl Into<String>) -> Self {
        Self::new(id, 0, header, String::new())
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }
}

impl fmt::Display for CacheItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id: {} size: {} header: {} payload: {}",
            self.id, self.size, self.header, self.payload
        )
    }
}
