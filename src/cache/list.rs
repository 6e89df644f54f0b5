//! Cache List Module
//!
//! One capacity-bounded shard: a singly linked recency list stored in a slot
//! arena. The head is the most recently used item, the tail the least.
//!
//! Links are slot indices rather than references, so splicing and eviction
//! never leave dangling nodes behind. Freed slots are recycled.

use std::fmt;

use tracing::debug;

use crate::cache::{CacheItem, CacheStats, EvictionPolicy, ItemId, Outcome};

// == Node ==
#[derive(Debug, Clone)]
struct Node {
    item: CacheItem,
    /// Slot of the next less recently used node
    next: Option<usize>,
}

fn node_mut(slots: &mut [Option<Node>], idx: usize) -> Option<&mut Node> {
    slots.get_mut(idx).and_then(Option::as_mut)
}

// == Cache List ==
/// A single cache shard with a fixed size budget.
///
/// Invariants held between public calls:
/// - `remaining + Σ size == capacity`
/// - `len()` equals the number of linked nodes
/// - ids are unique within the shard
#[derive(Debug, Clone)]
pub struct CacheList {
    /// Node storage, `None` marks a free slot
    slots: Vec<Option<Node>>,
    /// Indices of free slots available for reuse
    free: Vec<usize>,
    /// Most recently used end
    head: Option<usize>,
    /// Least recently used end
    tail: Option<usize>,
    capacity: u64,
    remaining: u64,
    count: usize,
    stats: CacheStats,
}

impl CacheList {
    // == Constructor ==
    /// Creates an empty shard with the given size budget.
    pub fn new(capacity: u64) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            capacity,
            remaining: capacity,
            count: 0,
            stats: CacheStats::new(),
        }
    }

    // == Insert ==
    /// Inserts an item at the MRU end, evicting per `policy` until it fits.
    ///
    /// Oversize items and duplicate ids are rejected without touching the
    /// shard.
    pub fn insert(&mut self, item: CacheItem, policy: EvictionPolicy) -> Outcome {
        if item.size() > self.capacity {
            debug!(
                "Rejected item {}: size {} exceeds capacity {}",
                item.id(),
                item.size(),
                self.capacity
            );
            self.stats.record_rejection();
            return Outcome::TooLarge {
                id: item.id(),
                size: item.size(),
                capacity: self.capacity,
            };
        }

        if self.locate(item.id()).is_some() {
            debug!("Rejected item {}: id already in shard", item.id());
            self.stats.record_rejection();
            return Outcome::DuplicateId { id: item.id() };
        }

        while self.remaining < item.size() {
            let evicted = match policy {
                EvictionPolicy::Mru => self.evict_mru(),
                EvictionPolicy::Lru => self.evict_lru(),
            };
            if evicted.is_none() {
                break;
            }
        }

        self.push_front(item.clone());
        Outcome::Success { item }
    }

    // == Find ==
    /// Looks up an id and promotes the hit to the MRU end.
    ///
    /// Returns the MRU item after promotion, or `None` on a miss (the shard
    /// is left untouched).
    pub fn find(&mut self, id: ItemId) -> Option<&CacheItem> {
        if self.touch(id) {
            self.stats.record_hit();
            self.front()
        } else {
            self.stats.record_miss();
            None
        }
    }

    // == Update ==
    /// Replaces the item holding `id` with `item` and leaves it at the MRU end.
    ///
    /// A missing `id` is reported as a miss before any other check. The
    /// existing entry is then promoted, and its node receives the new item.
    /// If the new item is bigger, items are evicted from the LRU end until it
    /// fits; the updated entry itself is never evicted.
    pub fn update(&mut self, id: ItemId, item: CacheItem) -> Outcome {
        if self.locate(id).is_none() {
            self.stats.record_miss();
            return Outcome::Miss { id };
        }

        if item.size() > self.capacity {
            self.stats.record_rejection();
            return Outcome::TooLarge {
                id: item.id(),
                size: item.size(),
                capacity: self.capacity,
            };
        }

        if item.id() != id && self.locate(item.id()).is_some() {
            self.stats.record_rejection();
            return Outcome::DuplicateId { id: item.id() };
        }

        // Present, so the promoted entry is now the head
        self.touch(id);
        let Some(node) = self.head.and_then(|head| node_mut(&mut self.slots, head)) else {
            self.stats.record_miss();
            return Outcome::Miss { id };
        };
        let old = std::mem::replace(&mut node.item, item.clone());
        self.remaining += old.size();
        self.stats.record_hit();

        // The head alone always fits: its new size is within capacity.
        while self.remaining < item.size() && self.tail != self.head {
            if self.evict_lru().is_none() {
                break;
            }
        }
        self.remaining -= item.size();

        Outcome::Success { item }
    }

    // == Evict MRU ==
    /// Removes and returns the most recently used item.
    pub fn evict_mru(&mut self) -> Option<CacheItem> {
        let head = self.head?;
        let node = self.release(head)?;

        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }

        self.account_eviction(&node.item, EvictionPolicy::Mru);
        Some(node.item)
    }

    // == Evict LRU ==
    /// Removes and returns the least recently used item.
    ///
    /// The list is singly linked, so the new tail is found by walking from
    /// the head.
    pub fn evict_lru(&mut self) -> Option<CacheItem> {
        let tail = self.tail?;
        let prev = self.predecessor(tail);
        let node = self.release(tail)?;

        match prev {
            Some(prev) => {
                if let Some(prev_node) = node_mut(&mut self.slots, prev) {
                    prev_node.next = None;
                }
                self.tail = Some(prev);
            }
            None => {
                self.head = None;
                self.tail = None;
            }
        }

        self.account_eviction(&node.item, EvictionPolicy::Lru);
        Some(node.item)
    }

    // == Clear ==
    /// Drops every item and restores the full size budget.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.count = 0;
        self.remaining = self.capacity;
    }

    // == Accessors ==
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Size budget not used by held items.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Number of held items.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Checks for an id without promoting it.
    pub fn contains(&self, id: ItemId) -> bool {
        self.locate(id).is_some()
    }

    /// Most recently used item.
    pub fn front(&self) -> Option<&CacheItem> {
        self.head.and_then(|idx| self.node(idx)).map(|n| &n.item)
    }

    /// Least recently used item.
    pub fn back(&self) -> Option<&CacheItem> {
        self.tail.and_then(|idx| self.node(idx)).map(|n| &n.item)
    }

    /// Iterates items from the MRU end to the LRU end.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: &self.slots,
            cursor: self.head,
        }
    }

    /// Returns current shard statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.count);
        stats
    }

    // == Internals ==
    fn node(&self, idx: usize) -> Option<&Node> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    /// Finds the node holding `id`, returning `(predecessor, slot)`.
    fn locate(&self, id: ItemId) -> Option<(Option<usize>, usize)> {
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let node = self.node(idx)?;
            if node.item.id() == id {
                return Some((prev, idx));
            }
            prev = Some(idx);
            cursor = node.next;
        }
        None
    }

    fn predecessor(&self, target: usize) -> Option<usize> {
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let node = self.node(idx)?;
            if node.next == Some(target) {
                return Some(idx);
            }
            cursor = node.next;
        }
        None
    }

    /// Moves the node holding `id` to the head. Returns false on a miss.
    fn touch(&mut self, id: ItemId) -> bool {
        let Some((prev, idx)) = self.locate(id) else {
            return false;
        };
        // Already at the head
        let Some(prev) = prev else {
            return true;
        };

        let next = self.node(idx).and_then(|n| n.next);
        if let Some(prev_node) = node_mut(&mut self.slots, prev) {
            prev_node.next = next;
        }
        if self.tail == Some(idx) {
            self.tail = Some(prev);
        }
        if let Some(node) = node_mut(&mut self.slots, idx) {
            node.next = self.head;
        }
        self.head = Some(idx);
        true
    }

    fn push_front(&mut self, item: CacheItem) {
        let size = item.size();
        let node = Node {
            item,
            next: self.head,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
        self.count += 1;
        self.remaining -= size;
    }

    fn release(&mut self, idx: usize) -> Option<Node> {
        let node = self.slots.get_mut(idx)?.take()?;
        self.free.push(idx);
        Some(node)
    }

    fn account_eviction(&mut self, item: &CacheItem, end: EvictionPolicy) {
        self.remaining += item.size();
        self.count -= 1;
        self.stats.record_eviction();
        debug!(
            "Evicted item {} (size {}) from {} end, remaining {}",
            item.id(),
            item.size(),
            end,
            self.remaining
        );
    }
}

// == Iterator ==
/// Iterator over a shard's items, most recently used first.
pub struct Iter<'a> {
    slots: &'a [Option<Node>],
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a CacheItem;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = self.slots.get(idx)?.as_ref()?;
        self.cursor = node.next;
        Some(&node.item)
    }
}

impl<'a> IntoIterator for &'a CacheList {
    type Item = &'a CacheItem;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for CacheList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "REMAINING SPACE: {}", self.remaining)?;
        writeln!(f, "ITEMS: {}", self.count)?;
        writeln!(f, "LIST:")?;
        for item in self.iter() {
            writeln!(f, "[{}]", item)?;
        }
        Ok(())
    }
}
