//! LRU Tracker Module
//!
//! Access-order bookkeeping for capacity eviction in the memory store.

use std::collections::{BTreeMap, HashMap, HashSet};

// == LRU Tracker ==
/// Tracks key access order with monotonically increasing access stamps.
///
/// `order` maps stamp -> key, so its first entry is the least recently used key.
/// Touch, remove and eviction are all `O(log n)`.
#[derive(Debug, Default)]
pub struct LruTracker {
    stamps: HashMap<String, u64>,
    order: BTreeMap<u64, String>,
    next_stamp: u64,
}

impl LruTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used.
    pub fn touch(&mut self, key: &str) {
        let stamp = self.next_stamp;
        self.next_stamp += 1;

        if let Some(previous) = self.stamps.insert(key.to_string(), stamp) {
            self.order.remove(&previous);
        }
        self.order.insert(stamp, key.to_string());
    }

    // == Remove ==
    pub fn remove(&mut self, key: &str) {
        if let Some(stamp) = self.stamps.remove(key) {
            self.order.remove(&stamp);
        }
    }

    /// Removes several keys.
    pub fn remove_all(&mut self, keys: &HashSet<String>) {
        for key in keys {
            self.remove(key);
        }
    }

    // == Evict Oldest ==
    /// Pops the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.stamps.remove(&key);
        Some(key)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }
}
