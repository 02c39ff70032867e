//! Recency List Module
//!
//! Ordered list of keys by last touch, used to pick eviction victims.

use std::collections::VecDeque;

// == Recency List ==
/// Keys ordered by recency of last successful access.
///
/// Front = least recently used (next eviction victim),
/// back = most recently used.
#[derive(Debug, Default)]
pub struct RecencyList {
    order: VecDeque<String>,
}

impl RecencyList {
    // == Constructor ==
    /// Creates an empty recency list.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Promote ==
    /// Moves a key to the most-recently-used position, inserting it if absent.
    pub fn promote(&mut self, key: &str) {
        self.remove(key);
        self.order.push_back(key.to_string());
    }

    // == Remove ==
    /// Drops a key from the list. A key that is not present is a no-op.
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Pop LRU ==
    /// Removes and returns the least-recently-used key, if any.
    pub fn pop_lru(&mut self) -> Option<String> {
        self.order.pop_front()
    }

    // == Peek LRU ==
    /// Returns the least-recently-used key without removing it.
    pub fn peek_lru(&self) -> Option<&str> {
        self.order.front().map(String::as_str)
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Contains ==
    /// Checks whether a key is tracked.
    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }
}
