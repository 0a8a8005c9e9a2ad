//! Bounded map with insertion-order eviction

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// Map holding at most `capacity` entries; on overflow the entry inserted
/// earliest is removed. Reads never change eviction order.
#[derive(Debug, Clone)]
pub struct FifoCache<K, V> {
    capacity: usize,
    entries: HashMap<K, V>,
    order: VecDeque<K>,
}

impl<K, V> FifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create a cache; a zero capacity is treated as one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);

        Self {
            capacity,
            entries: HashMap::with_capacity(capacity + 1),
            order: VecDeque::with_capacity(capacity + 1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert a value and return the entries evicted to stay within capacity.
    ///
    /// Replacing the value of a present key keeps its original position.
    pub fn insert(&mut self, key: K, value: V) -> Vec<(K, V)> {
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = value;
            return Vec::new();
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, value);

        let mut evicted = Vec::new();

        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };

            if let Some(value) = self.entries.remove(&oldest) {
                evicted.push((oldest, value));
            }
        }

        evicted
    }

    /// Remove everything, returning how many entries were dropped
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.order.clear();
        count
    }

    /// Entries from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.order
            .iter()
            .filter_map(|k| self.entries.get_key_value(k))
    }
}
