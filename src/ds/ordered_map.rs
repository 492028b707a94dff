//! Recency-ordered key/value map.
//!
//! ## Architecture
//!
//! ```text
//!   OrderedMap<K, V>
//!   └── Mutex<Inner<K, V>>
//!       ├── index: FxHashMap<K, NodeId>
//!       └── order: RecencyList<Entry<K, V>>
//!
//!       front (least recent)                     back (most recent)
//!       [A, "automaton"] ◄──► [B, "binary"] ◄──► [C, "cache"]
//! ```
//!
//! Entries are typed over `K` and `V`, so eviction never has to check the
//! shape of a node at runtime.
//!
//! ## Operations
//!
//! | Method                | Complexity | Reorders |
//! |-----------------------|------------|----------|
//! | `get`                 | O(1)       | no       |
//! | `put_most_recent`     | O(1)       | yes      |
//! | `evict_least_recent`  | O(1)       | -        |
//! | `remove`              | O(1)       | -        |
//! | `len`                 | O(1)       | no       |
//! | `keys_by_recency`     | O(n)       | no       |
//!
//! ## Thread Safety
//!
//! Every method takes the internal `parking_lot::Mutex` for its whole body.
//! A single call is never observed half-applied, but nothing is promised
//! across a sequence of calls.

use std::fmt;
use std::hash::Hash;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::ds::recency_list::{NodeId, RecencyList};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

struct Inner<K, V> {
    index: FxHashMap<K, NodeId>,
    order: RecencyList<Entry<K, V>>,
}

impl<K, V> Inner<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_front(&mut self) -> Option<(K, V)> {
        let Entry { key, value } = self.order.pop_front()?;
        self.index.remove(&key);
        Some((key, value))
    }
}

/// Key/value map that also tracks the order in which keys were last promoted.
///
/// # Example
///
/// ```
/// use inline_cache::ds::OrderedMap;
///
/// let map = OrderedMap::new();
/// map.put_most_recent("A", "automaton");
/// map.put_most_recent("B", "binary");
/// map.put_most_recent("A", "automata");
///
/// assert_eq!(map.get(&"A"), Some("automata"));
/// assert_eq!(map.evict_least_recent(), Some(("B", "binary")));
/// assert_eq!(map.len(), 1);
/// ```
pub struct OrderedMap<K, V> {
    inner: Mutex<Inner<K, V>>,
}

impl<K, V> OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
                order: RecencyList::with_capacity(capacity),
            }),
        }
    }

    /// Number of resident entries.
    pub fn len(&self) -> usize {
        self.inner.lock().index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().index.contains_key(key)
    }

    /// Returns a copy of the value for `key` without touching recency order.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let inner = self.inner.lock();
        let id = *inner.index.get(key)?;
        inner.order.get(id).map(|entry| entry.value.clone())
    }

    /// Inserts or updates `key` and makes it the most recent entry.
    ///
    /// Returns the value it replaced, if the key was already resident.
    pub fn put_most_recent(&self, key: K, value: V) -> Option<V> {
        let mut inner = self.inner.lock();
        if let Some(&id) = inner.index.get(&key) {
            let previous = inner
                .order
                .get_mut(id)
                .map(|entry| std::mem::replace(&mut entry.value, value));
            inner.order.move_to_back(id);
            return previous;
        }

        let id = inner.order.push_back(Entry {
            key: key.clone(),
            value,
        });
        inner.index.insert(key, id);
        None
    }

    /// Removes and returns the least recently promoted entry, or `None` when
    /// the map is empty.
    pub fn evict_least_recent(&self) -> Option<(K, V)> {
        self.inner.lock().pop_front()
    }

    /// Returns the entry that `evict_least_recent` would remove next.
    pub fn peek_least_recent(&self) -> Option<(K, V)>
    where
        V: Clone,
    {
        let inner = self.inner.lock();
        inner
            .order
            .front()
            .map(|entry| (entry.key.clone(), entry.value.clone()))
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.lock();
        let id = inner.index.remove(key)?;
        inner.order.remove(id).map(|entry| entry.value)
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.index.clear();
        inner.order.clear();
    }

    /// Snapshot of resident keys, least recent first.
    pub fn keys_by_recency(&self) -> Vec<K> {
        let inner = self.inner.lock();
        inner.order.iter().map(|entry| entry.key.clone()).collect()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let inner = self.inner.lock();
        inner.order.debug_validate_invariants();
        assert_eq!(inner.index.len(), inner.order.len());
        for (key, &id) in &inner.index {
            let Some(entry) = inner.order.get(id) else {
                panic!("indexed node missing from recency list");
            };
            assert!(entry.key == *key, "index points at an entry with another key");
        }

        // The tail holds the most recently promoted key.
        let newest = inner.order.iter().last().map(|entry| &entry.key);
        let tail = inner.order.back().map(|entry| &entry.key);
        assert!(newest == tail, "tail is not the last entry in recency order");
        if let Some(key) = tail {
            let id = inner.index.get(key).copied();
            assert!(
                id.and_then(|id| inner.order.get(id)).is_some_and(|e| e.key == *key),
                "tail entry is not indexed"
            );
        }
    }
}

impl<K, V> Default for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedMap")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
