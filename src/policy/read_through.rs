//! # Read-Through LRU Cache
//!
//! Fronts a [`BackingStore`] with a bounded, recency-ordered set of resident
//! entries.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │                 ReadThroughCache<K, V, S>                     │
//!   │                                                               │
//!   │   entries: OrderedMap<K, V>      (own lock per operation)     │
//!   │   max_size: usize                (fixed at construction)      │
//!   │   store: S: BackingStore<K, V>   (called outside any lock)    │
//!   └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lookup Flow
//!
//! ```text
//!   get(key)
//!     1. entries.get(key)                   no promotion
//!     2. hit  -> candidate = cached value
//!        miss -> candidate = store.get(key)
//!                on Err: return CacheError, entries untouched
//!     3. while entries.len() >= max_size: evict_least_recent()
//!     4. entries.put_most_recent(key, candidate)
//!     5. return candidate
//! ```
//!
//! Steps 3 and 4 run on hits as well as misses, so recency follows the order
//! of accesses rather than the order of insertions. A hit on a full cache
//! therefore makes room first: if the hit key was itself least recent it is
//! evicted and immediately reinserted at the most recent end.
//!
//! ## Capacity Zero
//!
//! `max_size == 0` retains nothing. Every `get` goes to the store and the
//! fetched value is returned without being inserted, so `len()` stays 0.
//!
//! ## Concurrency Model
//!
//! Each `OrderedMap` call is atomic; `get` as a whole is not.
//!
//! - Overlapping gets for different keys can interleave their eviction and
//!   promotion steps, so `len()` may briefly exceed `max_size` while calls are
//!   in flight. The next non-overlapping `get` brings it back under the bound.
//! - Overlapping gets for the same missing key each call the store; the later
//!   promotion's value wins. There is no request coalescing.
//! - The store call holds no cache lock, so its own concurrency limits apply.
//!
//! ## Example Usage
//!
//! ```
//! use inline_cache::policy::read_through::ReadThroughCache;
//! use inline_cache::store::MemoryStore;
//!
//! let store = MemoryStore::from_iter([("A", "automaton"), ("B", "binary")]);
//! let cache = ReadThroughCache::new(store, 1);
//!
//! assert_eq!(cache.get(&"A").unwrap(), "automaton"); // miss
//! assert_eq!(cache.get(&"A").unwrap(), "automaton"); // hit
//! assert_eq!(cache.store().reads(), 1);
//!
//! assert_eq!(cache.get(&"B").unwrap(), "binary"); // evicts A
//! assert!(!cache.contains(&"A"));
//!
//! let err = cache.get(&"Z").unwrap_err();
//! assert_eq!(err.to_string(), "backing store error: key not found");
//! ```

use std::fmt;
use std::hash::Hash;

use tracing::{debug, trace, warn};

use crate::builder::CacheBuilder;
use crate::ds::ordered_map::OrderedMap;
use crate::error::CacheError;
#[cfg(feature = "metrics")]
use crate::metrics::{ReadThroughMetrics, ReadThroughMetricsSnapshot};
use crate::store::traits::BackingStore;

/// Read-through cache with least-recently-used replacement.
pub struct ReadThroughCache<K, V, S> {
    entries: OrderedMap<K, V>,
    max_size: usize,
    store: S,
    #[cfg(feature = "metrics")]
    metrics: ReadThroughMetrics,
}

impl<K, V, S> ReadThroughCache<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BackingStore<K, V>,
{
    /// Creates a cache holding at most `max_size` entries in front of `store`.
    ///
    /// Shorthand for `CacheBuilder::new(max_size).build(store)`. Pass an
    /// `Arc<S>` to keep using the store elsewhere.
    pub fn new(store: S, max_size: usize) -> Self {
        CacheBuilder::new(max_size).build(store)
    }

    pub(crate) fn from_parts(store: S, max_size: usize, preallocate: usize) -> Self {
        Self {
            entries: OrderedMap::with_capacity(preallocate),
            max_size,
            store,
            #[cfg(feature = "metrics")]
            metrics: ReadThroughMetrics::default(),
        }
    }

    /// Returns the value for `key`, from memory if resident, otherwise from
    /// the backing store.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::BackingStore`] when `key` is not resident and the
    /// store fails. Resident entries and their order are left as they were.
    pub fn get(&self, key: &K) -> Result<V, CacheError<S::Error>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_get_call();

        let value = match self.entries.get(key) {
            Some(value) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_hit();
                trace!("cache hit");
                value
            },
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_miss();
                debug!(max_size = self.max_size, "cache miss, reading backing store");

                match self.store.get(key) {
                    Ok(value) => value,
                    Err(err) => {
                        #[cfg(feature = "metrics")]
                        self.metrics.record_store_error();
                        warn!(error = %err, "backing store read failed");
                        return Err(CacheError::BackingStore(err));
                    },
                }
            },
        };

        if self.max_size == 0 {
            return Ok(value);
        }

        self.make_room();
        self.promote(key.clone(), value.clone());
        Ok(value)
    }

    /// Returns the resident value for `key` without promoting it or touching
    /// the store.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.entries.get(key)
    }

    /// Drops `key` so the next `get` reads the store again.
    pub fn invalidate(&self, key: &K) -> Option<V> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_invalidation();
            trace!("invalidated cache entry");
        }
        removed
    }

    /// Resident keys, least recently used first.
    pub fn keys_by_recency(&self) -> Vec<K> {
        self.entries.keys_by_recency()
    }

    fn make_room(&self) {
        while self.entries.len() >= self.max_size {
            if self.entries.evict_least_recent().is_none() {
                break;
            }
            #[cfg(feature = "metrics")]
            self.metrics.record_eviction();
            debug!(
                len = self.entries.len(),
                max_size = self.max_size,
                "evicted least recently used entry"
            );
        }
    }

    fn promote(&self, key: K, value: V) {
        let replaced = self.entries.put_most_recent(key, value).is_some();
        #[cfg(feature = "metrics")]
        {
            if replaced {
                self.metrics.record_update();
            } else {
                self.metrics.record_insert();
            }
        }
        trace!(replaced, "promoted entry to most recent");
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.entries.debug_validate_invariants();
    }
}

impl<K, V, S> ReadThroughCache<K, V, S>
where
    K: Eq + Hash + Clone,
{
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of resident entries.
    pub fn capacity(&self) -> usize {
        self.max_size
    }

    /// Drops every resident entry. The store is not touched.
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(feature = "metrics")]
impl<K, V, S> ReadThroughCache<K, V, S>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> ReadThroughMetricsSnapshot {
        self.metrics.snapshot(self.entries.len(), self.max_size)
    }
}

impl<K, V, S> fmt::Debug for ReadThroughCache<K, V, S>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadThroughCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}
