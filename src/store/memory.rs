//! In-memory [`BackingStore`].
//!
//! A `parking_lot::RwLock` around an `FxHashMap`. Missing keys are reported as
//! [`MemoryStoreError::NotFound`]. Read and write counters make it convenient
//! for checking how often a cache actually reaches its store.
//!
//! ```
//! use inline_cache::store::{BackingStore, MemoryStore};
//!
//! let store = MemoryStore::from_iter([("A", "automaton")]);
//! assert_eq!(store.get(&"A").unwrap(), "automaton");
//! assert!(store.get(&"Z").is_err());
//! assert_eq!(store.reads(), 2);
//! ```

use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::store::traits::BackingStore;

/// Failure returned by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryStoreError {
    #[error("key not found")]
    NotFound,
}

pub struct MemoryStore<K, V> {
    entries: RwLock<FxHashMap<K, V>>,
    reads: AtomicU64,
    writes: AtomicU64,
}

impl<K, V> MemoryStore<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(FxHashMap::default()),
            reads: AtomicU64::new(0),
            writes: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Number of `get` calls served so far, including failed ones.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Number of `set` calls served so far.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }
}

impl<K, V> BackingStore<K, V> for MemoryStore<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    type Error = MemoryStoreError;

    fn get(&self, key: &K) -> Result<V, Self::Error> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.entries
            .read()
            .get(key)
            .cloned()
            .ok_or(MemoryStoreError::NotFound)
    }

    fn set(&self, key: K, value: V) -> Result<(), Self::Error> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.entries.write().insert(key, value);
        Ok(())
    }
}

impl<K, V> Default for MemoryStore<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryStore<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let store = Self::new();
        store.entries.write().extend(iter);
        store
    }
}

impl<K, V> fmt::Debug for MemoryStore<K, V>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("len", &self.len())
            .field("reads", &self.reads())
            .field("writes", &self.writes())
            .finish()
    }
}
