//! Cache construction and configuration.
//!
//! `max_size` is the only setting that changes behaviour. `preallocate`
//! reserves index and list storage up front and has no observable effect
//! beyond avoiding reallocation while the cache warms up.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use inline_cache::builder::CacheBuilder;
//! use inline_cache::store::MemoryStore;
//!
//! let store = Arc::new(MemoryStore::from_iter([(1u64, "one".to_string())]));
//! let cache = CacheBuilder::new(100)
//!     .preallocate(100)
//!     .try_build(Arc::clone(&store))
//!     .unwrap();
//!
//! assert_eq!(cache.get(&1).unwrap(), "one");
//! assert_eq!(store.reads(), 1);
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::read_through::ReadThroughCache;
use crate::store::traits::BackingStore;

/// Upper bound on storage reserved when no explicit `preallocate` is given.
pub const DEFAULT_PREALLOC_LIMIT: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheBuilder {
    max_size: usize,
    preallocate: Option<usize>,
}

impl CacheBuilder {
    /// Starts a builder for a cache holding at most `max_size` entries.
    /// Zero is accepted and means nothing is ever retained.
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            preallocate: None,
        }
    }

    /// Reserves room for `slots` entries at construction.
    pub fn preallocate(mut self, slots: usize) -> Self {
        self.preallocate = Some(slots);
        self
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    fn reserved_slots(&self) -> usize {
        self.preallocate
            .unwrap_or(DEFAULT_PREALLOC_LIMIT)
            .min(self.max_size)
    }

    /// Builds the cache, clamping the preallocation hint to `max_size`.
    pub fn build<K, V, S>(self, store: S) -> ReadThroughCache<K, V, S>
    where
        K: Eq + Hash + Clone,
        V: Clone,
        S: BackingStore<K, V>,
    {
        ReadThroughCache::from_parts(store, self.max_size, self.reserved_slots())
    }

    /// Builds the cache, rejecting a preallocation larger than `max_size`.
    pub fn try_build<K, V, S>(self, store: S) -> Result<ReadThroughCache<K, V, S>, ConfigError>
    where
        K: Eq + Hash + Clone,
        V: Clone,
        S: BackingStore<K, V>,
    {
        match self.preallocate {
            Some(slots) if slots > self.max_size => Err(ConfigError::new(format!(
                "preallocate ({slots}) must not exceed max_size ({})",
                self.max_size
            ))),
            _ => Ok(self.build(store)),
        }
    }
}
