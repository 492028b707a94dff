//! Read-through cache counters (feature `metrics`).
//!
//! Counters are relaxed atomics because the cache is shared by reference
//! across threads. They are observational only and never drive behaviour.

pub mod snapshot;

use std::sync::atomic::{AtomicU64, Ordering};

pub use snapshot::ReadThroughMetricsSnapshot;

#[derive(Debug, Default)]
pub struct ReadThroughMetrics {
    get_calls: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    store_errors: AtomicU64,
    inserts: AtomicU64,
    updates: AtomicU64,
    evictions: AtomicU64,
    invalidations: AtomicU64,
}

impl ReadThroughMetrics {
    #[inline]
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_get_call(&self) {
        Self::bump(&self.get_calls);
    }

    #[inline]
    pub fn record_hit(&self) {
        Self::bump(&self.hits);
    }

    #[inline]
    pub fn record_miss(&self) {
        Self::bump(&self.misses);
    }

    #[inline]
    pub fn record_store_error(&self) {
        Self::bump(&self.store_errors);
    }

    #[inline]
    pub fn record_insert(&self) {
        Self::bump(&self.inserts);
    }

    #[inline]
    pub fn record_update(&self) {
        Self::bump(&self.updates);
    }

    #[inline]
    pub fn record_eviction(&self) {
        Self::bump(&self.evictions);
    }

    #[inline]
    pub fn record_invalidation(&self) {
        Self::bump(&self.invalidations);
    }

    /// Copies the counters; gauges are supplied by the caller.
    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> ReadThroughMetricsSnapshot {
        ReadThroughMetricsSnapshot {
            get_calls: self.get_calls.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            store_errors: self.store_errors.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            cache_len,
            capacity,
        }
    }
}
