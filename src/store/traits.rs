//! Backing-store capability consumed by the read-through cache.
//!
//! The store is the source of truth; the cache only ever reads from it. `set`
//! is part of the contract so write paths can be layered on later, and every
//! conforming store must implement it even though the cache never calls it.

use std::sync::Arc;

/// Access methods for the store a cache sits in front of.
///
/// Implementations take `&self` so a single store can be shared between a
/// cache and other consumers. Interior mutability and any concurrency limits
/// are the store's own business; the cache calls `get` outside its locks.
pub trait BackingStore<K, V> {
    /// Failure raised by the store. Opaque to the cache.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetches the authoritative value for `key`.
    fn get(&self, key: &K) -> Result<V, Self::Error>;

    /// Writes `value` for `key`.
    fn set(&self, key: K, value: V) -> Result<(), Self::Error>;
}

impl<K, V, S> BackingStore<K, V> for Arc<S>
where
    S: BackingStore<K, V> + ?Sized,
{
    type Error = S::Error;

    #[inline]
    fn get(&self, key: &K) -> Result<V, Self::Error> {
        (**self).get(key)
    }

    #[inline]
    fn set(&self, key: K, value: V) -> Result<(), Self::Error> {
        (**self).set(key, value)
    }
}

impl<K, V, S> BackingStore<K, V> for &S
where
    S: BackingStore<K, V> + ?Sized,
{
    type Error = S::Error;

    #[inline]
    fn get(&self, key: &K) -> Result<V, Self::Error> {
        (**self).get(key)
    }

    #[inline]
    fn set(&self, key: K, value: V) -> Result<(), Self::Error> {
        (**self).set(key, value)
    }
}
