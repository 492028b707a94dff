//! Error types for the inline-cache library.
//!
//! ## Key Components
//!
//! - [`CacheError`]: Returned by [`ReadThroughCache::get`] when the backing
//!   store fails on a miss. Wraps the store's own error as its `source`.
//! - [`ConfigError`]: Returned when builder parameters are inconsistent
//!   (e.g. preallocating more slots than the cache may ever hold).
//!
//! ## Example Usage
//!
//! ```
//! use inline_cache::builder::CacheBuilder;
//! use inline_cache::error::ConfigError;
//! use inline_cache::store::MemoryStore;
//!
//! let store: MemoryStore<u64, String> = MemoryStore::new();
//! let err: ConfigError = CacheBuilder::new(4).preallocate(8).try_build(store).unwrap_err();
//! assert!(err.to_string().contains("preallocate"));
//! ```
//!
//! [`ReadThroughCache::get`]: crate::policy::read_through::ReadThroughCache::get

use thiserror::Error;

/// Error returned by a cache lookup.
///
/// Only the miss path can fail. The cache adds context and keeps the store's
/// error reachable through [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum CacheError<E>
where
    E: std::error::Error + 'static,
{
    /// The backing store failed to produce a value for a missing key.
    #[error("backing store error: {0}")]
    BackingStore(#[source] E),
}

impl<E> CacheError<E>
where
    E: std::error::Error + 'static,
{
    /// Returns the underlying backing-store error.
    pub fn store_error(&self) -> &E {
        match self {
            CacheError::BackingStore(err) => err,
        }
    }

    /// Consumes the error, returning the underlying backing-store error.
    pub fn into_store_error(self) -> E {
        match self {
            CacheError::BackingStore(err) => err,
        }
    }
}

/// Error returned when cache configuration parameters are invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
