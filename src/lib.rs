//! inline-cache: a read-through LRU cache for arbitrary key-value stores.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod builder;
pub mod ds;
pub mod error;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod policy;
pub mod prelude;
pub mod store;
