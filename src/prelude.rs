pub use crate::builder::CacheBuilder;
pub use crate::ds::OrderedMap;
pub use crate::error::{CacheError, ConfigError};
#[cfg(feature = "metrics")]
pub use crate::metrics::ReadThroughMetricsSnapshot;
pub use crate::policy::read_through::ReadThroughCache;
pub use crate::store::{BackingStore, MemoryStore, MemoryStoreError};
