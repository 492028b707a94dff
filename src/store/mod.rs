pub mod memory;
pub mod traits;

pub use memory::{MemoryStore, MemoryStoreError};
pub use traits::BackingStore;
