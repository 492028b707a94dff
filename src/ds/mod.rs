pub mod ordered_map;
pub mod recency_list;

pub use ordered_map::OrderedMap;
pub use recency_list::{NodeId, RecencyList};
