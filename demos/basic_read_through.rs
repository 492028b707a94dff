use std::sync::Arc;

use inline_cache::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let store = Arc::new(MemoryStore::from_iter([
        ("A", "automaton"),
        ("B", "binary"),
        ("C", "cache"),
    ]));
    let cache = ReadThroughCache::new(Arc::clone(&store), 2);

    for key in ["A", "B", "A", "C", "B"] {
        let value = cache.get(&key).unwrap_or("<error>");
        println!("get {key}: {value}");
    }
    println!("resident: {:?}", cache.keys_by_recency());
    println!("store reads: {}", store.reads());

    match cache.get(&"Z") {
        Ok(value) => println!("get Z: {value}"),
        Err(err) => println!("get Z failed: {err}"),
    }
}

// Expected output:
// get A: automaton
// get B: binary
// get A: automaton
// get C: cache
// get B: binary
// resident: ["C", "B"]
// store reads: 4
// get Z failed: backing store error: key not found
//
// Explanation: capacity=2. The hit on A finds the cache full, so A (the least
// recent entry) is evicted and reinserted as most recent. C then evicts B, and
// the second B evicts A.
// Run with RUST_LOG=debug to see misses and evictions.
