// ==============================================
// READ-THROUGH SCENARIO TESTS (integration)
// ==============================================
//
// Drives the cache against a scripted store that records every call, so each
// scenario can assert exactly which lookups reached the store.

use std::collections::HashMap;

use inline_cache::prelude::*;
use parking_lot::Mutex;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
struct ScriptedError(&'static str);

/// Store with fixed answers and a log of every `get`.
#[derive(Default)]
struct RecordingStore {
    answers: HashMap<&'static str, Result<&'static str, ScriptedError>>,
    calls: Mutex<Vec<&'static str>>,
}

impl RecordingStore {
    fn words() -> Self {
        Self::default()
            .answer("A", "automaton")
            .answer("B", "binary")
            .answer("C", "cache")
            .answer("D", "data")
    }

    fn answer(mut self, key: &'static str, value: &'static str) -> Self {
        self.answers.insert(key, Ok(value));
        self
    }

    fn fail(mut self, key: &'static str, reason: &'static str) -> Self {
        self.answers.insert(key, Err(ScriptedError(reason)));
        self
    }

    fn calls_for(&self, key: &str) -> usize {
        self.calls.lock().iter().filter(|k| **k == key).count()
    }

    fn total_calls(&self) -> usize {
        self.calls.lock().len()
    }
}

impl BackingStore<&'static str, &'static str> for RecordingStore {
    type Error = ScriptedError;

    fn get(&self, key: &&'static str) -> Result<&'static str, Self::Error> {
        self.calls.lock().push(*key);
        self.answers
            .get(key)
            .cloned()
            .unwrap_or(Err(ScriptedError("unknown key")))
    }

    fn set(&self, _key: &'static str, _value: &'static str) -> Result<(), Self::Error> {
        Err(ScriptedError("read-only"))
    }
}

struct Scenario {
    name: &'static str,
    history: &'static [&'static str],
    key: &'static str,
    size: usize,
    want: Result<&'static str, &'static str>,
    store_calls_for_key: usize,
    resident_after: usize,
}

fn run(store: RecordingStore, scenario: &Scenario) {
    let cache = ReadThroughCache::new(store, scenario.size);
    for key in scenario.history {
        cache.get(key).unwrap();
    }

    let got = cache.get(&scenario.key).map_err(|err| err.to_string());
    match scenario.want {
        Ok(want) => assert_eq!(got.as_deref(), Ok(want), "{}", scenario.name),
        Err(want) => {
            let err = got.expect_err(scenario.name);
            assert!(err.contains(want), "{}: {err}", scenario.name);
        },
    }

    assert_eq!(
        cache.store().calls_for(scenario.key),
        scenario.store_calls_for_key,
        "{}",
        scenario.name
    );
    assert_eq!(cache.len(), scenario.resident_after, "{}", scenario.name);
}

mod table {
    use super::*;

    #[test]
    fn miss() {
        run(
            RecordingStore::words(),
            &Scenario {
                name: "miss",
                history: &[],
                key: "A",
                size: 4,
                want: Ok("automaton"),
                store_calls_for_key: 1,
                resident_after: 1,
            },
        );
    }

    #[test]
    fn miss_failure() {
        run(
            RecordingStore::default().fail("A", "failure"),
            &Scenario {
                name: "miss failure",
                history: &[],
                key: "A",
                size: 4,
                want: Err("backing store error: failure"),
                store_calls_for_key: 1,
                resident_after: 0,
            },
        );
    }

    #[test]
    fn hit() {
        run(
            RecordingStore::words(),
            &Scenario {
                name: "hit",
                history: &["A"],
                key: "A",
                size: 4,
                want: Ok("automaton"),
                store_calls_for_key: 1,
                resident_after: 1,
            },
        );
    }

    #[test]
    fn evicted_then_refetched() {
        run(
            RecordingStore::words(),
            &Scenario {
                name: "evicted",
                history: &["A", "B", "C", "D"],
                key: "A",
                size: 3,
                want: Ok("automaton"),
                store_calls_for_key: 2,
                resident_after: 3,
            },
        );
    }
}

mod properties {
    use super::*;

    #[test]
    fn failed_miss_is_refetched_not_served_from_cache() {
        let cache = ReadThroughCache::new(RecordingStore::default().fail("A", "failure"), 4);

        assert!(cache.get(&"A").is_err());
        assert!(cache.get(&"A").is_err());
        assert_eq!(cache.store().calls_for("A"), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn failure_keeps_existing_order() {
        let store = RecordingStore::words().fail("E", "failure");
        let cache = ReadThroughCache::new(store, 2);
        cache.get(&"A").unwrap();
        cache.get(&"B").unwrap();

        let err = cache.get(&"E").unwrap_err();
        assert_eq!(err.store_error(), &ScriptedError("failure"));
        assert_eq!(cache.keys_by_recency(), vec!["A", "B"]);
    }

    #[test]
    fn repeated_access_is_idempotent() {
        let cache = ReadThroughCache::new(RecordingStore::words(), 2);
        for _ in 0..10 {
            assert_eq!(cache.get(&"C").unwrap(), "cache");
        }
        assert_eq!(cache.store().total_calls(), 1);
    }

    #[test]
    fn evicts_least_recently_accessed_not_least_recently_inserted() {
        let cache = ReadThroughCache::new(RecordingStore::words(), 3);
        for key in ["A", "B", "C", "A"] {
            cache.get(&key).unwrap();
        }

        cache.get(&"D").unwrap();

        assert!(cache.contains(&"A"));
        assert!(!cache.contains(&"B"));
        assert!(cache.contains(&"C"));
        assert!(cache.contains(&"D"));
    }

    #[test]
    fn zero_capacity_always_reaches_store() {
        let cache = ReadThroughCache::new(RecordingStore::words(), 0);
        for _ in 0..3 {
            assert_eq!(cache.get(&"B").unwrap(), "binary");
            assert_eq!(cache.len(), 0);
        }
        assert_eq!(cache.store().calls_for("B"), 3);
    }

    #[test]
    fn cache_never_writes_to_store() {
        // `set` fails for this store; the read path must never hit it.
        let cache = ReadThroughCache::new(RecordingStore::words(), 1);
        for key in ["A", "B", "A", "C", "D"] {
            cache.get(&key).unwrap();
        }
        assert_eq!(cache.store().total_calls(), 5);
    }
}
