use std::sync::Arc;
use std::thread;

use super::*;

#[test]
fn test_get_distinguishes_cached_miss_from_absent() {
    let cache = ResolutionCache::new();
    assert_eq!(cache.get("Valencia"), None);

    cache.insert("Valencia", Some(TeamId::from("1")));
    cache.insert("Nowhere Rovers", None);

    assert_eq!(cache.get("Valencia"), Some(Some(TeamId::from("1"))));
    assert_eq!(cache.get("Nowhere Rovers"), Some(None));
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_keys_are_raw_strings() {
    let cache = ResolutionCache::new();
    cache.insert("FC Nantes", Some(TeamId::from("2")));

    assert_eq!(cache.get("fc nantes"), None);
    assert_eq!(cache.get("FC Nantes"), Some(Some(TeamId::from("2"))));
}

#[test]
fn test_counters_track_lookups() {
    let cache = ResolutionCache::new();
    cache.get("a");
    cache.insert("a", None);
    cache.get("a");
    cache.get("a");

    assert_eq!(cache.hits(), 2);
    assert_eq!(cache.misses(), 1);
}

#[test]
fn test_clear_resets_entries_and_counters() {
    let cache = ResolutionCache::new();
    cache.insert("a", Some(TeamId::from("1")));
    cache.get("a");

    cache.clear();

    assert!(cache.is_empty());
    assert_eq!(cache.hits(), 0);
    assert_eq!(cache.misses(), 0);
}

#[test]
fn test_concurrent_writers_same_key() {
    let cache = Arc::new(ResolutionCache::new());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for _ in 0..100 {
                    cache.insert("Valencia", Some(TeamId::from("1")));
                    assert_eq!(cache.get("Valencia"), Some(Some(TeamId::from("1"))));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.hits(), 800);
}
