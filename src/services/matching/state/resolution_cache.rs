use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::services::matching::models::types::TeamId;

/// Resolution cache keyed by the raw, unnormalized query string.
///
/// Stores misses as `None` so a name that failed once is not re-resolved.
/// No TTL; entries only go away through `clear`. Concurrent writers for the
/// same key race harmlessly since every writer computes the same value.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    store: RwLock<HashMap<String, Option<TeamId>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a raw query. The outer `Option` is "cached or not".
    pub fn get(&self, raw: &str) -> Option<Option<TeamId>> {
        let cached = self.read().get(raw).cloned();
        match cached {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        cached
    }

    pub fn insert(&self, raw: &str, resolved: Option<TeamId>) {
        self.write().insert(raw.to_string(), resolved);
    }

    /// Drop every entry and reset the hit/miss counters.
    pub fn clear(&self) {
        self.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    // A poisoned lock still holds a consistent map: inserts are single calls.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Option<TeamId>>> {
        self.store.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Option<TeamId>>> {
        self.store.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
#[path = "../tests/state/resolution_cache_tests.rs"]
mod tests;
