//! Cache Store Module
//!
//! Read-through cache engine: a HashMap of TTL-stamped entries plus a table of
//! in-flight loads, so that concurrent misses on one key share a single loader
//! call.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Mutex as FlightLock;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStats, Ttl};
use crate::error::CacheError;

// == Cache State ==
/// Everything guarded by the cache's single mutex.
#[derive(Debug)]
struct CacheState<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Per-key markers for loads that are currently running
    in_flight: HashMap<String, Arc<FlightLock<()>>>,
    /// Performance statistics
    stats: CacheStats,
}

impl<V: Clone> CacheState<V> {
    /// Returns the live value for `key`, dropping it first if it has expired.
    fn lookup(&mut self, key: &str, now: Instant) -> Option<V> {
        let entry = self.entries.get(key)?;
        if !entry.is_expired_at(now) {
            return Some(entry.value.clone());
        }

        self.entries.remove(key);
        self.stats.record_expirations(1);
        None
    }
}

// == TTL Cache ==
/// Read-through cache with a fixed TTL and single-flight loading.
///
/// When several callers miss on the same key at once, exactly one of them
/// runs the loader; the rest wait for it to publish and then read the stored
/// value. A failed load is handed back to the caller that ran it and nothing
/// is stored, so the next waiter (if any) retries the load itself.
///
/// The internal mutex is only held for map operations, never while a loader
/// runs.
#[derive(Debug)]
pub struct TtlCache<V> {
    /// TTL applied to every write
    ttl: Ttl,
    state: Mutex<CacheState<V>>,
}

impl<V: Clone> TtlCache<V> {
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// A zero-length finite TTL is rejected; use a positive duration or
    /// `Ttl::Never`.
    pub fn new(ttl: Ttl) -> Result<Self, CacheError> {
        if ttl == Ttl::After(std::time::Duration::ZERO) {
            return Err(CacheError::InvalidTtl(
                "TTL must be a positive duration or Ttl::Never".to_string(),
            ));
        }

        Ok(Self {
            ttl,
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                in_flight: HashMap::new(),
                stats: CacheStats::new(),
            }),
        })
    }

    /// TTL applied to every write.
    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    // == Set ==
    /// Stores a value, replacing any previous entry and restarting its TTL.
    pub fn set(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let entry = CacheEntry::new(value, self.ttl, Instant::now());
        self.state.lock().entries.insert(key, entry);
    }

    // == Get ==
    /// Returns the live value for `key`, loading it on a miss.
    ///
    /// The boolean is `true` when the value came from the store (including
    /// when this caller waited for a concurrent load of the same key) and
    /// `false` when this caller ran `loader` itself. Loader errors are
    /// returned unchanged and never cached.
    ///
    /// Dropping the returned future while it waits or loads releases the
    /// key's in-flight marker; a waiting caller then takes over the load.
    pub async fn get<F, Fut, E>(&self, key: &str, loader: F) -> Result<(V, bool), E>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let marker = {
            let mut state = self.state.lock();
            if let Some(value) = state.lookup(key, Instant::now()) {
                state.stats.record_hit();
                debug!(key, "cache hit");
                return Ok((value, true));
            }
            state
                .in_flight
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(FlightLock::new(())))
                .clone()
        };

        let flight = Flight {
            state: &self.state,
            key,
            marker,
        };
        let _permit = flight.marker.lock().await;

        // Whoever held the marker before us may have published already.
        let published = {
            let mut state = self.state.lock();
            let value = state.lookup(key, Instant::now());
            if value.is_some() {
                state.stats.record_hit();
            } else {
                state.stats.record_miss();
            }
            value
        };
        if let Some(value) = published {
            debug!(key, "cache hit after waiting on in-flight load");
            return Ok((value, true));
        }

        debug!(key, "cache miss, invoking loader");
        match loader(key.to_string()).await {
            Ok(value) => {
                self.set(key, value.clone());
                Ok((value, false))
            }
            Err(err) => {
                self.state.lock().stats.record_load_error();
                warn!(key, "loader failed, nothing cached");
                Err(err)
            }
        }
    }

    // == Delete Expired ==
    /// Removes every entry whose TTL has elapsed.
    ///
    /// Returns the number of entries removed.
    pub fn delete_expired(&self) -> usize {
        let now = Instant::now();
        let mut state = self.state.lock();

        let before = state.entries.len();
        state.entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - state.entries.len();

        state.stats.record_expirations(removed);
        removed
    }

    // == Clear ==
    /// Removes all entries at once.
    ///
    /// Loads already in flight are unaffected and will publish their result.
    pub fn clear(&self) {
        self.state.lock().entries.clear();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        let mut stats = state.stats.clone();
        stats.total_entries = state.entries.len();
        stats
    }

    /// Returns the number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }
}

// == Flight ==
/// A caller's claim on the in-flight marker for one key.
///
/// Dropping the last claim removes the marker from the table.
struct Flight<'a, V> {
    state: &'a Mutex<CacheState<V>>,
    key: &'a str,
    marker: Arc<FlightLock<()>>,
}

impl<V> Drop for Flight<'_, V> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        // Markers are only cloned under this lock, so the count is stable here.
        // Two references left means the table and this claim.
        let last = state
            .in_flight
            .get(self.key)
            .is_some_and(|m| Arc::ptr_eq(m, &self.marker) && Arc::strong_count(m) == 2);
        if last {
            state.in_flight.remove(self.key);
        }
    }
}
