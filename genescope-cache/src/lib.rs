//! Genescope Cache - in-memory TTL cache with single-flight computation.
//!
//! Expensive results (plot specs, publication pages) are computed at most
//! once per key while fresh: concurrent requests for the same key await the
//! in-flight computation instead of duplicating it. A failed computation
//! leaves no entry behind, so the next caller retries.
//!
//! Expired entries are not evicted lazily; the composition root runs a
//! periodic [`TtlCache::remove_expired`] sweep so an idle cache does not
//! accumulate dead entries.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

// ============================================================================
// ENTRY STATE
// ============================================================================

#[derive(Debug, Clone)]
struct StoredValue<V> {
    value: V,
    stored_at: Instant,
    ttl: Duration,
}

impl<V> StoredValue<V> {
    fn is_fresh(&self, now: Instant) -> bool {
        now.duration_since(self.stored_at) < self.ttl
    }
}

/// Per-key slot. The slot mutex is held across the compute future, which is
/// what serializes concurrent callers of the same key.
#[derive(Debug)]
struct Slot<V> {
    value: Option<StoredValue<V>>,
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Self { value: None }
    }
}

/// Snapshot of cache hit/miss counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

// ============================================================================
// TTL CACHE
// ============================================================================

/// Keyed TTL cache with single-flight computation.
///
/// Values are cloned out on every hit, so `V` should be cheap to clone or
/// internally shared. Distinct keys never contend with each other: the outer
/// map lock is held only long enough to find or insert a slot.
#[derive(Debug)]
pub struct TtlCache<V> {
    name: &'static str,
    slots: Mutex<HashMap<String, Arc<Mutex<Slot<V>>>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V: Clone> TtlCache<V> {
    /// Create an empty cache. `name` labels log lines and has no semantic
    /// effect.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slots: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the cached value for `key`, or run `compute` to produce it.
    ///
    /// If a fresh value exists it is returned without invoking `compute`.
    /// Otherwise `compute` runs while holding the key's slot lock, so every
    /// concurrent caller for the same key awaits the one in-flight
    /// computation and then reads its result. An `Err` from `compute` is
    /// propagated to the caller that ran it and stores nothing; callers that
    /// were queued behind it re-run `compute` themselves.
    pub async fn get_or_compute<E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let slot = {
            let mut slots = self.slots.lock().await;
            Arc::clone(slots.entry(key.to_string()).or_default())
        };

        let mut guard = slot.lock().await;
        let now = Instant::now();
        if let Some(stored) = &guard.value {
            if stored.is_fresh(now) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(cache = self.name, key, "Cache hit");
                return Ok(stored.value.clone());
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(cache = self.name, key, "Cache miss, computing");
        let value = compute().await?;
        guard.value = Some(StoredValue {
            value: value.clone(),
            stored_at: Instant::now(),
            ttl,
        });
        Ok(value)
    }

    /// Return the cached value for `key` if present and fresh.
    pub async fn get(&self, key: &str) -> Option<V> {
        let slot = {
            let slots = self.slots.lock().await;
            slots.get(key).cloned()
        }?;
        let guard = slot.lock().await;
        match &guard.value {
            Some(stored) if stored.is_fresh(Instant::now()) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(stored.value.clone())
            }
            _ => None,
        }
    }

    /// Drop the entry for `key`, if any.
    pub async fn invalidate(&self, key: &str) {
        let mut slots = self.slots.lock().await;
        slots.remove(key);
    }

    /// Drop every expired entry.
    ///
    /// Slots whose lock is currently held (a computation in flight) are left
    /// alone and picked up by a later sweep. Returns the number of entries
    /// removed.
    pub async fn remove_expired(&self) -> usize {
        let now = Instant::now();
        let mut slots = self.slots.lock().await;
        let before = slots.len();
        slots.retain(|_, slot| match slot.try_lock() {
            Ok(guard) => match &guard.value {
                Some(stored) => stored.is_fresh(now),
                None => false,
            },
            Err(_) => true,
        });
        let removed = before - slots.len();
        if removed > 0 {
            tracing::debug!(cache = self.name, removed, "Swept expired cache entries");
        }
        removed
    }

    /// Number of keyed slots currently held (fresh, expired, or in flight).
    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.lock().await.is_empty()
    }

    /// Cumulative hit count.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Cumulative miss count.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Counter snapshot.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits(),
            misses: self.misses(),
        }
    }
}
