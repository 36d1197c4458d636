use crate::computation::{computation, Computation};
use crate::{CacheConfig, CacheKey};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Fallback deadline for TTLs too large to add to the current instant.
const FAR_FUTURE: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

/// A registered value together with its expiry bookkeeping
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
    /// Distinguishes this registration from later ones under the same key
    generation: u64,
    /// Pending removal task, if a runtime was available at registration
    timer: Option<JoinHandle<()>>,
}

impl<V> CacheEntry<V> {
    fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }

    fn cancel_timer(&self) {
        if let Some(timer) = &self.timer {
            timer.abort();
        }
    }
}

type Entries<V> = DashMap<CacheKey, CacheEntry<V>>;

/// Key-addressed store of pending or finished computations.
///
/// Concurrent requests for the same key receive clones of the same handle, so
/// only one fetch runs per key. Every entry is removed automatically one TTL
/// after the `set` that registered it. Registering a key again cancels the
/// previous removal timer, so the TTL always counts from the latest `set`.
///
/// The cache never inspects what it stores: a failed computation stays
/// registered until it expires like any other.
pub struct RequestCache<V> {
    entries: Arc<Entries<V>>,
    next_generation: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    pub config: CacheConfig,
}

impl<V> RequestCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            next_generation: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            config,
        }
    }

    /// Get the value registered for `key`, if it has not expired
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        if !self.config.enabled {
            return None;
        }

        match self.entries.get(key) {
            Some(entry) if entry.is_valid() => {
                log::debug!("Cache hit for key: {}", key);
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value.clone())
            }
            _ => {
                log::debug!("Cache miss for key: {}", key);
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Whether a live entry exists for `key`
    pub fn has(&self, key: &CacheKey) -> bool {
        self.config.enabled
            && self
                .entries
                .get(key)
                .is_some_and(|entry| entry.is_valid())
    }

    /// Register `value` for `key`, replacing any previous entry.
    ///
    /// The replaced entry's removal timer is cancelled and a new one is
    /// scheduled one TTL from now.
    pub fn set(&self, key: CacheKey, value: V) {
        if !self.config.enabled {
            return;
        }

        let entry = self.new_entry(&key, value);
        match self.entries.insert(key.clone(), entry) {
            Some(previous) => {
                previous.cancel_timer();
                log::debug!("Replaced cache entry for key: {}", key);
            }
            None => log::debug!("Stored in cache with key: {}", key),
        }
    }

    /// Return the live value for `key`, or register the one built by `make`.
    ///
    /// The check and the registration happen under the same lock, so `make`
    /// runs at most once per live entry. `make` must not call back into the
    /// cache.
    pub fn get_or_set_with<F>(&self, key: CacheKey, make: F) -> V
    where
        F: FnOnce() -> V,
    {
        if !self.config.enabled {
            return make();
        }

        match self.entries.entry(key) {
            Entry::Occupied(occupied) if occupied.get().is_valid() => {
                log::debug!("Cache hit for key: {}", occupied.key());
                self.hits.fetch_add(1, Ordering::Relaxed);
                occupied.get().value.clone()
            }
            Entry::Occupied(mut occupied) => {
                log::debug!("Cache entry expired for key: {}", occupied.key());
                self.misses.fetch_add(1, Ordering::Relaxed);
                let value = make();
                let entry = self.new_entry(occupied.key(), value.clone());
                occupied.insert(entry).cancel_timer();
                value
            }
            Entry::Vacant(vacant) => {
                log::debug!("Cache miss for key: {}", vacant.key());
                self.misses.fetch_add(1, Ordering::Relaxed);
                let value = make();
                let entry = self.new_entry(vacant.key(), value.clone());
                vacant.insert(entry);
                value
            }
        }
    }

    /// Remove the entry for `key` and cancel its timer
    pub fn remove(&self, key: &CacheKey) -> Option<V> {
        let (_, entry) = self.entries.remove(key)?;
        entry.cancel_timer();
        log::debug!("Removed cache entry for key: {}", key);

        entry.is_valid().then_some(entry.value)
    }

    /// Remove entries whose TTL has passed but whose timer has not run
    pub fn evict_expired(&self) -> usize {
        let mut evicted = 0;
        self.entries.retain(|_, entry| {
            if entry.is_valid() {
                return true;
            }
            entry.cancel_timer();
            evicted += 1;
            false
        });

        log::debug!("Evicted {} expired cache entries", evicted);
        evicted
    }

    /// Clear all cache entries
    pub fn clear(&self) {
        self.entries.retain(|_, entry| {
            entry.cancel_timer();
            false
        });
        log::info!("Request cache cleared");
    }

    /// Number of stored entries, including expired ones awaiting removal
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let total_entries = self.entries.len();
        let valid_entries = self
            .entries
            .iter()
            .filter(|entry| entry.value().is_valid())
            .count();

        CacheStats {
            total_entries,
            valid_entries,
            expired_entries: total_entries.saturating_sub(valid_entries),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            ttl_ms: self.config.ttl_ms(),
        }
    }

    fn new_entry(&self, key: &CacheKey, value: V) -> CacheEntry<V> {
        let ttl = self.config.ttl_std();
        let now = Instant::now();
        let expires_at = now
            .checked_add(ttl)
            .unwrap_or_else(|| now + FAR_FUTURE);
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);

        // Without a runtime the entry still expires through its deadline.
        let timer = Handle::try_current().ok().map(|handle| {
            handle.spawn(expire_after(
                Arc::downgrade(&self.entries),
                key.clone(),
                generation,
                ttl,
            ))
        });

        CacheEntry {
            value,
            expires_at,
            generation,
            timer,
        }
    }
}

impl<T> RequestCache<Computation<T>>
where
    T: Clone + Send + Sync + 'static,
{
    /// Deduplicate a fetch.
    ///
    /// Returns the live computation for `key` if there is one; otherwise wraps
    /// the future produced by `fetch` and registers it. Either way every caller
    /// within the TTL awaits the same single execution.
    ///
    /// `fetch` is called while the key's shard is locked, so it must only
    /// build the future and must not call back into the cache; work inside
    /// the returned future is unrestricted.
    pub fn coalesce<F, Fut>(&self, key: CacheKey, fetch: F) -> Computation<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        self.get_or_set_with(key, || computation(fetch()))
    }
}

impl<V> Drop for RequestCache<V> {
    fn drop(&mut self) {
        for entry in self.entries.iter() {
            entry.value().cancel_timer();
        }
    }
}

async fn expire_after<V>(entries: Weak<Entries<V>>, key: CacheKey, generation: u64, ttl: Duration) {
    tokio::time::sleep(ttl).await;

    let Some(entries) = entries.upgrade() else {
        return;
    };
    if entries
        .remove_if(&key, |_, entry| entry.generation == generation)
        .is_some()
    {
        log::debug!("Cache entry expired for key: {}", key);
    }
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub ttl_ms: i64,
}

/// Thread-safe wrapper for the cache
pub type SharedRequestCache<V> = Arc<RequestCache<V>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_stale_timer_keeps_newer_entry() {
        let cache: RequestCache<Arc<str>> = RequestCache::new(CacheConfig::default());
        let key = CacheKey::new("job", "1");

        cache.set(key.clone(), Arc::from("first"));
        let stale = cache.entries.get(&key).unwrap().generation;
        cache.set(key.clone(), Arc::from("second"));

        // A timer of the first registration that woke before it was aborted
        expire_after(Arc::downgrade(&cache.entries), key.clone(), stale, Duration::ZERO).await;
        assert_eq!(cache.get(&key).as_deref(), Some("second"));
        assert_eq!(cache.len(), 1);

        let current = cache.entries.get(&key).unwrap().generation;
        expire_after(Arc::downgrade(&cache.entries), key.clone(), current, Duration::ZERO).await;
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_outliving_cache_is_harmless() {
        let cache: RequestCache<Arc<str>> = RequestCache::new(CacheConfig::default());
        let entries = Arc::downgrade(&cache.entries);
        drop(cache);

        expire_after(entries, CacheKey::new("job", "1"), 0, Duration::ZERO).await;
    }
}
