use crate::modules::provider::domain::{MediaDetails, MediaProvider};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::debug;

/// Clock abstraction so tests can control time instead of sleeping through TTLs
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock implementation used in production
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for tests
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().expect("clock lock poisoned")
    }
}

/// Cached entry with its insertion time
#[derive(Debug, Clone)]
struct CacheEntry {
    data: MediaDetails,
    inserted_at: Instant,
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries_count: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            self.hits as f64 / (self.hits + self.misses) as f64
        }
    }
}

/// TTL cache for provider detail records, keyed `"<provider>:<external_id>"`.
///
/// An entry is valid while `now - inserted_at < ttl`. Expired entries are
/// treated as absent and removed lazily on the next lookup; there is no
/// background sweep. Owned by the `DetailsService` that composes it, not a
/// process-wide singleton.
pub struct DetailsCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl DetailsCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Cache with the default 30 minute TTL and the system clock
    pub fn with_default_ttl() -> Self {
        Self::new(Duration::from_secs(30 * 60), Arc::new(SystemClock))
    }

    /// Compose the cache key from provider tag and external id
    pub fn cache_key(provider: MediaProvider, external_id: &str) -> String {
        format!("{}:{}", provider.tag(), external_id.trim())
    }

    /// Get cached details if present and not expired
    pub fn get(&self, key: &str) -> Option<MediaDetails> {
        if let Some(entry) = self.entries.get(key) {
            if self.clock.now().duration_since(entry.inserted_at) < self.ttl {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for key: {}", key);
                return Some(entry.data.clone());
            }
        }

        // Lazily evict the expired entry, if any
        if self.entries.remove(key).is_some() {
            debug!("Removed expired cache entry for key: {}", key);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("Cache miss for key: {}", key);
        None
    }

    /// Store details under a key; last write wins
    pub fn insert(&self, key: String, data: MediaDetails) {
        let entry = CacheEntry {
            data,
            inserted_at: self.clock.now(),
        };
        self.entries.insert(key, entry);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries_count: self.entries.len(),
        }
    }

    pub fn clear(&self) {
        self.entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::provider::domain::{MediaType, MediaProvider};

    fn details(id: &str) -> MediaDetails {
        MediaDetails::bare(id, "The Matrix", MediaType::Movie, MediaProvider::Tmdb)
    }

    #[test]
    fn entry_is_valid_within_ttl() {
        let clock = ManualClock::new();
        let cache = DetailsCache::new(Duration::from_secs(60), Arc::new(clock.clone()));
        let key = DetailsCache::cache_key(MediaProvider::Tmdb, "603");

        cache.insert(key.clone(), details("603"));
        clock.advance(Duration::from_secs(59));
        assert!(cache.get(&key).is_some());
    }

    #[test]
    fn expired_entry_is_absent_and_evicted() {
        let clock = ManualClock::new();
        let cache = DetailsCache::new(Duration::from_secs(60), Arc::new(clock.clone()));
        let key = DetailsCache::cache_key(MediaProvider::Tmdb, "603");

        cache.insert(key.clone(), details("603"));
        clock.advance(Duration::from_secs(61));
        assert!(cache.get(&key).is_none());
        assert_eq!(cache.stats().entries_count, 0);
    }

    #[test]
    fn stats_track_hits_and_misses() {
        let clock = ManualClock::new();
        let cache = DetailsCache::new(Duration::from_secs(60), Arc::new(clock));
        let key = DetailsCache::cache_key(MediaProvider::Jikan, "5114");

        assert!(cache.get(&key).is_none());
        cache.insert(key.clone(), details("5114"));
        assert!(cache.get(&key).is_some());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn key_carries_provider_prefix() {
        assert_eq!(
            DetailsCache::cache_key(MediaProvider::Omdb, " tt0133093 "),
            "omdb:tt0133093"
        );
    }
}
