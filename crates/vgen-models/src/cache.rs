//! TTL cache with an injected clock.
//!
//! Collaborator services (TTS voice lists, background-music catalogs)
//! cache expensive lookups for a fixed time. The cache is an owned
//! value passed by handle, and reads its clock through a trait so
//! expiry can be tested without sleeping.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic time source for cache expiry.
pub trait Clock: Send + Sync {
    /// Elapsed time since the clock's origin.
    fn now(&self) -> Duration;
}

/// Real clock backed by `std::time::Instant`.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

struct Entry<V> {
    value: V,
    expires_at: Duration,
}

/// String-keyed cache whose entries expire `ttl` after insertion.
///
/// Not internally synchronized; wrap in a mutex when shared across
/// tasks.
pub struct TtlCache<V> {
    entries: HashMap<String, Entry<V>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V> TtlCache<V> {
    /// Create a cache with the given TTL and the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock::new()))
    }

    /// Create a cache with an explicit clock (tests inject a manual one).
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            clock,
        }
    }

    /// Look up a live entry; expired entries are evicted on access.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let now = self.clock.now();
        let expired = match self.entries.get(key) {
            Some(entry) => entry.expires_at <= now,
            None => return None,
        };
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|e| &e.value)
    }

    /// Insert or replace an entry, stamping a fresh deadline.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let expires_at = self.clock.now() + self.ttl;
        self.entries.insert(key.into(), Entry { value, expires_at });
    }

    /// Remove an entry regardless of expiry.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.entries.remove(key).map(|e| e.value)
    }

    /// Drop every expired entry.
    pub fn purge_expired(&mut self) {
        let now = self.clock.now();
        self.entries.retain(|_, entry| entry.expires_at > now);
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, including any not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ManualClock {
        now: Mutex<Duration>,
    }

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                now: Mutex::new(Duration::ZERO),
            })
        }

        fn advance(&self, by: Duration) {
            *self.now.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Duration {
            *self.now.lock().unwrap()
        }
    }

    #[test]
    fn test_get_before_expiry() {
        let clock = ManualClock::new();
        let mut cache = TtlCache::with_clock(Duration::from_secs(60), clock.clone());

        cache.insert("voices", vec!["en-US", "en-GB"]);
        clock.advance(Duration::from_secs(59));
        assert_eq!(cache.get("voices").unwrap().len(), 2);
    }

    #[test]
    fn test_entry_expires() {
        let clock = ManualClock::new();
        let mut cache = TtlCache::with_clock(Duration::from_secs(60), clock.clone());

        cache.insert("voices", 1u32);
        clock.advance(Duration::from_secs(61));
        assert!(cache.get("voices").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_refreshes_deadline() {
        let clock = ManualClock::new();
        let mut cache = TtlCache::with_clock(Duration::from_secs(60), clock.clone());

        cache.insert("music", "calm-01");
        clock.advance(Duration::from_secs(50));
        cache.insert("music", "calm-02");
        clock.advance(Duration::from_secs(50));
        assert_eq!(*cache.get("music").unwrap(), "calm-02");
    }

    #[test]
    fn test_purge_expired() {
        let clock = ManualClock::new();
        let mut cache = TtlCache::with_clock(Duration::from_secs(10), clock.clone());

        cache.insert("a", 1);
        clock.advance(Duration::from_secs(5));
        cache.insert("b", 2);
        clock.advance(Duration::from_secs(6));

        cache.purge_expired();
        assert_eq!(cache.len(), 1);
        assert_eq!(*cache.get("b").unwrap(), 2);
    }
}
