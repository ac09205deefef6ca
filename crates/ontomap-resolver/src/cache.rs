//! Bounded memoization of idempotent lookups
//!
//! An LRU map behind an async mutex, shared by every concurrently resolving
//! trait. The lock is never held across a remote call, so two traits missing
//! on the same key at once may both fetch; both store the same answer.

use lru::LruCache;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// Hit/miss counters of one cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Cache name used in reports
    pub name: &'static str,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that went to the remote service
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache of obtained answers keyed by query string
pub struct ResultCache<V> {
    name: &'static str,
    entries: Mutex<LruCache<String, V>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V: Clone> ResultCache<V> {
    /// Create an empty cache holding at most `capacity` answers
    pub fn new(name: &'static str, capacity: NonZeroUsize) -> Self {
        Self {
            name,
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look a key up, counting the hit or miss
    pub async fn get(&self, key: &str) -> Option<V> {
        let found = self.entries.lock().await.get(key).cloned();
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Store an answer
    pub async fn insert(&self, key: impl Into<String>, value: V) {
        self.entries.lock().await.put(key.into(), value);
    }

    /// Return the cached answer, or fetch and store it
    ///
    /// A fetch that yields `None` is not stored, so a later lookup retries.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch: F) -> Option<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<V>>,
    {
        if let Some(value) = self.get(key).await {
            return Some(value);
        }

        let value = fetch().await?;
        self.insert(key, value.clone()).await;
        Some(value)
    }

    /// Number of stored answers
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Current hit/miss counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            name: self.name,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(capacity: usize) -> ResultCache<String> {
        ResultCache::new("test", NonZeroUsize::new(capacity).unwrap())
    }

    #[tokio::test]
    async fn test_get_or_fetch_memoizes() {
        let cache = cache(4);
        let mut fetches = 0;

        for _ in 0..3 {
            let value = cache
                .get_or_fetch("k", || {
                    fetches += 1;
                    async { Some("v".to_string()) }
                })
                .await;
            assert_eq!(value.as_deref(), Some("v"));
        }

        assert_eq!(fetches, 1);
        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_absent_answers_are_not_stored() {
        let cache = cache(4);
        assert_eq!(cache.get_or_fetch("k", || async { None }).await, None);
        assert!(cache.is_empty().await);

        let value = cache.get_or_fetch("k", || async { Some("later".to_string()) }).await;
        assert_eq!(value.as_deref(), Some("later"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_least_recently_used_is_evicted() {
        let cache = cache(2);
        cache.insert("a", "1".to_string()).await;
        cache.insert("b", "2".to_string()).await;
        assert!(cache.get("a").await.is_some());
        cache.insert("c", "3".to_string()).await;

        assert!(cache.get("b").await.is_none());
        assert!(cache.get("a").await.is_some());
        assert!(cache.get("c").await.is_some());
        assert_eq!(cache.len().await, 2);
    }

    #[test]
    fn test_empty_stats_hit_rate() {
        let stats = CacheStats {
            name: "x",
            hits: 0,
            misses: 0,
        };
        assert_eq!(stats.hit_rate(), 0.0);
    }
}
