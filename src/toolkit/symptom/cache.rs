use lru::LruCache;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use super::models::SymptomExtractionResult;

/// LRU of AI keyword extractions, keyed by a SHA-256 of the normalised input.
/// Entries older than the TTL count as misses.
pub struct ExtractionCache {
    cache: Mutex<LruCache<String, (SymptomExtractionResult, Instant)>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub hit_rate: f64,
}

impl ExtractionCache {
    pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, input: &str) -> Option<SymptomExtractionResult> {
        let key = Self::make_key(input);
        let mut cache = self.cache.lock();
        match cache.get(&key) {
            Some((value, stored)) if stored.elapsed() < self.ttl => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(value.clone())
            }
            Some(_) => {
                cache.pop(&key);
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn set(&self, input: &str, value: SymptomExtractionResult) {
        let mut cache = self.cache.lock();
        cache.put(Self::make_key(input), (value, Instant::now()));
    }

    pub fn make_key(input: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(input.trim().to_lowercase().as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 { hits as f64 / total as f64 } else { 0.0 };
        let cache = self.cache.lock();

        CacheStats {
            hits,
            misses,
            size: cache.len(),
            hit_rate,
        }
    }

    pub fn clear(&self) {
        let mut cache = self.cache.lock();
        cache.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(capacity: usize, ttl: Duration) -> ExtractionCache {
        ExtractionCache::new(NonZeroUsize::new(capacity).unwrap(), ttl)
    }

    #[test]
    fn test_hit_and_miss() {
        let cache = cache(4, Duration::from_secs(60));
        assert!(cache.get("Tôi bị đau đầu").is_none());
        cache.set("Tôi bị đau đầu", SymptomExtractionResult::ai("đau đầu"));

        let hit = cache.get("  tôi bị đau đầu ").unwrap();
        assert_eq!(hit.keyword, "đau đầu");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
        assert!((stats.hit_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_expired_entry_is_evicted() {
        let cache = cache(4, Duration::ZERO);
        cache.set("ho", SymptomExtractionResult::ai("ho"));
        assert!(cache.get("ho").is_none());
        assert_eq!(cache.stats().size, 0);
    }

    #[test]
    fn test_capacity_bound() {
        let cache = cache(2, Duration::from_secs(60));
        cache.set("a", SymptomExtractionResult::ai("a"));
        cache.set("b", SymptomExtractionResult::ai("b"));
        cache.set("c", SymptomExtractionResult::ai("c"));
        assert!(cache.get("a").is_none());
        assert_eq!(cache.stats().size, 2);
    }

    #[test]
    fn test_clear_resets_counters() {
        let cache = cache(2, Duration::from_secs(60));
        cache.set("a", SymptomExtractionResult::ai("a"));
        let _ = cache.get("a");
        cache.clear();
        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.size, 0);
    }
}
