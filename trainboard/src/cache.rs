//! Caching layer for fare search responses.
//!
//! Fares for a given station pair and departure time change slowly, and
//! the UI makes it easy to fire the same search twice in a row. Keying on
//! a time bucket (5-minute buckets) bounds cache cardinality while
//! keeping results reasonably fresh. Only successful responses are
//! cached; errors always retry against the API.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use futures::FutureExt;
use futures::future::BoxFuture;
use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{Crs, FareSearchResult};
use crate::fares::{FareError, FareSource};

/// Cache key: (origin, destination, date, time bucket).
/// Time bucket is minutes from midnight divided by the bucket size.
type FareKey = (Crs, Crs, NaiveDate, u16);

/// Cached response entry.
type FareEntry = Arc<FareSearchResult>;

/// Configuration for the fare cache.
#[derive(Debug, Clone)]
pub struct FareCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,

    /// Time bucket size in minutes. Values below 1 are treated as 1.
    pub bucket_mins: u16,
}

impl Default for FareCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
            bucket_mins: 5,
        }
    }
}

/// Cache for fare search responses.
struct FareCache {
    entries: MokaCache<FareKey, FareEntry>,
    bucket_mins: u16,
}

impl FareCache {
    fn new(config: &FareCacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            entries,
            bucket_mins: config.bucket_mins.max(1),
        }
    }

    /// Compute the cache key for a search.
    fn key(&self, origin: Crs, destination: Crs, outbound: DateTime<Utc>) -> FareKey {
        let mins = (outbound.hour() * 60 + outbound.minute()) as u16;
        (origin, destination, outbound.date_naive(), mins / self.bucket_mins)
    }
}

/// A [`FareSource`] that caches successful responses from another source.
#[derive(Clone)]
pub struct CachedFareSource {
    inner: Arc<dyn FareSource>,
    cache: Arc<FareCache>,
}

impl CachedFareSource {
    /// Wrap a fare source with a cache.
    pub fn new(inner: Arc<dyn FareSource>, config: &FareCacheConfig) -> Self {
        Self {
            inner,
            cache: Arc::new(FareCache::new(config)),
        }
    }

    /// Number of live cache entries (for monitoring).
    ///
    /// Flushes moka's pending maintenance work first so the count
    /// reflects completed inserts and invalidations.
    pub async fn entry_count(&self) -> u64 {
        self.cache.entries.run_pending_tasks().await;
        self.cache.entries.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.cache.entries.invalidate_all();
    }

    async fn search_cached(
        inner: Arc<dyn FareSource>,
        cache: Arc<FareCache>,
        origin: Crs,
        destination: Crs,
        outbound: DateTime<Utc>,
    ) -> Result<FareSearchResult, FareError> {
        let key = cache.key(origin, destination, outbound);

        if let Some(cached) = cache.entries.get(&key).await {
            trace!(%origin, %destination, "fare cache hit");
            return Ok((*cached).clone());
        }

        let result = inner.search(origin, destination, outbound).await?;
        cache.entries.insert(key, Arc::new(result.clone())).await;

        Ok(result)
    }
}

impl FareSource for CachedFareSource {
    fn search(
        &self,
        origin: Crs,
        destination: Crs,
        outbound: DateTime<Utc>,
    ) -> BoxFuture<'static, Result<FareSearchResult, FareError>> {
        let inner = Arc::clone(&self.inner);
        let cache = Arc::clone(&self.cache);
        Self::search_cached(inner, cache, origin, destination, outbound).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fares::MockFareSource;

    fn crs(code: &str) -> Crs {
        Crs::parse(code).unwrap()
    }

    fn empty_result() -> FareSearchResult {
        FareSearchResult {
            outbound_journeys: vec![],
            inbound_journeys: None,
        }
    }

    fn instant(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn zero_bucket_size_is_clamped() {
        let config = FareCacheConfig {
            bucket_mins: 0,
            ..FareCacheConfig::default()
        };
        let cache = FareCache::new(&config);
        // With a 1-minute bucket, adjacent minutes land in different keys.
        let a = cache.key(crs("KGX"), crs("EDB"), instant("2025-06-01T10:00:00Z"));
        let b = cache.key(crs("KGX"), crs("EDB"), instant("2025-06-01T10:01:00Z"));
        assert_ne!(a, b);
    }

    #[test]
    fn key_buckets_nearby_times_together() {
        let cache = FareCache::new(&FareCacheConfig::default());
        let a = cache.key(crs("KGX"), crs("EDB"), instant("2025-06-01T10:01:00Z"));
        let b = cache.key(crs("KGX"), crs("EDB"), instant("2025-06-01T10:04:59Z"));
        let c = cache.key(crs("KGX"), crs("EDB"), instant("2025-06-01T10:05:00Z"));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn key_distinguishes_pair_and_date() {
        let cache = FareCache::new(&FareCacheConfig::default());
        let base = cache.key(crs("KGX"), crs("EDB"), instant("2025-06-01T10:00:00Z"));

        let swapped = cache.key(crs("EDB"), crs("KGX"), instant("2025-06-01T10:00:00Z"));
        assert_ne!(base, swapped);

        let next_day = cache.key(crs("KGX"), crs("EDB"), instant("2025-06-02T10:00:00Z"));
        assert_ne!(base, next_day);
    }

    #[tokio::test]
    async fn repeated_search_hits_the_cache() {
        let mock = MockFareSource::new();
        mock.push_success(empty_result());
        let cached = CachedFareSource::new(Arc::new(mock.clone()), &FareCacheConfig::default());

        let when = instant("2025-06-01T10:00:00Z");
        cached.search(crs("KGX"), crs("EDB"), when).await.unwrap();
        cached.search(crs("KGX"), crs("EDB"), when).await.unwrap();

        // Second search served from cache; the mock saw one call.
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let mock = MockFareSource::new();
        mock.push_error(FareError::RateLimited);
        mock.push_success(empty_result());
        let cached = CachedFareSource::new(Arc::new(mock.clone()), &FareCacheConfig::default());

        let when = instant("2025-06-01T10:00:00Z");
        assert!(cached.search(crs("KGX"), crs("EDB"), when).await.is_err());
        assert!(cached.search(crs("KGX"), crs("EDB"), when).await.is_ok());

        // The error was not cached, so the mock saw both calls.
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn invalidate_all_clears_entries() {
        let mock = MockFareSource::new();
        mock.push_success(empty_result());
        mock.push_success(empty_result());
        let cached = CachedFareSource::new(Arc::new(mock.clone()), &FareCacheConfig::default());

        let when = instant("2025-06-01T10:00:00Z");
        cached.search(crs("KGX"), crs("EDB"), when).await.unwrap();
        assert_eq!(cached.entry_count().await, 1);

        cached.invalidate_all();
        assert_eq!(cached.entry_count().await, 0);

        cached.search(crs("KGX"), crs("EDB"), when).await.unwrap();
        assert_eq!(mock.call_count(), 2);
    }
}
