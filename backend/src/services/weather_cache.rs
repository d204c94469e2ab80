//! Time-bounded cache in front of a weather provider
//!
//! Only live summaries are cached. A fallback is returned to the caller but
//! never stored, so the next request retries the upstream.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use shared::{GpsCoordinates, WeatherSummary};

use crate::external::{Sourced, WeatherProvider};

/// Coordinates rounded to 0.01° (roughly 1 km)
type CacheKey = (i64, i64);

fn cache_key(coordinates: GpsCoordinates) -> CacheKey {
    (
        (coordinates.latitude * 100.0).round() as i64,
        (coordinates.longitude * 100.0).round() as i64,
    )
}

/// Caching decorator for any `WeatherProvider`
pub struct CachedWeatherProvider {
    inner: Arc<dyn WeatherProvider>,
    cache: Cache<CacheKey, WeatherSummary>,
}

impl CachedWeatherProvider {
    pub fn new(inner: Arc<dyn WeatherProvider>, ttl: Duration, capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity.max(1))
            .time_to_live(ttl)
            .build();
        Self { inner, cache }
    }

    /// Live entries, after pending evictions are applied
    pub async fn len(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

#[async_trait]
impl WeatherProvider for CachedWeatherProvider {
    async fn fetch_summary(&self, coordinates: GpsCoordinates) -> Sourced<WeatherSummary> {
        let key = cache_key(coordinates);

        if let Some(summary) = self.cache.get(&key).await {
            tracing::debug!(?key, "Weather cache hit");
            return Sourced::Live(summary);
        }

        let fetched = self.inner.fetch_summary(coordinates).await;
        if let Sourced::Live(summary) = &fetched {
            self.cache.insert(key, summary.clone()).await;
        }
        fetched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
        live: bool,
    }

    #[async_trait]
    impl WeatherProvider for CountingProvider {
        async fn fetch_summary(&self, _coordinates: GpsCoordinates) -> Sourced<WeatherSummary> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let summary = WeatherSummary {
                avg_temperature_last_30_days: 31.2,
                total_rainfall_last_30_days: 180.0,
                forecast: Vec::new(),
            };
            if self.live {
                Sourced::Live(summary)
            } else {
                Sourced::Fallback {
                    value: WeatherSummary::fallback(),
                    reason: "offline".to_string(),
                }
            }
        }
    }

    fn provider(live: bool) -> Arc<CountingProvider> {
        Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
            live,
        })
    }

    const TEN_MINUTES: Duration = Duration::from_secs(600);

    #[tokio::test]
    async fn test_live_summaries_are_reused() {
        let inner = provider(true);
        let cache = CachedWeatherProvider::new(inner.clone(), TEN_MINUTES, 1024);
        let here = GpsCoordinates::new(30.901, 75.857);
        let nearby = GpsCoordinates::new(30.9012, 75.8571);

        assert!(cache.fetch_summary(here).await.is_live());
        assert!(cache.fetch_summary(nearby).await.is_live());
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fallbacks_are_not_cached() {
        let inner = provider(false);
        let cache = CachedWeatherProvider::new(inner.clone(), TEN_MINUTES, 1024);
        let here = GpsCoordinates::new(11.03, 79.70);

        assert!(!cache.fetch_summary(here).await.is_live());
        assert!(!cache.fetch_summary(here).await.is_live());
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_expired_entries_are_refetched() {
        let inner = provider(true);
        let cache = CachedWeatherProvider::new(inner.clone(), Duration::from_millis(50), 1024);
        let here = GpsCoordinates::new(11.03, 79.70);

        cache.fetch_summary(here).await;
        tokio::time::sleep(Duration::from_millis(150)).await;
        cache.fetch_summary(here).await;
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_capacity_bounds_entries() {
        let inner = provider(true);
        let cache = CachedWeatherProvider::new(inner.clone(), TEN_MINUTES, 2);

        for lat in [10.0, 20.0, 30.0, 40.0] {
            cache.fetch_summary(GpsCoordinates::new(lat, 77.0)).await;
        }
        assert!(cache.len().await <= 2);
    }
}
