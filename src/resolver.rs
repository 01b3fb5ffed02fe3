use crate::cache::{QuoteCache, QuoteStore};
use crate::catalog;
use crate::clock::Clock;
use crate::config::ResolverConfig;
use crate::ratelimit::RateLimiter;
use crate::sources::SourceRegistry;
use crate::types::PriceQuote;
use chrono::Duration as ChronoDuration;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Layered pricing resolution: cache, then rate-limit gate, then each enabled
/// source in priority order, then the curated fallback. Never fails for a
/// supported service; degrades confidence instead.
pub struct PricingResolver {
    registry: SourceRegistry,
    cache: QuoteCache,
    limiter: RateLimiter,
    clock: Arc<dyn Clock>,
    adapter_timeout: Duration,
    batch_size: usize,
    batch_delay: Duration,
}

impl PricingResolver {
    pub fn new(
        registry: SourceRegistry,
        store: Box<dyn QuoteStore>,
        clock: Arc<dyn Clock>,
        config: &ResolverConfig,
    ) -> Self {
        let cache = QuoteCache::new(
            store,
            ChronoDuration::hours(config.cache_ttl_hours),
            clock.clone(),
        );
        let limiter = RateLimiter::new(
            config.rate_limit_per_hour,
            ChronoDuration::minutes(60),
            clock.clone(),
        );
        Self {
            registry,
            cache,
            limiter,
            clock,
            adapter_timeout: Duration::from_secs(config.adapter_timeout_secs),
            batch_size: config.batch_size,
            batch_delay: Duration::from_secs(config.batch_delay_secs),
        }
    }

    /// Resolve a quote for one (service, country) pair. Returns `None` only
    /// for services outside the supported set; the caller keeps whatever
    /// price the user entered.
    pub async fn resolve(&self, service: &str, country: &str) -> Option<PriceQuote> {
        if !catalog::is_supported(service) {
            debug!("{} not supported for live pricing", service);
            return None;
        }

        if let Some(cached) = self.cache.get(service, country) {
            debug!(
                "using cached {} pricing for {}: {} {}",
                service, country, cached.price, cached.currency
            );
            return Some(cached);
        }

        if !self.limiter.check(service) {
            warn!("rate limit exceeded for {}; using curated fallback", service);
            return Some(catalog::curated_quote(service, country, self.clock.now()));
        }

        for source in self.registry.sources() {
            match tokio::time::timeout(self.adapter_timeout, source.fetch(service, country)).await
            {
                Ok(Ok(Some(quote))) => {
                    self.cache.put(&quote);
                    self.limiter.record(service);
                    info!(
                        "fetched {} pricing from {} for {}: {} {}",
                        service, source.name(), country, quote.price, quote.currency
                    );
                    return Some(quote);
                }
                Ok(Ok(None)) => {
                    debug!("source '{}' has no {} data for {}", source.name(), service, country);
                }
                Ok(Err(e)) => {
                    warn!("source '{}' failed for {}/{}: {:#}", source.name(), service, country, e);
                }
                Err(_) => {
                    warn!(
                        "source '{}' timed out after {:?} for {}/{}",
                        source.name(), self.adapter_timeout, service, country
                    );
                }
            }
        }

        // Every source skipped or failed. The curated quote is returned
        // without a cache write or rate-limit charge.
        Some(catalog::curated_quote(service, country, self.clock.now()))
    }

    /// Refresh every supported service for one country. Requests are issued
    /// in fixed-size batches, concurrently within a batch, with a pause
    /// between batches to stay inside external-API courtesy limits.
    pub async fn refresh_all(&self, country: &str) -> Vec<PriceQuote> {
        let services = catalog::supported_services();
        info!("updating pricing for {} services in {}", services.len(), country);

        let mut results = Vec::new();
        for (i, batch) in services.chunks(self.batch_size).enumerate() {
            if i > 0 {
                tokio::time::sleep(self.batch_delay).await;
            }

            let quotes =
                futures::future::join_all(batch.iter().map(|s| self.resolve(s, country))).await;

            for (service, quote) in batch.iter().zip(quotes) {
                match quote {
                    Some(quote) => {
                        info!(
                            "  [{}] {} {} ({})",
                            service, quote.price, quote.currency, quote.source
                        );
                        results.push(quote);
                    }
                    None => warn!("  [{}] no pricing available", service),
                }
            }
        }

        info!(
            "updated pricing for {}/{} services",
            results.len(),
            services.len()
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::clock::manual::ManualClock;
    use crate::sources::PricingSource;
    use crate::types::{Confidence, Source};
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticSource {
        price: f64,
        calls: Arc<AtomicUsize>,
        clock: Arc<ManualClock>,
    }

    #[async_trait]
    impl PricingSource for StaticSource {
        fn name(&self) -> &'static str {
            "static"
        }

        async fn fetch(&self, service: &str, country: &str) -> Result<Option<PriceQuote>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(PriceQuote {
                service_name: service.to_string(),
                country_code: country.to_string(),
                currency: "USD".to_string(),
                price: self.price,
                plan: "Standard".to_string(),
                source: Source::Api,
                confidence: Confidence::High,
                last_updated: self.clock.now(),
            }))
        }
    }

    struct FailingSource {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PricingSource for FailingSource {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn fetch(&self, _service: &str, _country: &str) -> Result<Option<PriceQuote>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("source is down")
        }
    }

    struct EmptySource;

    #[async_trait]
    impl PricingSource for EmptySource {
        fn name(&self) -> &'static str {
            "empty"
        }

        async fn fetch(&self, _service: &str, _country: &str) -> Result<Option<PriceQuote>> {
            Ok(None)
        }
    }

    struct SlowSource;

    #[async_trait]
    impl PricingSource for SlowSource {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn fetch(&self, _service: &str, _country: &str) -> Result<Option<PriceQuote>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(None)
        }
    }

    fn resolver_with(
        sources: Vec<Box<dyn PricingSource>>,
        config: &ResolverConfig,
    ) -> (PricingResolver, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default_start());
        let resolver = PricingResolver::new(
            SourceRegistry::with_sources(sources),
            Box::new(MemoryStore::new()),
            clock.clone(),
            config,
        );
        (resolver, clock)
    }

    #[tokio::test]
    async fn unsupported_service_resolves_to_none() {
        let (resolver, _clock) = resolver_with(vec![], &ResolverConfig::default());
        assert!(resolver.resolve("SomeRandomGym", "US").await.is_none());
    }

    #[tokio::test]
    async fn every_failing_source_still_yields_a_positive_price() {
        let (resolver, _clock) = resolver_with(
            vec![
                Box::new(FailingSource {
                    calls: Arc::new(AtomicUsize::new(0)),
                }),
                Box::new(EmptySource),
            ],
            &ResolverConfig::default(),
        );

        for service in catalog::supported_services() {
            for country in ["US", "DE", "ZZ"] {
                let quote = resolver.resolve(service, country).await.unwrap();
                assert!(quote.price > 0.0, "{}/{} came back free", service, country);
                assert_eq!(quote.source, Source::Manual);
            }
        }
    }

    #[tokio::test]
    async fn successful_source_is_cached_and_not_refetched() {
        let clock = Arc::new(ManualClock::default_start());
        let calls = Arc::new(AtomicUsize::new(0));
        let source = Box::new(StaticSource {
            price: 14.49,
            calls: calls.clone(),
            clock: clock.clone(),
        });
        let resolver = PricingResolver::new(
            SourceRegistry::with_sources(vec![source]),
            Box::new(MemoryStore::new()),
            clock.clone(),
            &ResolverConfig::default(),
        );

        let first = resolver.resolve("Netflix", "US").await.unwrap();
        let second = resolver.resolve("Netflix", "US").await.unwrap();
        assert_eq!(first.price, 14.49);
        assert_eq!(second.price, 14.49);
        assert_eq!(second.source, Source::Api);
        // One live fetch; the second resolution was served from cache.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhausted_rate_limit_skips_sources_entirely() {
        let clock = Arc::new(ManualClock::default_start());
        let calls = Arc::new(AtomicUsize::new(0));
        let source = Box::new(StaticSource {
            price: 14.49,
            calls: calls.clone(),
            clock: clock.clone(),
        });
        let config = ResolverConfig {
            rate_limit_per_hour: 1,
            ..ResolverConfig::default()
        };
        let resolver = PricingResolver::new(
            SourceRegistry::with_sources(vec![source]),
            Box::new(MemoryStore::new()),
            clock.clone(),
            &config,
        );

        // First resolution consumes the whole budget.
        let first = resolver.resolve("Netflix", "US").await.unwrap();
        assert_eq!(first.source, Source::Api);

        // Different country misses the cache; the limiter sends it straight
        // to the curated fallback without touching the adapter.
        let second = resolver.resolve("Netflix", "GB").await.unwrap();
        assert_eq!(second.source, Source::Manual);
        assert_eq!(second.price, 10.99);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_source_falls_through_to_the_fallback() {
        let (resolver, _clock) = resolver_with(
            vec![Box::new(SlowSource)],
            &ResolverConfig::default(),
        );

        let quote = resolver.resolve("Netflix", "DE").await.unwrap();
        assert_eq!(quote.source, Source::Manual);
        assert_eq!(quote.price, 12.99);
        assert_eq!(quote.currency, "EUR");
    }

    #[tokio::test]
    async fn sources_are_tried_in_registration_order() {
        let clock = Arc::new(ManualClock::default_start());
        let fail_calls = Arc::new(AtomicUsize::new(0));
        let failing = Box::new(FailingSource {
            calls: fail_calls.clone(),
        });
        let backup = Box::new(StaticSource {
            price: 11.49,
            calls: Arc::new(AtomicUsize::new(0)),
            clock: clock.clone(),
        });
        let resolver = PricingResolver::new(
            SourceRegistry::with_sources(vec![failing, backup]),
            Box::new(MemoryStore::new()),
            clock.clone(),
            &ResolverConfig::default(),
        );

        let quote = resolver.resolve("Spotify", "US").await.unwrap();
        assert_eq!(quote.price, 11.49);
        assert_eq!(fail_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_all_covers_every_supported_service() {
        let (resolver, _clock) = resolver_with(vec![Box::new(EmptySource)], &ResolverConfig::default());

        let quotes = resolver.refresh_all("GB").await;
        assert_eq!(quotes.len(), catalog::supported_services().len());
        assert!(quotes.iter().all(|q| q.price > 0.0));
    }
}
