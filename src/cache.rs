use crate::clock::Clock;
use crate::types::PriceQuote;
use chrono::Duration;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Keyed quote storage behind the cache. The resolver only ever talks to this
/// interface, so tests can swap in whatever backend they like.
pub trait QuoteStore: Send + Sync {
    fn get(&self, key: &str) -> Option<PriceQuote>;
    fn put(&self, key: &str, quote: PriceQuote);
    fn delete(&self, key: &str);
}

/// Process-local store. The mutex is there for the server's `Send + Sync`
/// bounds; no concurrent mutation of the same key is expected.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, PriceQuote>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QuoteStore for MemoryStore {
    fn get(&self, key: &str) -> Option<PriceQuote> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn put(&self, key: &str, quote: PriceQuote) {
        self.entries.lock().unwrap().insert(key.to_string(), quote);
    }

    fn delete(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

/// Time-boxed quote cache keyed by (service, country). Entries older than the
/// TTL are treated as absent and deleted on the read that finds them stale;
/// there is no proactive sweep.
pub struct QuoteCache {
    store: Box<dyn QuoteStore>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl QuoteCache {
    pub fn new(store: Box<dyn QuoteStore>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { store, ttl, clock }
    }

    fn key(service: &str, country: &str) -> String {
        format!("{}_{}", service, country)
    }

    pub fn get(&self, service: &str, country: &str) -> Option<PriceQuote> {
        let key = Self::key(service, country);
        let entry = self.store.get(&key)?;

        let age = self.clock.now() - entry.last_updated;
        if age > self.ttl {
            self.store.delete(&key);
            return None;
        }
        Some(entry)
    }

    pub fn put(&self, quote: &PriceQuote) {
        let key = Self::key(&quote.service_name, &quote.country_code);
        self.store.put(&key, quote.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::manual::ManualClock;
    use crate::types::{Confidence, Source};

    fn quote_at(clock: &ManualClock) -> PriceQuote {
        PriceQuote {
            service_name: "Netflix".to_string(),
            country_code: "US".to_string(),
            currency: "USD".to_string(),
            price: 15.49,
            plan: "Standard".to_string(),
            source: Source::Api,
            confidence: Confidence::High,
            last_updated: clock.now(),
        }
    }

    fn cache_with_clock() -> (QuoteCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default_start());
        let cache = QuoteCache::new(
            Box::new(MemoryStore::new()),
            Duration::hours(24),
            clock.clone(),
        );
        (cache, clock)
    }

    #[test]
    fn fresh_entry_is_returned_unchanged() {
        let (cache, clock) = cache_with_clock();
        let quote = quote_at(&clock);
        cache.put(&quote);

        clock.advance(Duration::hours(23) + Duration::minutes(59));
        let hit = cache.get("Netflix", "US").expect("entry should be fresh");
        assert_eq!(hit.price, 15.49);
        assert_eq!(hit.source, Source::Api);
        assert_eq!(hit.last_updated, quote.last_updated);
    }

    #[test]
    fn stale_entry_is_missed_and_deleted() {
        let (cache, clock) = cache_with_clock();
        cache.put(&quote_at(&clock));

        clock.advance(Duration::hours(24) + Duration::minutes(1));
        assert!(cache.get("Netflix", "US").is_none());

        // The stale read deleted the entry; even rewinding time finds nothing.
        clock.advance(Duration::hours(-24));
        assert!(cache.get("Netflix", "US").is_none());
    }

    #[test]
    fn put_overwrites_unconditionally() {
        let (cache, clock) = cache_with_clock();
        cache.put(&quote_at(&clock));

        let mut updated = quote_at(&clock);
        updated.price = 16.99;
        cache.put(&updated);

        assert_eq!(cache.get("Netflix", "US").unwrap().price, 16.99);
    }

    #[test]
    fn keys_are_scoped_per_service_and_country() {
        let (cache, clock) = cache_with_clock();
        cache.put(&quote_at(&clock));

        assert!(cache.get("Netflix", "GB").is_none());
        assert!(cache.get("Spotify", "US").is_none());
    }
}
