//! Exchange rate caching using Moka.
//!
//! A fetched rate book is served for at most one TTL window (24 hours by
//! default). When the provider fails, the last book ever fetched for the base
//! is served instead, and without one an empty book (every rate = 1).

use dashmap::DashMap;
use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use vpsval_shared::Currency;

use super::provider::{RateBook, RateProvider};

/// Default cache capacity (number of base currencies).
const DEFAULT_CACHE_CAPACITY: u64 = 16;

/// Default time-to-live for a rate book (24 hours).
pub const DEFAULT_TTL_SECS: u64 = 86_400;

/// Where a rate book handed out by [`RateCache`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateOrigin {
    /// Fetched from the provider by this call.
    Fetched,
    /// Served from the cache within its TTL.
    Cached,
    /// Provider failed; last-known book served.
    LastKnown,
    /// Provider failed and nothing was known; default rate of 1.
    Default,
}

/// A rate book together with its origin.
#[derive(Debug, Clone)]
pub struct RateLookup {
    /// The rates.
    pub book: Arc<RateBook>,
    /// How they were obtained.
    pub origin: RateOrigin,
}

/// Cache of rate books keyed by base currency.
///
/// Thread-safe and suitable for concurrent access.
#[derive(Clone)]
pub struct RateCache {
    provider: Arc<dyn RateProvider>,
    fresh: Cache<Currency, Arc<RateBook>>,
    last_known: Arc<DashMap<Currency, Arc<RateBook>>>,
}

impl RateCache {
    /// Creates a rate cache with the default 24 hour TTL.
    #[must_use]
    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        Self::with_ttl(provider, Duration::from_secs(DEFAULT_TTL_SECS))
    }

    /// Creates a rate cache with a custom TTL.
    #[must_use]
    pub fn with_ttl(provider: Arc<dyn RateProvider>, ttl: Duration) -> Self {
        let fresh = Cache::builder()
            .max_capacity(DEFAULT_CACHE_CAPACITY)
            .time_to_live(ttl)
            .build();

        Self {
            provider,
            fresh,
            last_known: Arc::new(DashMap::new()),
        }
    }

    /// Records `book` as the fallback for its base without marking it fresh.
    pub fn remember(&self, book: RateBook) {
        self.last_known.insert(book.base, Arc::new(book));
    }

    /// Returns the rates against `base`, fetching when the cache is stale.
    ///
    /// Never fails: provider errors degrade to the last-known book, then to
    /// an empty book.
    #[must_use]
    pub fn rates(&self, base: Currency) -> RateLookup {
        if let Some(book) = self.fresh.get(&base) {
            debug!(%base, "Serving cached exchange rates");
            return RateLookup {
                book,
                origin: RateOrigin::Cached,
            };
        }

        match self.provider.fetch(base) {
            Ok(book) => {
                debug!(%base, quotes = book.rates.len(), "Fetched exchange rates");
                let book = Arc::new(book);
                self.fresh.insert(base, Arc::clone(&book));
                self.last_known.insert(base, Arc::clone(&book));
                RateLookup {
                    book,
                    origin: RateOrigin::Fetched,
                }
            }
            Err(err) => {
                if let Some(book) = self.last_known.get(&base).map(|b| Arc::clone(b.value())) {
                    warn!(
                        %base,
                        error = %err,
                        fetched_at = %book.fetched_at,
                        "Rate fetch failed, using last known rates"
                    );
                    RateLookup {
                        book,
                        origin: RateOrigin::LastKnown,
                    }
                } else {
                    warn!(%base, error = %err, "Rate fetch failed, defaulting every rate to 1");
                    RateLookup {
                        book: Arc::new(RateBook::empty(base)),
                        origin: RateOrigin::Default,
                    }
                }
            }
        }
    }

    /// Invalidates all fresh entries; last-known books are kept.
    pub fn invalidate_all(&self) {
        self.fresh.invalidate_all();
    }

    /// Returns the number of fresh entries currently in the cache.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.fresh.entry_count()
    }

    /// Runs cache maintenance tasks.
    pub fn run_pending_tasks(&self) {
        self.fresh.run_pending_tasks();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::error::RateError;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Provider that counts calls and can be switched to failing.
    struct ScriptedProvider {
        calls: AtomicUsize,
        failing: AtomicBool,
    }

    impl ScriptedProvider {
        fn new(failing: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                failing: AtomicBool::new(failing),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RateProvider for ScriptedProvider {
        fn fetch(&self, base: Currency) -> Result<RateBook, RateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(RateError::Request("connection refused".into()));
            }
            Ok(RateBook::new(base, [(Currency::Usd, dec!(0.137))]))
        }
    }

    #[test]
    fn test_fetch_then_cached() {
        let provider = ScriptedProvider::new(false);
        let cache = RateCache::new(provider.clone());

        let first = cache.rates(Currency::Cny);
        assert_eq!(first.origin, RateOrigin::Fetched);
        assert_eq!(first.book.rate_for(Currency::Usd), dec!(0.137));

        let second = cache.rates(Currency::Cny);
        assert_eq!(second.origin, RateOrigin::Cached);
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn test_bases_are_cached_separately() {
        let provider = ScriptedProvider::new(false);
        let cache = RateCache::new(provider.clone());

        let _ = cache.rates(Currency::Cny);
        let other = cache.rates(Currency::Eur);
        assert_eq!(other.origin, RateOrigin::Fetched);
        assert_eq!(provider.calls(), 2);
    }

    #[test]
    fn test_expired_entry_is_refetched() {
        let provider = ScriptedProvider::new(false);
        let cache = RateCache::with_ttl(provider.clone(), Duration::from_millis(50));

        let _ = cache.rates(Currency::Cny);
        std::thread::sleep(Duration::from_millis(120));

        let lookup = cache.rates(Currency::Cny);
        assert_eq!(lookup.origin, RateOrigin::Fetched);
        assert_eq!(provider.calls(), 2);
    }

    #[test]
    fn test_failure_serves_last_known() {
        let provider = ScriptedProvider::new(false);
        let cache = RateCache::new(provider.clone());

        let _ = cache.rates(Currency::Cny);
        cache.invalidate_all();
        cache.run_pending_tasks();
        provider.failing.store(true, Ordering::SeqCst);

        let lookup = cache.rates(Currency::Cny);
        assert_eq!(lookup.origin, RateOrigin::LastKnown);
        assert_eq!(lookup.book.rate_for(Currency::Usd), dec!(0.137));
    }

    #[test]
    fn test_failure_without_history_defaults_to_one() {
        let provider = ScriptedProvider::new(true);
        let cache = RateCache::new(provider.clone());

        let lookup = cache.rates(Currency::Cny);
        assert_eq!(lookup.origin, RateOrigin::Default);
        assert_eq!(lookup.book.rate_for(Currency::Usd), dec!(1));
        assert_eq!(cache.entry_count(), 0);
    }

    #[test]
    fn test_remembered_book_is_fallback_only() {
        let provider = ScriptedProvider::new(true);
        let cache = RateCache::new(provider.clone());
        cache.remember(RateBook::new(Currency::Cny, [(Currency::Usd, dec!(0.14))]));

        let lookup = cache.rates(Currency::Cny);
        assert_eq!(lookup.origin, RateOrigin::LastKnown);
        assert_eq!(lookup.book.rate_for(Currency::Usd), dec!(0.14));
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn test_entry_count() {
        let cache = RateCache::new(ScriptedProvider::new(false));
        assert_eq!(cache.entry_count(), 0);

        let _ = cache.rates(Currency::Cny);
        cache.run_pending_tasks();
        assert!(cache.entry_count() >= 1);
    }
}
