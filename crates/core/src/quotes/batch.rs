use futures::future::join_all;
use log::{debug, warn};

use stockdash_market_data::{FetchError, MarketDataProvider, Quote};

/// Result of one batch quote pass.
///
/// Only the number of failures is kept; the individual errors are logged
/// and dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchQuotes {
    /// Quotes that were fetched, in no guaranteed order
    pub quotes: Vec<Quote>,
    /// Number of symbols whose fetch failed
    pub failed: usize,
}

impl BatchQuotes {
    /// Aggregate user-facing warning, present only when something failed.
    pub fn warning(&self) -> Option<String> {
        (self.failed > 0).then(|| {
            format!(
                "Some symbols failed: {}. Try again later (API limit?).",
                self.failed
            )
        })
    }
}

/// Fetch the latest quote for every symbol concurrently.
///
/// All requests are started together and awaited until every one has
/// settled; a failure never cancels or hides the others. An empty symbol
/// list returns immediately without touching the provider.
pub async fn fetch_quotes(provider: &dyn MarketDataProvider, symbols: &[String]) -> BatchQuotes {
    if symbols.is_empty() {
        return BatchQuotes::default();
    }

    debug!("Fetching {} quotes from {}", symbols.len(), provider.id());

    let futures = symbols
        .iter()
        .map(|symbol| provider.get_latest_quote(symbol));
    let results = join_all(futures).await;

    let mut batch = BatchQuotes::default();
    let mut errors_for_logging: Vec<FetchError> = Vec::new();

    for result in results {
        match result {
            Ok(quote) => batch.quotes.push(quote),
            Err(e) => errors_for_logging.push(e),
        }
    }
    batch.failed = errors_for_logging.len();

    if !errors_for_logging.is_empty() {
        warn!(
            "Failed to fetch quotes for {} of {} symbols from {}: {:?}",
            errors_for_logging.len(),
            symbols.len(),
            provider.id(),
            errors_for_logging
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
        );
    }

    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use stockdash_market_data::{Interval, Series};
    use tokio::sync::Barrier;

    // =========================================================================
    // Mock provider
    // =========================================================================

    #[derive(Default)]
    struct MockProvider {
        failures: HashMap<String, FetchError>,
        calls: Mutex<Vec<String>>,
        barrier: Option<Arc<Barrier>>,
    }

    impl MockProvider {
        fn new() -> Self {
            Self::default()
        }

        fn failing(mut self, symbol: &str, error: FetchError) -> Self {
            self.failures.insert(symbol.to_string(), error);
            self
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl MarketDataProvider for MockProvider {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, FetchError> {
            self.calls.lock().unwrap().push(symbol.to_string());
            if let Some(barrier) = &self.barrier {
                barrier.wait().await;
            }
            match self.failures.get(symbol) {
                Some(error) => Err(error.clone()),
                None => Ok(Quote::new(symbol, 100.0, 1.0)),
            }
        }

        async fn get_intraday_series(
            &self,
            _symbol: &str,
            _interval: Interval,
        ) -> Result<Series, FetchError> {
            Ok(Series::default())
        }
    }

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_successes() {
        let provider = MockProvider::new().failing("BADSYM", FetchError::unavailable("BADSYM"));

        let batch = fetch_quotes(&provider, &symbols(&["AAPL", "BADSYM", "MSFT"])).await;

        let mut fetched: Vec<&str> = batch.quotes.iter().map(|q| q.symbol.as_str()).collect();
        fetched.sort();
        assert_eq!(fetched, vec!["AAPL", "MSFT"]);
        assert_eq!(batch.failed, 1);
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_warning_carries_only_count() {
        let provider = MockProvider::new()
            .failing("A", FetchError::rate_limited("A"))
            .failing("B", FetchError::transport("B", Some(502)));

        let batch = fetch_quotes(&provider, &symbols(&["A", "B", "C"])).await;

        assert_eq!(
            batch.warning().as_deref(),
            Some("Some symbols failed: 2. Try again later (API limit?).")
        );
    }

    #[tokio::test]
    async fn test_all_success_has_no_warning() {
        let provider = MockProvider::new();
        let batch = fetch_quotes(&provider, &symbols(&["AAPL", "MSFT"])).await;
        assert_eq!(batch.quotes.len(), 2);
        assert_eq!(batch.failed, 0);
        assert_eq!(batch.warning(), None);
    }

    #[tokio::test]
    async fn test_all_failures_yields_empty_quotes() {
        let provider = MockProvider::new()
            .failing("A", FetchError::rate_limited("A"))
            .failing("B", FetchError::rate_limited("B"));
        let batch = fetch_quotes(&provider, &symbols(&["A", "B"])).await;
        assert!(batch.quotes.is_empty());
        assert_eq!(batch.failed, 2);
    }

    #[tokio::test]
    async fn test_empty_watchlist_makes_no_calls() {
        let provider = MockProvider::new();
        let batch = fetch_quotes(&provider, &[]).await;
        assert_eq!(batch, BatchQuotes::default());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_fetches_run_concurrently() {
        // Every fetch parks on the barrier; it only opens once all three
        // requests are in flight at the same time.
        let provider = MockProvider {
            barrier: Some(Arc::new(Barrier::new(3))),
            ..MockProvider::default()
        };

        let batch = tokio::time::timeout(
            Duration::from_secs(5),
            fetch_quotes(&provider, &symbols(&["AAPL", "MSFT", "GOOGL"])),
        )
        .await
        .expect("fetches were not issued concurrently");

        assert_eq!(batch.quotes.len(), 3);
    }
}
