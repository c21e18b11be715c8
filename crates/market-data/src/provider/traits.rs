//! Market data provider trait definitions.
//!
//! This module defines the core `MarketDataProvider` trait that all
//! market data providers must implement.

use async_trait::async_trait;

use crate::errors::FetchError;
use crate::models::{Interval, Quote, Series};

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source, or to
/// substitute a scripted provider in tests.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use stockdash_market_data::provider::MarketDataProvider;
///
/// struct MyProvider {
///     api_key: String,
/// }
///
/// #[async_trait]
/// impl MarketDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     // ... implement quote and series methods
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "ALPHA_VANTAGE".
    /// Used for logging.
    fn id(&self) -> &'static str;

    /// Fetch the latest quote for a symbol.
    ///
    /// Issues exactly one request. Errors carry `symbol` as passed in, even
    /// when the provider substitutes a different symbol on the wire.
    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, FetchError>;

    /// Fetch an intraday closing-price series for a symbol.
    ///
    /// # Returns
    ///
    /// A series ordered by timestamp ascending. An empty series is a valid
    /// result and means the provider had no usable bars.
    async fn get_intraday_series(
        &self,
        symbol: &str,
        interval: Interval,
    ) -> Result<Series, FetchError>;
}
