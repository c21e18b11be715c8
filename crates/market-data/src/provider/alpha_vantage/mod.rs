//! Alpha Vantage market data provider implementation.
//!
//! This module provides market data from the Alpha Vantage API:
//! - Latest quotes via the GLOBAL_QUOTE endpoint
//! - Intraday closing prices via the TIME_SERIES_INTRADAY endpoint
//!
//! Note: Alpha Vantage reports throttling with HTTP 200 and a `Note` field,
//! so every response goes through [`normalize`] before it is trusted.

mod credentials;
mod models;
mod normalize;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;

use crate::errors::FetchError;
use crate::models::{Interval, Quote, Series};
use crate::provider::MarketDataProvider;

pub use credentials::{ApiCredentials, DEMO_API_KEY, DEMO_SYMBOL};
pub use normalize::{normalize_quote, normalize_series, RawResponse};

pub const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER_ID: &str = "ALPHA_VANTAGE";

/// Alpha Vantage market data provider.
///
/// Each call issues exactly one GET request; there is no caching or retry.
pub struct AlphaVantageProvider {
    client: Client,
    base_url: String,
    credentials: ApiCredentials,
}

impl AlphaVantageProvider {
    /// Create a provider against the public Alpha Vantage endpoint.
    pub fn new(credentials: ApiCredentials) -> Self {
        Self::with_base_url(credentials, BASE_URL)
    }

    /// Create a provider against a custom endpoint (proxies, test servers).
    pub fn with_base_url(credentials: ApiCredentials, base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .user_agent(concat!("stockdash/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
            credentials,
        }
    }

    /// Build the request URL for `params`, appending the API key.
    fn request_url(&self, params: &[(&str, &str)]) -> Result<reqwest::Url, url::ParseError> {
        let mut all_params: Vec<(&str, &str)> = params.to_vec();
        all_params.push(("apikey", self.credentials.api_key()));
        reqwest::Url::parse_with_params(&self.base_url, &all_params)
    }

    /// Make a request to the Alpha Vantage API.
    ///
    /// Only failures that leave no response at all are returned as errors
    /// here; status classification belongs to the normalizers.
    async fn fetch(
        &self,
        symbol: &str,
        params: &[(&str, &str)],
    ) -> Result<RawResponse, FetchError> {
        let url = self.request_url(params).map_err(|e| {
            warn!("Alpha Vantage: invalid base URL {:?}: {}", self.base_url, e);
            FetchError::transport(symbol, None)
        })?;

        debug!("Alpha Vantage request: {}", redact_api_key(&url));

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Alpha Vantage: request for {} failed: {}", symbol, e);
            FetchError::transport(symbol, e.status().map(|s| s.as_u16()))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!("Alpha Vantage: reading body for {} failed: {}", symbol, e);
            FetchError::transport(symbol, Some(status.as_u16()))
        })?;

        Ok(RawResponse::new(status, body))
    }
}

/// Copy of `url` with the `apikey` query value replaced, for logging.
fn redact_api_key(url: &reqwest::Url) -> reqwest::Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "apikey" {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}

// ============================================================================
// MarketDataProvider trait implementation
// ============================================================================

#[async_trait]
impl MarketDataProvider for AlphaVantageProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, FetchError> {
        let params = [
            ("function", "GLOBAL_QUOTE"),
            ("symbol", self.credentials.wire_symbol(symbol)),
        ];

        let response = self.fetch(symbol, &params).await?;
        let quote = normalize_quote(symbol, &response)?;

        debug!(
            "Alpha Vantage: fetched quote for {} at {}",
            quote.symbol, quote.price
        );
        Ok(quote)
    }

    async fn get_intraday_series(
        &self,
        symbol: &str,
        interval: Interval,
    ) -> Result<Series, FetchError> {
        let params = [
            ("function", "TIME_SERIES_INTRADAY"),
            ("symbol", self.credentials.wire_symbol(symbol)),
            ("interval", interval.as_str()),
            ("outputsize", "compact"),
        ];

        let response = self.fetch(symbol, &params).await?;
        let series = normalize_series(symbol, interval, &response)?;

        debug!(
            "Alpha Vantage: fetched {} {} bars for {}",
            series.len(),
            interval,
            symbol
        );
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_pairs(url: &reqwest::Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_provider_id() {
        let provider = AlphaVantageProvider::new(ApiCredentials::Key("test_key".to_string()));
        assert_eq!(provider.id(), "ALPHA_VANTAGE");
    }

    #[test]
    fn test_request_url_appends_key() {
        let provider = AlphaVantageProvider::new(ApiCredentials::Key("test_key".to_string()));
        let url = provider
            .request_url(&[("function", "GLOBAL_QUOTE"), ("symbol", "AAPL")])
            .unwrap();

        assert_eq!(url.host_str(), Some("www.alphavantage.co"));
        assert_eq!(url.path(), "/query");
        assert_eq!(
            query_pairs(&url),
            vec![
                ("function".to_string(), "GLOBAL_QUOTE".to_string()),
                ("symbol".to_string(), "AAPL".to_string()),
                ("apikey".to_string(), "test_key".to_string()),
            ]
        );
    }

    #[test]
    fn test_request_url_encodes_symbol() {
        let provider = AlphaVantageProvider::new(ApiCredentials::Key("k".to_string()));
        let url = provider.request_url(&[("symbol", "BRK.B&x=1")]).unwrap();
        assert!(url.as_str().contains("symbol=BRK.B%26x%3D1"));
    }

    #[test]
    fn test_redacted_url_hides_only_the_key() {
        let provider = AlphaVantageProvider::new(ApiCredentials::Key("a".to_string()));
        let url = provider
            .request_url(&[("function", "GLOBAL_QUOTE"), ("symbol", "AAPL")])
            .unwrap();
        let redacted = redact_api_key(&url);
        assert_eq!(
            query_pairs(&redacted),
            vec![
                ("function".to_string(), "GLOBAL_QUOTE".to_string()),
                ("symbol".to_string(), "AAPL".to_string()),
                ("apikey".to_string(), "***".to_string()),
            ]
        );
    }

    #[test]
    fn test_redacted_url_hides_encoded_key() {
        let provider = AlphaVantageProvider::new(ApiCredentials::Key("k&y=1".to_string()));
        let url = provider.request_url(&[("symbol", "AAPL")]).unwrap();
        let redacted = redact_api_key(&url).to_string();
        assert!(!redacted.contains("k%26y"));
        assert!(redacted.ends_with("apikey=***"));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let provider = AlphaVantageProvider::with_base_url(ApiCredentials::Demo, "not a url");
        assert!(provider.request_url(&[("function", "GLOBAL_QUOTE")]).is_err());
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_transport_error() {
        let provider = AlphaVantageProvider::with_base_url(ApiCredentials::Demo, "not a url");
        let err = provider.get_latest_quote("AAPL").await.unwrap_err();
        assert_eq!(err, FetchError::transport("AAPL", None));
    }
}
