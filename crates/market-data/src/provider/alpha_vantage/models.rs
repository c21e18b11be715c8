//! Raw Alpha Vantage response shapes.
//!
//! Field names are the provider's numbered keys. Nothing here is exported
//! outside the provider module.

use serde::Deserialize;

/// Top-level keys shared by every Alpha Vantage endpoint.
pub(super) const NOTE_KEY: &str = "Note";
pub(super) const INFORMATION_KEY: &str = "Information";
pub(super) const ERROR_MESSAGE_KEY: &str = "Error Message";

/// GLOBAL_QUOTE response
#[derive(Debug, Deserialize)]
pub(super) struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    pub global_quote: Option<GlobalQuote>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GlobalQuote {
    #[serde(rename = "01. symbol")]
    pub symbol: Option<String>,
    #[serde(rename = "05. price")]
    pub price: Option<String>,
    #[serde(rename = "07. latest trading day")]
    pub latest_trading_day: Option<String>,
    #[serde(rename = "08. previous close")]
    pub previous_close: Option<String>,
    #[serde(rename = "09. change")]
    pub change: Option<String>,
    #[serde(rename = "10. change percent")]
    pub change_percent: Option<String>,
}

/// TIME_SERIES_INTRADAY metadata block
#[derive(Debug, Default, Deserialize)]
pub(super) struct IntradayMetaData {
    #[serde(rename = "6. Time Zone")]
    pub time_zone: Option<String>,
}

/// Key of the intraday bar mapping, e.g. `Time Series (5min)`.
pub(super) fn intraday_series_key(interval: &str) -> String {
    format!("Time Series ({})", interval)
}

pub(super) const META_DATA_KEY: &str = "Meta Data";
pub(super) const CLOSE_KEY: &str = "4. close";
