use serde::{Deserialize, Serialize};

/// Latest quote for a single ticker symbol.
///
/// Built at the provider boundary from the raw response; the provider's
/// numbered field names never leave the normalizer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Ticker symbol as reported by the provider (never empty)
    pub symbol: String,

    /// Latest trade price (always finite)
    pub price: f64,

    /// Change since previous close, in percentage units (`-1.23` means -1.23%)
    pub change_percent: f64,

    /// Previous session close, `0.0` when the provider omits it
    pub previous_close: f64,

    /// Absolute change since previous close, `0.0` when omitted
    pub change: f64,

    /// Provider trading-day string, passed through unparsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_trading_day: Option<String>,
}

impl Quote {
    /// Create a quote with only the required fields set.
    pub fn new(symbol: impl Into<String>, price: f64, change_percent: f64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            change_percent,
            previous_close: 0.0,
            change: 0.0,
            latest_trading_day: None,
        }
    }

    /// True when the quote moved up (or stayed flat) since the previous close.
    pub fn is_up(&self) -> bool {
        self.change_percent >= 0.0
    }
}
