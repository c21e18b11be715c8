//! Error types for the market data crate.
//!
//! This module provides:
//! - [`FetchError`]: The failure produced by providers and response normalizers
//! - [`FetchErrorKind`]: A fieldless tag for matching on the failure class

use thiserror::Error;

/// Errors that can occur while fetching and normalizing provider data.
///
/// Every variant carries the symbol that was requested, so a failure can be
/// attributed after a batch of concurrent fetches settles.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The provider throttled the request.
    /// Alpha Vantage reports this with HTTP 200 and a `Note` field.
    #[error("API limit reached. Please wait and try again. ({symbol})")]
    RateLimited {
        /// The symbol that was requested
        symbol: String,
    },

    /// The provider returned no quote or series for the symbol.
    #[error("Data not available for symbol: {symbol}")]
    SymbolUnavailable {
        /// The symbol that was requested
        symbol: String,
    },

    /// The request did not produce a 2xx response.
    /// `status` is `None` when no response was received at all.
    #[error("Transport error for {symbol}: {}", describe_status(.status))]
    Transport {
        /// The symbol that was requested
        symbol: String,
        /// HTTP status code, if a response arrived
        status: Option<u16>,
    },

    /// A numeric or structural field could not be parsed.
    #[error("Malformed response for {symbol}: {message}")]
    Malformed {
        /// The symbol that was requested
        symbol: String,
        /// What failed to parse
        message: String,
    },
}

/// Fieldless classification of a [`FetchError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FetchErrorKind {
    RateLimited,
    SymbolUnavailable,
    Transport,
    Malformed,
}

impl FetchError {
    pub fn rate_limited(symbol: impl Into<String>) -> Self {
        Self::RateLimited {
            symbol: symbol.into(),
        }
    }

    pub fn unavailable(symbol: impl Into<String>) -> Self {
        Self::SymbolUnavailable {
            symbol: symbol.into(),
        }
    }

    pub fn transport(symbol: impl Into<String>, status: Option<u16>) -> Self {
        Self::Transport {
            symbol: symbol.into(),
            status,
        }
    }

    pub fn malformed(symbol: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            symbol: symbol.into(),
            message: message.into(),
        }
    }

    /// The symbol whose fetch produced this error.
    pub fn symbol(&self) -> &str {
        match self {
            Self::RateLimited { symbol }
            | Self::SymbolUnavailable { symbol }
            | Self::Transport { symbol, .. }
            | Self::Malformed { symbol, .. } => symbol,
        }
    }

    /// Returns the failure class of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use stockdash_market_data::errors::{FetchError, FetchErrorKind};
    ///
    /// let error = FetchError::transport("AAPL", Some(503));
    /// assert_eq!(error.kind(), FetchErrorKind::Transport);
    /// ```
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::RateLimited { .. } => FetchErrorKind::RateLimited,
            Self::SymbolUnavailable { .. } => FetchErrorKind::SymbolUnavailable,
            Self::Transport { .. } => FetchErrorKind::Transport,
            Self::Malformed { .. } => FetchErrorKind::Malformed,
        }
    }
}

fn describe_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("HTTP {}", code),
        None => "no response".to_string(),
    }
}
