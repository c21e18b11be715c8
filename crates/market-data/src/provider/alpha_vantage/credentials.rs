//! API key resolution for Alpha Vantage.

use log::info;

/// Public key accepted by Alpha Vantage for a handful of showcase symbols.
pub const DEMO_API_KEY: &str = "demo";

/// The one symbol the demo key is known to serve for every endpoint we use.
pub const DEMO_SYMBOL: &str = "MSFT";

/// Credentials used to sign requests.
#[derive(Clone, PartialEq, Eq)]
pub enum ApiCredentials {
    /// A user-supplied API key
    Key(String),
    /// The public demonstration key; every request is pinned to [`DEMO_SYMBOL`]
    Demo,
}

impl ApiCredentials {
    /// Resolve credentials from a configured value.
    ///
    /// Missing or blank keys fall back to [`ApiCredentials::Demo`].
    pub fn from_key(key: Option<String>) -> Self {
        match key.map(|k| k.trim().to_string()) {
            Some(k) if !k.is_empty() => Self::Key(k),
            _ => {
                info!(
                    "No Alpha Vantage API key configured, using demo key ({} only)",
                    DEMO_SYMBOL
                );
                Self::Demo
            }
        }
    }

    pub fn api_key(&self) -> &str {
        match self {
            Self::Key(key) => key,
            Self::Demo => DEMO_API_KEY,
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Self::Demo)
    }

    /// The symbol that is actually sent to the provider for `requested`.
    pub fn wire_symbol<'a>(&self, requested: &'a str) -> &'a str {
        match self {
            Self::Key(_) => requested,
            Self::Demo => DEMO_SYMBOL,
        }
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key(_) => f.write_str("Key(***)"),
            Self::Demo => f.write_str("Demo"),
        }
    }
}
