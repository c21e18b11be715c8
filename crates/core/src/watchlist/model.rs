use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_WATCHLIST, MAX_SYMBOL_LEN};
use crate::errors::{Error, Result};

/// Ordered set of ticker symbols.
///
/// Insertion order is display order. Symbols are stored upper-cased and each
/// appears at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watchlist {
    symbols: Vec<String>,
}

/// Trim and upper-case user input into a ticker symbol.
///
/// Letters, digits, `.`, `-`, `^` and `=` are accepted (e.g. `BRK.B`, `^GSPC`).
pub fn normalize_symbol(raw: &str) -> Result<String> {
    let symbol = raw.trim().to_ascii_uppercase();
    if symbol.is_empty() {
        return Err(Error::Validation("Symbol cannot be empty".into()));
    }
    if symbol.len() > MAX_SYMBOL_LEN {
        return Err(Error::Validation(format!(
            "Symbol '{}' is longer than {} characters",
            symbol, MAX_SYMBOL_LEN
        )));
    }
    if let Some(c) = symbol
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=')))
    {
        return Err(Error::Validation(format!(
            "Symbol '{}' contains invalid character '{}'",
            symbol, c
        )));
    }
    Ok(symbol)
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// The watch-list used when nothing usable has been persisted.
    pub fn default_symbols() -> Self {
        Self::from_symbols(DEFAULT_WATCHLIST)
    }

    /// Build a watch-list, skipping invalid entries and later duplicates.
    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut watchlist = Self::new();
        for symbol in symbols {
            // Invalid persisted entries are dropped, not fatal.
            let _ = watchlist.add(symbol.as_ref());
        }
        watchlist
    }

    /// Append a symbol.
    ///
    /// Returns `Ok(false)` when the symbol is already present; the list is
    /// left untouched in that case.
    pub fn add(&mut self, raw: &str) -> Result<bool> {
        let symbol = normalize_symbol(raw)?;
        if self.contains(&symbol) {
            return Ok(false);
        }
        self.symbols.push(symbol);
        Ok(true)
    }

    /// Remove a symbol. Returns `false` when it was not present.
    pub fn remove(&mut self, raw: &str) -> bool {
        let Ok(symbol) = normalize_symbol(raw) else {
            return false;
        };
        let before = self.symbols.len();
        self.symbols.retain(|s| *s != symbol);
        self.symbols.len() != before
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s.eq_ignore_ascii_case(symbol.trim()))
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
