use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockdash_market_data::Quote;

/// Column the quote table is sorted by.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Symbol,
    Price,
    ChangePercent,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Symbol, SortKey::Price, SortKey::ChangePercent];

    /// Name accepted by `FromStr`, e.g. `change`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Symbol => "symbol",
            SortKey::Price => "price",
            SortKey::ChangePercent => "change",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown sort column '{0}', expected symbol, price or change")]
pub struct ParseSortKeyError(pub String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "symbol" => Ok(SortKey::Symbol),
            "price" => Ok(SortKey::Price),
            "change" | "changepercent" | "change%" => Ok(SortKey::ChangePercent),
            _ => Err(ParseSortKeyError(s.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::Symbol => "Symbol",
            SortKey::Price => "Price",
            SortKey::ChangePercent => "Change %",
        })
    }
}

/// Current sort order of the quote table.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct QuoteSort {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl QuoteSort {
    /// Select a column: the active column flips direction, a new column
    /// starts ascending.
    pub fn select(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.reversed();
        } else {
            self.key = key;
            self.direction = SortDirection::Asc;
        }
    }

    fn compare(&self, a: &Quote, b: &Quote) -> Ordering {
        let ordering = match self.key {
            SortKey::Symbol => a.symbol.cmp(&b.symbol),
            SortKey::Price => a.price.total_cmp(&b.price),
            SortKey::ChangePercent => a.change_percent.total_cmp(&b.change_percent),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Sort quotes in place. Ties keep their relative order.
    pub fn apply(&self, quotes: &mut [Quote]) {
        quotes.sort_by(|a, b| self.compare(a, b));
    }

    pub fn sorted(&self, quotes: &[Quote]) -> Vec<Quote> {
        let mut sorted = quotes.to_vec();
        self.apply(&mut sorted);
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn quotes() -> Vec<Quote> {
        vec![
            Quote::new("MSFT", 410.0, -0.5),
            Quote::new("AAPL", 189.0, 1.5),
            Quote::new("TSLA", 250.0, -3.0),
        ]
    }

    fn symbols(quotes: &[Quote]) -> Vec<&str> {
        quotes.iter().map(|q| q.symbol.as_str()).collect()
    }

    #[test]
    fn test_default_is_symbol_ascending() {
        let sort = QuoteSort::default();
        assert_eq!(symbols(&sort.sorted(&quotes())), vec!["AAPL", "MSFT", "TSLA"]);
    }

    #[test]
    fn test_sort_by_price_and_change() {
        let mut sort = QuoteSort::default();
        sort.select(SortKey::Price);
        assert_eq!(symbols(&sort.sorted(&quotes())), vec!["AAPL", "TSLA", "MSFT"]);

        sort.select(SortKey::ChangePercent);
        assert_eq!(sort.direction, SortDirection::Asc);
        assert_eq!(symbols(&sort.sorted(&quotes())), vec!["TSLA", "MSFT", "AAPL"]);
    }

    #[test]
    fn test_selecting_active_key_toggles_direction() {
        let mut sort = QuoteSort::default();
        sort.select(SortKey::Symbol);
        assert_eq!(sort.direction, SortDirection::Desc);
        assert_eq!(symbols(&sort.sorted(&quotes())), vec!["TSLA", "MSFT", "AAPL"]);

        sort.select(SortKey::Symbol);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!("price".parse::<SortKey>(), Ok(SortKey::Price));
        assert_eq!("Change".parse::<SortKey>(), Ok(SortKey::ChangePercent));
        assert_eq!(" symbol ".parse::<SortKey>(), Ok(SortKey::Symbol));
        assert!("volume".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_key_names_parse_back() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
        }
    }

    proptest! {
        #[test]
        fn prop_price_sort_is_ordered(prices in proptest::collection::vec(-1e6f64..1e6, 0..40)) {
            let quotes: Vec<Quote> = prices
                .iter()
                .enumerate()
                .map(|(i, p)| Quote::new(format!("S{}", i), *p, 0.0))
                .collect();

            let sort = QuoteSort { key: SortKey::Price, direction: SortDirection::Desc };
            let sorted = sort.sorted(&quotes);

            prop_assert_eq!(sorted.len(), quotes.len());
            prop_assert!(sorted.windows(2).all(|w| w[0].price >= w[1].price));
        }
    }
}
