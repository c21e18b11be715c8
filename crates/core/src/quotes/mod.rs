//! Quote fetching and presentation order.
//!
//! - [`batch`] - Concurrent one-request-per-symbol fetch with partial results
//! - [`board`] - Sort order of the quote table
//!
//! ```text
//! Watchlist ──▶ fetch_quotes ──▶ MarketDataProvider (xN, joined)
//!                    │
//!                    ▼
//!              BatchQuotes { quotes, failed } ──▶ QuoteSort ──▶ display
//! ```

pub mod batch;
pub mod board;

pub use batch::{fetch_quotes, BatchQuotes};
pub use board::{ParseSortKeyError, QuoteSort, SortDirection, SortKey};
