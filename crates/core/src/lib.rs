//! Stockdash Core - watch-list, batch quote fetching and dashboard state.
//!
//! This crate sits between the market-data crate (providers and
//! normalizers) and the terminal front end. It is storage-agnostic: the
//! watch-list is persisted through the [`storage::KeyValueStore`] trait.

pub mod app;
pub mod chart;
pub mod constants;
pub mod errors;
pub mod quotes;
pub mod storage;
pub mod watchlist;

pub use app::{AppState, ChartTicket, Dashboard, RefreshTicket};
pub use chart::ChartView;
pub use quotes::{BatchQuotes, QuoteSort, SortDirection, SortKey};
pub use watchlist::Watchlist;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
