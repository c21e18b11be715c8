//! Watch-list of tracked ticker symbols.
//!
//! - [`model`] - The ordered, duplicate-free [`Watchlist`] and symbol input rules
//! - [`persistence`] - Loading from and saving to a
//!   [`KeyValueStore`](crate::storage::KeyValueStore)

pub mod model;
pub mod persistence;

pub use model::{normalize_symbol, Watchlist};
pub use persistence::{load_watchlist, save_watchlist};
