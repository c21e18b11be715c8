//! Stockdash Market Data Crate
//!
//! This crate fetches quotes and intraday series from the market data
//! provider and normalizes them into stable internal records.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  Caller (core)   | --> |    Provider      |  (Alpha Vantage HTTP)
//! +------------------+     +------------------+
//!                                   |
//!                                   v
//!                          +------------------+
//!                          |    Normalizer    |  (status, soft errors, parsing)
//!                          +------------------+
//!                                   |
//!                                   v
//!                      +-----------------------------+
//!                      | Quote / Series / FetchError |
//!                      +-----------------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Quote`] - Latest quote for one symbol
//! - [`Series`] / [`SeriesPoint`] - Intraday closes ordered by time
//! - [`Interval`] - Intraday bar width (5, 15 or 30 minutes)
//! - [`FetchError`] - Rate limit, missing symbol, transport or malformed data

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::{FetchError, FetchErrorKind};

// Re-export all public types from models
pub use models::{Interval, ParseIntervalError, Quote, Series, SeriesPoint};

// Re-export provider types
pub use provider::alpha_vantage::{AlphaVantageProvider, ApiCredentials};
pub use provider::MarketDataProvider;
