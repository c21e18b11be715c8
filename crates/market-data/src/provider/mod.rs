//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - The Alpha Vantage implementation, including its response normalizers
//!
//! Providers return normalized [`Quote`](crate::models::Quote) and
//! [`Series`](crate::models::Series) values; raw response shapes stay private
//! to each provider module.

mod traits;

pub mod alpha_vantage;

// Re-exports
pub use traits::MarketDataProvider;
