//! Market data models
//!
//! This module contains the normalized records produced by providers:
//! - `quote` - Latest quote for a single symbol (Quote)
//! - `series` - Intraday closing-price series (SeriesPoint, Series, Interval)

mod quote;
mod series;

pub use quote::Quote;
pub use series::{Interval, ParseIntervalError, Series, SeriesPoint};
