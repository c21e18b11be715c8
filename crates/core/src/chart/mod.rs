//! Intraday chart state for the selected symbol.
//!
//! A series fetch either fails as a whole (one message for the user) or
//! yields points; an empty series is "no data", not an error.

use log::warn;

use stockdash_market_data::{FetchError, Interval, MarketDataProvider, Series};

/// What the chart area should show.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartView {
    /// Points to plot, ascending by time (never empty)
    Points {
        symbol: String,
        interval: Interval,
        series: Series,
    },
    /// The fetch succeeded but returned no usable bars
    NoData { symbol: String },
    /// The fetch failed; the message is shown verbatim
    Error { symbol: String, message: String },
}

impl ChartView {
    pub fn from_result(
        symbol: &str,
        interval: Interval,
        result: Result<Series, FetchError>,
    ) -> Self {
        match result {
            Ok(series) if series.is_empty() => ChartView::NoData {
                symbol: symbol.to_string(),
            },
            Ok(series) => ChartView::Points {
                symbol: symbol.to_string(),
                interval,
                series,
            },
            Err(e) => {
                warn!("Chart fetch for {} failed: {}", symbol, e);
                ChartView::Error {
                    symbol: symbol.to_string(),
                    message: user_message(&e),
                }
            }
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            ChartView::Points { symbol, .. }
            | ChartView::NoData { symbol }
            | ChartView::Error { symbol, .. } => symbol,
        }
    }

    /// Legend label such as `MSFT (5m)`.
    pub fn legend(&self) -> Option<String> {
        match self {
            ChartView::Points {
                symbol, interval, ..
            } => Some(format!("{} ({})", symbol, interval.label())),
            _ => None,
        }
    }
}

/// Fetch and wrap the intraday series for `symbol`.
pub async fn load_chart(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    interval: Interval,
) -> ChartView {
    let result = provider.get_intraday_series(symbol, interval).await;
    ChartView::from_result(symbol, interval, result)
}

fn user_message(error: &FetchError) -> String {
    match error {
        FetchError::RateLimited { .. } => "API limit reached. Please wait and try again.".into(),
        FetchError::SymbolUnavailable { .. } => "Series not available".into(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use stockdash_market_data::{Quote, SeriesPoint};

    struct SeriesProvider(Result<Series, FetchError>);

    #[async_trait]
    impl MarketDataProvider for SeriesProvider {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, FetchError> {
            Err(FetchError::unavailable(symbol))
        }

        async fn get_intraday_series(
            &self,
            _symbol: &str,
            _interval: Interval,
        ) -> Result<Series, FetchError> {
            self.0.clone()
        }
    }

    fn one_point_series() -> Series {
        Series::from_points(vec![SeriesPoint {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap(),
            close: 101.5,
        }])
    }

    #[tokio::test]
    async fn test_points() {
        let provider = SeriesProvider(Ok(one_point_series()));
        let view = load_chart(&provider, "MSFT", Interval::FiveMinutes).await;

        assert_eq!(view.legend().as_deref(), Some("MSFT (5m)"));
        match view {
            ChartView::Points { series, .. } => assert_eq!(series.len(), 1),
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_series_is_no_data() {
        let provider = SeriesProvider(Ok(Series::default()));
        let view = load_chart(&provider, "MSFT", Interval::FiveMinutes).await;
        assert_eq!(
            view,
            ChartView::NoData {
                symbol: "MSFT".into()
            }
        );
    }

    #[tokio::test]
    async fn test_rate_limit_message() {
        let provider = SeriesProvider(Err(FetchError::rate_limited("MSFT")));
        let view = load_chart(&provider, "MSFT", Interval::ThirtyMinutes).await;
        assert_eq!(
            view,
            ChartView::Error {
                symbol: "MSFT".into(),
                message: "API limit reached. Please wait and try again.".into(),
            }
        );
    }

    #[test]
    fn test_other_errors_use_display() {
        let view = ChartView::from_result(
            "MSFT",
            Interval::FiveMinutes,
            Err(FetchError::transport("MSFT", Some(500))),
        );
        assert_eq!(view.symbol(), "MSFT");
        assert!(matches!(
            view,
            ChartView::Error { ref message, .. } if message == "Transport error for MSFT: HTTP 500"
        ));
    }
}
