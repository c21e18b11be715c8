//! Plain-text rendering of the quote table and intraday chart.

use chrono::Local;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use stockdash_core::{AppState, ChartView, QuoteSort, SortDirection, SortKey};
use stockdash_market_data::{Quote, Series};

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Widest sparkline printed; longer series are down-sampled.
const SPARK_WIDTH: usize = 60;

#[derive(Tabled)]
struct QuoteRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "")]
    trend: &'static str,
    #[tabled(rename = "Change %")]
    change_percent: String,
    #[tabled(rename = "Change")]
    change: String,
    #[tabled(rename = "Prev Close")]
    previous_close: String,
    #[tabled(rename = "Trading Day")]
    latest_trading_day: String,
}

impl From<&Quote> for QuoteRow {
    fn from(quote: &Quote) -> Self {
        Self {
            symbol: quote.symbol.clone(),
            price: format!("{:.2}", quote.price),
            trend: if quote.is_up() { "▲" } else { "▼" },
            change_percent: format_change_percent(quote.change_percent),
            change: format!("{:+.2}", quote.change),
            previous_close: format!("{:.2}", quote.previous_close),
            latest_trading_day: quote.latest_trading_day.clone().unwrap_or_default(),
        }
    }
}

pub fn format_change_percent(value: f64) -> String {
    format!("{:+.2}%", value)
}

fn sort_caption(sort: &QuoteSort) -> String {
    let arrow = match sort.direction {
        SortDirection::Asc => "▲",
        SortDirection::Desc => "▼",
    };
    format!("sorted by {} {}", sort.key, arrow)
}

/// Quote table plus warning and loading lines.
pub fn render_board(state: &AppState) -> String {
    let mut out = String::new();

    if let Some(warning) = &state.warning {
        out.push_str(&format!("! {}\n", warning));
    }

    if state.watchlist.is_empty() {
        out.push_str("Watch-list is empty. Use 'add <SYMBOL>' to track a symbol.\n");
        return out;
    }

    if state.loading {
        out.push_str("Loading quotes...\n");
    }

    let quotes = state.sorted_quotes();
    if quotes.is_empty() {
        if !state.loading {
            out.push_str("No quotes to show.\n");
        }
        return out;
    }

    let rows: Vec<QuoteRow> = quotes.iter().map(QuoteRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    out.push_str(&table.to_string());
    out.push('\n');
    out.push_str(&sort_caption(&state.sort));
    out.push('\n');
    out
}

/// Chart area for the selected symbol.
pub fn render_chart(view: &ChartView) -> String {
    match view {
        ChartView::Error { message, .. } => format!("Chart error: {}\n", message),
        ChartView::NoData { symbol } => format!("No chart data for {}.\n", symbol),
        ChartView::Points { series, .. } => {
            let legend = view.legend().unwrap_or_default();
            let mut out = format!("Intraday Chart: {}\n", legend);
            out.push_str(&sparkline(series, SPARK_WIDTH));
            out.push('\n');
            if let (Some(first), Some(last), Some((lo, hi))) =
                (series.first(), series.last(), series.close_range())
            {
                out.push_str(&format!(
                    "{} → {}   low {:.2}  high {:.2}  last {:.2}\n",
                    first.timestamp.with_timezone(&Local).format("%b %d %H:%M"),
                    last.timestamp.with_timezone(&Local).format("%b %d %H:%M"),
                    lo,
                    hi,
                    last.close
                ));
            }
            out
        }
    }
}

/// One block character per (down-sampled) close, scaled between min and max.
pub fn sparkline(series: &Series, width: usize) -> String {
    let points = series.points();
    let Some((lo, hi)) = series.close_range() else {
        return String::new();
    };
    if width == 0 {
        return String::new();
    }

    let step = points.len().div_ceil(width).max(1);
    let span = hi - lo;
    points
        .chunks(step)
        .map(|chunk| {
            let close = chunk[chunk.len() - 1].close;
            let level = if span > 0.0 {
                (((close - lo) / span) * (SPARK_LEVELS.len() - 1) as f64).round() as usize
            } else {
                SPARK_LEVELS.len() / 2
            };
            SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
        })
        .collect()
}

/// Sort column names as typed after `sort`.
pub fn sort_key_hint() -> String {
    SortKey::ALL
        .iter()
        .map(SortKey::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use stockdash_core::Watchlist;
    use stockdash_market_data::SeriesPoint;

    fn series(closes: &[f64]) -> Series {
        Series::from_points(
            closes
                .iter()
                .enumerate()
                .map(|(i, close)| SeriesPoint {
                    timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 14, i as u32, 0).unwrap(),
                    close: *close,
                })
                .collect(),
        )
    }

    #[test]
    fn test_format_change_percent() {
        assert_eq!(format_change_percent(-1.23), "-1.23%");
        assert_eq!(format_change_percent(0.5), "+0.50%");
    }

    #[test]
    fn test_sparkline_scales_between_extremes() {
        assert_eq!(sparkline(&series(&[1.0, 2.0, 3.0]), 10), "▁▅█");
        assert_eq!(sparkline(&series(&[5.0, 5.0]), 10), "▅▅");
        assert_eq!(sparkline(&Series::default(), 10), "");
    }

    #[test]
    fn test_sparkline_downsamples() {
        let closes: Vec<f64> = (0..50).map(f64::from).collect();
        assert_eq!(sparkline(&series(&closes), 10).chars().count(), 10);
    }

    #[test]
    fn test_board_shows_warning_and_rows() {
        let mut state = AppState::new(Watchlist::from_symbols(["AAPL", "MSFT"]));
        state.quotes = vec![Quote::new("MSFT", 410.0, -1.23), Quote::new("AAPL", 189.0, 0.5)];
        state.warning = Some("Some symbols failed: 1. Try again later (API limit?).".into());

        let out = render_board(&state);
        assert!(out.starts_with("! Some symbols failed: 1."));
        assert!(out.contains("-1.23%"));
        let row = |symbol: &str| out.lines().find(|l| l.contains(symbol)).unwrap_or_default();
        assert!(row("AAPL").contains('▲'));
        assert!(row("MSFT").contains('▼'));
        assert!(out.find("AAPL").unwrap() < out.find("MSFT").unwrap());
        assert!(out.contains("sorted by Symbol ▲"));
    }

    #[test]
    fn test_board_empty_watchlist() {
        let state = AppState::new(Watchlist::new());
        assert!(render_board(&state).contains("Watch-list is empty"));
    }

    #[test]
    fn test_chart_error_and_no_data() {
        let error = ChartView::Error {
            symbol: "MSFT".into(),
            message: "API limit reached. Please wait and try again.".into(),
        };
        assert_eq!(
            render_chart(&error),
            "Chart error: API limit reached. Please wait and try again.\n"
        );
        let empty = ChartView::NoData {
            symbol: "MSFT".into(),
        };
        assert_eq!(render_chart(&empty), "No chart data for MSFT.\n");
    }

    #[test]
    fn test_sort_key_hint() {
        assert_eq!(sort_key_hint(), "symbol, price, change");
        for name in sort_key_hint().split(", ") {
            assert!(name.parse::<SortKey>().is_ok(), "{}", name);
        }
    }
}
