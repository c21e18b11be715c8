//! Application state and the controller that owns it.
//!
//! [`Dashboard`] is the only owner of [`AppState`]. Every mutation goes
//! through it, so the watch-list is persisted exactly when it changes and
//! results from superseded fetches can be recognized and dropped.
//!
//! Refreshes and chart loads are split in two halves so the caller decides
//! where the network work runs:
//!
//! ```text
//! begin_refresh() ──▶ RefreshTicket::fetch ──▶ complete_refresh(ticket, batch)
//!        │                                            │
//!  generation += 1                     applied only if generation matches
//! ```
//!
//! Chart loads follow the same shape with [`ChartTicket`] and their own
//! generation counter.

use std::sync::Arc;

use log::{debug, warn};

use stockdash_market_data::{Interval, MarketDataProvider, Quote};

use crate::chart::{load_chart, ChartView};
use crate::errors::Result;
use crate::quotes::{fetch_quotes, BatchQuotes, QuoteSort, SortKey};
use crate::storage::KeyValueStore;
use crate::watchlist::{load_watchlist, normalize_symbol, save_watchlist, Watchlist};

/// Everything the dashboard displays.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub watchlist: Watchlist,
    /// Quotes from the last applied refresh, in fetch order
    pub quotes: Vec<Quote>,
    /// Aggregate warning from the last applied refresh
    pub warning: Option<String>,
    pub selected: Option<String>,
    pub chart: Option<ChartView>,
    pub sort: QuoteSort,
    pub loading: bool,
    generation: u64,
    chart_generation: u64,
}

impl AppState {
    pub fn new(watchlist: Watchlist) -> Self {
        Self {
            watchlist,
            ..Self::default()
        }
    }

    /// Quotes in table order.
    pub fn sorted_quotes(&self) -> Vec<Quote> {
        self.sort.sorted(&self.quotes)
    }

    fn bump_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn bump_chart_generation(&mut self) -> u64 {
        self.chart_generation += 1;
        self.chart_generation
    }
}

/// A started refresh pass: the symbols to fetch and the generation it
/// belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshTicket {
    generation: u64,
    symbols: Vec<String>,
}

impl RefreshTicket {
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Run the pass against `provider`.
    pub async fn fetch(self, provider: &dyn MarketDataProvider) -> (RefreshTicket, BatchQuotes) {
        let batch = fetch_quotes(provider, &self.symbols).await;
        (self, batch)
    }
}

/// A started chart load for the selected symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartTicket {
    generation: u64,
    symbol: String,
    interval: Interval,
}

impl ChartTicket {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub async fn load(self, provider: &dyn MarketDataProvider) -> (ChartTicket, ChartView) {
        let view = load_chart(provider, &self.symbol, self.interval).await;
        (self, view)
    }
}

/// Top-level controller owning the application state.
pub struct Dashboard {
    provider: Arc<dyn MarketDataProvider>,
    store: Arc<dyn KeyValueStore>,
    state: AppState,
}

impl Dashboard {
    /// Build the dashboard, reading the persisted watch-list from `store`.
    pub fn load(provider: Arc<dyn MarketDataProvider>, store: Arc<dyn KeyValueStore>) -> Self {
        let watchlist = load_watchlist(store.as_ref());
        debug!("Loaded watch-list: {:?}", watchlist.symbols());
        Self {
            provider,
            store,
            state: AppState::new(watchlist),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn provider(&self) -> Arc<dyn MarketDataProvider> {
        Arc::clone(&self.provider)
    }

    /// Add a symbol to the watch-list and persist it.
    ///
    /// Returns `Ok(false)` when the symbol was already tracked; nothing is
    /// written in that case.
    pub fn add_symbol(&mut self, raw: &str) -> Result<bool> {
        if !self.state.watchlist.add(raw)? {
            return Ok(false);
        }
        self.watchlist_changed();
        Ok(true)
    }

    /// Remove a symbol from the watch-list and persist it.
    ///
    /// Clears the selection and chart when the removed symbol was selected.
    pub fn remove_symbol(&mut self, raw: &str) -> bool {
        if !self.state.watchlist.remove(raw) {
            return false;
        }
        if let Ok(symbol) = normalize_symbol(raw) {
            self.state.quotes.retain(|q| q.symbol != symbol);
            if self.state.selected.as_deref() == Some(symbol.as_str()) {
                self.state.selected = None;
                self.state.chart = None;
                self.state.bump_chart_generation();
            }
        }
        self.watchlist_changed();
        true
    }

    fn watchlist_changed(&mut self) {
        // In-flight passes were started for the old list.
        self.state.bump_generation();
        if let Err(e) = save_watchlist(self.store.as_ref(), &self.state.watchlist) {
            warn!("Failed to persist watch-list: {}", e);
        }
    }

    /// Start a refresh pass for the current watch-list.
    ///
    /// Any pass started earlier is superseded: its result will be ignored by
    /// [`complete_refresh`](Self::complete_refresh).
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        let generation = self.state.bump_generation();
        self.state.loading = !self.state.watchlist.is_empty();
        RefreshTicket {
            generation,
            symbols: self.state.watchlist.symbols().to_vec(),
        }
    }

    /// Apply the result of a refresh pass.
    ///
    /// Returns `false` (and changes nothing) when the pass was superseded.
    pub fn complete_refresh(&mut self, ticket: RefreshTicket, batch: BatchQuotes) -> bool {
        if ticket.generation != self.state.generation {
            debug!(
                "Discarding superseded refresh (generation {}, current {})",
                ticket.generation, self.state.generation
            );
            return false;
        }
        self.state.warning = batch.warning();
        self.state.quotes = batch.quotes;
        self.state.loading = false;
        true
    }

    /// Run a full refresh pass inline.
    pub async fn refresh(&mut self) {
        let ticket = self.begin_refresh();
        let (ticket, batch) = ticket.fetch(self.provider.as_ref()).await;
        self.complete_refresh(ticket, batch);
    }

    /// Select the quote table column to sort by.
    pub fn set_sort(&mut self, key: SortKey) {
        self.state.sort.select(key);
    }

    /// Select `raw` and start loading its chart.
    ///
    /// The previous chart is cleared, and any chart load started earlier is
    /// superseded, even one for the same symbol at another interval.
    pub fn begin_chart(&mut self, raw: &str, interval: Interval) -> Result<ChartTicket> {
        let symbol = normalize_symbol(raw)?;
        self.state.selected = Some(symbol.clone());
        self.state.chart = None;
        Ok(ChartTicket {
            generation: self.state.bump_chart_generation(),
            symbol,
            interval,
        })
    }

    /// Store the chart for `ticket`.
    ///
    /// Returns `false` (and changes nothing) when the load was superseded.
    pub fn complete_chart(&mut self, ticket: ChartTicket, view: ChartView) -> bool {
        if ticket.generation != self.state.chart_generation {
            debug!(
                "Discarding superseded {} chart for {}",
                ticket.interval, ticket.symbol
            );
            return false;
        }
        self.state.chart = Some(view);
        true
    }

    /// Select `raw` and load its chart inline.
    pub async fn show_chart(&mut self, raw: &str, interval: Interval) -> Result<()> {
        let ticket = self.begin_chart(raw, interval)?;
        let (ticket, view) = ticket.load(self.provider.as_ref()).await;
        self.complete_chart(ticket, view);
        Ok(())
    }
}
