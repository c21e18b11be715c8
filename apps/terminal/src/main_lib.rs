use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use stockdash_core::storage::FileKeyValueStore;
use stockdash_core::{BatchQuotes, ChartTicket, ChartView, Dashboard, RefreshTicket};
use stockdash_market_data::{AlphaVantageProvider, ApiCredentials, Interval};

use crate::commands::{Command, HELP};
use crate::config::{Config, LogFormat};
use crate::render::{render_board, render_chart, sort_key_hint};

pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

pub fn build_dashboard(config: &Config) -> anyhow::Result<Dashboard> {
    let credentials = ApiCredentials::from_key(config.api_key.clone());
    if credentials.is_demo() {
        tracing::warn!("ALPHA_VANTAGE_KEY is not set; the demo key serves MSFT for every symbol");
    }
    let provider = AlphaVantageProvider::with_base_url(credentials, config.api_base.clone());

    if !config.data_dir.exists() {
        std::fs::create_dir_all(&config.data_dir)?;
    }
    let storage_path = config.storage_path();
    tracing::info!("Watch-list storage: {}", storage_path.display());
    let store = FileKeyValueStore::new(storage_path);

    Ok(Dashboard::load(Arc::new(provider), Arc::new(store)))
}

/// Results delivered back to the command loop by background fetches.
enum Event {
    Quotes(RefreshTicket, BatchQuotes),
    Chart(ChartTicket, ChartView),
}

fn spawn_refresh(dashboard: &mut Dashboard, tx: &mpsc::UnboundedSender<Event>) {
    let ticket = dashboard.begin_refresh();
    let provider = dashboard.provider();
    let tx = tx.clone();
    tokio::spawn(async move {
        let (ticket, batch) = ticket.fetch(provider.as_ref()).await;
        // The receiver is gone only when the loop has exited.
        let _ = tx.send(Event::Quotes(ticket, batch));
    });
}

fn spawn_chart(
    dashboard: &mut Dashboard,
    tx: &mpsc::UnboundedSender<Event>,
    raw: &str,
    interval: Interval,
) -> stockdash_core::Result<String> {
    let ticket = dashboard.begin_chart(raw, interval)?;
    let symbol = ticket.symbol().to_string();
    let provider = dashboard.provider();
    let tx = tx.clone();
    tokio::spawn(async move {
        let (ticket, view) = ticket.load(provider.as_ref()).await;
        let _ = tx.send(Event::Chart(ticket, view));
    });
    Ok(symbol)
}

fn print_board(dashboard: &Dashboard) {
    print!("{}", render_board(dashboard.state()));
}

fn prompt() {
    use std::io::Write;
    print!("> ");
    let _ = std::io::stdout().flush();
}

/// Outcome of one command line.
enum Flow {
    Continue,
    Exit,
}

fn handle_line(
    dashboard: &mut Dashboard,
    tx: &mpsc::UnboundedSender<Event>,
    line: &str,
) -> Flow {
    let command = match line.parse::<Command>() {
        Ok(command) => command,
        Err(e) => {
            println!("{}", e);
            return Flow::Continue;
        }
    };

    match command {
        Command::Add(raw) => match dashboard.add_symbol(&raw) {
            Ok(true) => spawn_refresh(dashboard, tx),
            Ok(false) => println!("{} is already on the watch-list.", raw.trim().to_uppercase()),
            Err(e) => println!("{}", e),
        },
        Command::Remove(raw) => {
            if dashboard.remove_symbol(&raw) {
                spawn_refresh(dashboard, tx);
            } else {
                println!("{} is not on the watch-list.", raw.trim().to_uppercase());
            }
        }
        Command::Refresh => spawn_refresh(dashboard, tx),
        Command::Sort(key) => {
            dashboard.set_sort(key);
            print_board(dashboard);
        }
        Command::Chart { symbol, interval } => {
            match spawn_chart(dashboard, tx, &symbol, interval) {
                Ok(symbol) => println!("Loading {} chart for {}...", interval, symbol),
                Err(e) => println!("{}", e),
            }
        }
        Command::List => {
            print_board(dashboard);
            if let Some(chart) = &dashboard.state().chart {
                print!("{}", render_chart(chart));
            }
        }
        Command::Help => {
            println!("{}", HELP);
            println!("Sort columns: {}", sort_key_hint());
        }
        Command::Quit => return Flow::Exit,
    }
    Flow::Continue
}

fn handle_event(dashboard: &mut Dashboard, event: Event) {
    match event {
        Event::Quotes(ticket, batch) => {
            if dashboard.complete_refresh(ticket, batch) {
                print_board(dashboard);
            }
        }
        Event::Chart(ticket, view) => {
            if dashboard.complete_chart(ticket, view) {
                if let Some(chart) = &dashboard.state().chart {
                    print!("{}", render_chart(chart));
                }
            }
        }
    }
}

/// Interactive loop: stdin commands and background fetch results are
/// processed on one task, so the dashboard is never shared.
pub async fn run(mut dashboard: Dashboard) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);
    spawn_refresh(&mut dashboard, &tx);
    print_board(&dashboard);
    prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if !line.trim().is_empty() {
                    if let Flow::Exit = handle_line(&mut dashboard, &tx, &line) {
                        break;
                    }
                }
                prompt();
            }
            Some(event) = rx.recv() => {
                handle_event(&mut dashboard, event);
                prompt();
            }
        }
    }

    tracing::debug!("Command loop finished");
    Ok(())
}
