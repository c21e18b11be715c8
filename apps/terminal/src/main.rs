mod commands;
mod config;
mod main_lib;
mod render;

use config::Config;
use main_lib::{build_dashboard, init_tracing, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config);
    let dashboard = build_dashboard(&config)?;
    tracing::info!("Tracking {} symbols", dashboard.state().watchlist.len());
    run(dashboard).await
}
