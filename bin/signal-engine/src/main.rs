use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use common::{Config, Period};
use engine::{Analyzer, YahooClient};
use strategy::{IndicatorConfig, StrategyRegistry};

#[derive(Parser)]
#[command(name = "signal-engine", about = "Technical-analysis BUY/SELL/HOLD signals")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse one ticker and print the report as JSON.
    Analyze {
        /// Symbol as known to Yahoo Finance (e.g. AAPL, SPY, BTC-USD).
        ticker: String,

        /// History window: 1d 5d 1mo 3mo 6mo 1y 2y 5y 10y ytd max.
        #[arg(long, short)]
        period: Option<Period>,
    },
    /// Print the description of every strategy.
    Strategies,
    /// Serve the HTTP API (default).
    Serve {
        /// Overrides API_PORT.
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env().context("invalid environment configuration")?;

    match cli.command {
        Some(Commands::Strategies) => {
            let descriptions = strategy::describe_strategies();
            println!("{}", serde_json::to_string_pretty(&descriptions)?);
        }
        Some(Commands::Analyze { ticker, period }) => {
            let period = period.unwrap_or(cfg.default_period);
            let report = build_analyzer(&cfg)?
                .analyze(&ticker, period)
                .await
                .with_context(|| format!("analysis of {ticker} failed"))?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Some(Commands::Serve { port }) => run_server(build_analyzer(&cfg)?, &cfg, port).await?,
        None => run_server(build_analyzer(&cfg)?, &cfg, None).await?,
    }

    Ok(())
}

// ── Analyzer ──────────────────────────────────────────────────────────────────

fn build_analyzer(cfg: &Config) -> Result<Arc<Analyzer>> {
    let indicators = match &cfg.indicator_config_path {
        Some(path) => {
            info!(%path, "Loading indicator parameters");
            IndicatorConfig::load(path)?
        }
        None => IndicatorConfig::default(),
    };

    let provider = YahooClient::new(
        cfg.yahoo_base_url.clone(),
        Duration::from_secs(cfg.http_timeout_secs),
    )?;
    let registry = StrategyRegistry::from_config(&indicators);
    Ok(Arc::new(Analyzer::new(Arc::new(provider), registry)))
}

async fn run_server(analyzer: Arc<Analyzer>, cfg: &Config, port: Option<u16>) -> Result<()> {
    let state = api::AppState {
        analyzer,
        default_period: cfg.default_period,
    };
    let port = port.unwrap_or(cfg.api_port);

    info!(port, default_period = %cfg.default_period, "Signal engine starting");
    tokio::select! {
        served = api::serve(state, port) => served?,
        _ = tokio::signal::ctrl_c() => info!("Shutdown signal received. Exiting."),
    }
    Ok(())
}
