//! Correlation-network stock portfolio analyzer
//!
//! Builds central and peripheral equity portfolios from the correlation
//! network of historical daily returns.

use clap::{Parser, Subcommand};
use portfolio_net::{
    analysis::PortfolioAnalyzer,
    config::Config,
    data,
    server::{start_server, AppState},
    types::CentralityMeasure,
};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "portfolio-net")]
#[command(about = "Central/peripheral portfolio selection from stock correlation networks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the analysis HTTP API
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one analysis and print the report as JSON
    Analyze {
        /// Portfolio size k
        #[arg(short, long)]
        k: Option<usize>,
        /// Centrality measure: degree | betweenness | closeness
        #[arg(short, long)]
        measure: Option<String>,
        /// Per-period risk-free rate
        #[arg(long)]
        risk_free_rate: Option<f64>,
    },
    /// List the loaded ticker universe
    Tickers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Serve { port } => serve(config, port).await,
        Commands::Analyze {
            k,
            measure,
            risk_free_rate,
        } => analyze(config, k, measure, risk_free_rate),
        Commands::Tickers => tickers(config),
    }
}

async fn serve(config: Config, port: Option<u16>) -> anyhow::Result<()> {
    let prices = data::load_price_table(Path::new(&config.data.prices_path))?;
    tracing::info!(
        "Serving analysis over {} tickers, {} observations",
        prices.num_tickers(),
        prices.num_observations()
    );

    let state = Arc::new(AppState::new(prices, config.analysis));
    let port = port.unwrap_or(config.server.port);

    start_server(state, &config.server.host, port)
        .await
        .map_err(|e| anyhow::anyhow!("server error: {}", e))
}

fn analyze(
    config: Config,
    k: Option<usize>,
    measure: Option<String>,
    risk_free_rate: Option<f64>,
) -> anyhow::Result<()> {
    let mut analysis = config.analysis;
    if let Some(k) = k {
        analysis.portfolio_size = k;
    }
    if let Some(measure) = measure {
        analysis.centrality = CentralityMeasure::from_str(&measure)?;
    }
    if let Some(rate) = risk_free_rate {
        analysis.risk_free_rate = rate;
    }

    let prices = data::load_price_table(Path::new(&config.data.prices_path))?;
    tracing::info!(
        "Analyzing {} tickers with k={} ({} centrality)",
        prices.num_tickers(),
        analysis.portfolio_size,
        analysis.centrality
    );

    let report = PortfolioAnalyzer::new(analysis).analyze(&prices)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn tickers(config: Config) -> anyhow::Result<()> {
    let prices = data::load_price_table(Path::new(&config.data.prices_path))?;

    println!(
        "\n{} tickers, {} observations ({} to {})\n",
        prices.num_tickers(),
        prices.num_observations(),
        prices
            .dates()
            .first()
            .map(|d| d.to_string())
            .unwrap_or_default(),
        prices
            .dates()
            .last()
            .map(|d| d.to_string())
            .unwrap_or_default(),
    );
    for ticker in prices.tickers() {
        println!("{}", ticker);
    }
    Ok(())
}
