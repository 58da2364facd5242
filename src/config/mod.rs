//! Configuration loading
//!
//! Layered via the `config` crate: a TOML file (default `config.toml`)
//! plus `PORTFOLIO_NET__`-prefixed environment overrides. Analysis
//! parameters can additionally be overridden per request at the API/CLI
//! boundary.

use crate::types::CentralityMeasure;
use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Price data source.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Wide CSV of daily closes: first column date, one column per ticker.
    pub prices_path: String,
}

/// Analysis parameters, all overridable by the caller at invocation time.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Size k of each portfolio side.
    #[serde(default = "default_portfolio_size")]
    pub portfolio_size: usize,
    /// Centrality measure used for ranking.
    #[serde(default)]
    pub centrality: CentralityMeasure,
    /// Per-period risk-free rate subtracted in the Sharpe ratio.
    #[serde(default)]
    pub risk_free_rate: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            portfolio_size: default_portfolio_size(),
            centrality: CentralityMeasure::default(),
            risk_free_rate: 0.0,
        }
    }
}

fn default_portfolio_size() -> usize {
    15
}

/// HTTP server binding.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    /// Load configuration from a TOML file plus environment overrides.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(
                config::Environment::with_prefix("PORTFOLIO_NET").separator("__"),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
