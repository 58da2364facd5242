//! Core value objects for the analysis pipeline
//!
//! Every table/matrix here is validated at construction and immutable
//! afterwards. Stages hand each other these objects by reference; nothing
//! is mutated in place and nothing is cached process-wide.

use crate::error::{AnalysisError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Aligned table of daily closing prices.
///
/// Tickers are kept in ascending order so that every downstream stage
/// sees the same deterministic ordering. All series share the date axis
/// and have identical length (checked at construction).
#[derive(Debug, Clone)]
pub struct PriceTable {
    tickers: Vec<String>,
    dates: Vec<NaiveDate>,
    /// One column per ticker, parallel to `tickers`.
    series: Vec<Vec<f64>>,
}

impl PriceTable {
    /// Build a price table from per-ticker columns.
    ///
    /// Columns are sorted by ticker; duplicate tickers, ragged columns
    /// and tables with fewer than 2 observations are rejected.
    pub fn new(dates: Vec<NaiveDate>, mut columns: Vec<(String, Vec<f64>)>) -> Result<Self> {
        if dates.len() < 2 {
            return Err(AnalysisError::InvalidInput(format!(
                "need at least 2 observations to compute returns, got {}",
                dates.len()
            )));
        }

        columns.sort_by(|a, b| a.0.cmp(&b.0));

        for pair in columns.windows(2) {
            if pair[0].0 == pair[1].0 {
                return Err(AnalysisError::InvalidInput(format!(
                    "duplicate ticker '{}'",
                    pair[0].0
                )));
            }
        }

        for (ticker, prices) in &columns {
            if prices.len() != dates.len() {
                return Err(AnalysisError::InvalidInput(format!(
                    "ticker '{}' has {} observations, expected {}",
                    ticker,
                    prices.len(),
                    dates.len()
                )));
            }
        }

        let (tickers, series) = columns.into_iter().unzip();
        Ok(Self {
            tickers,
            dates,
            series,
        })
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Price series for the ticker at `idx` (same order as `tickers()`).
    pub fn series(&self, idx: usize) -> &[f64] {
        &self.series[idx]
    }

    pub fn num_tickers(&self) -> usize {
        self.tickers.len()
    }

    pub fn num_observations(&self) -> usize {
        self.dates.len()
    }
}

/// Aligned table of log returns, one fewer observation than the prices
/// it was derived from.
#[derive(Debug, Clone)]
pub struct ReturnTable {
    tickers: Vec<String>,
    series: Vec<Vec<f64>>,
}

impl ReturnTable {
    /// Build a return table. All series must have equal length.
    pub fn new(tickers: Vec<String>, series: Vec<Vec<f64>>) -> Result<Self> {
        if tickers.len() != series.len() {
            return Err(AnalysisError::InvalidInput(format!(
                "{} tickers but {} return series",
                tickers.len(),
                series.len()
            )));
        }
        if let Some(first) = series.first() {
            let expected = first.len();
            for (ticker, returns) in tickers.iter().zip(&series) {
                if returns.len() != expected {
                    return Err(AnalysisError::InvalidInput(format!(
                        "ticker '{}' has {} returns, expected {}",
                        ticker,
                        returns.len(),
                        expected
                    )));
                }
            }
        }
        Ok(Self { tickers, series })
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn series(&self, idx: usize) -> &[f64] {
        &self.series[idx]
    }

    pub fn index_of(&self, ticker: &str) -> Option<usize> {
        self.tickers.iter().position(|t| t == ticker)
    }

    pub fn num_tickers(&self) -> usize {
        self.tickers.len()
    }

    pub fn num_periods(&self) -> usize {
        self.series.first().map(|s| s.len()).unwrap_or(0)
    }
}

/// Symmetric Pearson correlation matrix with unit diagonal.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    tickers: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub(crate) fn new(tickers: Vec<String>, values: Vec<Vec<f64>>) -> Self {
        Self { tickers, values }
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    pub fn size(&self) -> usize {
        self.tickers.len()
    }
}

/// Centrality measure used to rank nodes of the filtered graph.
///
/// One measure is used for an entire run so results stay comparable
/// run-to-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CentralityMeasure {
    /// Fraction of possible neighbors a node is connected to.
    #[default]
    Degree,
    /// Brandes betweenness, pair-normalized.
    Betweenness,
    /// Inverse mean hop distance to all other nodes.
    Closeness,
}

impl FromStr for CentralityMeasure {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "degree" => Ok(Self::Degree),
            "betweenness" => Ok(Self::Betweenness),
            "closeness" => Ok(Self::Closeness),
            other => Err(AnalysisError::InvalidInput(format!(
                "unknown centrality measure '{}' (expected degree, betweenness or closeness)",
                other
            ))),
        }
    }
}

impl fmt::Display for CentralityMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degree => write!(f, "degree"),
            Self::Betweenness => write!(f, "betweenness"),
            Self::Closeness => write!(f, "closeness"),
        }
    }
}

/// The two disjoint ticker sets produced by the selector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Portfolios {
    /// Top-k tickers by centrality.
    pub central_portfolio: Vec<String>,
    /// Bottom-k tickers by centrality.
    pub peripheral_portfolio: Vec<String>,
}

/// Performance of one equal-weighted portfolio over the analysis window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceMetrics {
    /// Mean per-period portfolio log return.
    pub average_return: f64,
    /// Sample standard deviation of the per-period portfolio return.
    pub volatility: f64,
    /// (average_return - risk_free_rate) / volatility; 0 when volatility is 0.
    pub sharpe_ratio: f64,
}

/// Performance of both sides of the selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioPerformance {
    pub central: PerformanceMetrics,
    pub peripheral: PerformanceMetrics,
}

/// Full pipeline output, the payload of `GET /analysis`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub portfolios: Portfolios,
    pub performance: PortfolioPerformance,
}
