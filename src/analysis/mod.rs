//! Analysis pipeline
//!
//! Wires the four stages into one synchronous batch computation:
//!
//! ```text
//! prices -> log returns -> correlation matrix -> MST -> centrality
//!        -> central/peripheral selection -> performance metrics
//! ```
//!
//! Each stage consumes the previous stage's complete output and produces
//! a new immutable value; a run holds no state beyond its inputs, so
//! separate invocations are fully independent.


use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::types::{AnalysisReport, PriceTable};
use crate::{centrality, graph, portfolio, returns};

/// Runs the full correlation-network analysis for one price table.
pub struct PortfolioAnalyzer {
    config: AnalysisConfig,
}

impl PortfolioAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Execute the pipeline and produce the report.
    ///
    /// Deterministic: identical input and configuration always yield an
    /// identical report. Any invalid condition surfaces as a typed error
    /// for this invocation; nothing is retried.
    pub fn analyze(&self, prices: &PriceTable) -> Result<AnalysisReport> {
        let returns = returns::log_returns(prices)?;
        let correlations = graph::correlation_matrix(&returns)?;
        let mst = graph::build_filtered_graph(&correlations)?;
        let ranking = centrality::rank(&mst, self.config.centrality);
        let portfolios = portfolio::select(&ranking, self.config.portfolio_size)?;
        let performance =
            portfolio::evaluate(&portfolios, &returns, self.config.risk_free_rate)?;

        Ok(AnalysisReport {
            portfolios,
            performance,
        })
    }
}
