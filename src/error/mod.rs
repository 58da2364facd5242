//! Error types for the analysis pipeline
//!
//! Every stage reports a specific error kind and halts the invocation;
//! nothing retries internally and nothing degrades silently.

use thiserror::Error;

/// Analysis pipeline errors
#[derive(Error, Debug, Clone)]
pub enum AnalysisError {
    /// Malformed input: ragged series, non-positive prices, bad CSV rows.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Input the algorithms cannot operate on: too few tickers, or a pair
    /// of return series that are both constant over the entire window.
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Requested portfolio size is too large for the universe.
    #[error("Insufficient data: requested portfolio size {requested} but universe has only {universe} tickers (need 2k <= n)")]
    InsufficientData { requested: usize, universe: usize },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
