//! Return transformer: prices -> log returns
//!
//! `r[t] = ln(p[t] / p[t-1])`, one fewer observation per ticker than the
//! price series. Pure function, no side effects.

use crate::error::{AnalysisError, Result};
use crate::types::{PriceTable, ReturnTable};

/// Compute the log-return table for an aligned price table.
///
/// Fails with `InvalidInput` if any price is zero or negative, since the
/// log of the ratio is undefined there. Series alignment is already
/// guaranteed by the `PriceTable` invariant.
pub fn log_returns(prices: &PriceTable) -> Result<ReturnTable> {
    let mut series = Vec::with_capacity(prices.num_tickers());

    for (idx, ticker) in prices.tickers().iter().enumerate() {
        let closes = prices.series(idx);

        if let Some(bad) = closes.iter().find(|p| **p <= 0.0 || !p.is_finite()) {
            return Err(AnalysisError::InvalidInput(format!(
                "ticker '{}' has non-positive price {}",
                ticker, bad
            )));
        }

        let returns: Vec<f64> = closes.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
        series.push(returns);
    }

    ReturnTable::new(prices.tickers().to_vec(), series)
}
