//! Portfolio selector & evaluator
//!
//! Splits the centrality ranking into a central (top-k) and peripheral
//! (bottom-k) set and scores each side over the return table:
//! per-period equal-weighted portfolio return, its mean, its sample
//! standard deviation, and the Sharpe ratio. The two sets are strictly
//! disjoint; `2k > n` is rejected up front.

#[cfg(test)]
mod tests;

use crate::centrality::RankedTicker;
use crate::error::{AnalysisError, Result};
use crate::types::{PerformanceMetrics, PortfolioPerformance, Portfolios, ReturnTable};

/// Split the ranking into top-k and bottom-k ticker sets.
///
/// The ranking must already be a total order (descending centrality,
/// ticker-ascending ties). Fails with `InsufficientData` when `2k > n`,
/// since the sets would otherwise overlap.
pub fn select(ranking: &[RankedTicker], k: usize) -> Result<Portfolios> {
    if k == 0 {
        return Err(AnalysisError::InvalidInput(
            "portfolio size k must be at least 1".to_string(),
        ));
    }

    let n = ranking.len();
    if 2 * k > n {
        return Err(AnalysisError::InsufficientData {
            requested: k,
            universe: n,
        });
    }

    let central = ranking[..k].iter().map(|r| r.ticker.clone()).collect();
    let peripheral = ranking[n - k..].iter().map(|r| r.ticker.clone()).collect();

    Ok(Portfolios {
        central_portfolio: central,
        peripheral_portfolio: peripheral,
    })
}

/// Evaluate both sides of a selection against the return table.
pub fn evaluate(
    portfolios: &Portfolios,
    returns: &ReturnTable,
    risk_free_rate: f64,
) -> Result<PortfolioPerformance> {
    Ok(PortfolioPerformance {
        central: performance(&portfolios.central_portfolio, returns, risk_free_rate)?,
        peripheral: performance(&portfolios.peripheral_portfolio, returns, risk_free_rate)?,
    })
}

/// Performance metrics for one equal-weighted ticker set.
///
/// Sharpe ratio subtracts the risk-free rate from the average return
/// before dividing; a zero-volatility series gets a Sharpe ratio of 0
/// rather than an error.
pub fn performance(
    members: &[String],
    returns: &ReturnTable,
    risk_free_rate: f64,
) -> Result<PerformanceMetrics> {
    if members.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "cannot evaluate an empty portfolio".to_string(),
        ));
    }

    let mut indices = Vec::with_capacity(members.len());
    for ticker in members {
        let idx = returns.index_of(ticker).ok_or_else(|| {
            AnalysisError::InvalidInput(format!("ticker '{}' missing from return table", ticker))
        })?;
        indices.push(idx);
    }

    let periods = returns.num_periods();
    if periods == 0 {
        return Err(AnalysisError::InvalidInput(
            "return table has no observations".to_string(),
        ));
    }

    let portfolio_returns: Vec<f64> = (0..periods)
        .map(|t| {
            let sum: f64 = indices.iter().map(|&i| returns.series(i)[t]).sum();
            sum / indices.len() as f64
        })
        .collect();

    let average_return = portfolio_returns.iter().sum::<f64>() / periods as f64;

    let volatility = if periods < 2 {
        0.0
    } else {
        let ss: f64 = portfolio_returns
            .iter()
            .map(|r| (r - average_return).powi(2))
            .sum();
        (ss / (periods - 1) as f64).sqrt()
    };

    let sharpe_ratio = if volatility == 0.0 {
        0.0
    } else {
        (average_return - risk_free_rate) / volatility
    };

    Ok(PerformanceMetrics {
        average_return,
        volatility,
        sharpe_ratio,
    })
}
