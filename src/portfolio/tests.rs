//! Unit tests for portfolio selection and evaluation

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::centrality::RankedTicker;
    use crate::error::AnalysisError;
    use crate::types::ReturnTable;

    fn ranking(entries: &[(&str, f64)]) -> Vec<RankedTicker> {
        entries
            .iter()
            .map(|(t, s)| RankedTicker {
                ticker: t.to_string(),
                score: *s,
            })
            .collect()
    }

    fn returns(columns: Vec<(&str, Vec<f64>)>) -> ReturnTable {
        let (tickers, series) = columns
            .into_iter()
            .map(|(t, s)| (t.to_string(), s))
            .unzip();
        ReturnTable::new(tickers, series).unwrap()
    }

    #[test]
    fn test_select_disjoint_top_and_bottom() {
        let ranked = ranking(&[
            ("A", 1.0),
            ("B", 0.8),
            ("C", 0.6),
            ("D", 0.4),
            ("E", 0.2),
        ]);

        let portfolios = select(&ranked, 2).unwrap();
        assert_eq!(portfolios.central_portfolio, vec!["A", "B"]);
        assert_eq!(portfolios.peripheral_portfolio, vec!["D", "E"]);

        for t in &portfolios.central_portfolio {
            assert!(!portfolios.peripheral_portfolio.contains(t));
        }
    }

    #[test]
    fn test_select_k_too_large() {
        let ranked = ranking(&[("A", 1.0), ("B", 0.5), ("C", 0.2)]);
        let err = select(&ranked, 2).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InsufficientData {
                requested: 2,
                universe: 3
            }
        ));
    }

    #[test]
    fn test_select_exactly_half() {
        let ranked = ranking(&[("A", 1.0), ("B", 0.7), ("C", 0.5), ("D", 0.1)]);
        let portfolios = select(&ranked, 2).unwrap();
        assert_eq!(portfolios.central_portfolio.len(), 2);
        assert_eq!(portfolios.peripheral_portfolio.len(), 2);
    }

    #[test]
    fn test_select_zero_k_rejected() {
        let ranked = ranking(&[("A", 1.0), ("B", 0.5)]);
        assert!(matches!(
            select(&ranked, 0),
            Err(AnalysisError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_performance_hand_computed() {
        let table = returns(vec![
            ("A", vec![0.02, -0.01, 0.03]),
            ("B", vec![0.00, 0.01, -0.01]),
        ]);

        let metrics =
            performance(&["A".to_string(), "B".to_string()], &table, 0.0).unwrap();

        // Equal-weighted per-period returns: 0.01, 0.0, 0.01
        let expected_mean = (0.01 + 0.0 + 0.01) / 3.0;
        assert!((metrics.average_return - expected_mean).abs() < 1e-12);

        let expected_var = ((0.01 - expected_mean).powi(2) * 2.0
            + (0.0 - expected_mean).powi(2))
            / 2.0;
        assert!((metrics.volatility - expected_var.sqrt()).abs() < 1e-12);
        assert!(
            (metrics.sharpe_ratio - expected_mean / expected_var.sqrt()).abs() < 1e-12
        );
    }

    #[test]
    fn test_volatility_never_negative() {
        let table = returns(vec![("A", vec![0.05, -0.05, 0.02, -0.02])]);
        let metrics = performance(&["A".to_string()], &table, 0.0).unwrap();
        assert!(metrics.volatility >= 0.0);
    }

    #[test]
    fn test_zero_volatility_sharpe_is_zero() {
        let table = returns(vec![("A", vec![0.01, 0.01, 0.01])]);
        let metrics = performance(&["A".to_string()], &table, 0.0).unwrap();

        assert_eq!(metrics.volatility, 0.0);
        assert_eq!(metrics.sharpe_ratio, 0.0);
    }

    #[test]
    fn test_risk_free_rate_subtracted() {
        let table = returns(vec![("A", vec![0.02, -0.01, 0.03, 0.00])]);
        let base = performance(&["A".to_string()], &table, 0.0).unwrap();
        let adjusted = performance(&["A".to_string()], &table, 0.01).unwrap();

        assert!(adjusted.sharpe_ratio < base.sharpe_ratio);
        assert_eq!(adjusted.volatility, base.volatility);
        assert_eq!(adjusted.average_return, base.average_return);
    }

    #[test]
    fn test_unknown_ticker_rejected() {
        let table = returns(vec![("A", vec![0.01, 0.02])]);
        let err = performance(&["ZZZ".to_string()], &table, 0.0).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_portfolio_rejected() {
        let table = returns(vec![("A", vec![0.01, 0.02])]);
        assert!(performance(&[], &table, 0.0).is_err());
    }
}
