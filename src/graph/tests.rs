//! Unit tests for the correlation graph builder

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::error::AnalysisError;
    use crate::types::ReturnTable;
    use petgraph::algo::connected_components;

    fn returns(columns: Vec<(&str, Vec<f64>)>) -> ReturnTable {
        let (tickers, series) = columns
            .into_iter()
            .map(|(t, s)| (t.to_string(), s))
            .unzip();
        ReturnTable::new(tickers, series).unwrap()
    }

    #[test]
    fn test_correlation_symmetric_with_unit_diagonal() {
        let table = returns(vec![
            ("A", vec![0.01, -0.02, 0.03, 0.01, -0.01]),
            ("B", vec![0.02, 0.01, -0.01, 0.00, 0.02]),
            ("C", vec![-0.01, 0.02, 0.01, -0.02, 0.00]),
        ]);

        let corr = correlation_matrix(&table).unwrap();
        for i in 0..3 {
            assert_eq!(corr.get(i, i), 1.0);
            for j in 0..3 {
                assert_eq!(corr.get(i, j), corr.get(j, i));
                assert!(corr.get(i, j) >= -1.0 && corr.get(i, j) <= 1.0);
            }
        }
    }

    #[test]
    fn test_perfectly_correlated_pair() {
        let table = returns(vec![
            ("A", vec![0.01, 0.02, -0.01, 0.03]),
            ("B", vec![0.02, 0.04, -0.02, 0.06]),
        ]);

        let corr = correlation_matrix(&table).unwrap();
        assert!((corr.get(0, 1) - 1.0).abs() < 1e-9);

        // Distance collapses to 0 for a perfectly correlated pair.
        let mst = build_filtered_graph(&corr).unwrap();
        assert!(mst.edge_distance("A", "B").unwrap() < 1e-6);
    }

    #[test]
    fn test_anticorrelated_pair_distance_is_two() {
        let table = returns(vec![
            ("A", vec![0.01, -0.02, 0.03]),
            ("B", vec![-0.01, 0.02, -0.03]),
        ]);

        let corr = correlation_matrix(&table).unwrap();
        assert!((corr.get(0, 1) + 1.0).abs() < 1e-9);
        assert!((correlation_distance(corr.get(0, 1)) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_one_flat_series_treated_as_uncorrelated() {
        let table = returns(vec![
            ("A", vec![0.01, -0.02, 0.03]),
            ("FLAT", vec![0.0, 0.0, 0.0]),
        ]);

        let corr = correlation_matrix(&table).unwrap();
        assert_eq!(corr.get(0, 1), 0.0);
    }

    #[test]
    fn test_two_constant_series_degenerate() {
        let table = returns(vec![
            ("A", vec![0.0, 0.0, 0.0]),
            ("B", vec![0.0, 0.0, 0.0]),
        ]);

        let err = correlation_matrix(&table).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateInput(_)));
    }

    #[test]
    fn test_single_ticker_degenerate() {
        let table = returns(vec![("A", vec![0.01, 0.02])]);
        assert!(matches!(
            correlation_matrix(&table),
            Err(AnalysisError::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_mst_has_n_minus_one_edges_and_is_connected() {
        let table = returns(vec![
            ("A", vec![0.01, -0.02, 0.03, 0.01]),
            ("B", vec![0.02, 0.01, -0.01, 0.00]),
            ("C", vec![-0.01, 0.02, 0.01, -0.02]),
            ("D", vec![0.00, -0.01, 0.02, 0.01]),
            ("E", vec![0.03, 0.00, -0.02, 0.02]),
        ]);

        let corr = correlation_matrix(&table).unwrap();
        let mst = build_filtered_graph(&corr).unwrap();

        assert_eq!(mst.node_count(), 5);
        assert_eq!(mst.edge_count(), 4);
        assert_eq!(connected_components(mst.graph()), 1);
    }

    #[test]
    fn test_tie_break_is_lexicographic() {
        // Three copies of the same series: every pairwise distance is 0,
        // so the MST choice is decided purely by the tie-break order.
        let base = vec![0.01, -0.02, 0.03, 0.01];
        let table = returns(vec![
            ("A", base.clone()),
            ("B", base.clone()),
            ("C", base.clone()),
        ]);

        let corr = correlation_matrix(&table).unwrap();
        let mst = build_filtered_graph(&corr).unwrap();

        let mut edges: Vec<(String, String)> = mst
            .edges()
            .into_iter()
            .map(|(a, b, _)| (a, b))
            .collect();
        edges.sort();
        assert_eq!(
            edges,
            vec![
                ("A".to_string(), "B".to_string()),
                ("A".to_string(), "C".to_string()),
            ]
        );
    }

    #[test]
    fn test_mst_deterministic_across_runs() {
        let table = returns(vec![
            ("A", vec![0.01, -0.02, 0.03, 0.01]),
            ("B", vec![0.02, 0.01, -0.01, 0.00]),
            ("C", vec![-0.01, 0.02, 0.01, -0.02]),
            ("D", vec![0.00, -0.01, 0.02, 0.01]),
        ]);

        let corr = correlation_matrix(&table).unwrap();
        let first = build_filtered_graph(&corr).unwrap().edges();
        let second = build_filtered_graph(&corr).unwrap().edges();
        assert_eq!(first, second);
    }
}
