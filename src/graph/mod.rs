//! Correlation graph builder
//!
//! Turns a return table into a Pearson correlation matrix, maps
//! correlations onto the metric distance `sqrt(2 * (1 - rho))`, and
//! filters the complete distance graph down to its minimum spanning tree.
//! Kruskal's algorithm runs over edges sorted by `(distance, ticker pair)`
//! so equal-distance ties resolve the same way on every run.

#[cfg(test)]
mod tests;

use crate::error::{AnalysisError, Result};
use crate::types::{CorrelationMatrix, ReturnTable};
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;

/// MST over the ticker universe, edge weights are correlation distances.
#[derive(Debug, Clone)]
pub struct FilteredGraph {
    graph: UnGraph<String, f64>,
    index: HashMap<String, NodeIndex>,
}

impl FilteredGraph {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Underlying petgraph structure. Node `i` holds the i-th ticker in
    /// ascending order, matching the correlation matrix axis.
    pub fn graph(&self) -> &UnGraph<String, f64> {
        &self.graph
    }

    pub fn node_index(&self, ticker: &str) -> Option<NodeIndex> {
        self.index.get(ticker).copied()
    }

    pub fn ticker(&self, node: NodeIndex) -> &str {
        &self.graph[node]
    }

    /// Edge list as (ticker, ticker, distance) triples.
    pub fn edges(&self) -> Vec<(String, String, f64)> {
        self.graph
            .edge_indices()
            .filter_map(|e| {
                let (a, b) = self.graph.edge_endpoints(e)?;
                let w = *self.graph.edge_weight(e)?;
                Some((self.graph[a].clone(), self.graph[b].clone(), w))
            })
            .collect()
    }

    /// Distance between two tickers if they share an MST edge.
    pub fn edge_distance(&self, a: &str, b: &str) -> Option<f64> {
        let ia = self.node_index(a)?;
        let ib = self.node_index(b)?;
        let e = self.graph.find_edge(ia, ib)?;
        self.graph.edge_weight(e).copied()
    }
}

/// Pearson correlation matrix over the full aligned window.
///
/// Only the upper triangle is computed and then mirrored, so symmetry
/// holds by construction and the diagonal is exactly 1. A pair where one
/// series has zero variance gets correlation 0; a pair where both series
/// are constant over the entire window is unanalyzable and fails with
/// `DegenerateInput`.
pub fn correlation_matrix(returns: &ReturnTable) -> Result<CorrelationMatrix> {
    let n = returns.num_tickers();
    if n < 2 {
        return Err(AnalysisError::DegenerateInput(format!(
            "need at least 2 tickers to build a correlation network, got {}",
            n
        )));
    }

    let periods = returns.num_periods();
    let stats: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let series = returns.series(i);
            let mean = series.iter().sum::<f64>() / periods as f64;
            let var = series.iter().map(|r| (r - mean).powi(2)).sum::<f64>();
            (mean, var)
        })
        .collect();

    let mut values = vec![vec![0.0; n]; n];
    for i in 0..n {
        values[i][i] = 1.0;
        for j in (i + 1)..n {
            let rho = pair_correlation(returns, &stats, i, j)?;
            values[i][j] = rho;
            values[j][i] = rho;
        }
    }

    Ok(CorrelationMatrix::new(returns.tickers().to_vec(), values))
}

fn pair_correlation(
    returns: &ReturnTable,
    stats: &[(f64, f64)],
    i: usize,
    j: usize,
) -> Result<f64> {
    let (mean_i, var_i) = stats[i];
    let (mean_j, var_j) = stats[j];

    if var_i == 0.0 && var_j == 0.0 {
        return Err(AnalysisError::DegenerateInput(format!(
            "tickers '{}' and '{}' are both constant over the entire window",
            returns.tickers()[i],
            returns.tickers()[j]
        )));
    }
    if var_i == 0.0 || var_j == 0.0 {
        // Correlation is undefined against a flat series; treat as
        // uncorrelated rather than failing the whole universe.
        return Ok(0.0);
    }

    let cov: f64 = returns
        .series(i)
        .iter()
        .zip(returns.series(j))
        .map(|(a, b)| (a - mean_i) * (b - mean_j))
        .sum();

    let rho = cov / (var_i.sqrt() * var_j.sqrt());
    Ok(rho.clamp(-1.0, 1.0))
}

/// The canonical correlation-to-distance transform: `sqrt(2 * (1 - rho))`.
///
/// Unlike raw correlation this satisfies the triangle inequality, which
/// is what makes the spanning tree over it meaningful. Range [0, 2].
pub fn correlation_distance(rho: f64) -> f64 {
    (2.0 * (1.0 - rho)).max(0.0).sqrt()
}

/// Filter the complete correlation-distance graph to its MST.
///
/// Kruskal over edges sorted by `(distance, i, j)` where `i < j` index
/// tickers in ascending order, so the output is reproducible for
/// identical input even when distances tie.
pub fn build_filtered_graph(corr: &CorrelationMatrix) -> Result<FilteredGraph> {
    let n = corr.size();
    if n < 2 {
        return Err(AnalysisError::DegenerateInput(format!(
            "cannot build a spanning tree over {} node(s)",
            n
        )));
    }

    let mut edges: Vec<(f64, usize, usize)> = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            edges.push((correlation_distance(corr.get(i, j)), i, j));
        }
    }
    edges.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.1.cmp(&b.1))
            .then(a.2.cmp(&b.2))
    });

    let mut graph = UnGraph::<String, f64>::with_capacity(n, n - 1);
    let mut index = HashMap::with_capacity(n);
    for ticker in corr.tickers() {
        let node = graph.add_node(ticker.clone());
        index.insert(ticker.clone(), node);
    }

    let mut components = petgraph::unionfind::UnionFind::<usize>::new(n);
    let mut accepted = 0;
    for (distance, i, j) in edges {
        if components.union(i, j) {
            graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), distance);
            accepted += 1;
            if accepted == n - 1 {
                break;
            }
        }
    }

    Ok(FilteredGraph { graph, index })
}
