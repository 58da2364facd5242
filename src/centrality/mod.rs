//! Centrality ranker
//!
//! Scores every node of the filtered graph with one of three measures
//! and produces the full ranking downstream selection works from:
//! - **degree**: incident edges / (n - 1)
//! - **betweenness**: Brandes' algorithm, pair-normalized
//! - **closeness**: (n - 1) / sum of hop distances to all other nodes
//!
//! All measures treat MST edges as unit hops; edge distances only decide
//! which edges survive the spanning-tree filter, not path lengths here.
//! The ranking is a total order: descending score, ties broken by ticker
//! ascending, so identical input always yields identical output.


use crate::graph::FilteredGraph;
use crate::types::CentralityMeasure;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One entry of the centrality ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedTicker {
    pub ticker: String,
    pub score: f64,
}

/// Rank every ticker in the graph by the chosen measure.
///
/// Returns the full ranked sequence (highest centrality first), not just
/// the extremes.
pub fn rank(graph: &FilteredGraph, measure: CentralityMeasure) -> Vec<RankedTicker> {
    let adjacency = adjacency_list(graph);
    let scores = match measure {
        CentralityMeasure::Degree => degree_scores(&adjacency),
        CentralityMeasure::Betweenness => betweenness_scores(&adjacency),
        CentralityMeasure::Closeness => closeness_scores(&adjacency),
    };

    let mut ranking: Vec<RankedTicker> = scores
        .into_iter()
        .enumerate()
        .map(|(i, score)| RankedTicker {
            ticker: graph.ticker(NodeIndex::new(i)).to_string(),
            score,
        })
        .collect();

    ranking.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.ticker.cmp(&b.ticker))
    });
    ranking
}

fn adjacency_list(graph: &FilteredGraph) -> Vec<Vec<usize>> {
    let n = graph.node_count();
    let mut adjacency = vec![Vec::new(); n];
    for (i, neighbors) in adjacency.iter_mut().enumerate() {
        neighbors.extend(
            graph
                .graph()
                .neighbors(NodeIndex::new(i))
                .map(|node| node.index()),
        );
        neighbors.sort_unstable();
    }
    adjacency
}

fn degree_scores(adjacency: &[Vec<usize>]) -> Vec<f64> {
    let n = adjacency.len();
    if n < 2 {
        return vec![0.0; n];
    }
    adjacency
        .iter()
        .map(|neighbors| neighbors.len() as f64 / (n - 1) as f64)
        .collect()
}

/// Hop distances from `source` to every node via BFS.
fn hop_distances(adjacency: &[Vec<usize>], source: usize) -> Vec<Option<usize>> {
    let mut dist = vec![None; adjacency.len()];
    dist[source] = Some(0);
    let mut queue = VecDeque::from([source]);
    while let Some(v) = queue.pop_front() {
        let d = dist[v].unwrap_or(0);
        for &w in &adjacency[v] {
            if dist[w].is_none() {
                dist[w] = Some(d + 1);
                queue.push_back(w);
            }
        }
    }
    dist
}

fn closeness_scores(adjacency: &[Vec<usize>]) -> Vec<f64> {
    let n = adjacency.len();
    if n < 2 {
        return vec![0.0; n];
    }
    (0..n)
        .map(|source| {
            let total: usize = hop_distances(adjacency, source)
                .into_iter()
                .flatten()
                .sum();
            if total == 0 {
                0.0
            } else {
                (n - 1) as f64 / total as f64
            }
        })
        .collect()
}

/// Brandes' betweenness centrality, normalized by the number of ordered
/// node pairs `(n - 1)(n - 2)` so scores land in [0, 1].
fn betweenness_scores(adjacency: &[Vec<usize>]) -> Vec<f64> {
    let n = adjacency.len();
    let mut scores = vec![0.0; n];
    if n < 3 {
        return scores;
    }

    for source in 0..n {
        let mut stack = Vec::with_capacity(n);
        let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0f64; n];
        let mut dist: Vec<Option<usize>> = vec![None; n];
        sigma[source] = 1.0;
        dist[source] = Some(0);

        let mut queue = VecDeque::from([source]);
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let dv = dist[v].unwrap_or(0);
            for &w in &adjacency[v] {
                if dist[w].is_none() {
                    dist[w] = Some(dv + 1);
                    queue.push_back(w);
                }
                if dist[w] == Some(dv + 1) {
                    sigma[w] += sigma[v];
                    preds[w].push(v);
                }
            }
        }

        let mut delta = vec![0.0f64; n];
        while let Some(w) = stack.pop() {
            for &v in &preds[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != source {
                scores[w] += delta[w];
            }
        }
    }

    let norm = ((n - 1) * (n - 2)) as f64;
    for score in &mut scores {
        *score /= norm;
    }
    scores
}
