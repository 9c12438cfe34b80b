use petgraph::visit::EdgeRef;

use crate::network::CommGraph;

#[derive(Debug, Clone, Copy)]
pub struct PageRankConfig {
    pub damping: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        PageRankConfig {
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

/// Weighted PageRank by power iteration. Each node passes `damping` of its
/// score to its outgoing neighbors proportionally to edge weight; a node with
/// no outgoing edges spreads its share across the whole graph instead.
/// Returns one score per node, indexed by node index, summing to ~1.0.
/// Stops once the L1 change between rounds drops below the tolerance, or at
/// the iteration cap with the scores reached so far.
pub fn pagerank(graph: &CommGraph, config: &PageRankConfig) -> Vec<f64> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }

    // Total outgoing weight per node, for proportional shares.
    let out_weight: Vec<f64> = graph
        .node_indices()
        .map(|node| graph.edges(node).map(|e| f64::from(*e.weight())).sum())
        .collect();

    let teleport = (1.0 - config.damping) / n as f64;
    let mut scores = vec![1.0 / n as f64; n];

    for _ in 0..config.max_iterations {
        let mut next = vec![teleport; n];

        for node in graph.node_indices() {
            let i = node.index();
            if out_weight[i] == 0.0 {
                let share = config.damping * scores[i] / n as f64;
                for score in next.iter_mut() {
                    *score += share;
                }
            } else {
                let share = config.damping * scores[i] / out_weight[i];
                for edge in graph.edges(node) {
                    next[edge.target().index()] += share * f64::from(*edge.weight());
                }
            }
        }

        let delta: f64 = scores
            .iter()
            .zip(&next)
            .map(|(old, new)| (old - new).abs())
            .sum();
        scores = next;
        if delta < config.tolerance {
            break;
        }
    }

    scores
}
