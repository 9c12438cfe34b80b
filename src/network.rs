use petgraph::graph::NodeIndex;
use petgraph::{Directed, Graph};
use serde::Serialize;
use std::collections::HashMap;

// One graph node per canonical participant. The rank field is zero until the
// graph is annotated after PageRank runs.
#[derive(Debug, Clone, Serialize)]
pub struct Participant {
    pub name: String,
    pub rank: f64,
}

pub type CommGraph = Graph<Participant, u32, Directed>;

// Count every occurrence of each ordered (from, to) pair, self-loops included.
pub fn count_pairs<I>(records: I) -> HashMap<(String, String), u32>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut weights: HashMap<(String, String), u32> = HashMap::new();
    for pair in records {
        *weights.entry(pair).or_insert(0) += 1;
    }
    weights
}

pub fn build_graph(weights: &HashMap<(String, String), u32>) -> CommGraph {
    let mut graph = CommGraph::new();
    let mut nodes: HashMap<String, NodeIndex> = HashMap::new();

    for ((from, to), &weight) in weights {
        let from_node = *nodes.entry(from.clone()).or_insert_with(|| {
            graph.add_node(Participant {
                name: from.clone(),
                rank: 0.0,
            })
        });
        let to_node = *nodes.entry(to.clone()).or_insert_with(|| {
            graph.add_node(Participant {
                name: to.clone(),
                rank: 0.0,
            })
        });
        graph.add_edge(from_node, to_node, weight);
    }

    graph
}

// Copy the score vector (indexed by node index) into the node weights.
pub fn annotate_ranks(graph: &mut CommGraph, scores: &[f64]) {
    for (participant, score) in graph.node_weights_mut().zip(scores) {
        participant.rank = *score;
    }
}

// Derive a reduced copy holding only nodes whose rank clears the threshold.
// Incident edges go with the removed nodes; the input graph is untouched and
// scores are never recomputed.
pub fn prune_by_rank(graph: &CommGraph, threshold: f64) -> CommGraph {
    let mut reduced = graph.clone();

    let below: Vec<NodeIndex> = reduced
        .node_indices()
        .filter(|&node| reduced[node].rank < threshold)
        .collect();

    // remove_node swaps the last node into the removed slot, so removing in
    // descending index order keeps the collected indices valid
    for node in below.into_iter().rev() {
        reduced.remove_node(node);
    }

    reduced
}
