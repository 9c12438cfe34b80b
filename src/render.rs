use petgraph::dot::{Config, Dot};
use petgraph::visit::EdgeRef;
use std::error::Error;

use crate::network::CommGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    ForceDirected,
    Circular,
}

impl Layout {
    fn engine(&self) -> &'static str {
        match self {
            Layout::ForceDirected => "fdp",
            Layout::Circular => "circo",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    // node width in inches per unit of rank
    pub node_scale: f64,
    // pen width per sqrt of message count
    pub edge_scale: f64,
    // node fill transparency, 0.0 - 1.0
    pub alpha: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            node_scale: 40.0,
            edge_scale: 1.0,
            alpha: 0.4,
        }
    }
}

// The pipeline only depends on this capability; swapping the graphics
// backend means swapping the implementor.
pub trait GraphRenderer {
    fn render(
        &self,
        graph: &CommGraph,
        layout: Layout,
        options: &RenderOptions,
    ) -> Result<(), Box<dyn Error>>;
}

// Graphviz backend: writes dot source with the layout engine baked in, nodes
// sized by rank and edges weighted by message count.
pub struct DotRenderer {
    path: String,
}

impl DotRenderer {
    pub fn new(path: &str) -> Self {
        DotRenderer {
            path: path.to_string(),
        }
    }
}

impl GraphRenderer for DotRenderer {
    fn render(
        &self,
        graph: &CommGraph,
        layout: Layout,
        options: &RenderOptions,
    ) -> Result<(), Box<dyn Error>> {
        std::fs::write(&self.path, dot_source(graph, layout, options))?;
        Ok(())
    }
}

// Keep labels readable even for nodes whose rank rounds to nothing.
const MIN_NODE_WIDTH: f64 = 0.15;

pub fn dot_source(graph: &CommGraph, layout: Layout, options: &RenderOptions) -> String {
    let fill = format!(
        "#4a90d9{:02x}",
        (options.alpha.clamp(0.0, 1.0) * 255.0) as u8
    );
    format!(
        "digraph {{\n    layout={}\n    overlap=false\n{:?}}}\n",
        layout.engine(),
        Dot::with_attr_getters(
            graph,
            &[
                Config::EdgeNoLabel,
                Config::NodeNoLabel,
                Config::GraphContentOnly
            ],
            &|_, edge| {
                format!(
                    "penwidth={:.2}",
                    f64::from(*edge.weight()).sqrt() * options.edge_scale
                )
            },
            &|_, (_, participant)| {
                format!(
                    "label=\"{}\" width={:.3} fixedsize=true style=filled fillcolor=\"{}\"",
                    participant.name,
                    (participant.rank * options.node_scale).max(MIN_NODE_WIDTH),
                    fill
                )
            },
        )
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{annotate_ranks, build_graph, count_pairs};

    fn sample_graph() -> CommGraph {
        let pairs = vec![
            ("alice".to_string(), "bob".to_string()),
            ("alice".to_string(), "bob".to_string()),
            ("bob".to_string(), "alice".to_string()),
        ];
        let mut graph = build_graph(&count_pairs(pairs));
        annotate_ranks(&mut graph, &[0.6, 0.4]);
        graph
    }

    #[test]
    fn test_dot_source_selects_layout_engine() {
        let graph = sample_graph();
        let options = RenderOptions::default();
        let force = dot_source(&graph, Layout::ForceDirected, &options);
        let circular = dot_source(&graph, Layout::Circular, &options);
        assert!(force.contains("layout=fdp"));
        assert!(circular.contains("layout=circo"));
    }

    #[test]
    fn test_dot_source_labels_and_sizes_nodes() {
        let graph = sample_graph();
        let source = dot_source(&graph, Layout::ForceDirected, &RenderOptions::default());
        assert!(source.contains("label=\"alice\""));
        assert!(source.contains("label=\"bob\""));
        // 0.6 rank * 40.0 scale and 0.4 rank * 40.0 scale
        assert!(source.contains("width=24.000"));
        assert!(source.contains("width=16.000"));
        // 0.4 alpha -> 0x66 fill
        assert!(source.contains("fillcolor=\"#4a90d966\""));
    }

    #[test]
    fn test_dot_source_widths_follow_edge_weight() {
        let graph = sample_graph();
        let source = dot_source(&graph, Layout::ForceDirected, &RenderOptions::default());
        // sqrt(2) for the doubled alice -> bob edge, sqrt(1) for the reply
        assert!(source.contains("penwidth=1.41"));
        assert!(source.contains("penwidth=1.00"));
    }

    #[test]
    fn test_tiny_rank_still_gets_minimum_width() {
        let mut graph = sample_graph();
        annotate_ranks(&mut graph, &[0.0001, 0.0001]);
        let source = dot_source(&graph, Layout::Circular, &RenderOptions::default());
        assert!(source.contains(&format!("width={:.3}", MIN_NODE_WIDTH)));
    }
}
