mod identity;
mod network;
mod pagerank;
mod render;

use std::error::Error;
use std::fs::File;

use serde::Deserialize;

use crate::identity::IdentityResolver;
use crate::network::{annotate_ranks, build_graph, count_pairs, prune_by_rank, Participant};
use crate::pagerank::{pagerank, PageRankConfig};
use crate::render::{DotRenderer, GraphRenderer, Layout, RenderOptions};

const EMAILS_PATH: &str = "emails_cleaned.csv";
const ALIASES_PATH: &str = "Aliases.csv";
const PERSONS_PATH: &str = "Persons.csv";

// Nodes below this PageRank score are dropped from the reduced graph.
const PAGERANK_THRESHOLD: f64 = 0.005;

#[derive(Debug, Deserialize)]
struct EmailRecord {
    from: String,
    to: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let resolver = IdentityResolver::from_csv(ALIASES_PATH, PERSONS_PATH)?;

    let mut pairs = Vec::new();
    let mut reader = csv::Reader::from_path(EMAILS_PATH)?;
    for record in reader.deserialize() {
        let record: EmailRecord = record?;
        pairs.push((resolver.resolve(&record.from), resolver.resolve(&record.to)));
    }

    let mut graph = build_graph(&count_pairs(pairs));
    println!("Number of nodes in graph: {}", graph.node_count());
    println!("Number of edges in graph: {}", graph.edge_count());

    let scores = pagerank(&graph, &PageRankConfig::default());
    annotate_ranks(&mut graph, &scores);

    let mut ranked: Vec<&Participant> = graph.node_weights().collect();
    ranked.sort_by(|a, b| b.rank.partial_cmp(&a.rank).unwrap());

    println!("\nTop participants by PageRank:");
    for participant in ranked.iter().take(20) {
        println!("{:<40} {:.6}", participant.name, participant.rank);
    }

    serde_json::to_writer_pretty(File::create("pagerank.json")?, &ranked)?;

    let options = RenderOptions::default();
    DotRenderer::new("graph_full.dot").render(&graph, Layout::ForceDirected, &options)?;

    let reduced = prune_by_rank(&graph, PAGERANK_THRESHOLD);
    println!(
        "\nNumber of nodes above threshold {}: {}",
        PAGERANK_THRESHOLD,
        reduced.node_count()
    );
    DotRenderer::new("graph_reduced.dot").render(&reduced, Layout::Circular, &options)?;

    Ok(())
}
