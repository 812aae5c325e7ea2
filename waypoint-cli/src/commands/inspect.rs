//! Inspect command - Summary of a graph file

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use waypoint_core::RouteGraph;

use super::load_graph;
use crate::output::{CsvOutput, Output, OutputConfig, Outputter, TableOutput};

#[derive(Debug, Serialize)]
pub struct GraphSummary {
    pub graph: String,
    pub directed: bool,
    pub nodes: usize,
    /// Directed entries; an undirected edge counts twice.
    pub edges: usize,
    pub isolated: Vec<String>,
    /// Sum of edge weights, each undirected edge counted once.
    pub total_weight: f64,
}

impl GraphSummary {
    pub fn new(title: String, graph: &RouteGraph) -> Self {
        Self {
            graph: title,
            directed: graph.is_directed(),
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            isolated: graph.isolated_nodes().into_iter().map(str::to_string).collect(),
            total_weight: total_weight(graph),
        }
    }
}

/// Undirected edges are stored in both directions; only the `from <= to`
/// entry of each pair is summed, which also counts a self loop once.
fn total_weight(graph: &RouteGraph) -> f64 {
    graph
        .edges()
        .filter(|(from, to, _)| graph.is_directed() || from <= to)
        .map(|(_, _, w)| w)
        .sum()
}

impl Outputter for GraphSummary {
    fn to_table(&self, config: &OutputConfig) -> String {
        let isolated = if self.isolated.is_empty() {
            "none".to_string()
        } else {
            self.isolated.join(", ")
        };
        let pairs = vec![
            ("Kind", if self.directed { "directed" } else { "undirected" }.to_string()),
            ("Nodes", self.nodes.to_string()),
            ("Edges", self.edges.to_string()),
            ("Isolated", isolated),
            ("Total weight", self.total_weight.to_string()),
        ];
        format!(
            "{} {}\n{}",
            "Graph".bold(),
            self.graph.cyan(),
            TableOutput::format_key_value(&pairs, config)
        )
    }

    fn to_csv(&self, _config: &OutputConfig) -> String {
        CsvOutput::from_rows(
            &["graph", "directed", "nodes", "edges", "isolated", "total_weight"],
            &[vec![
                self.graph.clone(),
                self.directed.to_string(),
                self.nodes.to_string(),
                self.edges.to_string(),
                self.isolated.join(" "),
                self.total_weight.to_string(),
            ]],
        )
    }
}

/// Run the inspect command
pub fn run(graph_path: &Path, config: OutputConfig) -> Result<()> {
    let (title, graph) = load_graph(graph_path)?;
    Output::new(GraphSummary::new(title, &graph), config).render()
}
