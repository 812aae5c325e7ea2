//! Tree command - Minimum spanning tree from a start node
//!
//! Prints the order in which tasks (nodes) are picked up, each joined by the
//! cheapest edge from the tasks already scheduled.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use waypoint_core::{minimum_spanning_tree, RouteGraph, SpanningTree, TreeEdge};

use super::load_graph;
use crate::output::{
    format_cost, CsvOutput, Output, OutputConfig, Outputter, TableOutput, TreeNode, TreeOutput,
};

/// Spanning tree result
#[derive(Debug, Serialize)]
pub struct SpanningTreeResult {
    pub graph: String,
    pub start: String,
    pub total_weight: f64,
    pub edges: Vec<TreeEdge>,
    /// Nodes outside the start node's component.
    pub unreached: Vec<String>,
}

impl SpanningTreeResult {
    pub fn new(title: String, graph: &RouteGraph, tree: SpanningTree) -> Self {
        let reached = tree.nodes();
        let unreached = graph
            .nodes()
            .filter(|n| !reached.contains(n))
            .map(str::to_string)
            .collect();
        Self {
            graph: title,
            start: tree.start().to_string(),
            total_weight: tree.total_weight(),
            unreached,
            edges: tree.into_edges(),
        }
    }

    /// Graphviz rendering; the tree edges are undirected.
    pub fn to_dot(&self) -> String {
        let mut lines = vec![format!("graph \"{}\" {{", escape_dot(&self.graph))];
        lines.push(format!("  \"{}\" [shape=doublecircle];", escape_dot(&self.start)));
        for edge in &self.edges {
            lines.push(format!(
                "  \"{}\" -- \"{}\" [label=\"{}\"];",
                escape_dot(&edge.parent),
                escape_dot(&edge.child),
                format_cost(edge.weight)
            ));
        }
        for node in &self.unreached {
            lines.push(format!("  \"{}\" [style=dashed];", escape_dot(node)));
        }
        lines.push("}".to_string());
        lines.join("\n")
    }
}

fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

impl Outputter for SpanningTreeResult {
    fn to_table(&self, config: &OutputConfig) -> String {
        let mut output = format!(
            "{} {} {}\n",
            "Minimum spanning tree from".bold(),
            self.start.cyan(),
            format!("({})", self.graph).dimmed()
        );

        let rows: Vec<Vec<String>> = self
            .edges
            .iter()
            .enumerate()
            .map(|(i, e)| {
                vec![
                    (i + 1).to_string(),
                    e.parent.clone(),
                    e.child.clone(),
                    format_cost(e.weight),
                ]
            })
            .collect();
        output.push_str(&TableOutput::from_rows(
            &["Step", "From", "To", "Weight"],
            &rows,
            config,
        ));
        output.push_str(&format!(
            "\n{}: {}",
            "Total weight".bold(),
            format_cost(self.total_weight)
        ));
        if !self.unreached.is_empty() {
            output.push_str(&format!(
                "\n{}: {}",
                "Not reached".yellow(),
                self.unreached.join(", ")
            ));
        }
        output
    }

    fn to_csv(&self, _config: &OutputConfig) -> String {
        let rows: Vec<Vec<String>> = self
            .edges
            .iter()
            .enumerate()
            .map(|(i, e)| {
                vec![
                    (i + 1).to_string(),
                    e.parent.clone(),
                    e.child.clone(),
                    e.weight.to_string(),
                ]
            })
            .collect();
        CsvOutput::from_rows(&["step", "parent", "child", "weight"], &rows)
    }

    fn to_tree(&self, config: &OutputConfig) -> String {
        let links: Vec<(String, String, String)> = self
            .edges
            .iter()
            .map(|e| {
                (
                    e.parent.clone(),
                    e.child.clone(),
                    format!("({})", format_cost(e.weight)),
                )
            })
            .collect();
        let children = TreeNode::from_links(&self.start, &links);
        let mut output = TreeOutput::from_nodes(&self.start, &children, config);
        output.push_str(&format!(
            "\n\n{}: {}",
            "Total weight".bold(),
            format_cost(self.total_weight)
        ));
        output
    }
}

/// Run the tree command
pub fn run(graph_path: &Path, start: &str, dot: bool, config: OutputConfig) -> Result<()> {
    let (title, graph) = load_graph(graph_path)?;
    let tree = minimum_spanning_tree(&graph, start)?;
    tracing::debug!(edges = tree.len(), total = tree.total_weight(), "spanning tree built");

    let result = SpanningTreeResult::new(title, &graph, tree);
    if dot {
        println!("{}", result.to_dot());
        return Ok(());
    }
    Output::new(result, config).render()
}
