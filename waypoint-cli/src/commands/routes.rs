//! Routes command - Optimal route from one node to every destination
//!
//! Runs the all-destinations engine with static weights and lists the cost
//! and path of each destination, unreachable ones included.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use waypoint_core::{shortest_paths_from_source, ShortestPathTree, StaticWeights};

use super::load_graph;
use crate::output::{
    format_cost, format_path, truncate, CsvOutput, Output, OutputConfig, Outputter, TableOutput,
    TreeNode, TreeOutput,
};

/// Routes from one source to every other node.
#[derive(Debug, Serialize)]
pub struct RoutesResult {
    pub graph: String,
    pub source: String,
    pub routes: Vec<DestinationRoute>,
    pub reachable: usize,
}

/// One destination row.
#[derive(Debug, Serialize)]
pub struct DestinationRoute {
    pub destination: String,
    /// `None` when unreachable.
    pub cost: Option<f64>,
    pub path: Vec<String>,
    /// Node the route arrives from, `None` when unreachable.
    pub via: Option<String>,
}

impl RoutesResult {
    pub fn from_tree(graph: String, tree: &ShortestPathTree) -> Self {
        let routes: Vec<DestinationRoute> = tree
            .routes()
            .into_iter()
            .filter(|(node, _)| node != tree.source())
            .map(|(node, route)| DestinationRoute {
                via: tree.predecessor(&node).map(str::to_string),
                cost: route.is_reachable().then_some(route.cost),
                path: route.path,
                destination: node,
            })
            .collect();
        let reachable = routes.iter().filter(|r| r.cost.is_some()).count();

        Self {
            graph,
            source: tree.source().to_string(),
            routes,
            reachable,
        }
    }

    fn unreachable(&self) -> impl Iterator<Item = &DestinationRoute> {
        self.routes.iter().filter(|r| r.cost.is_none())
    }
}

fn cost_cell(cost: Option<f64>) -> String {
    format_cost(cost.unwrap_or(f64::INFINITY))
}

impl Outputter for RoutesResult {
    fn to_table(&self, config: &OutputConfig) -> String {
        let mut output = format!(
            "{} {} {}\n",
            "Optimal routes from".bold(),
            self.source.cyan(),
            format!("({})", self.graph).dimmed()
        );

        let path_width = config.effective_width() / 2;
        let rows: Vec<Vec<String>> = self
            .routes
            .iter()
            .map(|r| {
                let path = format_path(&r.path);
                vec![
                    r.destination.clone(),
                    cost_cell(r.cost),
                    if config.should_truncate() {
                        truncate(&path, path_width)
                    } else {
                        path
                    },
                ]
            })
            .collect();
        output.push_str(&TableOutput::from_rows(
            &["Destination", "Cost", "Route"],
            &rows,
            config,
        ));
        output.push_str(&format!(
            "\n{}: {} of {}",
            "Reachable".bold(),
            self.reachable,
            self.routes.len()
        ));
        output
    }

    fn to_csv(&self, _config: &OutputConfig) -> String {
        let rows: Vec<Vec<String>> = self
            .routes
            .iter()
            .map(|r| {
                vec![
                    self.source.clone(),
                    r.destination.clone(),
                    r.cost.map(|c| c.to_string()).unwrap_or_default(),
                    r.path.join(" "),
                ]
            })
            .collect();
        CsvOutput::from_rows(&["source", "destination", "cost", "path"], &rows)
    }

    fn to_tree(&self, config: &OutputConfig) -> String {
        let links: Vec<(String, String, String)> = self
            .routes
            .iter()
            .filter_map(|r| {
                let via = r.via.clone()?;
                Some((via, r.destination.clone(), format!("({})", cost_cell(r.cost))))
            })
            .collect();
        let children = TreeNode::from_links(&self.source, &links);

        let mut output = TreeOutput::from_nodes(&self.source, &children, config);
        let unreachable: Vec<&str> = self.unreachable().map(|r| r.destination.as_str()).collect();
        if !unreachable.is_empty() {
            output.push_str(&format!(
                "\n\n{}: {}",
                "Unreachable".yellow(),
                unreachable.join(", ")
            ));
        }
        output
    }
}

/// Run the routes command
pub fn run(graph_path: &Path, from: &str, config: OutputConfig) -> Result<()> {
    let (title, graph) = load_graph(graph_path)?;
    let tree = shortest_paths_from_source(&graph, &mut StaticWeights, from)?;
    Output::new(RoutesResult::from_tree(title, &tree), config).render()
}
