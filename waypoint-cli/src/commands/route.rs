//! Route command - Least-cost route between two nodes
//!
//! Uses the early-exit single-pair engine. With `--traffic`, every edge is
//! re-weighted by a random congestion factor each time it is examined.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use waypoint_core::{shortest_path, FactorRange, Route, StaticWeights, TrafficWeights};

use super::load_graph;
use crate::output::{
    format_cost, format_path, CsvOutput, Output, OutputConfig, Outputter, TableOutput, TreeNode,
    TreeOutput,
};

/// How edge weights were resolved.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum WeightMode {
    Static,
    Traffic {
        min_factor: f64,
        max_factor: f64,
        seed: Option<u64>,
        samples: u64,
    },
}

/// Traffic options from flags and config.
#[derive(Debug, Clone, Copy)]
pub struct TrafficOptions {
    pub range: FactorRange,
    pub seed: Option<u64>,
}

/// Single-pair route result.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub graph: String,
    pub source: String,
    pub destination: String,
    pub cost: Option<f64>,
    pub path: Vec<String>,
    pub hops: usize,
    pub weights: WeightMode,
}

impl RouteResult {
    fn new(graph: String, source: &str, destination: &str, route: Route, weights: WeightMode) -> Self {
        Self {
            graph,
            source: source.to_string(),
            destination: destination.to_string(),
            cost: route.is_reachable().then_some(route.cost),
            hops: route.hops(),
            path: route.path,
            weights,
        }
    }
}

impl Outputter for RouteResult {
    fn to_table(&self, config: &OutputConfig) -> String {
        let mut output = format!(
            "{} {} {} {}\n",
            "Route from".bold(),
            self.source.cyan(),
            "to".bold(),
            self.destination.cyan()
        );

        let mut pairs = vec![
            ("Graph", self.graph.clone()),
            ("Cost", format_cost(self.cost.unwrap_or(f64::INFINITY))),
            ("Hops", self.hops.to_string()),
            ("Route", format_path(&self.path)),
        ];
        match &self.weights {
            WeightMode::Static => pairs.push(("Weights", "static".to_string())),
            WeightMode::Traffic {
                min_factor,
                max_factor,
                seed,
                samples,
            } => {
                pairs.push((
                    "Weights",
                    format!("traffic x[{}, {}]", min_factor, max_factor),
                ));
                if let Some(seed) = seed {
                    pairs.push(("Seed", seed.to_string()));
                }
                pairs.push(("Samples", samples.to_string()));
            }
        }
        output.push_str(&TableOutput::format_key_value(&pairs, config));

        if self.cost.is_none() {
            output.push_str(&format!(
                "\n  {} No route between these nodes.",
                "INFO".yellow()
            ));
        }
        output
    }

    fn to_csv(&self, _config: &OutputConfig) -> String {
        let mode = match self.weights {
            WeightMode::Static => "static",
            WeightMode::Traffic { .. } => "traffic",
        };
        CsvOutput::from_rows(
            &["source", "destination", "cost", "hops", "path", "weights"],
            &[vec![
                self.source.clone(),
                self.destination.clone(),
                self.cost.map(|c| c.to_string()).unwrap_or_default(),
                self.hops.to_string(),
                self.path.join(" "),
                mode.to_string(),
            ]],
        )
    }

    fn to_tree(&self, config: &OutputConfig) -> String {
        let Some((root, rest)) = self.path.split_first() else {
            return format!("{} (unreachable)", self.destination);
        };
        let cost = format!("({})", format_cost(self.cost.unwrap_or(f64::INFINITY)));
        if rest.is_empty() {
            // Source and destination coincide
            return TreeOutput::from_nodes(&format!("{} {}", root, cost), &[], config);
        }
        // A path is a degenerate tree: each hop nests below the previous one.
        let chain = rest.iter().rev().fold(None, |child: Option<TreeNode>, node| {
            let node = TreeNode::new(node.clone());
            Some(match child {
                Some(child) => node.with_children(vec![child]),
                None => node.with_suffix(cost.clone()),
            })
        });
        TreeOutput::from_nodes(root, &chain.into_iter().collect::<Vec<_>>(), config)
    }
}

/// Compute a route, statically or under simulated traffic.
pub fn compute(
    graph_path: &Path,
    from: &str,
    to: &str,
    traffic: Option<TrafficOptions>,
) -> Result<RouteResult> {
    let (title, graph) = load_graph(graph_path)?;

    let Some(options) = traffic else {
        let route = shortest_path(&graph, &mut StaticWeights, from, to)?;
        return Ok(RouteResult::new(title, from, to, route, WeightMode::Static));
    };

    let mut resolver = match options.seed {
        Some(seed) => TrafficWeights::seeded(options.range, seed)?,
        None => TrafficWeights::from_entropy(options.range)?,
    };
    let route = shortest_path(&graph, &mut resolver, from, to)?;
    tracing::debug!(samples = resolver.samples(), "traffic route computed");

    let weights = WeightMode::Traffic {
        min_factor: options.range.min,
        max_factor: options.range.max,
        seed: options.seed,
        samples: resolver.samples(),
    };
    Ok(RouteResult::new(title, from, to, route, weights))
}

/// Run the route command
pub fn run(
    graph_path: &Path,
    from: &str,
    to: &str,
    traffic: Option<TrafficOptions>,
    config: OutputConfig,
) -> Result<()> {
    let result = compute(graph_path, from, to, traffic)?;
    Output::new(result, config).render()
}
