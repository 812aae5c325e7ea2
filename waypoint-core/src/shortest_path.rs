//! Least-cost routing (Dijkstra) over a [`RouteGraph`].
//!
//! Two modes are provided:
//!
//! - [`shortest_paths_from_source`] settles every node reachable from one
//!   source and keeps a predecessor map for path reconstruction.
//! - [`shortest_path`] answers a single source/destination pair and stops as
//!   soon as the destination is settled. Each frontier entry carries its own
//!   path, so nothing is reconstructed afterwards. This is the mode to use
//!   with a dynamic resolver when only one route is needed.
//!
//! Both rely on re-insertion plus a post-pop staleness check instead of a
//! decrease-key heap. Equal-cost candidates are expanded in node ID order
//! (see the `frontier` module), which decides between equal-cost routes.

use rayon::prelude::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::error::Result;
use crate::frontier::Frontier;
use crate::graph::RouteGraph;
use crate::weight::{StaticWeights, WeightResolver};

/// Serialize infinite costs as `null` so JSON output stays valid.
fn serialize_cost<S: serde::Serializer>(
    cost: &f64,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    if cost.is_finite() {
        serializer.serialize_some(cost)
    } else {
        serializer.serialize_none()
    }
}

/// Result of a single-pair query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Cumulative effective cost, `f64::INFINITY` when unreachable.
    #[serde(serialize_with = "serialize_cost")]
    pub cost: f64,
    /// Nodes from source to destination, empty when unreachable.
    pub path: Vec<String>,
}

impl Route {
    pub fn unreachable() -> Self {
        Self {
            cost: f64::INFINITY,
            path: Vec::new(),
        }
    }

    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of edges on the route.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Distances and predecessors from one source to every node of the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathTree {
    source: String,
    order: Vec<String>,
    distances: HashMap<String, f64>,
    predecessors: HashMap<String, Option<String>>,
}

impl ShortestPathTree {
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Minimum cost from the source, `f64::INFINITY` if unreachable or unknown.
    pub fn distance(&self, node: &str) -> f64 {
        self.distances.get(node).copied().unwrap_or(f64::INFINITY)
    }

    pub fn predecessor(&self, node: &str) -> Option<&str> {
        self.predecessors.get(node).and_then(|p| p.as_deref())
    }

    pub fn is_reachable(&self, node: &str) -> bool {
        self.distance(node).is_finite()
    }

    /// Walk predecessors back from `node` to the source.
    ///
    /// Returns `[source]` for the source itself and an empty path for
    /// unreachable nodes.
    pub fn path_to(&self, node: &str) -> Vec<String> {
        if !self.is_reachable(node) {
            return Vec::new();
        }
        let mut path = vec![node.to_string()];
        let mut current = node;
        while let Some(previous) = self.predecessor(current) {
            path.push(previous.to_string());
            current = previous;
        }
        path.reverse();
        path
    }

    pub fn distances(&self) -> &HashMap<String, f64> {
        &self.distances
    }

    pub fn predecessors(&self) -> &HashMap<String, Option<String>> {
        &self.predecessors
    }

    /// One route per graph node, in graph insertion order, source included.
    pub fn routes(&self) -> Vec<(String, Route)> {
        self.order
            .iter()
            .map(|node| {
                let route = Route {
                    cost: self.distance(node),
                    path: self.path_to(node),
                };
                (node.clone(), route)
            })
            .collect()
    }
}

/// Settle every node reachable from `source`.
///
/// Unreachable nodes keep an infinite distance and no predecessor.
pub fn shortest_paths_from_source<R>(
    graph: &RouteGraph,
    resolver: &mut R,
    source: &str,
) -> Result<ShortestPathTree>
where
    R: WeightResolver + ?Sized,
{
    let source = graph.resolve_node(source)?;

    let mut distances: HashMap<&str, f64> = graph.nodes().map(|n| (n, f64::INFINITY)).collect();
    let mut predecessors: HashMap<&str, Option<&str>> = graph.nodes().map(|n| (n, None)).collect();
    let mut frontier = Frontier::new();
    let mut stale = 0usize;

    distances.insert(source, 0.0);
    frontier.push(0.0, source, ());

    while let Some((cost, node, ())) = frontier.pop() {
        if cost > distances[node] {
            stale += 1;
            continue;
        }
        for (neighbor, base) in graph.outgoing(node) {
            let weight = resolve(resolver, node, neighbor, base);
            let candidate = cost + weight;
            if candidate < distances[neighbor] {
                distances.insert(neighbor, candidate);
                predecessors.insert(neighbor, Some(node));
                frontier.push(candidate, neighbor, ());
            }
        }
    }

    tracing::debug!(
        source,
        pushed = frontier.pushed(),
        stale,
        "shortest paths settled"
    );

    Ok(ShortestPathTree {
        source: source.to_string(),
        order: graph.nodes().map(str::to_string).collect(),
        distances: distances
            .into_iter()
            .map(|(n, d)| (n.to_string(), d))
            .collect(),
        predecessors: predecessors
            .into_iter()
            .map(|(n, p)| (n.to_string(), p.map(str::to_string)))
            .collect(),
    })
}

/// Cheapest route from `source` to `destination`, stopping at the first
/// settlement of `destination`.
///
/// Returns [`Route::unreachable`] when the frontier runs dry first.
pub fn shortest_path<R>(
    graph: &RouteGraph,
    resolver: &mut R,
    source: &str,
    destination: &str,
) -> Result<Route>
where
    R: WeightResolver + ?Sized,
{
    let source = graph.resolve_node(source)?;
    let destination = graph.resolve_node(destination)?;

    let mut visited: HashSet<&str> = HashSet::new();
    let mut frontier = Frontier::new();
    frontier.push(0.0, source, vec![source]);

    while let Some((cost, node, path)) = frontier.pop() {
        if !visited.insert(node) {
            continue;
        }
        if node == destination {
            tracing::debug!(
                source,
                destination,
                cost,
                settled = visited.len(),
                "route found"
            );
            return Ok(Route {
                cost,
                path: path.into_iter().map(str::to_string).collect(),
            });
        }
        for (neighbor, base) in graph.outgoing(node) {
            if visited.contains(neighbor) {
                continue;
            }
            let weight = resolve(resolver, node, neighbor, base);
            let mut next = path.clone();
            next.push(neighbor);
            frontier.push(cost + weight, neighbor, next);
        }
    }

    tracing::debug!(source, destination, "destination unreachable");
    Ok(Route::unreachable())
}

/// All-pairs style table: one row per source, one column per graph node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceMatrix {
    pub sources: Vec<String>,
    pub nodes: Vec<String>,
    /// `rows[i][j]` is the static cost from `sources[i]` to `nodes[j]`.
    #[serde(serialize_with = "serialize_rows")]
    pub rows: Vec<Vec<f64>>,
}

fn serialize_rows<S: serde::Serializer>(
    rows: &[Vec<f64>],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let cells: Vec<Vec<Option<f64>>> = rows
        .iter()
        .map(|row| row.iter().map(|d| d.is_finite().then_some(*d)).collect())
        .collect();
    cells.serialize(serializer)
}

impl DistanceMatrix {
    pub fn get(&self, source: &str, node: &str) -> Option<f64> {
        let i = self.sources.iter().position(|s| s == source)?;
        let j = self.nodes.iter().position(|n| n == node)?;
        Some(self.rows[i][j])
    }
}

/// Static-weight distances from each of `sources`, computed in parallel.
///
/// Every source runs its own [`shortest_paths_from_source`] against the
/// shared, read-only graph.
pub fn distance_matrix(graph: &RouteGraph, sources: &[String]) -> Result<DistanceMatrix> {
    let nodes: Vec<String> = graph.nodes().map(str::to_string).collect();
    let rows = sources
        .par_iter()
        .map(|source| -> Result<Vec<f64>> {
            let tree = shortest_paths_from_source(graph, &mut StaticWeights, source)?;
            Ok(nodes.iter().map(|n| tree.distance(n)).collect())
        })
        .collect::<Result<Vec<Vec<f64>>>>()?;

    Ok(DistanceMatrix {
        sources: sources.to_vec(),
        nodes,
        rows,
    })
}

fn resolve<R>(resolver: &mut R, from: &str, to: &str, base: f64) -> f64
where
    R: WeightResolver + ?Sized,
{
    let weight = resolver.effective_weight(from, to, base);
    if weight < 0.0 {
        tracing::warn!(from, to, weight, "negative edge weight, results are undefined");
    }
    weight
}
