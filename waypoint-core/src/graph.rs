//! Weighted route graph backed by petgraph.
//!
//! Nodes are opaque string identifiers (locations, tasks) and every edge is a
//! directed entry carrying a non-negative base weight. An undirected graph is
//! the same structure with each insertion mirrored, so the number of directed
//! entries always matches the declared directedness.
//!
//! # Example
//!
//! ```
//! use waypoint_core::RouteGraph;
//!
//! let mut graph = RouteGraph::undirected();
//! graph.add_edge("Centro", "Zapopan", 10.0);
//! graph.add_edge("Zapopan", "Etzatlan", 20.0);
//!
//! assert_eq!(graph.base_weight("Zapopan", "Centro").unwrap(), 10.0);
//! assert_eq!(graph.neighbors("Zapopan"), vec!["Centro", "Etzatlan"]);
//! ```

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

use crate::error::{Result, RouteError};

/// Whether inserting an edge also inserts its reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directedness {
    Directed,
    Undirected,
}

/// In-memory weighted graph used by the routing and spanning-tree engines.
///
/// Built once through [`add_node`](Self::add_node) and
/// [`add_edge`](Self::add_edge), then queried through shared references. The
/// engines only ever take `&RouteGraph`, so concurrent queries are fine while
/// mutation requires exclusive access.
#[derive(Debug, Clone)]
pub struct RouteGraph {
    graph: DiGraph<String, f64>,
    node_map: HashMap<String, NodeIndex>,
    directedness: Directedness,
}

impl RouteGraph {
    /// Create an empty graph with the given directedness.
    pub fn new(directedness: Directedness) -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
            directedness,
        }
    }

    /// Create an empty directed graph.
    pub fn directed() -> Self {
        Self::new(Directedness::Directed)
    }

    /// Create an empty undirected graph (every edge is stored in both directions).
    pub fn undirected() -> Self {
        Self::new(Directedness::Undirected)
    }

    /// Build a graph from node IDs and `(from, to, weight)` tuples.
    ///
    /// Nodes are inserted first so that isolated nodes keep their position in
    /// [`nodes`](Self::nodes); edge endpoints missing from `nodes` are added
    /// on the fly.
    pub fn from_edges<N, E>(directedness: Directedness, nodes: N, edges: E) -> Self
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: EdgeTuple,
    {
        let mut graph = Self::new(directedness);
        for node in nodes {
            graph.add_node(node.as_ref());
        }
        for edge in edges {
            let (from, to, weight) = edge.parts();
            graph.add_edge(from, to, weight);
        }
        graph
    }

    /// Add a node. Re-adding an existing node is a no-op.
    pub fn add_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.node_map.insert(id.to_string(), idx);
        idx
    }

    /// Add or overwrite the edge `from -> to`.
    ///
    /// Missing endpoints are inserted. A previous weight for the same ordered
    /// pair is replaced (last write wins). In an undirected graph the reverse
    /// entry `to -> from` is written with the same weight.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) {
        let a = self.add_node(from);
        let b = self.add_node(to);
        self.graph.update_edge(a, b, weight);
        if self.directedness == Directedness::Undirected && a != b {
            self.graph.update_edge(b, a, weight);
        }
    }

    /// Nodes reachable from `id` through one outgoing edge, in insertion order.
    ///
    /// Unknown nodes and nodes without edges yield an empty list.
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        self.outgoing(id).map(|(neighbor, _)| neighbor).collect()
    }

    /// Base weight of the directed edge `from -> to`.
    pub fn base_weight(&self, from: &str, to: &str) -> Result<f64> {
        let not_found = || RouteError::EdgeNotFound {
            from: from.to_string(),
            to: to.to_string(),
        };
        let a = *self.node_map.get(from).ok_or_else(not_found)?;
        let b = *self.node_map.get(to).ok_or_else(not_found)?;
        let edge = self.graph.find_edge(a, b).ok_or_else(not_found)?;
        Ok(self.graph[edge])
    }

    /// Outgoing `(neighbor, base_weight)` pairs of `id`, ordered by neighbor
    /// insertion order.
    pub(crate) fn outgoing(&self, id: &str) -> impl Iterator<Item = (&str, f64)> + '_ {
        let mut edges: Vec<(NodeIndex, f64)> = match self.node_map.get(id) {
            Some(&idx) => self
                .graph
                .edges_directed(idx, Direction::Outgoing)
                .map(|edge| (edge.target(), *edge.weight()))
                .collect(),
            None => Vec::new(),
        };
        // petgraph walks adjacency lists newest-first
        edges.sort_by_key(|(target, _)| *target);
        edges
            .into_iter()
            .map(move |(target, weight)| (self.graph[target].as_str(), weight))
    }

    /// Check if a node exists in the graph.
    pub fn contains_node(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    /// Get the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of directed edge entries.
    ///
    /// An undirected edge between two distinct nodes counts twice.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_directed(&self) -> bool {
        self.directedness == Directedness::Directed
    }

    pub fn directedness(&self) -> Directedness {
        self.directedness
    }

    /// All node IDs in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_weights().map(String::as_str)
    }

    /// All directed entries as `(from, to, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.graph.edge_references().map(move |edge| {
            (
                self.graph[edge.source()].as_str(),
                self.graph[edge.target()].as_str(),
                *edge.weight(),
            )
        })
    }

    /// Nodes with no incoming or outgoing edges.
    pub fn isolated_nodes(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Outgoing)
                    .next()
                    .is_none()
                    && self
                        .graph
                        .neighbors_directed(idx, Direction::Incoming)
                        .next()
                        .is_none()
            })
            .map(|idx| self.graph[idx].as_str())
            .collect()
    }

    /// The graph's own copy of `id`, so traversal state can borrow from the graph.
    pub(crate) fn resolve_node(&self, id: &str) -> Result<&str> {
        self.node_map
            .get_key_value(id)
            .map(|(key, _)| key.as_str())
            .ok_or_else(|| RouteError::NodeNotFound(id.to_string()))
    }
}

impl Default for RouteGraph {
    fn default() -> Self {
        Self::undirected()
    }
}

/// Anything that can be read as a `(from, to, weight)` edge.
pub trait EdgeTuple {
    fn parts(&self) -> (&str, &str, f64);
}

impl<S: AsRef<str>> EdgeTuple for (S, S, f64) {
    fn parts(&self) -> (&str, &str, f64) {
        (self.0.as_ref(), self.1.as_ref(), self.2)
    }
}

impl<S: AsRef<str>> EdgeTuple for &(S, S, f64) {
    fn parts(&self) -> (&str, &str, f64) {
        (self.0.as_ref(), self.1.as_ref(), self.2)
    }
}
