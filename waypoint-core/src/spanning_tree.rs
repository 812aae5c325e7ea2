//! Minimum spanning tree (Prim) grown from a start node.
//!
//! Used to sequence interdependent tasks: starting from one task, repeatedly
//! take the cheapest edge into a task not yet scheduled. Only the start
//! node's component is covered; anything unreachable from it is left out
//! without error. Base weights are used as-is, no resolver is involved.

use serde::Serialize;
use std::collections::HashSet;

use crate::error::Result;
use crate::frontier::Frontier;
use crate::graph::RouteGraph;

/// One acquired edge of the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeEdge {
    pub parent: String,
    pub child: String,
    pub weight: f64,
}

/// Edges of a minimum spanning tree, in acquisition order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanningTree {
    start: String,
    edges: Vec<TreeEdge>,
}

impl SpanningTree {
    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn edges(&self) -> &[TreeEdge] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<TreeEdge> {
        self.edges
    }

    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Reached nodes in the order they joined the tree, start first.
    pub fn nodes(&self) -> Vec<&str> {
        std::iter::once(self.start.as_str())
            .chain(self.edges.iter().map(|e| e.child.as_str()))
            .collect()
    }

    /// Edges hanging directly below `node`.
    pub fn children<'a>(&'a self, node: &'a str) -> impl Iterator<Item = &'a TreeEdge> + 'a {
        self.edges.iter().filter(move |e| e.parent == node)
    }
}

/// Grow a minimum spanning tree from `start`.
///
/// With `N` nodes in the start's component the result holds exactly `N - 1`
/// edges. Equal-weight candidates are taken in child ID order.
pub fn minimum_spanning_tree(graph: &RouteGraph, start: &str) -> Result<SpanningTree> {
    let start = graph.resolve_node(start)?;

    let mut visited: HashSet<&str> = HashSet::new();
    let mut edges = Vec::new();
    let mut frontier: Frontier<'_, Option<&str>> = Frontier::new();
    frontier.push(0.0, start, None);

    while let Some((weight, child, parent)) = frontier.pop() {
        if !visited.insert(child) {
            continue;
        }
        if let Some(parent) = parent {
            edges.push(TreeEdge {
                parent: parent.to_string(),
                child: child.to_string(),
                weight,
            });
        }
        for (neighbor, base) in graph.outgoing(child) {
            if !visited.contains(neighbor) {
                frontier.push(base, neighbor, Some(child));
            }
        }
    }

    tracing::debug!(
        start,
        reached = visited.len(),
        candidates = frontier.pushed(),
        "spanning tree grown"
    );

    Ok(SpanningTree {
        start: start.to_string(),
        edges,
    })
}
