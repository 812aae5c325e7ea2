//! Command implementations for the Waypoint CLI
//!
//! Each command module provides a `run` function that executes the command logic.

pub mod completions;
pub mod inspect;
pub mod matrix;
pub mod route;
pub mod routes;
pub mod tree;

use anyhow::{Context, Result};
use std::path::Path;
use waypoint_core::RouteGraph;

use crate::graph_file::GraphFile;

/// Load and validate a graph file, returning its display title and the graph.
pub fn load_graph(path: &Path) -> Result<(String, RouteGraph)> {
    let file = GraphFile::load(path)?;
    let graph = file
        .build()
        .with_context(|| format!("Invalid graph in {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );
    Ok((file.title(path), graph))
}
