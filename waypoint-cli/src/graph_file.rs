//! Graph literal files.
//!
//! A graph file is TOML describing one weighted graph. Edges can be listed
//! explicitly, as an adjacency table, or both:
//!
//! ```toml
//! name = "Delivery zones"
//! directed = false
//! nodes = ["Warehouse"]
//!
//! [[edges]]
//! from = "Centro"
//! to = "Zapopan"
//! weight = 10
//!
//! [adjacency.Zapopan]
//! Etzatlan = 20
//! ```
//!
//! Adjacency entries are read in key order. `[[edges]]` entries keep file
//! order and are inserted before the adjacency table.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use waypoint_core::{Directedness, RouteGraph};

/// Errors raised while loading a graph file.
#[derive(Error, Debug)]
pub enum GraphFileError {
    /// File could not be read.
    #[error("Failed to read graph file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML or does not match the graph layout.
    #[error("Failed to parse graph file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Edge weight is negative, NaN or infinite.
    #[error("Invalid weight {weight} on edge {from} -> {to}: weights must be finite and non-negative")]
    InvalidWeight { from: String, to: String, weight: f64 },

    /// A node identifier is the empty string.
    #[error("Node identifiers must not be empty")]
    EmptyNodeId,
}

/// One `[[edges]]` entry.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EdgeEntry {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

/// Parsed, not yet validated, graph file.
#[derive(Debug, Default, Deserialize)]
pub struct GraphFile {
    /// Display name for output headers.
    #[serde(default)]
    pub name: Option<String>,

    /// Whether edges are one-way. Defaults to `false` (roads both ways).
    #[serde(default)]
    pub directed: bool,

    /// Extra nodes, typically ones without any edge yet.
    #[serde(default)]
    pub nodes: Vec<String>,

    #[serde(default)]
    pub edges: Vec<EdgeEntry>,

    /// `adjacency.<from>.<to> = weight`
    #[serde(default)]
    pub adjacency: BTreeMap<String, BTreeMap<String, f64>>,
}

impl GraphFile {
    /// Read and parse a graph file.
    pub fn load(path: &Path) -> Result<Self, GraphFileError> {
        let content = std::fs::read_to_string(path).map_err(|source| GraphFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file = Self::parse(&content, path)?;
        tracing::debug!(
            path = %path.display(),
            nodes = file.nodes.len(),
            edges = file.edges.len(),
            "graph file parsed"
        );
        Ok(file)
    }

    /// Parse graph file content. `origin` is only used in error messages.
    pub fn parse(content: &str, origin: &Path) -> Result<Self, GraphFileError> {
        toml::from_str(content).map_err(|source| GraphFileError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn directedness(&self) -> Directedness {
        if self.directed {
            Directedness::Directed
        } else {
            Directedness::Undirected
        }
    }

    /// All edges, explicit entries first, then the adjacency table.
    pub fn edge_list(&self) -> Vec<EdgeEntry> {
        let adjacency = self.adjacency.iter().flat_map(|(from, targets)| {
            targets.iter().map(move |(to, weight)| EdgeEntry {
                from: from.clone(),
                to: to.clone(),
                weight: *weight,
            })
        });
        self.edges.iter().cloned().chain(adjacency).collect()
    }

    /// Validate and build the in-memory graph.
    pub fn build(&self) -> Result<RouteGraph, GraphFileError> {
        let edges = self.edge_list();

        if self.nodes.iter().any(String::is_empty)
            || edges.iter().any(|e| e.from.is_empty() || e.to.is_empty())
        {
            return Err(GraphFileError::EmptyNodeId);
        }
        if let Some(bad) = edges
            .iter()
            .find(|e| !e.weight.is_finite() || e.weight < 0.0)
        {
            return Err(GraphFileError::InvalidWeight {
                from: bad.from.clone(),
                to: bad.to.clone(),
                weight: bad.weight,
            });
        }

        let graph = RouteGraph::from_edges(
            self.directedness(),
            &self.nodes,
            edges.iter().map(|e| (e.from.as_str(), e.to.as_str(), e.weight)),
        );
        Ok(graph)
    }

    /// Title for output: the declared name or the file stem.
    pub fn title(&self, path: &Path) -> String {
        self.name.clone().unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "graph".to_string())
        })
    }
}
