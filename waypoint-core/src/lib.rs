//! Waypoint core - least-cost routing and task sequencing over weighted graphs.
//!
//! This crate holds the algorithmic part of Waypoint. It knows nothing about
//! files, terminals or plotting; callers hand it a populated [`RouteGraph`]
//! and get plain data back.
//!
//! # Features
//!
//! - **Graph store**: string-keyed nodes, directed or undirected weighted edges
//! - **Pluggable weights**: static base weights, seeded traffic simulation, or any closure
//! - **Routing**: all-destinations Dijkstra with path reconstruction, and an
//!   early-exit single-pair variant for dynamic weights
//! - **Task sequencing**: Prim minimum spanning tree from a start node
//! - **Distance matrix**: parallel static-weight queries via Rayon
//!
//! # Usage
//!
//! ```
//! use waypoint_core::{minimum_spanning_tree, shortest_path, RouteGraph, StaticWeights};
//!
//! let mut graph = RouteGraph::undirected();
//! graph.add_edge("A", "B", 10.0);
//! graph.add_edge("B", "C", 12.0);
//! graph.add_edge("A", "C", 16.0);
//!
//! let route = shortest_path(&graph, &mut StaticWeights, "A", "C")?;
//! assert_eq!(route.cost, 16.0);
//! assert_eq!(route.path, vec!["A", "C"]);
//!
//! let tree = minimum_spanning_tree(&graph, "A")?;
//! assert_eq!(tree.total_weight(), 22.0);
//! # Ok::<(), waypoint_core::RouteError>(())
//! ```

pub mod error;
mod frontier;
pub mod graph;
pub mod shortest_path;
pub mod spanning_tree;
pub mod weight;

pub use error::{Result, RouteError};
pub use graph::{Directedness, EdgeTuple, RouteGraph};
pub use shortest_path::{
    distance_matrix, shortest_path, shortest_paths_from_source, DistanceMatrix, Route,
    ShortestPathTree,
};
pub use spanning_tree::{minimum_spanning_tree, SpanningTree, TreeEdge};
pub use weight::{FactorRange, StaticWeights, TrafficWeights, WeightResolver};
