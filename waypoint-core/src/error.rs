//! Error types for waypoint-core.

use thiserror::Error;

/// Result type alias for routing operations.
pub type Result<T> = std::result::Result<T, RouteError>;

/// Errors that can occur while building or querying a route graph.
///
/// An unreachable destination is not an error: the engines report it as an
/// infinite cost with an empty path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    /// No directed edge exists between the two nodes.
    #[error("Edge not found: {from} -> {to}")]
    EdgeNotFound {
        /// Tail of the requested edge.
        from: String,
        /// Head of the requested edge.
        to: String,
    },

    /// A query named a node the graph does not contain.
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Traffic factor range is empty, negative or not finite.
    #[error("Invalid traffic factor range: [{min}, {max}]")]
    InvalidFactorRange {
        /// Lower bound of the range.
        min: f64,
        /// Upper bound of the range.
        max: f64,
    },
}
