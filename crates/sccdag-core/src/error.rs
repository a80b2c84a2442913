//! Error types for SCC decomposition and condensation.
//!
//! Every error is a caller contract violation detected before any output is
//! produced. Nothing is retried or recovered internally.

use std::fmt;

/// The graph shape an operation refused to run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphKind {
    /// The host graph is undirected.
    Undirected,
    /// The host graph type permits parallel edges between an ordered pair.
    Multigraph,
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undirected => f.write_str("undirected"),
            Self::Multigraph => f.write_str("multigraph"),
        }
    }
}

/// Ways an externally supplied component list can fail to partition the
/// node set of a graph.
///
/// Node identifiers are rendered with their `Debug` form so the error stays
/// independent of the host's node type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartitionError {
    /// A node appears in two components.
    #[error("node {node} appears in both component {first} and component {second}")]
    DuplicateNode {
        node: String,
        first: usize,
        second: usize,
    },
    /// A component member is not a node of the graph.
    #[error("component {component} contains {node}, which is not a node of the graph")]
    UnknownNode { node: String, component: usize },
    /// A component has no members.
    #[error("component {component} is empty")]
    EmptyComponent { component: usize },
    /// A graph node is not covered by any component.
    #[error("node {node} is not covered by any component")]
    MissingNode { node: String },
}

/// Errors returned by [`crate::graph`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The operation is only defined for simple directed graphs.
    #[error("{operation} is not implemented for {kind} graphs")]
    UnsupportedOperation {
        operation: &'static str,
        kind: GraphKind,
    },
    /// The supplied components are not a set partition of the graph's nodes.
    #[error("invalid partition: {0}")]
    InvalidPartition(#[from] PartitionError),
}

impl GraphError {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedOperation {
                kind: GraphKind::Undirected,
                ..
            } => "E4001",
            Self::UnsupportedOperation {
                kind: GraphKind::Multigraph,
                ..
            } => "E4002",
            Self::InvalidPartition(_) => "E4101",
        }
    }

    /// Optional remediation hint for the caller.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::UnsupportedOperation {
                kind: GraphKind::Undirected,
                ..
            } => Some("Use connected components for undirected graphs."),
            Self::UnsupportedOperation {
                kind: GraphKind::Multigraph,
                ..
            } => Some("Collapse parallel edges into a simple directed graph first."),
            Self::InvalidPartition(PartitionError::MissingNode { .. }) => {
                Some("Every node of the graph must belong to exactly one component.")
            }
            Self::InvalidPartition(_) => {
                Some("Pass disjoint, non-empty components drawn from the graph's nodes.")
            }
        }
    }
}
