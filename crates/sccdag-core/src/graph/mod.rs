//! Strongly connected components and condensation.
//!
//! # Overview
//!
//! This module decomposes a directed graph into its strongly connected
//! components (SCCs) and contracts them into a condensation graph. It never
//! owns or mutates the input graph; everything it needs is read through the
//! [`HostGraph`] trait.
//!
//! ## Pipeline
//!
//! ```text
//! host graph (DiGraphMap, or any HostGraph impl)
//!        ↓  scc::strongly_connected_components()
//! StronglyConnectedComponents (lazy iterator of HashSet<NodeId>)
//!        ↓  condense::condense() / condense::condense_with()
//! Condensation
//!   ├─ graph:    DiGraphMap<usize, ()> (acyclic for true SCCs)
//!   ├─ members / incoming per component
//!   └─ mapping:  original node → component index
//! ```
//!
//! ## Typical Usage
//!
//! ```rust
//! use petgraph::graphmap::DiGraphMap;
//! use sccdag_core::graph::{condense, strongly_connected_components};
//!
//! let graph = DiGraphMap::<&str, ()>::from_edges([("a", "b"), ("b", "a"), ("b", "c")]);
//!
//! let sccs: Vec<_> = strongly_connected_components(&graph)?.collect();
//! assert_eq!(sccs.len(), 2);
//!
//! let dag = condense(&graph)?;
//! assert_eq!(dag.node_count(), 2);
//! assert_eq!(dag.edge_count(), 1);
//! assert_eq!(dag.component_of(&"a"), dag.component_of(&"b"));
//! # Ok::<(), sccdag_core::GraphError>(())
//! ```

pub mod condense;
pub mod host;
pub mod scc;

// Re-export primary types at module level for convenience.
pub use condense::{ComponentNode, Condensation, condense, condense_with};
pub use host::HostGraph;
pub use scc::{
    StronglyConnectedComponents, number_strongly_connected_components,
    strongly_connected_components,
};
