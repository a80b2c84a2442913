//! The boundary between the algorithms and the graph that owns the data.
//!
//! # Overview
//!
//! SCC decomposition and condensation never store or mutate the input
//! graph. They only need to enumerate nodes, walk out-neighbors, enumerate
//! edges, and know whether the graph is a simple directed graph. Those five
//! capabilities are the [`HostGraph`] trait.
//!
//! ## Provided Hosts
//!
//! | Type | `NodeId` | Parallel edges | Accepted |
//! |------|----------|----------------|----------|
//! | [`GraphMap<N, E, Directed>`](petgraph::graphmap::GraphMap) | `N` | no (re-adding replaces) | yes |
//! | [`GraphMap<N, E, Undirected>`](petgraph::graphmap::GraphMap) | `N` | no | no (undirected) |
//! | [`Graph<N, E, Ty, Ix>`](petgraph::graph::Graph) | `NodeIndex<Ix>` | yes | no (multigraph) |
//!
//! `petgraph::Graph` stores every `add_edge` call as a distinct edge, so its
//! type permits parallel edges and both operations reject it. Convert such a
//! graph into a `DiGraphMap` first (see [`GraphMap::from_edges`]).
//!
//! [`GraphMap::from_edges`]: petgraph::graphmap::GraphMap::from_edges

use std::fmt::Debug;
use std::hash::Hash;

use petgraph::{
    EdgeType,
    graph::{Graph, IndexType, NodeIndex},
    graphmap::{GraphMap, NodeTrait},
    visit::EdgeRef,
};

/// Read-only view of a graph consumed by the SCC finder and the
/// condensation builder.
///
/// Iteration order of [`nodes`](HostGraph::nodes) and
/// [`successors`](HostGraph::successors) determines the order in which
/// components are produced. The partition itself does not depend on it.
pub trait HostGraph {
    /// Opaque node identifier. Only hashing and equality are used; `Debug`
    /// lets contract violations name the offending node.
    type NodeId: Clone + Eq + Hash + Debug;

    /// All nodes of the graph, each exactly once.
    fn nodes(&self) -> impl Iterator<Item = Self::NodeId>;

    /// Direct successors (out-neighbors) of `node`.
    ///
    /// Only called with nodes produced by [`nodes`](HostGraph::nodes).
    fn successors(&self, node: &Self::NodeId) -> impl Iterator<Item = Self::NodeId>;

    /// All edges as `(source, target)` pairs.
    fn edges(&self) -> impl Iterator<Item = (Self::NodeId, Self::NodeId)>;

    /// Whether edges have a direction.
    fn is_directed(&self) -> bool;

    /// Whether the graph type can hold more than one edge for the same
    /// ordered node pair.
    fn allows_parallel_edges(&self) -> bool;
}

impl<N, E, Ty> HostGraph for GraphMap<N, E, Ty>
where
    N: NodeTrait + Debug,
    Ty: EdgeType,
{
    type NodeId = N;

    fn nodes(&self) -> impl Iterator<Item = N> {
        Self::nodes(self)
    }

    fn successors(&self, node: &N) -> impl Iterator<Item = N> {
        self.neighbors(*node)
    }

    fn edges(&self) -> impl Iterator<Item = (N, N)> {
        self.all_edges().map(|(source, target, _)| (source, target))
    }

    fn is_directed(&self) -> bool {
        Ty::is_directed()
    }

    fn allows_parallel_edges(&self) -> bool {
        false
    }
}

impl<N, E, Ty, Ix> HostGraph for Graph<N, E, Ty, Ix>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    type NodeId = NodeIndex<Ix>;

    fn nodes(&self) -> impl Iterator<Item = NodeIndex<Ix>> {
        self.node_indices()
    }

    fn successors(&self, node: &NodeIndex<Ix>) -> impl Iterator<Item = NodeIndex<Ix>> {
        self.neighbors(*node)
    }

    fn edges(&self) -> impl Iterator<Item = (NodeIndex<Ix>, NodeIndex<Ix>)> {
        self.edge_references()
            .map(|edge| (edge.source(), edge.target()))
    }

    fn is_directed(&self) -> bool {
        Ty::is_directed()
    }

    fn allows_parallel_edges(&self) -> bool {
        true
    }
}
