//! SCC condensation: contract each component to a single node.
//!
//! # Overview
//!
//! Given a partition of a graph's nodes into components (by default its
//! strongly connected components), the condensation has one node per
//! component, numbered `0..k` in enumeration order, and an edge `i → j`
//! whenever some original edge leaves component `i` and enters component
//! `j`. Edges inside a component are dropped, so the result has no
//! self-loops; for genuine SCCs it is also acyclic.
//!
//! # Output
//!
//! [`Condensation`] keeps the contracted graph as a
//! [`DiGraphMap<usize, ()>`] next to typed per-component data:
//!
//! - `members`: the original nodes of the component;
//! - `incoming`: original source nodes of edges entering the component;
//! - `mapping`: original node → component index;
//! - `incoming_by_target`: original target node → source nodes of the
//!   cross-component edges ending at it.
//!
//! # Partition Checks
//!
//! An external partition is validated in the same single pass that builds
//! the mapping: duplicated, unknown and uncovered nodes as well as empty
//! components are rejected with [`PartitionError`]. Maximality is not
//! checked; a coarser or finer partition than the true SCCs is accepted and
//! may produce cycles.

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use petgraph::graphmap::DiGraphMap;
use serde::{Serialize, Serializer};
use tracing::{debug, instrument};

use crate::error::{GraphError, PartitionError};
use crate::graph::host::HostGraph;
use crate::graph::scc::{StronglyConnectedComponents, ensure_simple_directed};

// ---------------------------------------------------------------------------
// Condensation
// ---------------------------------------------------------------------------

/// One node of the condensation graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentNode<N: Eq + Hash> {
    /// Original nodes contracted into this node.
    pub members: HashSet<N>,
    /// Original source nodes of edges crossing into this component.
    pub incoming: HashSet<N>,
}

impl<N: Eq + Hash> ComponentNode<N> {
    /// Return `true` if more than one original node was contracted here.
    #[must_use]
    pub fn is_cycle(&self) -> bool {
        self.members.len() > 1
    }
}

/// The condensation of a directed graph.
#[derive(Debug, Clone, Serialize)]
pub struct Condensation<N: Eq + Hash> {
    #[serde(rename = "edges", serialize_with = "serialize_edges")]
    graph: DiGraphMap<usize, ()>,
    components: Vec<ComponentNode<N>>,
    mapping: HashMap<N, usize>,
    incoming_by_target: HashMap<N, HashSet<N>>,
}

impl<N: Eq + Hash> Condensation<N> {
    /// Number of components (condensation nodes).
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.components.len()
    }

    /// Number of condensation edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Return `true` if the condensed graph had no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Condensation node indices, `0..node_count()`.
    #[must_use]
    pub const fn nodes(&self) -> std::ops::Range<usize> {
        0..self.components.len()
    }

    /// Condensation edges as `(from, to)` component indices.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.graph.all_edges().map(|(from, to, ())| (from, to))
    }

    #[must_use]
    pub fn contains_edge(&self, from: usize, to: usize) -> bool {
        self.graph.contains_edge(from, to)
    }

    /// All condensation nodes, indexed by component.
    #[must_use]
    pub fn components(&self) -> &[ComponentNode<N>] {
        &self.components
    }

    #[must_use]
    pub fn component(&self, index: usize) -> Option<&ComponentNode<N>> {
        self.components.get(index)
    }

    /// Original nodes contracted into component `index`.
    #[must_use]
    pub fn members(&self, index: usize) -> Option<&HashSet<N>> {
        self.components.get(index).map(|c| &c.members)
    }

    /// Original source nodes of edges entering component `index`.
    #[must_use]
    pub fn incoming(&self, index: usize) -> Option<&HashSet<N>> {
        self.components.get(index).map(|c| &c.incoming)
    }

    /// Original node → component index, for every original node.
    #[must_use]
    pub const fn mapping(&self) -> &HashMap<N, usize> {
        &self.mapping
    }

    /// Return the component index of an original node.
    #[must_use]
    pub fn component_of(&self, node: &N) -> Option<usize> {
        self.mapping.get(node).copied()
    }

    /// Source nodes of cross-component edges, keyed by the original target
    /// node (not by its component).
    #[must_use]
    pub const fn incoming_by_target(&self) -> &HashMap<N, HashSet<N>> {
        &self.incoming_by_target
    }

    /// The contracted graph itself. Node weights are component indices.
    #[must_use]
    pub const fn graph(&self) -> &DiGraphMap<usize, ()> {
        &self.graph
    }
}

fn serialize_edges<S: Serializer>(
    graph: &DiGraphMap<usize, ()>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut edges: Vec<(usize, usize)> =
        graph.all_edges().map(|(from, to, ())| (from, to)).collect();
    edges.sort_unstable();
    edges.serialize(serializer)
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Condense `graph` along its strongly connected components.
///
/// Component indices follow the order in which
/// [`strongly_connected_components`](crate::graph::strongly_connected_components)
/// yields them.
///
/// # Errors
///
/// Returns [`GraphError::UnsupportedOperation`] if `graph` is undirected or
/// its type permits parallel edges.
#[instrument(skip(graph))]
pub fn condense<G: HostGraph>(graph: &G) -> Result<Condensation<G::NodeId>, GraphError> {
    ensure_simple_directed(graph, "condense")?;
    build(graph, StronglyConnectedComponents::new(graph))
}

/// Condense `graph` along an externally supplied partition of its nodes.
///
/// `components` is consumed once; component `i` is the `i`-th item.
///
/// # Errors
///
/// Returns [`GraphError::UnsupportedOperation`] for undirected or
/// multigraph inputs and [`GraphError::InvalidPartition`] if `components` is
/// not a partition of the graph's nodes into non-empty sets.
#[instrument(skip(graph, components))]
pub fn condense_with<G, I, C>(
    graph: &G,
    components: I,
) -> Result<Condensation<G::NodeId>, GraphError>
where
    G: HostGraph,
    I: IntoIterator<Item = C>,
    C: IntoIterator<Item = G::NodeId>,
{
    ensure_simple_directed(graph, "condense")?;
    build(graph, components)
}

fn build<G, I, C>(graph: &G, components: I) -> Result<Condensation<G::NodeId>, GraphError>
where
    G: HostGraph,
    I: IntoIterator<Item = C>,
    C: IntoIterator<Item = G::NodeId>,
{
    let nodes: HashSet<G::NodeId> = graph.nodes().collect();
    let mut mapping: HashMap<G::NodeId, usize> = HashMap::with_capacity(nodes.len());
    let mut condensed_nodes: Vec<ComponentNode<G::NodeId>> = Vec::new();

    // Single pass: assign indices and validate disjointness.
    for (index, component) in components.into_iter().enumerate() {
        let mut members = HashSet::new();
        for node in component {
            if !nodes.contains(&node) {
                return Err(PartitionError::UnknownNode {
                    node: format!("{node:?}"),
                    component: index,
                }
                .into());
            }
            if let Some(&first) = mapping.get(&node) {
                return Err(PartitionError::DuplicateNode {
                    node: format!("{node:?}"),
                    first,
                    second: index,
                }
                .into());
            }
            mapping.insert(node.clone(), index);
            members.insert(node);
        }
        if members.is_empty() {
            return Err(PartitionError::EmptyComponent { component: index }.into());
        }
        condensed_nodes.push(ComponentNode {
            members,
            incoming: HashSet::new(),
        });
    }

    // Every mapped node is a distinct graph node, so equal sizes mean full
    // coverage.
    if mapping.len() != nodes.len()
        && let Some(node) = graph.nodes().find(|node| !mapping.contains_key(node))
    {
        return Err(PartitionError::MissingNode {
            node: format!("{node:?}"),
        }
        .into());
    }

    let mut condensed = DiGraphMap::with_capacity(condensed_nodes.len(), 0);
    for index in 0..condensed_nodes.len() {
        condensed.add_node(index);
    }

    let mut incoming_by_target: HashMap<G::NodeId, HashSet<G::NodeId>> = HashMap::new();
    for (source, target) in graph.edges() {
        let (Some(&from), Some(&to)) = (mapping.get(&source), mapping.get(&target)) else {
            continue;
        };
        if from == to {
            continue;
        }
        // GraphMap::add_edge replaces an existing edge, keeping the result simple.
        condensed.add_edge(from, to, ());
        if let Some(entered) = condensed_nodes.get_mut(to) {
            entered.incoming.insert(source.clone());
        }
        incoming_by_target.entry(target).or_default().insert(source);
    }

    debug!(
        components = condensed_nodes.len(),
        edges = condensed.edge_count(),
        "condensation built"
    );

    Ok(Condensation {
        graph: condensed,
        components: condensed_nodes,
        mapping,
        incoming_by_target,
    })
}

#[cfg(test)]
mod tests {
    use petgraph::graph::DiGraph;
    use petgraph::graphmap::UnGraphMap;

    use super::*;
    use crate::error::GraphKind;

    fn digraph(
        nodes: &[&'static str],
        edges: &[(&'static str, &'static str)],
    ) -> DiGraphMap<&'static str, ()> {
        let mut graph = DiGraphMap::new();
        for &node in nodes {
            graph.add_node(node);
        }
        for &(from, to) in edges {
            graph.add_edge(from, to, ());
        }
        graph
    }

    fn condensed(graph: &DiGraphMap<&'static str, ()>) -> Condensation<&'static str> {
        condense(graph).expect("directed")
    }

    #[test]
    fn empty_graph_condenses_to_empty_graph() {
        let graph = digraph(&[], &[]);
        let c = condensed(&graph);

        assert!(c.is_empty());
        assert_eq!(c.edge_count(), 0);
        assert!(c.mapping().is_empty());
        assert!(c.incoming_by_target().is_empty());
    }

    #[test]
    fn cycle_plus_isolated_node() {
        let graph = digraph(&["A", "B", "C", "D"], &[("A", "B"), ("B", "C"), ("C", "A")]);
        let c = condensed(&graph);

        assert_eq!(c.node_count(), 2);
        assert_eq!(c.edge_count(), 0);

        let cycle = c.component_of(&"A").expect("A is mapped");
        assert_eq!(c.members(cycle), Some(&HashSet::from(["A", "B", "C"])));
        assert!(c.components()[cycle].is_cycle());

        let isolated = c.component_of(&"D").expect("D is mapped");
        assert_ne!(cycle, isolated);
        assert_eq!(c.members(isolated), Some(&HashSet::from(["D"])));
        assert!(c.incoming(cycle).is_some_and(HashSet::is_empty));
    }

    #[test]
    fn chain_is_isomorphic() {
        let graph = digraph(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let c = condensed(&graph);

        assert_eq!(c.node_count(), 3);
        assert_eq!(c.edge_count(), 2);
        let idx = |n: &'static str| c.component_of(&n).expect("node is mapped");
        assert!(c.contains_edge(idx("A"), idx("B")));
        assert!(c.contains_edge(idx("B"), idx("C")));
        assert!(!c.contains_edge(idx("A"), idx("C")));
    }

    #[test]
    fn node_range_and_edges_agree_with_backing_graph() {
        // {A, B} -> C -> D
        let graph = digraph(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("B", "A"), ("B", "C"), ("C", "D")],
        );
        let c = condensed(&graph);

        assert!(!c.is_empty());
        assert_eq!(c.nodes(), 0..c.node_count());
        assert_eq!(c.nodes().len(), c.graph().node_count());

        let mut edges: Vec<_> = c.edges().collect();
        edges.sort_unstable();
        let mut backing: Vec<_> = c.graph().all_edges().map(|(a, b, ())| (a, b)).collect();
        backing.sort_unstable();
        assert_eq!(edges, backing);
        assert_eq!(edges.len(), c.edge_count());
        for (from, to) in edges {
            assert!(c.nodes().contains(&from) && c.nodes().contains(&to));
        }
    }

    #[test]
    fn self_loop_condenses_to_single_node_without_edges() {
        let graph = digraph(&["A"], &[("A", "A")]);
        let c = condensed(&graph);

        assert_eq!(c.node_count(), 1);
        assert_eq!(c.edge_count(), 0);
        assert!(!c.contains_edge(0, 0));
    }

    #[test]
    fn parallel_crossings_collapse_to_one_edge() {
        // {A, B} cycle with both members pointing into C.
        let graph = digraph(
            &["A", "B", "C"],
            &[("A", "B"), ("B", "A"), ("A", "C"), ("B", "C")],
        );
        let c = condensed(&graph);

        assert_eq!(c.node_count(), 2);
        assert_eq!(c.edge_count(), 1);

        let sink = c.component_of(&"C").expect("C is mapped");
        assert_eq!(c.incoming(sink), Some(&HashSet::from(["A", "B"])));
    }

    #[test]
    fn incoming_by_target_is_keyed_by_original_target() {
        // A -> C and B -> D, where {C, D} is a cycle.
        let graph = digraph(
            &["A", "B", "C", "D"],
            &[("A", "C"), ("B", "D"), ("C", "D"), ("D", "C")],
        );
        let c = condensed(&graph);

        let by_target = c.incoming_by_target();
        assert_eq!(by_target.len(), 2);
        assert_eq!(by_target.get("C"), Some(&HashSet::from(["A"])));
        assert_eq!(by_target.get("D"), Some(&HashSet::from(["B"])));

        let cycle = c.component_of(&"C").expect("C is mapped");
        assert_eq!(c.incoming(cycle), Some(&HashSet::from(["A", "B"])));
    }

    #[test]
    fn external_partition_keeps_enumeration_order() {
        let graph = digraph(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let c = condense_with(&graph, [vec!["C"], vec!["A", "B"]])
            .expect("partition");

        assert_eq!(c.component_of(&"C"), Some(0));
        assert_eq!(c.component_of(&"A"), Some(1));
        assert_eq!(c.component_of(&"B"), Some(1));
        assert!(c.contains_edge(1, 0));
        assert_eq!(c.edges().collect::<Vec<_>>(), vec![(1, 0)]);
    }

    #[test]
    fn non_maximal_partition_is_accepted_and_may_cycle() {
        let graph = digraph(&["A", "B"], &[("A", "B"), ("B", "A")]);
        let c = condense_with(&graph, [["A"], ["B"]]).expect("partition");

        assert!(c.contains_edge(0, 1));
        assert!(c.contains_edge(1, 0));
    }

    #[test]
    fn duplicate_node_is_rejected() {
        let graph = digraph(&["A", "B"], &[("A", "B")]);
        let err = condense_with(&graph, [vec!["A"], vec!["B", "A"]]).err();

        let expected = PartitionError::DuplicateNode {
            node: "\"A\"".to_string(),
            first: 0,
            second: 1,
        };
        assert_eq!(err, Some(GraphError::InvalidPartition(expected)));
    }

    #[test]
    fn missing_node_is_rejected() {
        let graph = digraph(&["A", "B", "C"], &[]);
        let err = condense_with(&graph, [vec!["A"], vec!["C"]]).err();

        let expected = PartitionError::MissingNode {
            node: "\"B\"".to_string(),
        };
        assert_eq!(err, Some(GraphError::InvalidPartition(expected)));
    }

    #[test]
    fn unknown_node_is_rejected() {
        let graph = digraph(&["A"], &[]);
        let err = condense_with(&graph, [vec!["A", "Z"]]).err();

        let expected = PartitionError::UnknownNode {
            node: "\"Z\"".to_string(),
            component: 0,
        };
        assert_eq!(err, Some(GraphError::InvalidPartition(expected)));
    }

    #[test]
    fn empty_component_is_rejected() {
        let graph = digraph(&["A"], &[]);
        let err = condense_with(&graph, [vec!["A"], vec![]]).err();

        let expected = PartitionError::EmptyComponent { component: 1 };
        assert_eq!(err, Some(GraphError::InvalidPartition(expected)));
    }

    #[test]
    fn undirected_and_multigraph_inputs_are_rejected() {
        let undirected = UnGraphMap::<u32, ()>::from_edges([(1, 2)]);
        assert_eq!(
            condense(&undirected).err(),
            Some(GraphError::UnsupportedOperation {
                operation: "condense",
                kind: GraphKind::Undirected,
            })
        );

        let multi = DiGraph::<(), ()>::new();
        assert_eq!(
            condense_with(&multi, Vec::<Vec<_>>::new()).err(),
            Some(GraphError::UnsupportedOperation {
                operation: "condense",
                kind: GraphKind::Multigraph,
            })
        );
    }

    #[test]
    fn condensation_serializes_sorted_edges_and_members() {
        let graph = digraph(&["A", "B"], &[("A", "B")]);
        let c = condense_with(&graph, [["B"], ["A"]]).expect("partition");

        let json = serde_json::to_value(&c).expect("serializable");
        assert_eq!(json["edges"], serde_json::json!([[1, 0]]));
        assert_eq!(json["components"][0]["members"], serde_json::json!(["B"]));
        assert_eq!(json["components"][0]["incoming"], serde_json::json!(["A"]));
        assert_eq!(json["mapping"]["A"], serde_json::json!(1));
        assert_eq!(json["incoming_by_target"]["B"], serde_json::json!(["A"]));
    }
}
