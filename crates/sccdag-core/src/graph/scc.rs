//! Strongly connected components via an iterative Tarjan/Nuutila search.
//!
//! # Algorithm
//!
//! Depth-first search simulated with an explicit stack of frames, so
//! arbitrarily deep graphs never touch the call stack. Each node gets a
//! preorder number when first discovered. When every successor of the top
//! node `v` has been discovered, `v` is finished:
//!
//! ```text
//! lowlink[v] = min(preorder[v],
//!                  lowlink[w]  for unfound successors w with preorder[w] > preorder[v],
//!                  preorder[w] for unfound successors w with preorder[w] <= preorder[v])
//! ```
//!
//! If `lowlink[v] == preorder[v]`, `v` roots a component made of `v` plus
//! every pending node discovered after it. Otherwise `v` waits on the
//! pending stack for its root.
//!
//! # Laziness
//!
//! [`StronglyConnectedComponents`] is a pull-based state machine: each call
//! to `next` runs the search only until one more component completes.
//! Dropping the iterator early releases all state, and a new call starts
//! from scratch.
//!
//! # Complexity
//!
//! O(V + E) time. Successor lists are collected once per node, when the node
//! is discovered, and scanned with a resumable cursor.

use std::collections::{HashMap, HashSet};
use std::iter::FusedIterator;

use tracing::{debug, instrument, trace};

use crate::error::{GraphError, GraphKind};
use crate::graph::host::HostGraph;

/// Reject graphs the decomposition is not defined for.
pub(crate) fn ensure_simple_directed<G: HostGraph>(
    graph: &G,
    operation: &'static str,
) -> Result<(), GraphError> {
    let kind = if !graph.is_directed() {
        GraphKind::Undirected
    } else if graph.allows_parallel_edges() {
        GraphKind::Multigraph
    } else {
        return Ok(());
    };

    debug!(operation, %kind, "rejecting graph");
    Err(GraphError::UnsupportedOperation { operation, kind })
}

/// Generate the strongly connected components of `graph`.
///
/// Returns a lazy iterator yielding one `HashSet` of node ids per component,
/// in the order their DFS roots finish. Roots are tried in
/// [`HostGraph::nodes`] order.
///
/// # Errors
///
/// Returns [`GraphError::UnsupportedOperation`] if `graph` is undirected or
/// its type permits parallel edges. The check runs here, before the
/// iterator exists.
#[instrument(skip(graph))]
pub fn strongly_connected_components<G: HostGraph>(
    graph: &G,
) -> Result<StronglyConnectedComponents<'_, G>, GraphError> {
    ensure_simple_directed(graph, "strongly_connected_components")?;
    Ok(StronglyConnectedComponents::new(graph))
}

/// Count the strongly connected components of `graph` without keeping them.
///
/// # Errors
///
/// Same preconditions as [`strongly_connected_components`].
#[instrument(skip(graph))]
pub fn number_strongly_connected_components<G: HostGraph>(
    graph: &G,
) -> Result<usize, GraphError> {
    ensure_simple_directed(graph, "number_strongly_connected_components")?;
    Ok(StronglyConnectedComponents::new(graph).count())
}

/// One simulated call-stack entry of the depth-first search.
struct Frame<N> {
    node: N,
    successors: Vec<N>,
    /// Index of the next successor to examine.
    cursor: usize,
}

/// Lazy iterator over the strongly connected components of a graph.
///
/// Created by [`strongly_connected_components`].
pub struct StronglyConnectedComponents<'g, G: HostGraph> {
    graph: &'g G,
    /// DFS start candidates, in host node order.
    roots: std::vec::IntoIter<G::NodeId>,
    preorder: HashMap<G::NodeId, usize>,
    lowlink: HashMap<G::NodeId, usize>,
    found: HashSet<G::NodeId>,
    /// Finished nodes still waiting for their component root (`scc_queue`).
    pending: Vec<G::NodeId>,
    stack: Vec<Frame<G::NodeId>>,
    counter: usize,
}

impl<'g, G: HostGraph> StronglyConnectedComponents<'g, G> {
    pub(crate) fn new(graph: &'g G) -> Self {
        let roots: Vec<G::NodeId> = graph.nodes().collect();
        Self {
            graph,
            preorder: HashMap::with_capacity(roots.len()),
            lowlink: HashMap::with_capacity(roots.len()),
            found: HashSet::with_capacity(roots.len()),
            roots: roots.into_iter(),
            pending: Vec::new(),
            stack: Vec::new(),
            counter: 0,
        }
    }

    /// Assign `node` the next preorder number and make it the top frame.
    fn discover(&mut self, node: G::NodeId) {
        self.counter += 1;
        self.preorder.insert(node.clone(), self.counter);
        let successors: Vec<G::NodeId> = self.graph.successors(&node).collect();
        self.stack.push(Frame {
            node,
            successors,
            cursor: 0,
        });
    }

    /// Advance the top frame's scan to its next undiscovered successor.
    fn next_undiscovered(&mut self) -> Option<G::NodeId> {
        let frame = self.stack.last_mut()?;
        while let Some(w) = frame.successors.get(frame.cursor) {
            frame.cursor += 1;
            if !self.preorder.contains_key(w) {
                return Some(w.clone());
            }
        }
        None
    }

    /// Pop the finished top frame. Returns its component if it is a root.
    ///
    /// Every successor of a finished node has a preorder number, and every
    /// unfound successor discovered after it is a finished descendant with a
    /// lowlink.
    fn finish(&mut self) -> Option<HashSet<G::NodeId>> {
        let frame = self.stack.pop()?;
        let node = frame.node;
        let &node_pre = self.preorder.get(&node)?;

        let mut low = node_pre;
        for w in frame.successors.iter().filter(|w| !self.found.contains(*w)) {
            let w_pre = self.preorder[w];
            let candidate = if w_pre > node_pre {
                self.lowlink[w]
            } else {
                w_pre
            };
            low = low.min(candidate);
        }
        self.lowlink.insert(node.clone(), low);

        if low != node_pre {
            self.pending.push(node);
            return None;
        }

        let mut component = HashSet::from([node]);
        while self
            .pending
            .last()
            .and_then(|tail| self.preorder.get(tail))
            .is_some_and(|&pre| pre > node_pre)
        {
            component.extend(self.pending.pop());
        }
        self.found.extend(component.iter().cloned());
        trace!(size = component.len(), "component complete");
        Some(component)
    }
}

impl<G: HostGraph> Iterator for StronglyConnectedComponents<'_, G> {
    type Item = HashSet<G::NodeId>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.stack.is_empty() {
                let source = self.roots.find(|node| !self.found.contains(node))?;
                self.discover(source);
            }

            if let Some(child) = self.next_undiscovered() {
                self.discover(child);
                continue;
            }

            if let Some(component) = self.finish() {
                return Some(component);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let active = usize::from(!self.stack.is_empty());
        let upper = self.roots.len() + self.stack.len() + self.pending.len();
        (active, Some(upper))
    }
}

impl<G: HostGraph> FusedIterator for StronglyConnectedComponents<'_, G> {}
