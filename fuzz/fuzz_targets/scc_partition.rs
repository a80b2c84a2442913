#![no_main]

use std::collections::HashSet;

use libfuzzer_sys::fuzz_target;
use petgraph::graphmap::DiGraphMap;
use sccdag_core::{condense, strongly_connected_components};

// First byte is the node count, each following byte pair is an edge.
fuzz_target!(|data: &[u8]| {
    let Some((&count, rest)) = data.split_first() else {
        return;
    };
    let n = count % 64;
    if n == 0 {
        return;
    }

    let mut graph = DiGraphMap::<u8, ()>::new();
    for node in 0..n {
        graph.add_node(node);
    }
    for pair in rest.chunks_exact(2) {
        graph.add_edge(pair[0] % n, pair[1] % n, ());
    }

    let mut seen = HashSet::new();
    let Ok(components) = strongly_connected_components(&graph) else {
        panic!("DiGraphMap must be accepted");
    };
    for component in components {
        assert!(!component.is_empty());
        for node in component {
            assert!(seen.insert(node), "node {node} emitted twice");
        }
    }
    assert_eq!(seen.len(), graph.node_count());

    let Ok(dag) = condense(&graph) else {
        panic!("condensation of a DiGraphMap must succeed");
    };
    assert!(!petgraph::algo::is_cyclic_directed(dag.graph()));
});
