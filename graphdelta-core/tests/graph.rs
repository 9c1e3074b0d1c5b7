//! Scenario tests for the public graph and traversal API.

mod common;

use common::{graph_from_edges, scenario_graph};
use graphdelta_core::{BreadthFirst, breadth_first_search};
use rstest::rstest;

#[rstest]
fn scenario_traversal_and_removal() {
    let mut graph = scenario_graph();
    assert_eq!(breadth_first_search(&graph, 0), vec![0, 1, 2, 3]);

    assert!(graph.remove_vertex(2));
    assert!(!graph.has_vertex(2));
    assert_eq!(graph.order(), 5);
    assert!(!graph.has_edge(1, 2));
    assert_eq!(graph.out_degree(2), 0);
    assert_eq!(breadth_first_search(&graph, 0), vec![0, 1]);
}

#[rstest]
#[case::from_root(0, vec![0, 1, 2, 3])]
#[case::from_middle(2, vec![2, 3])]
#[case::from_leaf(3, vec![3])]
fn breadth_first_iterator_is_lazy(#[case] start: usize, #[case] expected: Vec<usize>) {
    let graph = graph_from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
    let mut walk = BreadthFirst::new(&graph, start);
    assert_eq!(walk.next(), Some(start));
    let rest: Vec<_> = walk.collect();
    assert_eq!(rest, expected[1..]);
}

#[rstest]
fn rendering_lists_payloads_and_edges() {
    let graph = graph_from_edges(2, &[(1, 0)]);
    assert_eq!(
        graph.to_string(),
        "Vertex 0: 0\n  Outgoing edges:\n  Incoming edges: (1, 0, 1)\n\
         Vertex 1: 1\n  Outgoing edges: (1, 0, 1)\n  Incoming edges:\n"
    );
}
