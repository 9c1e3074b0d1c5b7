//! Shared test utilities for `graphdelta-core`.

use graphdelta_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::DiGraph;

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `GRAPHDELTA_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Builds a graph with `order` vertices (payload = id) and the given edges,
/// each carrying payload `1`.
#[must_use]
pub(crate) fn graph_from_edges(order: usize, edges: &[(usize, usize)]) -> DiGraph<usize, u32> {
    let mut graph = DiGraph::new();
    for id in 0..order {
        graph.add_vertex(id);
    }
    for &(source, target) in edges {
        graph.add_edge(source, target, 1);
    }
    graph
}

/// The six-vertex scenario graph: edges (0,1),(0,2),(1,2),(2,0),(2,3),(3,3).
#[must_use]
pub(crate) fn scenario_graph() -> DiGraph<usize, u32> {
    graph_from_edges(6, &[(0, 1), (0, 2), (1, 2), (2, 0), (2, 3), (3, 3)])
}
