use graphdelta_core::DiGraph;

/// Builds a graph with `order` vertices (payload = id) and unit-weight edges.
#[must_use]
pub fn graph_from_edges(order: usize, edges: &[(usize, usize)]) -> DiGraph<usize, u32> {
    let mut graph = DiGraph::with_capacity(order);
    for id in 0..order {
        graph.add_vertex(id);
    }
    for &(u, v) in edges {
        graph.add_edge(u, v, 1);
    }
    graph
}

/// Six vertices, edges (0,1),(0,2),(1,2),(2,0),(2,3),(3,3).
#[must_use]
pub fn scenario_graph() -> DiGraph<usize, u32> {
    graph_from_edges(6, &[(0, 1), (0, 2), (1, 2), (2, 0), (2, 3), (3, 3)])
}
