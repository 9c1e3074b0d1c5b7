//! Breadth-first traversal over a [`DiGraph`].

use std::collections::VecDeque;

use crate::graph::{DiGraph, VertexId};

/// Single-use breadth-first walk yielding vertices in visitation order.
///
/// Neighbours are expanded in ascending id order, so the walk is
/// deterministic for a given graph.
///
/// # Examples
/// ```
/// use graphdelta_core::{BreadthFirst, DiGraph};
///
/// let mut graph: DiGraph<(), ()> = DiGraph::new();
/// for _ in 0..3 {
///     graph.add_vertex(());
/// }
/// graph.add_edge(0, 2, ());
/// graph.add_edge(2, 1, ());
/// let order: Vec<_> = BreadthFirst::new(&graph, 0).collect();
/// assert_eq!(order, vec![0, 2, 1]);
/// ```
#[derive(Debug)]
pub struct BreadthFirst<'a, V, E> {
    graph: &'a DiGraph<V, E>,
    visited: Vec<bool>,
    frontier: VecDeque<VertexId>,
}

impl<'a, V, E> BreadthFirst<'a, V, E> {
    /// Starts a walk at `start`; the walk is empty when `start` is not a
    /// valid vertex.
    #[must_use]
    pub fn new(graph: &'a DiGraph<V, E>, start: VertexId) -> Self {
        let mut visited = vec![false; graph.slot_count()];
        let mut frontier = VecDeque::new();
        if graph.has_vertex(start) {
            visited[start] = true;
            frontier.push_back(start);
        }
        Self {
            graph,
            visited,
            frontier,
        }
    }
}

impl<V, E> Iterator for BreadthFirst<'_, V, E> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.frontier.pop_front()?;
        let graph = self.graph;
        for v in graph.out_neighbours(u) {
            if let Some(seen) = self.visited.get_mut(v)
                && !*seen
            {
                *seen = true;
                self.frontier.push_back(v);
            }
        }
        Some(u)
    }
}

/// Collects the breadth-first visitation order starting at `start`.
#[must_use]
pub fn breadth_first_search<V, E>(graph: &DiGraph<V, E>, start: VertexId) -> Vec<VertexId> {
    BreadthFirst::new(graph, start).collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::test_utils::{graph_from_edges, scenario_graph};

    #[test]
    fn scenario_walk_skips_unreachable_and_self_loops() {
        let graph = scenario_graph();
        assert_eq!(breadth_first_search(&graph, 0), vec![0, 1, 2, 3]);
    }

    #[rstest]
    #[case::out_of_range(42)]
    #[case::isolated_reachable_only_itself(4)]
    fn start_vertex_bounds(#[case] start: usize) {
        let graph = scenario_graph();
        let order = breadth_first_search(&graph, start);
        if graph.has_vertex(start) {
            assert_eq!(order, vec![start]);
        } else {
            assert!(order.is_empty());
        }
    }

    #[test]
    fn tombstoned_start_yields_nothing() {
        let mut graph = scenario_graph();
        graph.remove_vertex(0);
        assert!(breadth_first_search(&graph, 0).is_empty());
    }

    #[test]
    fn walk_addresses_ids_beyond_order_after_removals() {
        let mut graph = graph_from_edges(5, &[(0, 4), (4, 3)]);
        graph.remove_vertex(1);
        graph.remove_vertex(2);
        assert_eq!(graph.order(), 3);
        assert_eq!(breadth_first_search(&graph, 0), vec![0, 4, 3]);
    }

    #[test]
    fn level_order_expands_ascending_neighbours() {
        let graph = graph_from_edges(6, &[(0, 3), (0, 1), (1, 5), (3, 2), (2, 4)]);
        assert_eq!(breadth_first_search(&graph, 0), vec![0, 1, 3, 5, 2, 4]);
    }
}
