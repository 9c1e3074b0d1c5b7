//! Uniform edge sampling.

use std::collections::HashSet;

use rand::Rng;

use crate::{
    delta::sampler::{Pair, PairKind, VertexSampler, sample_loose_pairs, sample_strict_pairs},
    graph::DiGraph,
};

/// Samples up to `count` pairs to insert, drawing both endpoints uniformly
/// from the valid vertices.
///
/// In strict mode every pair is distinct, absent from `graph` and not a
/// self-loop; the result is capped at the number of such pairs.
pub(crate) fn new_random_edges<V, E, R: Rng + ?Sized>(
    graph: &DiGraph<V, E>,
    count: usize,
    strict: bool,
    rng: &mut R,
) -> Vec<Pair> {
    let vertices = VertexSampler::uniform(graph);
    if strict {
        sample_strict_pairs(graph, &vertices, &vertices, PairKind::Absent, count, rng)
    } else {
        sample_loose_pairs(&vertices, &vertices, count, rng)
    }
}

/// Samples up to `count` distinct existing edges to delete.
///
/// A source is drawn uniformly among vertices that still have unchosen
/// out-edges, then one of its out-neighbours uniformly. When `count` covers
/// every edge the whole edge list is returned.
pub(crate) fn existing_random_edges<V, E, R: Rng + ?Sized>(
    graph: &DiGraph<V, E>,
    count: usize,
    rng: &mut R,
) -> Vec<Pair> {
    if count >= graph.size() {
        return graph.all_edges();
    }

    let mut sources: Vec<_> = graph
        .valid_vertices()
        .into_iter()
        .filter(|&u| graph.out_degree(u) > 0)
        .collect();
    let mut remaining: Vec<usize> = (0..graph.slot_count())
        .map(|u| graph.out_degree(u))
        .collect();
    let mut seen = HashSet::with_capacity(count);
    let mut pairs = Vec::with_capacity(count);

    while pairs.len() < count && !sources.is_empty() {
        let slot = rng.gen_range(0..sources.len());
        let source = sources[slot];
        let degree = graph.out_degree(source);
        let Some(target) = graph.out_neighbours(source).nth(rng.gen_range(0..degree)) else {
            continue;
        };
        if seen.insert((source, target)) {
            pairs.push((source, target));
            remaining[source] -= 1;
            if remaining[source] == 0 {
                sources.swap_remove(slot);
            }
        }
    }
    pairs
}
