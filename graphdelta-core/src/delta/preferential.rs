//! In-degree-weighted edge sampling.

use rand::Rng;

use crate::{
    delta::{
        params::DeltaConfig,
        sampler::{Pair, PairKind, VertexSampler, sample_loose_pairs, sample_strict_pairs},
    },
    error::Result,
    graph::DiGraph,
};

/// Samples up to `count` new edges whose targets favour high in-degree.
pub(crate) fn preferential_attachment_edges<V, E, R: Rng + ?Sized>(
    graph: &DiGraph<V, E>,
    count: usize,
    config: &DeltaConfig,
    rng: &mut R,
) -> Result<Vec<Pair>> {
    preferential_edges(graph, count, config, PairKind::Absent, rng)
}

/// Samples up to `count` existing edges whose targets favour high in-degree.
pub(crate) fn preferential_detachment_edges<V, E, R: Rng + ?Sized>(
    graph: &DiGraph<V, E>,
    count: usize,
    config: &DeltaConfig,
    rng: &mut R,
) -> Result<Vec<Pair>> {
    preferential_edges(graph, count, config, PairKind::Present, rng)
}

fn preferential_edges<V, E, R: Rng + ?Sized>(
    graph: &DiGraph<V, E>,
    count: usize,
    config: &DeltaConfig,
    kind: PairKind,
    rng: &mut R,
) -> Result<Vec<Pair>> {
    let targets = VertexSampler::preferential(graph, config.preferential())?;
    let sources = if config.strict_preferential() {
        targets.clone()
    } else {
        VertexSampler::uniform(graph)
    };

    if config.strict_delta() {
        Ok(sample_strict_pairs(graph, &sources, &targets, kind, count, rng))
    } else {
        Ok(sample_loose_pairs(&sources, &targets, count, rng))
    }
}
