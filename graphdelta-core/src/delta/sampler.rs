//! Vertex samplers and the strict pair-sampling engine.
//!
//! Strict sampling computes, per source vertex, how many acceptable targets
//! remain. A source with no remaining candidates is redrawn instead of
//! looping on its target, and the total number of acceptable pairs caps the
//! request, so rejection loops always terminate.

use std::collections::HashSet;

use rand::{
    Rng,
    distributions::{Distribution, WeightedIndex},
    seq::SliceRandom,
};
use tracing::debug;

use crate::{
    delta::params::PreferentialParams,
    error::DeltaError,
    graph::{DiGraph, VertexId},
};

pub(crate) type Pair = (VertexId, VertexId);

#[derive(Clone, Debug)]
enum SamplerKind {
    Uniform,
    Weighted(WeightedIndex<f64>),
}

/// Draws vertex ids from either a uniform or a degree-weighted distribution.
#[derive(Clone, Debug)]
pub(crate) struct VertexSampler {
    vertices: Vec<VertexId>,
    support: Vec<bool>,
    support_len: usize,
    kind: SamplerKind,
}

impl VertexSampler {
    /// Uniform distribution over the valid vertices of `graph`.
    pub(crate) fn uniform<V, E>(graph: &DiGraph<V, E>) -> Self {
        let vertices = graph.valid_vertices();
        let mut support = vec![false; graph.slot_count()];
        for &vertex in &vertices {
            support[vertex] = true;
        }
        Self {
            support_len: vertices.len(),
            vertices,
            support,
            kind: SamplerKind::Uniform,
        }
    }

    /// In-degree-weighted distribution over the valid vertices of `graph`.
    pub(crate) fn preferential<V, E>(
        graph: &DiGraph<V, E>,
        params: &PreferentialParams,
    ) -> Result<Self, DeltaError> {
        let probabilities = preferential_probabilities(graph, params)?;
        let mut support = vec![false; graph.slot_count()];
        let mut support_len = 0;
        for &(vertex, probability) in &probabilities {
            if probability > 0.0 {
                support[vertex] = true;
                support_len += 1;
            }
        }
        let index = WeightedIndex::new(probabilities.iter().map(|&(_, p)| p)).map_err(|err| {
            DeltaError::Sampler {
                reason: err.to_string(),
            }
        })?;
        Ok(Self {
            vertices: probabilities.into_iter().map(|(vertex, _)| vertex).collect(),
            support,
            support_len,
            kind: SamplerKind::Weighted(index),
        })
    }

    pub(crate) fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<VertexId> {
        match &self.kind {
            SamplerKind::Uniform => self.vertices.choose(rng).copied(),
            SamplerKind::Weighted(index) => self.vertices.get(index.sample(rng)).copied(),
        }
    }

    /// Returns `true` when `vertex` has a positive selection probability.
    pub(crate) fn supports(&self, vertex: VertexId) -> bool {
        self.support.get(vertex).copied().unwrap_or(false)
    }

    pub(crate) fn support_len(&self) -> usize {
        self.support_len
    }

    fn support_iter(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices
            .iter()
            .copied()
            .filter(|&vertex| self.supports(vertex))
    }
}

/// Computes the normalised preferential selection probability of every valid
/// vertex, in ascending id order.
///
/// # Errors
/// Returns [`DeltaError::NoVertices`] when the graph has no valid vertices
/// and [`DeltaError::DegenerateDistribution`] when the clamped weights sum to
/// zero or overflow.
///
/// # Examples
/// ```
/// use graphdelta_core::{DiGraph, PreferentialParams, preferential_probabilities};
///
/// let mut graph: DiGraph<(), ()> = DiGraph::new();
/// for _ in 0..2 {
///     graph.add_vertex(());
/// }
/// graph.add_edge(0, 1, ());
/// let probabilities = preferential_probabilities(&graph, &PreferentialParams::default())
///     .expect("weights must normalise");
/// assert_eq!(probabilities.len(), 2);
/// assert!((probabilities[0].1 - 1.0 / 3.0).abs() < 1e-12);
/// assert!((probabilities[1].1 - 2.0 / 3.0).abs() < 1e-12);
/// ```
pub fn preferential_probabilities<V, E>(
    graph: &DiGraph<V, E>,
    params: &PreferentialParams,
) -> Result<Vec<(VertexId, f64)>, DeltaError> {
    let vertices = graph.valid_vertices();
    if vertices.is_empty() {
        return Err(DeltaError::NoVertices);
    }

    let weights: Vec<f64> = vertices
        .iter()
        .map(|&vertex| params.weight(graph.in_degree(vertex)))
        .collect();
    let total_weight: f64 = weights.iter().sum();
    if !(total_weight.is_finite() && total_weight > 0.0) {
        return Err(DeltaError::DegenerateDistribution {
            vertices: vertices.len(),
            total_weight,
        });
    }

    Ok(vertices
        .into_iter()
        .zip(weights)
        .map(|(vertex, weight)| (vertex, weight / total_weight))
        .collect())
}

/// Whether a strict pair must be absent from or present in the graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PairKind {
    /// New edges; self-loops are excluded.
    Absent,
    /// Existing edges.
    Present,
}

impl PairKind {
    fn accepts<V, E>(self, graph: &DiGraph<V, E>, source: VertexId, target: VertexId) -> bool {
        match self {
            Self::Absent => source != target && !graph.has_edge(source, target),
            Self::Present => graph.has_edge(source, target),
        }
    }
}

/// Draws `count` pairs independently with no existence or duplicate checks.
pub(crate) fn sample_loose_pairs<R: Rng + ?Sized>(
    sources: &VertexSampler,
    targets: &VertexSampler,
    count: usize,
    rng: &mut R,
) -> Vec<Pair> {
    let mut pairs = Vec::with_capacity(count);
    for _ in 0..count {
        let (Some(source), Some(target)) = (sources.sample(rng), targets.sample(rng)) else {
            break;
        };
        pairs.push((source, target));
    }
    pairs
}

/// Draws up to `count` distinct pairs that satisfy `kind` against `graph`.
///
/// The result is capped at the number of acceptable pairs reachable through
/// the two samplers' supports.
pub(crate) fn sample_strict_pairs<V, E, R: Rng + ?Sized>(
    graph: &DiGraph<V, E>,
    sources: &VertexSampler,
    targets: &VertexSampler,
    kind: PairKind,
    count: usize,
    rng: &mut R,
) -> Vec<Pair> {
    let mut remaining = candidate_counts(graph, sources, targets, kind);
    let reachable: usize = remaining.iter().sum();
    let limit = count.min(reachable);
    debug!(requested = count, reachable, ?kind, "strict pair sampling");

    let mut pairs = Vec::with_capacity(limit);
    let mut seen = HashSet::with_capacity(limit);
    while pairs.len() < limit {
        let Some(source) = sources.sample(rng) else {
            break;
        };
        let Some(slot) = remaining.get_mut(source).filter(|slot| **slot > 0) else {
            continue;
        };
        // The source still has an acceptable target with positive mass.
        loop {
            let Some(target) = targets.sample(rng) else {
                return pairs;
            };
            let pair = (source, target);
            if kind.accepts(graph, source, target) && seen.insert(pair) {
                pairs.push(pair);
                *slot -= 1;
                break;
            }
        }
    }
    pairs
}

/// Counts the acceptable targets of every supported source, indexed by id.
fn candidate_counts<V, E>(
    graph: &DiGraph<V, E>,
    sources: &VertexSampler,
    targets: &VertexSampler,
    kind: PairKind,
) -> Vec<usize> {
    let mut counts = vec![0; graph.slot_count()];
    for source in sources.support_iter() {
        let linked = graph
            .out_neighbours(source)
            .filter(|&target| targets.supports(target))
            .filter(|&target| kind == PairKind::Present || target != source)
            .count();
        counts[source] = match kind {
            PairKind::Present => linked,
            PairKind::Absent => {
                let own = usize::from(targets.supports(source));
                targets.support_len() - own - linked
            }
        };
    }
    counts
}
