//! Stochastic edge-change generation.
//!
//! A [`GraphDelta`] is a plan: a batch of edge insertions and deletions
//! sampled against a graph snapshot by [`DeltaGenerator`] and applied later
//! with [`GraphDelta::apply`]. The uniform model draws endpoints uniformly;
//! the preferential models weight endpoints by in-degree through
//! [`PreferentialParams`].

mod generator;
mod params;
mod preferential;
mod sampler;
mod uniform;

use std::fmt;

use tracing::{debug, instrument};

use crate::graph::{DiGraph, VertexId};

pub use self::{
    generator::DeltaGenerator,
    params::{DeltaConfig, PreferentialParams},
    sampler::preferential_probabilities,
};

/// A pending batch of edge insertions and deletions.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GraphDelta {
    insertions: Vec<(VertexId, VertexId)>,
    deletions: Vec<(VertexId, VertexId)>,
}

impl GraphDelta {
    /// Creates an empty delta.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a delta from explicit insertion and deletion lists.
    #[must_use]
    pub fn from_parts(
        insertions: Vec<(VertexId, VertexId)>,
        deletions: Vec<(VertexId, VertexId)>,
    ) -> Self {
        Self {
            insertions,
            deletions,
        }
    }

    /// Queued insertions in sampling order.
    #[must_use]
    pub fn insertions(&self) -> &[(VertexId, VertexId)] {
        &self.insertions
    }

    /// Queued deletions in sampling order.
    #[must_use]
    pub fn deletions(&self) -> &[(VertexId, VertexId)] {
        &self.deletions
    }

    /// Returns `true` when nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.insertions.is_empty() && self.deletions.is_empty()
    }

    /// Empties both sequences without touching any graph.
    pub fn clear(&mut self) {
        self.insertions.clear();
        self.deletions.clear();
    }

    /// Applies every insertion, then every deletion, to `graph`.
    ///
    /// Insertions go through [`DiGraph::add_edge`] with a default payload
    /// and deletions through [`DiGraph::remove_edge`], so pairs naming
    /// invalid vertices or absent edges are skipped. The report counts the
    /// changes that actually took effect.
    ///
    /// # Examples
    /// ```
    /// use graphdelta_core::{DiGraph, GraphDelta};
    ///
    /// let mut graph: DiGraph<(), u8> = DiGraph::new();
    /// for _ in 0..3 {
    ///     graph.add_vertex(());
    /// }
    /// graph.add_edge(0, 1, 1);
    /// let delta = GraphDelta::from_parts(vec![(1, 2)], vec![(0, 1), (2, 0)]);
    /// let report = delta.apply(&mut graph);
    /// assert_eq!((report.inserted, report.removed), (1, 1));
    /// assert_eq!(graph.all_edges(), vec![(1, 2)]);
    /// ```
    #[instrument(
        name = "delta.apply",
        skip_all,
        fields(insertions = self.insertions.len(), deletions = self.deletions.len()),
    )]
    pub fn apply<V, E: Default>(&self, graph: &mut DiGraph<V, E>) -> ApplyReport {
        let inserted = self
            .insertions
            .iter()
            .filter(|&&(u, v)| graph.add_edge(u, v, E::default()))
            .count();
        let removed = self
            .deletions
            .iter()
            .filter(|&&(u, v)| graph.remove_edge(u, v).is_some())
            .count();
        debug!(inserted, removed, order = graph.order(), size = graph.size(), "delta applied");
        ApplyReport { inserted, removed }
    }
}

impl fmt::Display for GraphDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (u, v) in &self.insertions {
            writeln!(f, "+ ({u}, {v})")?;
        }
        for (u, v) in &self.deletions {
            writeln!(f, "- ({u}, {v})")?;
        }
        Ok(())
    }
}

/// Outcome of [`GraphDelta::apply`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ApplyReport {
    /// Insertions that created a new edge.
    pub inserted: usize,
    /// Deletions that removed an existing edge.
    pub removed: usize,
}

/// Requested versus produced change counts for one generation call.
///
/// Strict sampling stops at the number of distinct acceptable pairs the
/// graph admits, so a request may be only partly satisfied.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GenerationReport {
    /// Insertions the caller asked for.
    pub requested_insertions: usize,
    /// Insertions actually sampled.
    pub insertions: usize,
    /// Deletions the caller asked for.
    pub requested_deletions: usize,
    /// Deletions actually sampled.
    pub deletions: usize,
}

impl GenerationReport {
    /// Returns `true` when fewer changes were produced than requested.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.insertions < self.requested_insertions || self.deletions < self.requested_deletions
    }
}
