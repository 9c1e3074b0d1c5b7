//! The stateful delta generator.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{instrument, warn};

use crate::{
    delta::{
        GenerationReport, GraphDelta,
        params::{DeltaConfig, split_count},
        preferential::{preferential_attachment_edges, preferential_detachment_edges},
        sampler::Pair,
        uniform::{existing_random_edges, new_random_edges},
    },
    error::{DeltaError, Result},
    graph::DiGraph,
};

/// Samples [`GraphDelta`]s against a graph and keeps the most recent one.
///
/// Each `generate_*` call replaces the current delta. The graph is only
/// read while sampling; [`DeltaGenerator::apply_current_delta`] mutates it.
///
/// # Examples
/// ```
/// use graphdelta_core::{DeltaConfig, DeltaGenerator, DiGraph};
///
/// let mut graph: DiGraph<(), ()> = DiGraph::new();
/// for _ in 0..5 {
///     graph.add_vertex(());
/// }
/// let mut generator = DeltaGenerator::new(DeltaConfig::new().with_rng_seed(42));
/// let report = generator
///     .generate_preferential_attachment(&graph, 3)
///     .expect("weights must normalise");
/// assert_eq!(report.insertions, 3);
/// let applied = generator.apply_current_delta(&mut graph);
/// assert_eq!(applied.inserted, 3);
/// assert_eq!(graph.size(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct DeltaGenerator<R = SmallRng> {
    config: DeltaConfig,
    rng: R,
    delta: GraphDelta,
}

impl DeltaGenerator<SmallRng> {
    /// Creates a generator whose RNG is seeded from the configured seed, or
    /// from system entropy when none is set.
    #[must_use]
    pub fn new(config: DeltaConfig) -> Self {
        let rng = match config.rng_seed() {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> DeltaGenerator<R> {
    /// Creates a generator drawing from a caller-supplied RNG. The seed in
    /// `config` is ignored.
    #[must_use]
    pub fn with_rng(config: DeltaConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            delta: GraphDelta::new(),
        }
    }

    /// Returns the generator configuration.
    #[must_use]
    pub fn config(&self) -> &DeltaConfig {
        &self.config
    }

    /// Returns the most recently generated delta.
    #[must_use]
    pub fn delta(&self) -> &GraphDelta {
        &self.delta
    }

    /// Moves the current delta out, leaving an empty one behind.
    pub fn take_delta(&mut self) -> GraphDelta {
        std::mem::take(&mut self.delta)
    }

    /// Empties the current delta without touching any graph.
    pub fn clear_delta(&mut self) {
        self.delta.clear();
    }

    /// Applies the current delta to `graph`; see [`GraphDelta::apply`].
    pub fn apply_current_delta<V, E: Default>(
        &self,
        graph: &mut DiGraph<V, E>,
    ) -> crate::delta::ApplyReport {
        self.delta.apply(graph)
    }

    /// Samples a uniform delta with `insertion_ratio * count` (rounded down)
    /// insertions and the remainder as deletions.
    ///
    /// Insertions honour the `strict_delta` setting. Deletions are always
    /// distinct existing edges, and when the deletion share covers every
    /// edge the whole edge list is returned.
    ///
    /// # Errors
    /// Returns [`DeltaError::InvalidParameters`] when `insertion_ratio` is
    /// outside `[0, 1]` and [`DeltaError::NoVertices`] when changes are
    /// requested from a graph without valid vertices.
    #[instrument(
        name = "delta.generate_mixed",
        skip(self, graph),
        fields(order = graph.order(), size = graph.size(), strict = self.config.strict_delta()),
        err,
    )]
    pub fn generate_mixed<V, E>(
        &mut self,
        graph: &DiGraph<V, E>,
        insertion_ratio: f64,
        count: usize,
    ) -> Result<GenerationReport> {
        let (insert_count, delete_count) = split_count(insertion_ratio, count, "alpha")?;
        if count > 0 && graph.order() == 0 {
            return Err(DeltaError::NoVertices);
        }
        let insertions = new_random_edges(
            graph,
            insert_count,
            self.config.strict_delta(),
            &mut self.rng,
        );
        let deletions = existing_random_edges(graph, delete_count, &mut self.rng);
        Ok(self.record(insert_count, insertions, delete_count, deletions))
    }

    /// Samples `count` new edges whose targets are weighted by in-degree.
    ///
    /// With `strict_delta` the result stops at the number of distinct
    /// absent, non-loop pairs the weighted supports admit.
    ///
    /// # Errors
    /// Returns [`DeltaError::NoVertices`] for a graph without valid vertices
    /// and [`DeltaError::DegenerateDistribution`] when every weight is zero.
    #[instrument(
        name = "delta.generate_preferential_attachment",
        skip(self, graph),
        fields(order = graph.order(), size = graph.size()),
        err,
    )]
    pub fn generate_preferential_attachment<V, E>(
        &mut self,
        graph: &DiGraph<V, E>,
        count: usize,
    ) -> Result<GenerationReport> {
        let insertions = preferential_attachment_edges(graph, count, &self.config, &mut self.rng)?;
        Ok(self.record(count, insertions, 0, Vec::new()))
    }

    /// Samples `count` existing edges whose targets are weighted by
    /// in-degree, bounded by the current edge count in strict mode.
    ///
    /// # Errors
    /// As for [`DeltaGenerator::generate_preferential_attachment`].
    #[instrument(
        name = "delta.generate_preferential_detachment",
        skip(self, graph),
        fields(order = graph.order(), size = graph.size()),
        err,
    )]
    pub fn generate_preferential_detachment<V, E>(
        &mut self,
        graph: &DiGraph<V, E>,
        count: usize,
    ) -> Result<GenerationReport> {
        let deletions = preferential_detachment_edges(graph, count, &self.config, &mut self.rng)?;
        Ok(self.record(0, Vec::new(), count, deletions))
    }

    /// Samples `epsilon * count` (rounded down) preferential insertions and
    /// the remainder as preferential deletions against the same snapshot.
    ///
    /// # Errors
    /// Returns [`DeltaError::InvalidParameters`] when `epsilon` is outside
    /// `[0, 1]`, plus the errors of the attachment and detachment models.
    #[instrument(
        name = "delta.generate_preferential_mixed",
        skip(self, graph),
        fields(order = graph.order(), size = graph.size()),
        err,
    )]
    pub fn generate_preferential_mixed<V, E>(
        &mut self,
        graph: &DiGraph<V, E>,
        epsilon: f64,
        count: usize,
    ) -> Result<GenerationReport> {
        let (insert_count, delete_count) = split_count(epsilon, count, "epsilon")?;
        let insertions =
            preferential_attachment_edges(graph, insert_count, &self.config, &mut self.rng)?;
        let deletions =
            preferential_detachment_edges(graph, delete_count, &self.config, &mut self.rng)?;
        Ok(self.record(insert_count, insertions, delete_count, deletions))
    }

    fn record(
        &mut self,
        requested_insertions: usize,
        insertions: Vec<Pair>,
        requested_deletions: usize,
        deletions: Vec<Pair>,
    ) -> GenerationReport {
        let report = GenerationReport {
            requested_insertions,
            insertions: insertions.len(),
            requested_deletions,
            deletions: deletions.len(),
        };
        if report.is_truncated() {
            warn!(
                requested_insertions,
                insertions = report.insertions,
                requested_deletions,
                deletions = report.deletions,
                "delta request exceeds the distinct changes the graph admits"
            );
        }

        #[cfg(feature = "metrics")]
        {
            metrics::counter!("graphdelta_delta_insertions_total")
                .increment(report.insertions as u64);
            metrics::counter!("graphdelta_delta_deletions_total")
                .increment(report.deletions as u64);
            if report.is_truncated() {
                metrics::counter!("graphdelta_delta_truncated_total").increment(1);
            }
        }

        self.delta = GraphDelta::from_parts(insertions, deletions);
        report
    }
}
