//! Seeded synthetic graphs for benchmarks.

use graphdelta_core::{DiGraph, VertexId};
use rand::{SeedableRng, rngs::SmallRng, seq::index};
use thiserror::Error;

/// Graph type produced by [`SyntheticGraph::generate`]. Vertex payloads are
/// the vertex ids and edge payloads are unit weights.
pub type BenchGraph = DiGraph<usize, u32>;

/// Configuration for a random graph with a fixed out-degree.
#[derive(Clone, Debug)]
pub struct SyntheticGraphConfig {
    /// Number of vertices.
    pub vertices: usize,
    /// Distinct non-loop out-neighbours per vertex.
    pub out_degree: usize,
    /// Seed for the target selection.
    pub seed: u64,
}

/// Errors raised while generating synthetic graphs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// The graph must contain at least one vertex.
    #[error("vertex count must be positive")]
    ZeroVertices,
    /// A vertex cannot have more distinct non-loop targets than exist.
    #[error("out-degree {out_degree} exceeds the {available} other vertices")]
    OutDegreeTooLarge {
        /// Requested out-degree.
        out_degree: usize,
        /// Vertices other than the source.
        available: usize,
    },
}

/// Generator for [`BenchGraph`] instances.
#[derive(Clone, Copy, Debug)]
pub struct SyntheticGraph;

impl SyntheticGraph {
    /// Builds a graph where each vertex points at `out_degree` distinct
    /// targets chosen uniformly without self-loops.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration cannot be realised.
    ///
    /// # Examples
    /// ```
    /// use graphdelta_benches::source::{SyntheticGraph, SyntheticGraphConfig};
    ///
    /// let graph = SyntheticGraph::generate(&SyntheticGraphConfig {
    ///     vertices: 10,
    ///     out_degree: 3,
    ///     seed: 1,
    /// })?;
    /// assert_eq!(graph.order(), 10);
    /// assert_eq!(graph.size(), 30);
    /// # Ok::<(), graphdelta_benches::source::SyntheticError>(())
    /// ```
    pub fn generate(config: &SyntheticGraphConfig) -> Result<BenchGraph, SyntheticError> {
        let available = config
            .vertices
            .checked_sub(1)
            .ok_or(SyntheticError::ZeroVertices)?;
        if config.out_degree > available {
            return Err(SyntheticError::OutDegreeTooLarge {
                out_degree: config.out_degree,
                available,
            });
        }

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut graph = BenchGraph::with_capacity(config.vertices);
        for id in 0..config.vertices {
            graph.add_vertex(id);
        }
        for source in 0..config.vertices {
            // Draw from the other vertices and shift past the source.
            for offset in index::sample(&mut rng, available, config.out_degree) {
                let target: VertexId = if offset >= source {
                    offset + 1
                } else {
                    offset
                };
                graph.add_edge(source, target, 1);
            }
        }
        Ok(graph)
    }
}
