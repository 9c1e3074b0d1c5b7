//! Benchmark parameter types, rendered as Criterion benchmark ids.

use std::fmt;

/// Parameters for a graph-shaped benchmark run.
#[derive(Clone, Debug)]
pub struct GraphBenchParams {
    /// Number of vertices in the synthetic graph.
    pub vertices: usize,
    /// Out-degree of every vertex.
    pub out_degree: usize,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},d={}", self.vertices, self.out_degree)
    }
}

/// Parameters for a delta generation benchmark run.
#[derive(Clone, Debug)]
pub struct DeltaBenchParams {
    /// Number of vertices in the synthetic graph.
    pub vertices: usize,
    /// Number of changes requested per generation.
    pub count: usize,
    /// Whether strict sampling was enabled.
    pub strict: bool,
}

impl fmt::Display for DeltaBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.strict { "strict" } else { "loose" };
        write!(f, "n={},k={},{mode}", self.vertices, self.count)
    }
}
