//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` so that only the
//! Criterion entry points decide how to abort.

use crate::source::SyntheticError;
use graphdelta_core::DeltaError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic graph generation failed.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Delta configuration or generation failed.
    #[error("delta generation failed: {0}")]
    Delta(#[from] DeltaError),
}
