//! Command-line interface orchestration for graphdelta.
//!
//! Every command loads a Matrix-Market coordinate file. `stats` reports the
//! graph shape, `bfs` prints a breadth-first visitation order and `delta`
//! runs generate-and-apply rounds under one of the sampling models.

mod commands;

pub use commands::{
    BfsCommand, Cli, CliError, Command, CommandOutput, DeltaCommand, DeltaModel, GraphStats,
    RoundSummary, StatsCommand, render_output, run_cli,
};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
