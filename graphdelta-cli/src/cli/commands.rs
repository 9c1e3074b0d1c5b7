//! Command implementations and argument parsing for the graphdelta CLI.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use graphdelta_core::{
    ApplyReport, DeltaConfig, DeltaError, DeltaGenerator, GenerationReport, GraphDelta,
    PreferentialParams, VertexId, breadth_first_search,
};
use graphdelta_providers_mtx::{MtxError, MtxGraph, try_from_path};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_RATIO: f64 = 0.5;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "graphdelta",
    about = "Inspect Matrix-Market graphs and generate edge deltas."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Report the order and size of a graph.
    Stats(StatsCommand),
    /// Print the breadth-first visitation order from a start vertex.
    Bfs(BfsCommand),
    /// Generate and apply delta rounds against a graph.
    Delta(DeltaCommand),
}

/// Options accepted by the `stats` command.
#[derive(Debug, Args, Clone)]
pub struct StatsCommand {
    /// Path to a Matrix-Market coordinate file.
    pub path: PathBuf,
}

/// Options accepted by the `bfs` command.
#[derive(Debug, Args, Clone)]
pub struct BfsCommand {
    /// Path to a Matrix-Market coordinate file.
    pub path: PathBuf,

    /// 0-based id of the start vertex.
    ///
    /// Unlike the library traversal, which yields an empty walk for an
    /// absent start, the command fails with an unknown-vertex error.
    #[arg(long, default_value_t = 0)]
    pub start: VertexId,
}

/// Options accepted by the `delta` command.
#[derive(Debug, Args, Clone)]
pub struct DeltaCommand {
    /// Path to a Matrix-Market coordinate file.
    pub path: PathBuf,

    /// Sampling model.
    #[arg(long, value_enum, default_value_t = DeltaModel::Preferential)]
    pub model: DeltaModel,

    /// Number of changes requested per round.
    #[arg(long)]
    pub count: usize,

    /// Insertion share for the mixed models.
    #[arg(long, default_value_t = DEFAULT_RATIO)]
    pub ratio: f64,

    /// Baseline log-weight of the preferential models.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub alpha: f64,

    /// Degree sensitivity of the preferential models.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub beta: f64,

    /// Weight floor of the preferential models.
    #[arg(long, default_value_t = 0.0)]
    pub lambda: f64,

    /// Allow duplicate and no-op changes.
    #[arg(long)]
    pub loose: bool,

    /// Weight the source endpoint as well as the target.
    #[arg(long)]
    pub strict_preferential: bool,

    /// Seed for reproducible sampling.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of generate-and-apply rounds.
    #[arg(long, default_value_t = 1)]
    pub rounds: usize,

    /// Print every sampled change.
    #[arg(long)]
    pub print: bool,
}

/// Delta sampling models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DeltaModel {
    /// Uniform insertions and deletions split by `--ratio`.
    Uniform,
    /// Preferential insertions only.
    Attachment,
    /// Preferential deletions only.
    Detachment,
    /// Preferential insertions and deletions split by `--ratio`.
    Preferential,
}

impl DeltaModel {
    const fn label(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Attachment => "attachment",
            Self::Detachment => "detachment",
            Self::Preferential => "preferential",
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input graph could not be loaded.
    #[error("failed to load `{path}`: {source}")]
    Load {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying loader error.
        #[source]
        source: MtxError,
    },
    /// The requested start vertex does not exist.
    #[error("vertex {vertex} is not present in the graph")]
    UnknownVertex {
        /// Requested vertex id.
        vertex: VertexId,
    },
    /// Delta configuration or sampling failed.
    #[error(transparent)]
    Delta(#[from] DeltaError),
}

/// Order and size of a loaded graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    /// Number of valid vertices.
    pub order: usize,
    /// Number of edges.
    pub size: usize,
}

impl GraphStats {
    fn of(graph: &MtxGraph) -> Self {
        Self {
            order: graph.order(),
            size: graph.size(),
        }
    }
}

/// Outcome of one generate-and-apply round.
#[derive(Debug, Clone)]
pub struct RoundSummary {
    /// Requested versus sampled counts.
    pub generation: GenerationReport,
    /// Changes that took effect.
    pub applied: ApplyReport,
    /// The sampled delta, kept when `--print` is set.
    pub delta: Option<GraphDelta>,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum CommandOutput {
    /// Result of `stats`.
    Stats(GraphStats),
    /// Result of `bfs`.
    Bfs {
        /// Start vertex.
        start: VertexId,
        /// Vertices in visitation order.
        visited: Vec<VertexId>,
    },
    /// Result of `delta`.
    Delta {
        /// Per-round outcomes.
        rounds: Vec<RoundSummary>,
        /// Graph shape after the final round.
        stats: GraphStats,
    },
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, parameter validation or sampling fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use graphdelta_cli::cli::{Cli, Command, CommandOutput, StatsCommand, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "3 3 2\n1 2\n2 3\n")?;
/// let cli = Cli {
///     command: Command::Stats(StatsCommand {
///         path: file.path().to_path_buf(),
///     }),
/// };
/// let CommandOutput::Stats(stats) = run_cli(cli)? else {
///     unreachable!("stats returns stats");
/// };
/// assert_eq!((stats.order, stats.size), (3, 2));
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<CommandOutput, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Stats(command) => {
            span.record("command", field::display("stats"));
            run_stats(&command)
        }
        Command::Bfs(command) => {
            span.record("command", field::display("bfs"));
            run_bfs(&command)
        }
        Command::Delta(command) => {
            span.record("command", field::display("delta"));
            run_delta(&command)
        }
    }
}

pub(super) fn run_stats(command: &StatsCommand) -> Result<CommandOutput, CliError> {
    let graph = load_graph(&command.path)?;
    let stats = GraphStats::of(&graph);
    info!(order = stats.order, size = stats.size, "graph loaded");
    Ok(CommandOutput::Stats(stats))
}

pub(super) fn run_bfs(command: &BfsCommand) -> Result<CommandOutput, CliError> {
    let graph = load_graph(&command.path)?;
    if !graph.has_vertex(command.start) {
        return Err(CliError::UnknownVertex {
            vertex: command.start,
        });
    }
    let visited = breadth_first_search(&graph, command.start);
    info!(
        start = command.start,
        visited = visited.len(),
        "traversal completed"
    );
    Ok(CommandOutput::Bfs {
        start: command.start,
        visited,
    })
}

#[instrument(
    name = "cli.delta",
    err,
    skip(command),
    fields(model = command.model.label(), count = command.count, rounds = command.rounds),
)]
pub(super) fn run_delta(command: &DeltaCommand) -> Result<CommandOutput, CliError> {
    let config = delta_config(command)?;
    let mut graph = load_graph(&command.path)?;
    let mut generator = DeltaGenerator::new(config);

    let mut rounds = Vec::with_capacity(command.rounds);
    for round in 0..command.rounds {
        let generation = match command.model {
            DeltaModel::Uniform => generator.generate_mixed(&graph, command.ratio, command.count),
            DeltaModel::Attachment => {
                generator.generate_preferential_attachment(&graph, command.count)
            }
            DeltaModel::Detachment => {
                generator.generate_preferential_detachment(&graph, command.count)
            }
            DeltaModel::Preferential => {
                generator.generate_preferential_mixed(&graph, command.ratio, command.count)
            }
        }?;
        let applied = generator.apply_current_delta(&mut graph);
        info!(
            round,
            inserted = applied.inserted,
            removed = applied.removed,
            size = graph.size(),
            "delta round applied"
        );
        rounds.push(RoundSummary {
            generation,
            applied,
            delta: command.print.then(|| generator.take_delta()),
        });
    }

    Ok(CommandOutput::Delta {
        rounds,
        stats: GraphStats::of(&graph),
    })
}

pub(super) fn delta_config(command: &DeltaCommand) -> Result<DeltaConfig, CliError> {
    let params = PreferentialParams::new(command.alpha, command.beta, command.lambda)?;
    let config = DeltaConfig::new()
        .with_preferential(params)
        .with_strict_delta(!command.loose)
        .with_strict_preferential(command.strict_preferential);
    Ok(match command.seed {
        Some(seed) => config.with_rng_seed(seed),
        None => config,
    })
}

#[instrument(name = "cli.load", err, fields(path = %path.display()))]
pub(super) fn load_graph(path: &Path) -> Result<MtxGraph, CliError> {
    try_from_path(path).map_err(|source| CliError::Load {
        path: path.to_path_buf(),
        source,
    })
}

/// Renders `output` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::io::Cursor;
/// # use graphdelta_cli::cli::{CommandOutput, render_output};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let output = CommandOutput::Bfs {
///     start: 0,
///     visited: vec![0, 2, 1],
/// };
/// let mut buffer = Cursor::new(Vec::new());
/// render_output(&output, &mut buffer)?;
/// assert_eq!(buffer.into_inner(), b"start: 0\nvisited: 3\norder: 0 2 1\n");
/// # Ok(())
/// # }
/// ```
pub fn render_output(output: &CommandOutput, mut writer: impl Write) -> io::Result<()> {
    match output {
        CommandOutput::Stats(stats) => render_stats(stats, &mut writer),
        CommandOutput::Bfs { start, visited } => {
            writeln!(writer, "start: {start}")?;
            writeln!(writer, "visited: {}", visited.len())?;
            write!(writer, "order:")?;
            for vertex in visited {
                write!(writer, " {vertex}")?;
            }
            writeln!(writer)
        }
        CommandOutput::Delta { rounds, stats } => {
            for (index, round) in rounds.iter().enumerate() {
                let GenerationReport {
                    requested_insertions,
                    insertions,
                    requested_deletions,
                    deletions,
                } = round.generation;
                writeln!(
                    writer,
                    "round {index}: sampled +{insertions}/{requested_insertions} \
                     -{deletions}/{requested_deletions}, applied +{} -{}",
                    round.applied.inserted, round.applied.removed,
                )?;
                if let Some(delta) = &round.delta {
                    write!(writer, "{delta}")?;
                }
            }
            render_stats(stats, &mut writer)
        }
    }
}

fn render_stats(stats: &GraphStats, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "order: {}", stats.order)?;
    writeln!(writer, "size: {}", stats.size)
}
