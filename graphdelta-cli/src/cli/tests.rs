//! Unit tests for the CLI commands and output rendering.

use super::commands::{delta_config, run_delta};
use super::test_helpers::{
    SCENARIO_MTX, create_mtx_file, delta_command, render_to_string, run_cli_expecting_error,
    temp_dir,
};
use super::{
    BfsCommand, Cli, CliError, Command, CommandOutput, DeltaModel, GraphStats, StatsCommand,
    run_cli,
};

use clap::{CommandFactory, Parser};
use graphdelta_core::DeltaError;
use graphdelta_providers_mtx::MtxError;
use rstest::rstest;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

use graphdelta_test_support::tracing::RecordingLayer;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[rstest]
fn stats_reports_order_and_size() -> TestResult {
    let dir = temp_dir();
    let path = create_mtx_file(&dir, "scenario.mtx", SCENARIO_MTX)?;
    let output = run_cli(Cli {
        command: Command::Stats(StatsCommand { path }),
    })?;
    let CommandOutput::Stats(stats) = &output else {
        panic!("stats must return stats, got {output:?}");
    };
    assert_eq!(*stats, GraphStats { order: 6, size: 6 });
    assert_eq!(render_to_string(&output), "order: 6\nsize: 6\n");
    Ok(())
}

#[rstest]
#[case::root(0, "start: 0\nvisited: 4\norder: 0 1 2 3\n")]
#[case::self_loop(3, "start: 3\nvisited: 1\norder: 3\n")]
#[case::isolated(5, "start: 5\nvisited: 1\norder: 5\n")]
fn bfs_renders_visitation_order(#[case] start: usize, #[case] expected: &str) -> TestResult {
    let dir = temp_dir();
    let path = create_mtx_file(&dir, "scenario.mtx", SCENARIO_MTX)?;
    let output = run_cli(Cli {
        command: Command::Bfs(BfsCommand { path, start }),
    })?;
    assert_eq!(render_to_string(&output), expected);
    Ok(())
}

#[rstest]
fn bfs_rejects_unknown_start() -> TestResult {
    let dir = temp_dir();
    let path = create_mtx_file(&dir, "scenario.mtx", SCENARIO_MTX)?;
    let err = run_cli_expecting_error(
        Cli {
            command: Command::Bfs(BfsCommand { path, start: 6 }),
        },
        "start vertex 6 does not exist",
    );
    assert!(matches!(err, CliError::UnknownVertex { vertex: 6 }));
    Ok(())
}

#[rstest]
fn bfs_help_documents_unknown_start_failure() {
    let command = Cli::command();
    let start = command
        .find_subcommand("bfs")
        .and_then(|bfs| bfs.get_arguments().find(|arg| arg.get_id() == "start"))
        .expect("bfs must accept --start");
    let help = start
        .get_long_help()
        .map(ToString::to_string)
        .expect("--start must carry long help");
    assert!(help.contains("unknown-vertex error"), "help was {help:?}");
}

#[rstest]
fn missing_file_reports_path() {
    let dir = temp_dir();
    let path = dir.path().join("absent.mtx");
    let err = run_cli_expecting_error(
        Cli {
            command: Command::Stats(StatsCommand { path: path.clone() }),
        },
        "missing file must fail",
    );
    match err {
        CliError::Load {
            path: reported,
            source: MtxError::Io(_),
        } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
fn malformed_file_surfaces_loader_error() -> TestResult {
    let dir = temp_dir();
    let path = create_mtx_file(&dir, "broken.mtx", "3 3 1\n1 9\n")?;
    let err = run_cli_expecting_error(
        Cli {
            command: Command::Stats(StatsCommand { path }),
        },
        "out-of-range index must fail",
    );
    assert!(matches!(
        err,
        CliError::Load {
            source: MtxError::VertexOutOfRange { index: 9, .. },
            ..
        }
    ));
    Ok(())
}

#[rstest]
#[case::uniform(DeltaModel::Uniform, 2, 2)]
#[case::attachment(DeltaModel::Attachment, 4, 0)]
#[case::detachment(DeltaModel::Detachment, 0, 4)]
#[case::preferential(DeltaModel::Preferential, 2, 2)]
fn delta_models_split_requests(
    #[case] model: DeltaModel,
    #[case] insertions: usize,
    #[case] deletions: usize,
) -> TestResult {
    let dir = temp_dir();
    let path = create_mtx_file(&dir, "scenario.mtx", SCENARIO_MTX)?;
    let output = run_delta(&delta_command(path, model, 4))?;
    let CommandOutput::Delta { rounds, stats } = output else {
        panic!("delta must return rounds");
    };
    let [round] = rounds.as_slice() else {
        panic!("one round was requested");
    };
    assert_eq!(round.generation.insertions, insertions);
    assert_eq!(round.generation.deletions, deletions);
    assert_eq!(round.applied.inserted, insertions);
    assert_eq!(round.applied.removed, deletions);
    assert_eq!(stats.size, 6 + insertions - deletions);
    assert!(round.delta.is_none());
    Ok(())
}

#[rstest]
fn delta_rounds_accumulate_and_print() -> TestResult {
    let dir = temp_dir();
    let path = create_mtx_file(&dir, "scenario.mtx", SCENARIO_MTX)?;
    let mut command = delta_command(path, DeltaModel::Attachment, 3);
    command.rounds = 3;
    command.print = true;

    let output = run_delta(&command)?;
    let rendered = render_to_string(&output);

    assert_eq!(rendered.matches("+ (").count(), 9);
    assert!(rendered.starts_with("round 0: sampled +3/3 -0/0, applied +3 -0\n"));
    assert!(rendered.ends_with("order: 6\nsize: 15\n"));
    Ok(())
}

#[rstest]
fn seeded_delta_is_reproducible() -> TestResult {
    let dir = temp_dir();
    let path = create_mtx_file(&dir, "scenario.mtx", SCENARIO_MTX)?;
    let mut command = delta_command(path, DeltaModel::Preferential, 4);
    command.print = true;

    let first = render_to_string(&run_delta(&command)?);
    let second = render_to_string(&run_delta(&command)?);
    assert_eq!(first, second);
    Ok(())
}

#[rstest]
#[case::negative_lambda(0.0, 1.0, -1.0)]
#[case::infinite_alpha(f64::INFINITY, 1.0, 0.0)]
fn invalid_weighting_is_rejected(
    #[case] alpha: f64,
    #[case] beta: f64,
    #[case] lambda: f64,
) {
    let mut command = delta_command("unused.mtx".into(), DeltaModel::Attachment, 1);
    command.alpha = alpha;
    command.beta = beta;
    command.lambda = lambda;
    let err = delta_config(&command).expect_err("parameters must be validated");
    assert!(matches!(
        err,
        CliError::Delta(DeltaError::InvalidParameters { .. })
    ));
}

#[rstest]
fn degenerate_weights_fail_the_command() -> TestResult {
    let dir = temp_dir();
    let path = create_mtx_file(&dir, "scenario.mtx", SCENARIO_MTX)?;
    let mut command = delta_command(path, DeltaModel::Attachment, 1);
    command.lambda = 50.0;
    let err = run_delta(&command).expect_err("every weight is floored to zero");
    assert!(matches!(
        err,
        CliError::Delta(DeltaError::DegenerateDistribution { .. })
    ));
    Ok(())
}

#[rstest]
fn delta_config_maps_flags() {
    let mut command = delta_command("unused.mtx".into(), DeltaModel::Uniform, 1);
    command.loose = true;
    command.strict_preferential = true;
    command.seed = None;
    let config = delta_config(&command).expect("defaults are valid");
    assert!(!config.strict_delta());
    assert!(config.strict_preferential());
    assert_eq!(config.rng_seed(), None);
}

#[rstest]
fn cli_parses_delta_arguments() {
    let cli = Cli::try_parse_from([
        "graphdelta",
        "delta",
        "graph.mtx",
        "--model",
        "uniform",
        "--count",
        "10",
        "--ratio",
        "0.25",
        "--alpha",
        "-0.5",
        "--seed",
        "3",
        "--rounds",
        "2",
        "--print",
    ])
    .expect("arguments must parse");
    let Command::Delta(command) = cli.command else {
        panic!("delta subcommand expected");
    };
    assert_eq!(command.model, DeltaModel::Uniform);
    assert_eq!(command.count, 10);
    assert!((command.ratio - 0.25).abs() < f64::EPSILON);
    assert!((command.alpha + 0.5).abs() < f64::EPSILON);
    assert_eq!(command.seed, Some(3));
    assert_eq!(command.rounds, 2);
    assert!(command.print);
    assert!(!command.loose);
}

#[rstest]
#[case::unknown_model(&["graphdelta", "delta", "g.mtx", "--model", "random", "--count", "1"])]
#[case::missing_count(&["graphdelta", "delta", "g.mtx"])]
#[case::negative_start(&["graphdelta", "bfs", "g.mtx", "--start", "-1"])]
fn cli_rejects_invalid_arguments(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}

#[rstest]
fn delta_command_emits_tracing_fields() -> TestResult {
    let dir = temp_dir();
    let path = create_mtx_file(&dir, "scenario.mtx", SCENARIO_MTX)?;
    let command = delta_command(path, DeltaModel::Uniform, 2);
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || run_delta(&command))?;

    let spans = layer.spans();
    let delta_span = spans
        .iter()
        .find(|span| span.name == "cli.delta")
        .expect("cli.delta span must exist");
    assert_eq!(delta_span.fields.get("model"), Some(&"uniform".to_owned()));
    assert_eq!(delta_span.fields.get("count"), Some(&"2".to_owned()));
    let load_span = spans
        .iter()
        .find(|span| span.name == "cli.load")
        .expect("cli.load span must exist");
    assert!(
        load_span
            .fields
            .get("path")
            .is_some_and(|value| value.ends_with("scenario.mtx"))
    );

    let events = layer.events();
    assert!(events.iter().any(|event| {
        event.level == Level::INFO
            && event
                .fields
                .get("message")
                .is_some_and(|value| value == "delta round applied")
            && event.fields.get("round").is_some_and(|value| value == "0")
    }));
    Ok(())
}
