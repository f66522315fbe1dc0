//! Unit tests for the CLI commands and report rendering.

use super::commands::{run_sweep, run_trial};
use super::{
    BatchArgs, Cli, CliError, Command, ExecutionSummary, StrategyArg, SweepCommand, TrialCommand,
    run_cli,
};

use std::io::{self, Write};

use clap::Parser;
use gnp_diameter_core::{SimulationError, SimulationErrorCode, SweepMode};
use rstest::{fixture, rstest};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

use gnp_diameter_test_support::tracing::RecordingLayer;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[fixture]
fn complete_batch() -> BatchArgs {
    BatchArgs {
        seed: 42,
        vertices: 10,
        probability: 1.0,
        trials: 5,
        workers: Some(2),
        strategy: StrategyArg::Pairwise,
    }
}

/// Writer that accepts `budget` writes and then fails.
struct FailingWriter {
    budget: usize,
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.budget == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        }
        self.budget -= 1;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn run_to_string(cli: Cli) -> Result<(ExecutionSummary, String), Box<dyn std::error::Error>> {
    let mut buffer = Vec::new();
    let summary = run_cli(cli, &mut buffer)?;
    Ok((summary, String::from_utf8(buffer)?))
}

fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli, &mut io::sink()) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

#[rstest]
fn clap_parses_sweep_positionals_in_order() -> TestResult {
    let cli = Cli::try_parse_from([
        "gnp-diameter",
        "sweep",
        "42",
        "10",
        "1.0",
        "5",
        "P",
        "0.1",
        "1.0",
        "--workers",
        "3",
    ])?;
    let Command::Sweep(sweep) = cli.command else {
        panic!("expected the sweep command");
    };
    assert_eq!(sweep.batch.seed, 42);
    assert_eq!(sweep.batch.vertices, 10);
    assert_eq!(sweep.batch.probability, 1.0);
    assert_eq!(sweep.batch.trials, 5);
    assert_eq!(sweep.batch.workers, Some(3));
    assert_eq!(sweep.batch.strategy, StrategyArg::Pairwise);
    assert_eq!(sweep.mode, SweepMode::EdgeProbability);
    assert_eq!(sweep.increment, 0.1);
    assert_eq!(sweep.stop, 1.0);
    Ok(())
}

#[rstest]
fn clap_parses_trial_with_strategy() -> TestResult {
    let cli = Cli::try_parse_from([
        "gnp-diameter",
        "trial",
        "7",
        "20",
        "0.3",
        "50",
        "--strategy",
        "source-sweep",
    ])?;
    let Command::Trial(trial) = cli.command else {
        panic!("expected the trial command");
    };
    assert_eq!(trial.batch.strategy, StrategyArg::SourceSweep);
    assert_eq!(trial.batch.workers, None);
    Ok(())
}

#[rstest]
#[case::unknown_mode(&["gnp-diameter", "sweep", "1", "5", "0.5", "3", "T", "1", "9"])]
#[case::missing_stop(&["gnp-diameter", "sweep", "1", "5", "0.5", "3", "V", "1"])]
#[case::negative_seed(&["gnp-diameter", "trial", "-1", "5", "0.5", "3"])]
#[case::unknown_strategy(&["gnp-diameter", "trial", "1", "5", "0.5", "3", "--strategy", "dfs"])]
fn clap_rejects_malformed_arguments(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}

#[rstest]
fn probability_sweep_of_complete_graphs_reports_unit_diameter(
    complete_batch: BatchArgs,
) -> TestResult {
    let cli = Cli {
        command: Command::Sweep(SweepCommand {
            batch: complete_batch,
            mode: SweepMode::EdgeProbability,
            increment: 0.1,
            stop: 1.0,
        }),
    };
    let (summary, report) = run_to_string(cli)?;
    assert_eq!(summary.batches.len(), 1);
    assert_eq!(
        report,
        "Vertices: 10   Edge Probability: 1   Trials: 5\n\
         Average Diameter: 1\n\
         Measured Trials: 5 of 5\n\
         Connected Trials: 5 of 5\n"
    );
    Ok(())
}

#[rstest]
fn vertex_sweep_reports_one_block_per_step(complete_batch: BatchArgs) -> TestResult {
    let cli = Cli {
        command: Command::Sweep(SweepCommand {
            batch: BatchArgs {
                vertices: 2,
                ..complete_batch
            },
            mode: SweepMode::VertexCount,
            increment: 1.0,
            stop: 5.0,
        }),
    };
    let (summary, report) = run_to_string(cli)?;
    assert_eq!(summary.batches.len(), 4);
    let headers: Vec<&str> = report
        .lines()
        .filter(|line| line.starts_with("Vertices:"))
        .collect();
    assert_eq!(
        headers,
        [
            "Vertices: 2   Edge Probability: 1   Trials: 5",
            "Vertices: 3   Edge Probability: 1   Trials: 5",
            "Vertices: 4   Edge Probability: 1   Trials: 5",
            "Vertices: 5   Edge Probability: 1   Trials: 5",
        ]
    );
    Ok(())
}

#[rstest]
fn edgeless_trial_reports_undefined_mean() -> TestResult {
    let cli = Cli {
        command: Command::Trial(TrialCommand {
            batch: BatchArgs {
                seed: 1,
                vertices: 5,
                probability: 0.0,
                trials: 3,
                workers: None,
                strategy: StrategyArg::SourceSweep,
            },
        }),
    };
    let (summary, report) = run_to_string(cli)?;
    assert_eq!(summary.batches[0].mean_diameter(), None);
    assert!(report.contains("Average Diameter: undefined (no reachable vertex pairs)\n"));
    assert!(report.contains("Measured Trials: 0 of 3\n"));
    Ok(())
}

#[rstest]
#[case::zero_vertices(0, 0.5, 3, SimulationErrorCode::InvalidVertexCount)]
#[case::probability_above_one(5, 1.5, 3, SimulationErrorCode::InvalidEdgeProbability)]
#[case::zero_trials(5, 0.5, 0, SimulationErrorCode::InvalidTrialCount)]
fn trial_rejects_invalid_parameters(
    #[case] vertices: usize,
    #[case] probability: f64,
    #[case] trials: u64,
    #[case] expected: SimulationErrorCode,
) {
    let cli = Cli {
        command: Command::Trial(TrialCommand {
            batch: BatchArgs {
                seed: 0,
                vertices,
                probability,
                trials,
                workers: None,
                strategy: StrategyArg::Pairwise,
            },
        }),
    };
    let err = run_cli_expecting_error(cli, "invalid parameters must fail");
    match err {
        CliError::Core(core) => assert_eq!(core.code(), expected),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
fn sweep_rejects_invalid_range_before_writing(complete_batch: BatchArgs) {
    let command = SweepCommand {
        batch: complete_batch,
        mode: SweepMode::VertexCount,
        increment: 1.0,
        stop: 3.0,
    };
    let mut buffer = Vec::new();
    let err = run_sweep(command, &mut buffer).expect_err("stop below start must fail");
    assert!(matches!(
        err,
        CliError::Core(SimulationError::InvalidSweepRange { .. })
    ));
    assert!(buffer.is_empty());
}

#[rstest]
fn sweep_rejects_zero_workers(complete_batch: BatchArgs) {
    let command = SweepCommand {
        batch: BatchArgs {
            workers: Some(0),
            ..complete_batch
        },
        mode: SweepMode::EdgeProbability,
        increment: 0.1,
        stop: 1.0,
    };
    let err = run_sweep(command, &mut io::sink()).expect_err("zero workers must fail");
    assert!(matches!(
        err,
        CliError::Core(SimulationError::InvalidWorkerCount { got: 0 })
    ));
}

#[rstest]
fn write_failures_abort_the_sweep(complete_batch: BatchArgs) {
    let command = SweepCommand {
        batch: BatchArgs {
            vertices: 2,
            ..complete_batch
        },
        mode: SweepMode::VertexCount,
        increment: 1.0,
        stop: 50.0,
    };
    let mut writer = FailingWriter { budget: 1 };
    let err = run_sweep(command, &mut writer).expect_err("broken output must fail");
    match err {
        CliError::Output { source } => assert_eq!(source.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
fn sweep_emits_tracing_fields(complete_batch: BatchArgs) -> TestResult {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let command = SweepCommand {
        batch: BatchArgs {
            strategy: StrategyArg::SourceSweep,
            ..complete_batch
        },
        mode: SweepMode::EdgeProbability,
        increment: 0.1,
        stop: 1.0,
    };

    let summary = tracing::subscriber::with_default(subscriber, || {
        run_sweep(command, &mut io::sink())
    })?;
    assert_eq!(summary.batches.len(), 1);

    let sweep_span = layer.span("cli.sweep").expect("cli.sweep span must exist");
    assert_eq!(sweep_span.field("seed"), Some("42"));
    assert_eq!(sweep_span.field("mode"), Some("P"));
    assert_eq!(sweep_span.field("strategy"), Some("source-sweep"));
    assert!(layer.span("core.sweep").is_some());
    assert_eq!(layer.span_count("core.run_trials"), 1);

    assert!(layer.events_at(Level::INFO).iter().any(|event| {
        event.message() == Some("sweep command completed") && event.field("steps") == Some("1")
    }));
    Ok(())
}

#[rstest]
fn run_cli_records_command_and_errors() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let cli = Cli {
        command: Command::Trial(TrialCommand {
            batch: BatchArgs {
                seed: 3,
                vertices: 4,
                probability: -0.5,
                trials: 2,
                workers: None,
                strategy: StrategyArg::Pairwise,
            },
        }),
    };

    let err = tracing::subscriber::with_default(subscriber, || run_cli(cli, &mut io::sink()))
        .expect_err("negative probability must fail");
    assert!(matches!(
        err,
        CliError::Core(SimulationError::InvalidEdgeProbability { .. })
    ));

    let run_span = layer.span("cli.run").expect("cli.run span must exist");
    assert_eq!(run_span.field("command"), Some("trial"));
    assert!(layer.span("cli.trial").is_some());
    assert!(!layer.events_at(Level::ERROR).is_empty());
}

#[rstest]
fn trial_matches_single_sweep_step(complete_batch: BatchArgs) -> TestResult {
    let batch = BatchArgs {
        probability: 0.35,
        ..complete_batch
    };
    let mut trial_report = Vec::new();
    let trial = run_trial(
        TrialCommand {
            batch: batch.clone(),
        },
        &mut trial_report,
    )?;
    let mut sweep_report = Vec::new();
    let sweep = run_sweep(
        SweepCommand {
            batch,
            mode: SweepMode::EdgeProbability,
            increment: 1.0,
            stop: 0.35,
        },
        &mut sweep_report,
    )?;
    assert_eq!(trial, sweep);
    assert_eq!(trial_report, sweep_report);
    Ok(())
}
