//! Command implementations and argument parsing for the `gnp-diameter` CLI.

use std::io::{self, Write};

use clap::{Args, Parser, Subcommand, ValueEnum};
use gnp_diameter_core::{
    DiameterStrategy, GraphParams, SimulationError, SweepMode, SweepPlan, TrialRunner,
    TrialRunnerBuilder, TrialSummary,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "gnp-diameter",
    about = "Estimate the average diameter of G(V, P) random graphs."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run one trial batch per value of V or P, stepping up to a stop value.
    Sweep(SweepCommand),
    /// Run a single trial batch.
    Trial(TrialCommand),
}

/// Parameters shared by every command: the base seed, the graph parameters
/// and the trial count, followed by execution options.
#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    /// Base seed of the per-trial random streams.
    pub seed: u64,

    /// Number of vertices (at least 1).
    pub vertices: usize,

    /// Edge probability in [0, 1].
    pub probability: f64,

    /// Trials per parameter value (at least 1).
    pub trials: u64,

    /// Worker threads; defaults to the available parallelism.
    #[arg(long)]
    pub workers: Option<usize>,

    /// How diameters are measured. Both strategies produce identical results.
    #[arg(long, value_enum, default_value_t = StrategyArg::Pairwise)]
    pub strategy: StrategyArg,
}

/// Options accepted by the `sweep` command.
#[derive(Debug, Args, Clone)]
pub struct SweepCommand {
    /// Base seed, graph parameters, trial count and execution options.
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Parameter varied between batches: `V` or `P`.
    pub mode: SweepMode,

    /// Amount added to the swept parameter after each batch.
    pub increment: f64,

    /// Inclusive upper bound of the swept parameter.
    pub stop: f64,
}

/// Options accepted by the `trial` command.
#[derive(Debug, Args, Clone)]
pub struct TrialCommand {
    /// Base seed, graph parameters, trial count and execution options.
    #[command(flatten)]
    pub batch: BatchArgs,
}

/// Diameter strategies selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// One early-exit breadth-first search per ordered vertex pair.
    Pairwise,
    /// One full breadth-first search per start vertex.
    SourceSweep,
}

impl StrategyArg {
    const fn label(self) -> &'static str {
        match self {
            Self::Pairwise => "pairwise",
            Self::SourceSweep => "source-sweep",
        }
    }
}

impl From<StrategyArg> for DiameterStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Pairwise => Self::PairwiseSearch,
            StrategyArg::SourceSweep => Self::SourceSweep,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Parameter validation or runner construction failed.
    #[error(transparent)]
    Core(#[from] SimulationError),
    /// Writing the report failed.
    #[error("failed to write report: {source}")]
    Output {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    /// Batch results in the order they were reported.
    pub batches: Vec<TrialSummary>,
}

/// Executes the CLI command represented by `cli`, writing one report block
/// per completed batch to `writer` as soon as the batch finishes.
///
/// # Errors
/// Returns [`CliError::Core`] when the parameters are invalid, before any
/// trial runs, and [`CliError::Output`] when `writer` fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use gnp_diameter_cli::cli::{BatchArgs, Cli, Command, StrategyArg, TrialCommand, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli {
///     command: Command::Trial(TrialCommand {
///         batch: BatchArgs {
///             seed: 42,
///             vertices: 10,
///             probability: 1.0,
///             trials: 5,
///             workers: Some(2),
///             strategy: StrategyArg::Pairwise,
///         },
///     }),
/// };
/// let mut report = Vec::new();
/// let summary = run_cli(cli, &mut report)?;
/// assert_eq!(summary.batches[0].mean_diameter(), Some(1.0));
/// assert!(String::from_utf8(report)?.contains("Average Diameter: 1\n"));
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli, writer),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli, writer: &mut impl Write) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Sweep(sweep) => {
            Span::current().record("command", field::display("sweep"));
            run_sweep(sweep, writer)
        }
        Command::Trial(trial) => {
            Span::current().record("command", field::display("trial"));
            run_trial(trial, writer)
        }
    }
}

#[instrument(
    name = "cli.sweep",
    err,
    skip(command, writer),
    fields(
        seed = command.batch.seed,
        mode = %command.mode,
        increment = command.increment,
        stop = command.stop,
        strategy = command.batch.strategy.label(),
    ),
)]
pub(super) fn run_sweep(
    command: SweepCommand,
    writer: &mut impl Write,
) -> Result<ExecutionSummary, CliError> {
    let SweepCommand {
        batch,
        mode,
        increment,
        stop,
    } = command;
    let base = GraphParams::new(batch.vertices, batch.probability)?;
    let plan = SweepPlan::new(mode, base, increment, stop)?;
    let runner = build_runner(&batch)?;

    let mut batches = Vec::new();
    plan.run(&runner, |step| {
        render_summary(step.summary(), &mut *writer)
            .and_then(|()| writer.flush())
            .map_err(|source| CliError::Output { source })?;
        batches.push(*step.summary());
        Ok::<(), CliError>(())
    })?;

    info!(steps = batches.len(), "sweep command completed");
    Ok(ExecutionSummary { batches })
}

#[instrument(
    name = "cli.trial",
    err,
    skip(command, writer),
    fields(
        seed = command.batch.seed,
        strategy = command.batch.strategy.label(),
    ),
)]
pub(super) fn run_trial(
    command: TrialCommand,
    writer: &mut impl Write,
) -> Result<ExecutionSummary, CliError> {
    let TrialCommand { batch } = command;
    let params = GraphParams::new(batch.vertices, batch.probability)?;
    let runner = build_runner(&batch)?;

    let summary = runner.run_trials(&params);
    render_summary(&summary, &mut *writer).map_err(|source| CliError::Output { source })?;
    info!(
        measured = summary.measured_trials(),
        "trial command completed"
    );
    Ok(ExecutionSummary {
        batches: vec![summary],
    })
}

fn build_runner(batch: &BatchArgs) -> Result<TrialRunner, SimulationError> {
    let mut builder = TrialRunnerBuilder::new()
        .with_seed(batch.seed)
        .with_trials(batch.trials)
        .with_strategy(batch.strategy.into());
    if let Some(workers) = batch.workers {
        builder = builder.with_workers(workers);
    }
    builder.build()
}

/// Renders one batch result to `writer`.
///
/// An undefined mean, where no trial connected any pair of distinct vertices,
/// is spelled out rather than printed as `NaN`.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use gnp_diameter_cli::cli::render_summary;
/// # use gnp_diameter_core::{GraphParams, TrialRunnerBuilder};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let runner = TrialRunnerBuilder::new().with_seed(1).with_trials(3).build()?;
/// let summary = runner.run_trials(&GraphParams::new(5, 0.0)?);
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "Vertices: 5   Edge Probability: 0   Trials: 3\n\
///      Average Diameter: undefined (no reachable vertex pairs)\n\
///      Measured Trials: 0 of 3\n\
///      Connected Trials: 0 of 3\n",
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &TrialSummary, mut writer: impl Write) -> io::Result<()> {
    let params = summary.params();
    let trials = summary.trials();
    writeln!(
        writer,
        "Vertices: {}   Edge Probability: {}   Trials: {trials}",
        params.vertex_count(),
        params.edge_probability(),
    )?;
    match summary.mean_diameter() {
        Some(mean) => writeln!(writer, "Average Diameter: {mean}")?,
        None => writeln!(
            writer,
            "Average Diameter: undefined (no reachable vertex pairs)"
        )?,
    }
    writeln!(
        writer,
        "Measured Trials: {} of {trials}",
        summary.measured_trials()
    )?;
    writeln!(
        writer,
        "Connected Trials: {} of {trials}",
        summary.connected_trials()
    )
}
