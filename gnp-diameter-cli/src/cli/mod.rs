//! Command-line interface orchestration for `gnp-diameter`.
//!
//! `sweep` runs one trial batch per value of the swept parameter and prints a
//! report block as each batch completes; `trial` runs a single batch.

mod commands;

pub use commands::{
    BatchArgs, Cli, CliError, Command, ExecutionSummary, StrategyArg, SweepCommand, TrialCommand,
    render_summary, run_cli,
};

#[cfg(test)]
mod tests;
