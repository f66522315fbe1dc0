//! Parallel Monte Carlo trials for one parameter value.
//!
//! Each trial samples a fresh G(V, P) graph from its own random stream and
//! measures its diameter. Trials run on a dedicated Rayon pool; every Rayon
//! split folds its trials into a private [`DiameterTally`] and the tallies are
//! summed once the whole batch has finished.

mod seed;

use std::{
    num::{NonZeroU64, NonZeroUsize},
    sync::Arc,
};

use rayon::{ThreadPool, prelude::*};
use tracing::{info, instrument, trace};

use crate::{
    Diameter, DiameterCalculator, DiameterStrategy, Graph, GraphParams,
    builder::TrialRunnerBuilder,
};

pub use self::seed::mix_trial_seed;
use self::seed::trial_rng;

/// Runs batches of independent trials on a fixed worker pool.
///
/// Built via [`TrialRunnerBuilder`]. Cloning is cheap and shares the pool.
///
/// # Examples
/// ```
/// use gnp_diameter_core::{GraphParams, TrialRunnerBuilder};
///
/// let runner = TrialRunnerBuilder::new()
///     .with_seed(42)
///     .with_trials(5)
///     .with_workers(2)
///     .build()
///     .expect("configuration is valid");
/// let summary = runner.run_trials(&GraphParams::new(10, 1.0).expect("valid"));
/// assert_eq!(summary.mean_diameter(), Some(1.0));
/// ```
#[derive(Clone, Debug)]
pub struct TrialRunner {
    seed: u64,
    trials: NonZeroU64,
    strategy: DiameterStrategy,
    pool: Arc<ThreadPool>,
}

impl TrialRunner {
    pub(crate) fn new(
        seed: u64,
        trials: NonZeroU64,
        strategy: DiameterStrategy,
        pool: ThreadPool,
    ) -> Self {
        Self {
            seed,
            trials,
            strategy,
            pool: Arc::new(pool),
        }
    }

    /// Returns a builder with default settings.
    #[must_use]
    pub fn builder() -> TrialRunnerBuilder {
        TrialRunnerBuilder::new()
    }

    /// Base seed from which every trial stream is derived.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Trials per batch.
    #[must_use]
    pub const fn trials(&self) -> NonZeroU64 {
        self.trials
    }

    /// Diameter strategy used by every trial.
    #[must_use]
    pub const fn strategy(&self) -> DiameterStrategy {
        self.strategy
    }

    /// Number of worker threads in the pool.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Runs trial `trial_index` alone on the calling thread.
    ///
    /// Produces exactly the diameter that the same trial contributes to
    /// [`TrialRunner::run_trials`].
    #[must_use]
    pub fn run_trial(&self, params: &GraphParams, trial_index: u64) -> Diameter {
        let graph = self.sample_graph(params, trial_index);
        trace!(trial = trial_index, graph = %graph, "sampled trial graph");
        DiameterCalculator::new(self.strategy).measure(&graph)
    }

    /// Samples the graph of trial `trial_index`.
    #[must_use]
    pub fn sample_graph(&self, params: &GraphParams, trial_index: u64) -> Graph {
        Graph::sample(params, &mut trial_rng(self.seed, trial_index))
    }

    /// Runs every trial of one batch and reduces the diameters.
    ///
    /// Blocks until all trials have finished. The summary only depends on the
    /// seed, the trial count, the strategy and `params`, never on the pool
    /// size or scheduling.
    #[instrument(
        name = "core.run_trials",
        skip(self, params),
        fields(
            vertices = params.vertex_count().get(),
            probability = params.edge_probability().get(),
            trials = self.trials.get(),
            workers = self.workers(),
        ),
    )]
    pub fn run_trials(&self, params: &GraphParams) -> TrialSummary {
        let strategy = self.strategy;
        let seed = self.seed;
        let tally = self.pool.install(|| {
            (0..self.trials.get())
                .into_par_iter()
                .map_init(
                    || DiameterCalculator::new(strategy),
                    |calculator, trial_index| {
                        let graph = Graph::sample(params, &mut trial_rng(seed, trial_index));
                        calculator.measure(&graph)
                    },
                )
                .fold(DiameterTally::default, DiameterTally::record)
                .reduce(DiameterTally::default, DiameterTally::merge)
        });

        let summary = TrialSummary::new(*params, self.trials, tally);
        info!(
            measured = summary.measured_trials(),
            connected = summary.connected_trials(),
            mean_diameter = summary.mean_diameter(),
            "trial batch completed"
        );
        summary
    }
}

/// Partial reduction over some trials of a batch.
///
/// Only integers are accumulated, so merging tallies in any grouping or order
/// yields the same total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiameterTally {
    trials: u64,
    measured: u64,
    connected: u64,
    diameter_sum: u64,
    longest: Option<usize>,
}

impl DiameterTally {
    /// Adds one trial's diameter.
    #[must_use]
    pub fn record(mut self, diameter: Diameter) -> Self {
        self.trials += 1;
        if diameter.is_connected() {
            self.connected += 1;
        }
        if let Some(longest) = diameter.longest() {
            self.measured += 1;
            self.diameter_sum += longest as u64;
            self.longest = Some(self.longest.map_or(longest, |best| best.max(longest)));
        }
        self
    }

    /// Combines two disjoint partial tallies.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            trials: self.trials + other.trials,
            measured: self.measured + other.measured,
            connected: self.connected + other.connected,
            diameter_sum: self.diameter_sum + other.diameter_sum,
            longest: match (self.longest, other.longest) {
                (Some(left), Some(right)) => Some(left.max(right)),
                (left, right) => left.or(right),
            },
        }
    }

    /// Trials folded into this tally.
    #[must_use]
    pub const fn trials(&self) -> u64 {
        self.trials
    }
}

/// Outcome of one trial batch.
///
/// Trials whose graph has no finite diameter (no two distinct vertices are
/// connected) are counted but left out of the mean; see
/// [`TrialSummary::mean_diameter`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrialSummary {
    params: GraphParams,
    trials: NonZeroU64,
    measured_trials: u64,
    connected_trials: u64,
    diameter_sum: u64,
    longest: Option<usize>,
}

impl TrialSummary {
    fn new(params: GraphParams, trials: NonZeroU64, tally: DiameterTally) -> Self {
        debug_assert_eq!(tally.trials, trials.get());
        Self {
            params,
            trials,
            measured_trials: tally.measured,
            connected_trials: tally.connected,
            diameter_sum: tally.diameter_sum,
            longest: tally.longest,
        }
    }

    /// Graph parameters of the batch.
    #[must_use]
    pub const fn params(&self) -> GraphParams {
        self.params
    }

    /// Number of trials run.
    #[must_use]
    pub const fn trials(&self) -> NonZeroU64 {
        self.trials
    }

    /// Trials whose graph had a finite diameter.
    #[must_use]
    pub const fn measured_trials(&self) -> u64 {
        self.measured_trials
    }

    /// Trials whose graph was connected.
    #[must_use]
    pub const fn connected_trials(&self) -> u64 {
        self.connected_trials
    }

    /// Sum of the finite diameters.
    #[must_use]
    pub const fn diameter_sum(&self) -> u64 {
        self.diameter_sum
    }

    /// Largest diameter seen in the batch.
    #[must_use]
    pub const fn longest(&self) -> Option<usize> {
        self.longest
    }

    /// Mean diameter over the measured trials, or `None` when no trial had a
    /// finite diameter.
    ///
    /// When every trial is measured this is the plain mean over all trials.
    #[must_use]
    pub fn mean_diameter(&self) -> Option<f64> {
        NonZeroU64::new(self.measured_trials)
            .map(|measured| self.diameter_sum as f64 / measured.get() as f64)
    }

    /// Vertex count, as a convenience for reports.
    #[must_use]
    pub const fn vertex_count(&self) -> NonZeroUsize {
        self.params.vertex_count()
    }
}

#[cfg(test)]
mod tests;
