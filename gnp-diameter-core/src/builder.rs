//! Builder for configuring [`TrialRunner`] instances.
//!
//! Validates the trial count and worker count and starts the worker pool
//! before any graph is sampled.

use std::{num::NonZeroU64, sync::Arc};

use rayon::ThreadPoolBuilder;
use tracing::debug;

use crate::{DiameterStrategy, Result, error::SimulationError, trials::TrialRunner};

/// Trials per batch when none is configured.
pub const DEFAULT_TRIALS: u64 = 100;

/// Configures and constructs [`TrialRunner`] instances.
///
/// # Examples
/// ```
/// use gnp_diameter_core::{DiameterStrategy, TrialRunnerBuilder};
///
/// let runner = TrialRunnerBuilder::new()
///     .with_seed(7)
///     .with_trials(20)
///     .with_workers(3)
///     .with_strategy(DiameterStrategy::SourceSweep)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(runner.seed(), 7);
/// assert_eq!(runner.trials().get(), 20);
/// assert_eq!(runner.workers(), 3);
/// assert_eq!(runner.strategy(), DiameterStrategy::SourceSweep);
/// ```
#[derive(Debug, Clone)]
pub struct TrialRunnerBuilder {
    seed: u64,
    trials: u64,
    workers: Option<usize>,
    strategy: DiameterStrategy,
}

impl Default for TrialRunnerBuilder {
    fn default() -> Self {
        Self {
            seed: 0,
            trials: DEFAULT_TRIALS,
            workers: None,
            strategy: DiameterStrategy::default(),
        }
    }
}

impl TrialRunnerBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use gnp_diameter_core::{DiameterStrategy, TrialRunnerBuilder};
    ///
    /// let builder = TrialRunnerBuilder::new();
    /// assert_eq!(builder.seed(), 0);
    /// assert_eq!(builder.trials(), 100);
    /// assert_eq!(builder.workers(), None);
    /// assert_eq!(builder.strategy(), DiameterStrategy::PairwiseSearch);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base seed of every trial stream.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured base seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Sets the number of trials per batch.
    #[must_use]
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    /// Returns the configured number of trials.
    #[must_use]
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Fixes the number of worker threads. Without it the pool sizes itself
    /// to the available parallelism.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Returns the configured worker count, if any.
    #[must_use]
    pub fn workers(&self) -> Option<usize> {
        self.workers
    }

    /// Selects how diameters are measured.
    #[must_use]
    pub fn with_strategy(mut self, strategy: DiameterStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns the configured diameter strategy.
    #[must_use]
    pub fn strategy(&self) -> DiameterStrategy {
        self.strategy
    }

    /// Validates the configuration and starts the worker pool.
    ///
    /// # Errors
    /// Returns [`SimulationError::InvalidTrialCount`] for zero trials,
    /// [`SimulationError::InvalidWorkerCount`] for zero workers and
    /// [`SimulationError::ThreadPoolUnavailable`] when the pool cannot start.
    pub fn build(self) -> Result<TrialRunner> {
        let trials = NonZeroU64::new(self.trials)
            .ok_or(SimulationError::InvalidTrialCount { got: self.trials })?;
        let mut pool = ThreadPoolBuilder::new().thread_name(|index| format!("gnp-trial-{index}"));
        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err(SimulationError::InvalidWorkerCount { got: workers });
            }
            pool = pool.num_threads(workers);
        }
        let pool = pool
            .build()
            .map_err(|error| SimulationError::ThreadPoolUnavailable {
                message: Arc::from(error.to_string()),
            })?;
        debug!(
            workers = pool.current_num_threads(),
            trials = trials.get(),
            strategy = ?self.strategy,
            "trial worker pool started"
        );
        Ok(TrialRunner::new(self.seed, trials, self.strategy, pool))
    }
}
