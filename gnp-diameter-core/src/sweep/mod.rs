//! Parameter sweeps over vertex count or edge probability.
//!
//! A [`SweepPlan`] fixes one of the two graph parameters and walks the other
//! from its start value to a stop value in equal increments, running one trial
//! batch per value. Steps run strictly one after another; only the position in
//! the progression differs between them.

use std::{convert::Infallible, fmt, num::NonZeroUsize, str::FromStr, sync::Arc};

use tracing::{info, instrument};

use crate::{
    EdgeProbability, GraphParams, Result, TrialRunner, TrialSummary, error::SimulationError,
};

/// Slack, in units of the increment, when deciding whether the last step
/// still lies at or below the stop value.
const STEP_TOLERANCE: f64 = 1.0e-9;

/// Which graph parameter a sweep varies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SweepMode {
    /// Vary the vertex count, holding the edge probability fixed.
    VertexCount,
    /// Vary the edge probability, holding the vertex count fixed.
    EdgeProbability,
}

impl SweepMode {
    /// Short label, `V` or `P`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VertexCount => "V",
            Self::EdgeProbability => "P",
        }
    }

    /// Value of the swept parameter in `params`.
    #[must_use]
    pub fn value_of(self, params: &GraphParams) -> f64 {
        match self {
            Self::VertexCount => params.vertex_count().get() as f64,
            Self::EdgeProbability => params.edge_probability().get(),
        }
    }
}

impl fmt::Display for SweepMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses `V`/`P` case-insensitively, along with the spelled-out names.
///
/// # Examples
/// ```
/// use gnp_diameter_core::SweepMode;
///
/// assert_eq!("v".parse::<SweepMode>(), Ok(SweepMode::VertexCount));
/// assert_eq!("P".parse::<SweepMode>(), Ok(SweepMode::EdgeProbability));
/// assert!("x".parse::<SweepMode>().is_err());
/// ```
impl FromStr for SweepMode {
    type Err = SimulationError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "v" | "vertices" | "vertex-count" => Ok(Self::VertexCount),
            "p" | "probability" | "edge-probability" => Ok(Self::EdgeProbability),
            _ => Err(SimulationError::UnknownSweepMode {
                provided: Arc::from(raw),
            }),
        }
    }
}

/// Validated progression of graph parameters.
///
/// # Examples
/// ```
/// use gnp_diameter_core::{GraphParams, SweepMode, SweepPlan};
///
/// let base = GraphParams::new(2, 0.5).expect("valid");
/// let plan = SweepPlan::new(SweepMode::VertexCount, base, 1.0, 5.0).expect("valid sweep");
/// let vertices: Vec<usize> = plan.points().map(|p| p.vertex_count().get()).collect();
/// assert_eq!(vertices, [2, 3, 4, 5]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepPlan {
    mode: SweepMode,
    base: GraphParams,
    increment: f64,
    stop: f64,
    steps: u64,
}

impl SweepPlan {
    /// Validates a sweep starting from the swept parameter's value in `base`.
    ///
    /// # Errors
    /// - [`SimulationError::InvalidIncrement`] when `increment` is not finite
    ///   or not strictly positive.
    /// - [`SimulationError::InvalidSweepRange`] when `stop` is not finite,
    ///   lies below the start value, or exceeds 1 for probability sweeps.
    /// - [`SimulationError::FractionalVertexIncrement`] when a vertex-count
    ///   sweep would advance by a fraction of a vertex.
    pub fn new(mode: SweepMode, base: GraphParams, increment: f64, stop: f64) -> Result<Self> {
        if !increment.is_finite() || increment <= 0.0 {
            return Err(SimulationError::InvalidIncrement { got: increment });
        }
        let start = mode.value_of(&base);
        let invalid_range = |reason| SimulationError::InvalidSweepRange {
            start,
            stop,
            reason,
        };
        if !stop.is_finite() {
            return Err(invalid_range("stop must be finite"));
        }
        if stop < start {
            return Err(invalid_range("stop precedes start"));
        }
        match mode {
            SweepMode::VertexCount if increment.fract() != 0.0 => {
                return Err(SimulationError::FractionalVertexIncrement { got: increment });
            }
            SweepMode::EdgeProbability if stop > 1.0 => {
                return Err(invalid_range("edge probability cannot exceed 1"));
            }
            _ => {}
        }

        let span = (stop - start) / increment;
        let steps = ((span + STEP_TOLERANCE).floor() as u64).saturating_add(1);
        Ok(Self {
            mode,
            base,
            increment,
            stop,
            steps,
        })
    }

    /// Swept parameter.
    #[must_use]
    pub const fn mode(&self) -> SweepMode {
        self.mode
    }

    /// Parameters of the first step; the non-swept one is held fixed.
    #[must_use]
    pub const fn base(&self) -> GraphParams {
        self.base
    }

    /// Distance between consecutive values of the swept parameter.
    #[must_use]
    pub const fn increment(&self) -> f64 {
        self.increment
    }

    /// Inclusive upper bound of the swept parameter.
    #[must_use]
    pub const fn stop(&self) -> f64 {
        self.stop
    }

    /// Number of steps the sweep will run.
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Graph parameters of every step, in order.
    pub fn points(&self) -> impl Iterator<Item = GraphParams> + '_ {
        (0..self.steps).map(|step| self.point(step))
    }

    /// Parameters of step `step`, computed as `start + step × increment` so
    /// rounding errors do not accumulate along the sweep.
    fn point(&self, step: u64) -> GraphParams {
        match self.mode {
            SweepMode::VertexCount => {
                let stride = self.increment as usize;
                let offset = usize::try_from(step)
                    .unwrap_or(usize::MAX)
                    .saturating_mul(stride);
                let vertices: NonZeroUsize = self.base.vertex_count().saturating_add(offset);
                self.base.with_vertex_count(vertices)
            }
            SweepMode::EdgeProbability => {
                let start = self.base.edge_probability().get();
                let value = (step as f64).mul_add(self.increment, start).min(self.stop);
                self.base
                    .with_edge_probability(EdgeProbability::saturating(value))
            }
        }
    }

    /// Runs every step in order and hands each completed step to `on_step`.
    ///
    /// A step's batch completes, including its reduction, before `on_step`
    /// sees it and before the next step starts.
    ///
    /// # Errors
    /// Returns the first error produced by `on_step`; later steps do not run.
    #[instrument(
        name = "core.sweep",
        skip(self, runner, on_step),
        fields(
            mode = %self.mode,
            start = self.mode.value_of(&self.base),
            increment = self.increment,
            stop = self.stop,
            steps = self.steps,
        ),
    )]
    pub fn run<F, E>(&self, runner: &TrialRunner, mut on_step: F) -> core::result::Result<(), E>
    where
        F: FnMut(&SweepStep) -> core::result::Result<(), E>,
    {
        for (index, params) in (0..).zip(self.points()) {
            let step = SweepStep {
                index,
                mode: self.mode,
                summary: runner.run_trials(&params),
            };
            on_step(&step)?;
        }
        info!(steps = self.steps, "sweep completed");
        Ok(())
    }

    /// Runs every step and collects the results.
    #[must_use]
    pub fn collect(&self, runner: &TrialRunner) -> Vec<SweepStep> {
        let mut steps = Vec::new();
        let outcome = self.run(runner, |step| {
            steps.push(*step);
            Ok::<(), Infallible>(())
        });
        match outcome {
            Ok(()) => steps,
            Err(never) => match never {},
        }
    }
}

/// One completed step of a sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepStep {
    index: u64,
    mode: SweepMode,
    summary: TrialSummary,
}

impl SweepStep {
    /// Zero-based position in the sweep.
    #[must_use]
    pub const fn index(&self) -> u64 {
        self.index
    }

    /// Swept parameter.
    #[must_use]
    pub const fn mode(&self) -> SweepMode {
        self.mode
    }

    /// Value of the swept parameter at this step.
    #[must_use]
    pub fn swept_value(&self) -> f64 {
        self.mode.value_of(&self.summary.params())
    }

    /// Trial batch result.
    #[must_use]
    pub const fn summary(&self) -> &TrialSummary {
        &self.summary
    }
}
