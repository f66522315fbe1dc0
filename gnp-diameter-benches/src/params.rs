//! Benchmark parameter types.
//!
//! Each type renders as a compact Criterion parameter label.

use std::fmt;

/// Parameters for a diameter measurement benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct DiameterBenchParams {
    /// Vertices per graph.
    pub vertex_count: usize,
    /// Edge probability used to sample each graph.
    pub edge_probability: f64,
}

impl fmt::Display for DiameterBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V={},P={}", self.vertex_count, self.edge_probability)
    }
}

/// Parameters for a trial batch benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct TrialBenchParams {
    /// Vertices per graph.
    pub vertex_count: usize,
    /// Trials per batch.
    pub trials: u64,
    /// Worker threads in the trial pool.
    pub workers: usize,
}

impl fmt::Display for TrialBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "V={},T={},workers={}",
            self.vertex_count, self.trials, self.workers,
        )
    }
}
