//! Monte Carlo estimation of the average diameter of G(V, P) random graphs.
//!
//! A [`TrialRunner`] samples independent graphs on a worker pool, measures
//! each diameter with a [`DiameterCalculator`] and reduces the batch into a
//! [`TrialSummary`]. A [`SweepPlan`] repeats the batch while stepping either
//! the vertex count or the edge probability.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod diameter;
mod error;
mod graph;
mod params;
mod sweep;
mod trials;

#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{DEFAULT_TRIALS, TrialRunnerBuilder},
    diameter::{Diameter, DiameterCalculator, DiameterStrategy, SearchScratch},
    error::{GraphError, GraphErrorCode, Result, SimulationError, SimulationErrorCode},
    graph::Graph,
    params::{EdgeProbability, GraphParams},
    sweep::{SweepMode, SweepPlan, SweepStep},
    trials::{DiameterTally, TrialRunner, TrialSummary, mix_trial_seed},
};
