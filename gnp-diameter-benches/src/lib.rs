//! Benchmark support crate for gnp-diameter.
//!
//! Provides parameter types and deterministic graph fixtures used by the
//! Criterion benchmarks for diameter measurement and parallel trial batches.

pub mod error;
pub mod graphs;
pub mod params;
