//! Validated parameters for G(V, P) construction and trial batches.

use std::{fmt, num::NonZeroUsize};

use crate::{Result, error::SimulationError};

/// Probability that any unordered vertex pair is joined by an edge.
///
/// Always finite and inside `[0, 1]`.
///
/// # Examples
/// ```
/// use gnp_diameter_core::EdgeProbability;
///
/// let p = EdgeProbability::new(0.25).expect("0.25 is a probability");
/// assert_eq!(p.get(), 0.25);
/// assert!(EdgeProbability::new(1.5).is_err());
/// assert!(EdgeProbability::new(f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct EdgeProbability(f64);

impl EdgeProbability {
    /// Never connects two vertices.
    pub const ZERO: Self = Self(0.0);
    /// Always connects two vertices.
    pub const ONE: Self = Self(1.0);

    /// Validates `value` as a probability.
    ///
    /// # Errors
    /// Returns [`SimulationError::InvalidEdgeProbability`] when `value` is NaN
    /// or outside `[0, 1]`.
    pub fn new(value: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SimulationError::InvalidEdgeProbability { got: value })
        }
    }

    /// Clamps a finite `value` into `[0, 1]`.
    pub(crate) fn saturating(value: f64) -> Self {
        debug_assert!(value.is_finite());
        Self(value.clamp(0.0, 1.0))
    }

    /// Returns the raw probability.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for EdgeProbability {
    type Error = SimulationError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Display for EdgeProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Vertex count and edge probability of one random-graph configuration.
///
/// # Examples
/// ```
/// use gnp_diameter_core::GraphParams;
///
/// let params = GraphParams::new(10, 0.5).expect("parameters are valid");
/// assert_eq!(params.vertex_count().get(), 10);
/// assert_eq!(params.edge_probability().get(), 0.5);
/// assert_eq!(params.to_string(), "V=10 P=0.5");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphParams {
    vertex_count: NonZeroUsize,
    edge_probability: EdgeProbability,
}

impl GraphParams {
    /// Validates both parameters.
    ///
    /// # Errors
    /// Returns [`SimulationError::InvalidVertexCount`] when `vertex_count` is
    /// zero and [`SimulationError::InvalidEdgeProbability`] when
    /// `edge_probability` is not in `[0, 1]`.
    pub fn new(vertex_count: usize, edge_probability: f64) -> Result<Self> {
        let vertex_count = NonZeroUsize::new(vertex_count)
            .ok_or(SimulationError::InvalidVertexCount { got: vertex_count })?;
        let edge_probability = EdgeProbability::new(edge_probability)?;
        Ok(Self::from_parts(vertex_count, edge_probability))
    }

    /// Combines already-validated parts.
    #[must_use]
    pub const fn from_parts(vertex_count: NonZeroUsize, edge_probability: EdgeProbability) -> Self {
        Self {
            vertex_count,
            edge_probability,
        }
    }

    /// Number of vertices in every sampled graph.
    #[must_use]
    pub const fn vertex_count(&self) -> NonZeroUsize {
        self.vertex_count
    }

    /// Probability of each unordered pair being connected.
    #[must_use]
    pub const fn edge_probability(&self) -> EdgeProbability {
        self.edge_probability
    }

    /// Returns a copy with a different vertex count.
    #[must_use]
    pub const fn with_vertex_count(mut self, vertex_count: NonZeroUsize) -> Self {
        self.vertex_count = vertex_count;
        self
    }

    /// Returns a copy with a different edge probability.
    #[must_use]
    pub const fn with_edge_probability(mut self, edge_probability: EdgeProbability) -> Self {
        self.edge_probability = edge_probability;
        self
    }
}

impl fmt::Display for GraphParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V={} P={}", self.vertex_count, self.edge_probability)
    }
}
