//! Deterministic graph fixtures for benchmarks.

use std::num::NonZeroUsize;

use gnp_diameter_core::{Graph, GraphParams};
use rand::{SeedableRng, rngs::SmallRng};

use crate::{error::BenchSetupError, params::DiameterBenchParams};

/// Samples `count` G(V, P) graphs from a single stream seeded with `seed`.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when `count` is zero and
/// [`BenchSetupError::Simulation`] when the parameters are invalid.
pub fn sample_graphs(
    params: &DiameterBenchParams,
    count: usize,
    seed: u64,
) -> Result<Vec<Graph>, BenchSetupError> {
    if count == 0 {
        return Err(BenchSetupError::ZeroValue {
            context: "graph count",
        });
    }
    let graph_params = GraphParams::new(params.vertex_count, params.edge_probability)?;
    let mut rng = SmallRng::seed_from_u64(seed);
    Ok((0..count)
        .map(|_| Graph::sample(&graph_params, &mut rng))
        .collect())
}

/// Builds the cycle over `vertex_count` vertices, the worst case for the
/// pairwise strategy among connected graphs of equal size.
///
/// # Errors
/// Returns [`BenchSetupError::Graph`] if an edge is rejected.
pub fn cycle(vertex_count: NonZeroUsize) -> Result<Graph, BenchSetupError> {
    let vertices = vertex_count.get();
    let mut graph = Graph::empty(vertex_count);
    for vertex in 1..vertices {
        graph.insert_edge(vertex - 1, vertex)?;
    }
    if vertices > 2 {
        graph.insert_edge(vertices - 1, 0)?;
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gnp_diameter_core::DiameterCalculator;
    use rstest::rstest;

    #[rstest]
    fn sample_graphs_is_reproducible() {
        let params = DiameterBenchParams {
            vertex_count: 24,
            edge_probability: 0.2,
        };
        let first = sample_graphs(&params, 3, 9).expect("parameters are valid");
        let second = sample_graphs(&params, 3, 9).expect("parameters are valid");
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[rstest]
    fn sample_graphs_rejects_zero_count() {
        let params = DiameterBenchParams {
            vertex_count: 4,
            edge_probability: 0.5,
        };
        let err = sample_graphs(&params, 0, 1).expect_err("zero graphs must be rejected");
        assert!(matches!(err, BenchSetupError::ZeroValue { .. }));
    }

    #[rstest]
    #[case(1, None)]
    #[case(2, Some(1))]
    #[case(3, Some(1))]
    #[case(8, Some(4))]
    #[case(9, Some(4))]
    fn cycle_diameter_is_half_the_length(
        #[case] vertices: usize,
        #[case] expected: Option<usize>,
    ) {
        let count = NonZeroUsize::new(vertices).expect("non-zero");
        let graph = cycle(count).expect("cycle edges are valid");
        let diameter = DiameterCalculator::default().measure(&graph);
        assert_eq!(diameter.longest(), expected);
        assert!(diameter.is_connected());
    }
}
