//! Shared test utilities for `gnp-diameter-core`.

use std::num::NonZeroUsize;

use gnp_diameter_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::Graph;

/// Builds a proptest configuration from the shared CI profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Largest vertex count property strategies should generate.
#[must_use]
pub(crate) fn suite_max_vertices(default_max: usize) -> usize {
    ProptestRunProfile::load(1, false)
        .with_default_max_vertices(default_max)
        .max_vertices()
}

/// Builds a graph from an explicit edge list, panicking on invalid input.
#[must_use]
pub(crate) fn graph_from_edges(vertex_count: usize, edges: &[(usize, usize)]) -> Graph {
    let Some(vertices) = NonZeroUsize::new(vertex_count) else {
        panic!("test graphs need at least one vertex");
    };
    let mut graph = Graph::empty(vertices);
    for &(a, b) in edges {
        if let Err(err) = graph.insert_edge(a, b) {
            panic!("invalid test edge ({a}, {b}): {err}");
        }
    }
    graph
}

/// Path `0 - 1 - ... - (vertex_count - 1)`.
#[must_use]
pub(crate) fn path_graph(vertex_count: usize) -> Graph {
    let edges: Vec<_> = (1..vertex_count).map(|b| (b - 1, b)).collect();
    graph_from_edges(vertex_count, &edges)
}
