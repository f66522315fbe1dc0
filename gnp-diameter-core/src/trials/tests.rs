//! Tests for trial batches and their reduction.

use proptest::prelude::*;
use rstest::rstest;

use super::*;
use crate::{
    builder::TrialRunnerBuilder,
    test_utils::{path_graph, suite_proptest_config},
};

fn runner(seed: u64, trials: u64, workers: usize) -> TrialRunner {
    TrialRunnerBuilder::new()
        .with_seed(seed)
        .with_trials(trials)
        .with_workers(workers)
        .build()
        .expect("test configuration is valid")
}

fn params(vertex_count: usize, probability: f64) -> GraphParams {
    GraphParams::new(vertex_count, probability).expect("test parameters are valid")
}

#[rstest]
#[case(2)]
#[case(10)]
fn complete_graphs_average_unit_diameter(#[case] vertices: usize) {
    let summary = runner(42, 5, 2).run_trials(&params(vertices, 1.0));
    assert_eq!(summary.mean_diameter(), Some(1.0));
    assert_eq!(summary.measured_trials(), 5);
    assert_eq!(summary.connected_trials(), 5);
    assert_eq!(summary.diameter_sum(), 5);
    assert_eq!(summary.longest(), Some(1));
}

#[test]
fn edgeless_graphs_leave_the_mean_undefined() {
    let summary = runner(1, 3, 2).run_trials(&params(5, 0.0));
    assert_eq!(summary.trials().get(), 3);
    assert_eq!(summary.measured_trials(), 0);
    assert_eq!(summary.connected_trials(), 0);
    assert_eq!(summary.mean_diameter(), None);
    assert_eq!(summary.longest(), None);
}

#[test]
fn single_vertex_graphs_are_connected_but_unmeasured() {
    let summary = runner(9, 4, 1).run_trials(&params(1, 0.5));
    assert_eq!(summary.measured_trials(), 0);
    assert_eq!(summary.connected_trials(), 4);
    assert_eq!(summary.mean_diameter(), None);
}

#[rstest]
#[case(1, 2)]
#[case(1, 8)]
#[case(3, 5)]
fn worker_count_does_not_change_the_summary(#[case] left: usize, #[case] right: usize) {
    let config = params(14, 0.2);
    let baseline = runner(2024, 64, left).run_trials(&config);
    let other = runner(2024, 64, right).run_trials(&config);
    assert_eq!(baseline, other);
    assert_eq!(
        baseline.mean_diameter().map(f64::to_bits),
        other.mean_diameter().map(f64::to_bits)
    );
}

#[test]
fn batch_equals_sum_of_single_trials() {
    let config = params(12, 0.25);
    let trial_runner = runner(77, 20, 3);
    let expected = (0..20)
        .map(|trial| trial_runner.run_trial(&config, trial))
        .fold(DiameterTally::default(), DiameterTally::record);
    let summary = trial_runner.run_trials(&config);
    assert_eq!(summary.measured_trials(), expected.measured);
    assert_eq!(summary.connected_trials(), expected.connected);
    assert_eq!(summary.diameter_sum(), expected.diameter_sum);
    assert_eq!(summary.longest(), expected.longest);
}

#[test]
fn trials_draw_from_distinct_streams() {
    let trial_runner = runner(5, 2, 1);
    let config = params(20, 0.5);
    assert_ne!(
        trial_runner.sample_graph(&config, 0),
        trial_runner.sample_graph(&config, 1)
    );
    assert_eq!(
        trial_runner.sample_graph(&config, 1),
        trial_runner.sample_graph(&config, 1)
    );
}

#[test]
fn mean_excludes_unmeasured_trials() {
    let measured = DiameterCalculator::default().measure(&path_graph(4));
    let unmeasured = DiameterCalculator::default().measure(&path_graph(1));
    let tally = DiameterTally::default()
        .record(measured)
        .record(unmeasured)
        .record(measured);
    let trials = NonZeroU64::new(3).expect("non-zero");
    let summary = TrialSummary::new(params(4, 0.5), trials, tally);
    assert_eq!(summary.measured_trials(), 2);
    assert_eq!(summary.mean_diameter(), Some(3.0));
}

#[test]
fn merge_keeps_the_larger_longest() {
    let short = DiameterTally::default().record(DiameterCalculator::default().measure(&path_graph(2)));
    let long = DiameterTally::default().record(DiameterCalculator::default().measure(&path_graph(6)));
    assert_eq!(short.merge(long).longest, Some(5));
    assert_eq!(long.merge(short).longest, Some(5));
    assert_eq!(short.merge(DiameterTally::default()), short);
}

proptest! {
    #![proptest_config(suite_proptest_config(16))]

    #[test]
    fn merge_is_order_independent(
        lengths in proptest::collection::vec(1_usize..8, 1..12),
        split in 0_usize..12,
    ) {
        let diameters: Vec<_> = lengths
            .iter()
            .map(|&len| DiameterCalculator::default().measure(&path_graph(len)))
            .collect();
        let split = split.min(diameters.len());
        let (head, tail) = diameters.split_at(split);
        let sequential = diameters
            .iter()
            .copied()
            .fold(DiameterTally::default(), DiameterTally::record);
        let left = head.iter().copied().fold(DiameterTally::default(), DiameterTally::record);
        let right = tail.iter().copied().fold(DiameterTally::default(), DiameterTally::record);
        prop_assert_eq!(left.merge(right), sequential);
        prop_assert_eq!(right.merge(left), sequential);
    }
}
