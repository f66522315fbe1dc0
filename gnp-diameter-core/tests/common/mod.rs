use gnp_diameter_core::{GraphParams, TrialRunner, TrialRunnerBuilder};

#[must_use]
pub fn runner(seed: u64, trials: u64, workers: usize) -> TrialRunner {
    TrialRunnerBuilder::new()
        .with_seed(seed)
        .with_trials(trials)
        .with_workers(workers)
        .build()
        .expect("test configuration must be valid")
}

#[must_use]
pub fn params(vertex_count: usize, edge_probability: f64) -> GraphParams {
    GraphParams::new(vertex_count, edge_probability).expect("test parameters must be valid")
}
