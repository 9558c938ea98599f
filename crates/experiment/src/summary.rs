//! Plain-text summaries of experiment results for the terminal.

use sim_core::output::{MAX_CLUSTER_SIZE, THREADS_TO_BUTTON};
use std::fmt::Write;

use crate::results::ExperimentResults;

/// Final mean ± std of both series for every parameter set.
pub fn format_summary_table(results: &ExperimentResults) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6}  {:<32} {:>5}  {:>19}  {:>19}",
        "sample", "parameters", "runs", THREADS_TO_BUTTON, MAX_CLUSTER_SIZE
    );

    for point in results.final_summary() {
        let _ = writeln!(
            out,
            "{:>6}  {:<32} {:>5}  {:>19}  {:>19}",
            point.sample_id,
            point.parameters.label(),
            point.count,
            mean_pm_std(point.mean(THREADS_TO_BUTTON), point.std_dev(THREADS_TO_BUTTON)),
            mean_pm_std(point.mean(MAX_CLUSTER_SIZE), point.std_dev(MAX_CLUSTER_SIZE)),
        );
    }
    out
}

/// Mean `threads_to_button` and `max_cluster_size` per time step of one sample.
pub fn format_sample_series(results: &ExperimentResults, sample_id: usize) -> String {
    let mut out = String::new();
    let label = results
        .sample
        .get(sample_id)
        .map(|p| p.label())
        .unwrap_or_default();
    let _ = writeln!(out, "sample {} ({})", sample_id, label);
    let _ = writeln!(out, "{:>5}  {:>17}  {:>16}", "t", THREADS_TO_BUTTON, MAX_CLUSTER_SIZE);

    for point in results.aggregate().iter().filter(|p| p.sample_id == sample_id) {
        let _ = writeln!(
            out,
            "{:>5}  {:>17.4}  {:>16.4}",
            point.t,
            point.mean(THREADS_TO_BUTTON).unwrap_or(f64::NAN),
            point.mean(MAX_CLUSTER_SIZE).unwrap_or(f64::NAN),
        );
    }
    out
}

fn mean_pm_std(mean: Option<f64>, std_dev: Option<f64>) -> String {
    match (mean, std_dev) {
        (Some(mean), Some(std_dev)) => format!("{:.4} ± {:.4}", mean, std_dev),
        (Some(mean), None) => format!("{:.4}", mean),
        _ => "-".to_string(),
    }
}
