//! Integration tests for experiments.
//!
//! These run small button network sweeps end-to-end: configuration, sampling,
//! runs, aggregation and the files written to disk.

use experiment::results::{AGGREGATE_FILE, INFO_FILE, REPORTERS_FILE, SAMPLE_FILE, VARIABLES_FILE};
use experiment::{Experiment, ExperimentConfig, ExperimentResults};
use sim_core::output::{MAX_CLUSTER_SIZE, THREADS_TO_BUTTON};
use sim_core::ButtonModel;
use std::fs;
use tempfile::tempdir;

const SMALL_SWEEP: &str = r#"
    [experiment]
    iterations = 3
    seed = 2024
    parallel = true

    [parameters]
    steps = 10
    speed = 0.05
    n = { values = [100, 1000] }
"#;

fn run_small_sweep() -> ExperimentResults {
    let config = ExperimentConfig::from_str(SMALL_SWEEP).unwrap();
    Experiment::<ButtonModel>::from_config(&config, config.button_options())
        .unwrap()
        .run()
        .unwrap()
}

/// Two parameter sets times three iterations
#[test]
fn test_sweep_run_counts() {
    let results = run_small_sweep();

    assert_eq!(results.info.sample_size, 2);
    assert_eq!(results.info.total_runs, 6);
    assert_eq!(results.runs.len(), 6);
    assert!(results.runs.iter().all(|r| r.series.len() == 11));
    assert_eq!(results.arrange_variables().len(), 6 * 11);
}

/// Every run starts with isolated buttons and grows its largest cluster
#[test]
fn test_sweep_series_properties() {
    let results = run_small_sweep();

    for run in &results.runs {
        let n = run.parameters.get_i64("n").unwrap() as f64;
        let clusters = run.series.get(MAX_CLUSTER_SIZE).unwrap();
        let ratio = run.series.get(THREADS_TO_BUTTON).unwrap();

        assert_eq!(clusters[0], 1.0 / n);
        assert!(clusters.windows(2).all(|w| w[0] <= w[1]));

        let per_step = (n * 0.05).floor();
        for (k, &value) in ratio.iter().enumerate() {
            assert!((value - k as f64 * per_step / n).abs() < 1e-12);
        }
    }
}

/// Iterations of one parameter set differ, but the thread ratio is identical
#[test]
fn test_aggregate_spread() {
    let results = run_small_sweep();
    let summary = results.final_summary();

    assert_eq!(summary.len(), 2);
    for point in &summary {
        assert_eq!(point.t, 10);
        assert_eq!(point.count, 3);
        assert!((point.mean(THREADS_TO_BUTTON).unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(point.std_dev(THREADS_TO_BUTTON), Some(0.0));
        let cluster = point.mean(MAX_CLUSTER_SIZE).unwrap();
        assert!(cluster > 0.0 && cluster <= 1.0);
    }
}

/// Same configuration, same results, however the runs are scheduled
#[test]
fn test_sweep_is_reproducible() {
    let parallel = run_small_sweep();

    let mut config = ExperimentConfig::from_str(SMALL_SWEEP).unwrap();
    config.experiment.parallel = false;
    let sequential = Experiment::<ButtonModel>::from_config(&config, config.button_options())
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(parallel.runs, sequential.runs);
}

/// Results survive a save and load
#[test]
fn test_save_and_load() {
    let results = run_small_sweep();
    let dir = tempdir().unwrap();

    results.save(dir.path()).unwrap();

    for file in [INFO_FILE, SAMPLE_FILE, VARIABLES_FILE, REPORTERS_FILE, AGGREGATE_FILE] {
        assert!(dir.path().join(file).exists(), "missing {}", file);
    }
    let lines = fs::read_to_string(dir.path().join(VARIABLES_FILE)).unwrap();
    assert_eq!(lines.lines().count(), 6 * 11);

    let loaded = ExperimentResults::load(dir.path()).unwrap();
    assert_eq!(loaded.info, results.info);
    assert_eq!(loaded.sample, results.sample);
    assert_eq!(loaded.runs.len(), results.runs.len());

    for (original, reloaded) in results.runs.iter().zip(&loaded.runs) {
        assert_eq!(original.sample_id, reloaded.sample_id);
        assert_eq!(original.iteration, reloaded.iteration);
        assert_eq!(original.seed, reloaded.seed);
        assert_eq!(original.series.t, reloaded.series.t);
        for name in [MAX_CLUSTER_SIZE, THREADS_TO_BUTTON] {
            let a = original.series.get(name).unwrap();
            let b = reloaded.series.get(name).unwrap();
            assert!(a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-12));
        }
    }
}

/// Configuration files on disk drive the same experiment
#[test]
fn test_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sweep.toml");
    fs::write(&path, SMALL_SWEEP).unwrap();

    let config = ExperimentConfig::from_file(&path).unwrap();
    assert_eq!(config, ExperimentConfig::from_str(SMALL_SWEEP).unwrap());
}

/// Ranges need a sample size
#[test]
fn test_range_without_sample_size_fails() {
    let config = ExperimentConfig::from_str(
        r#"
        [parameters]
        steps = 2
        speed = { range = [0.1, 0.5] }
        n = 10
    "#,
    )
    .unwrap();

    let err = Experiment::<ButtonModel>::from_config(&config, config.button_options())
        .err()
        .unwrap();
    assert!(err.to_string().contains("speed"));
}

/// Ranges expand to the requested number of points
#[test]
fn test_range_sweep() {
    let config = ExperimentConfig::from_str(
        r#"
        [experiment]
        iterations = 1
        sample_size = 3

        [parameters]
        steps = 2
        speed = { range = [0.1, 0.5] }
        n = 10
    "#,
    )
    .unwrap();

    let results = Experiment::<ButtonModel>::from_config(&config, config.button_options())
        .unwrap()
        .run()
        .unwrap();

    let speeds: Vec<f64> = results
        .sample
        .iter()
        .map(|p| p.get_f64("speed").unwrap())
        .collect();
    assert_eq!(speeds.len(), 3);
    for (speed, expected) in speeds.iter().zip([0.1, 0.3, 0.5]) {
        assert!((speed - expected).abs() < 1e-12);
    }
    assert_eq!(results.runs.len(), 3);
}
