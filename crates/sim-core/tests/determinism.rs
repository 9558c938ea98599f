//! Determinism verification tests
//!
//! Tests to ensure the model produces identical results given the same seed.

use petgraph::visit::EdgeRef;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sim_core::{simulate, ButtonModel, ButtonOptions, ButtonParams, EndpointSampling};
use sim_records::Parameters;
use std::collections::VecDeque;

fn run(n: usize, speed: f64, steps: u64, seed: u64, sampling: EndpointSampling) -> ButtonModel {
    let params = ButtonParams::new(n, speed).unwrap().with_sampling(sampling);
    let mut model = ButtonModel::new(params, seed);
    model.setup();
    model.update();
    for _ in 0..steps {
        model.step();
        model.update();
    }
    model
}

fn thread_list(model: &ButtonModel) -> Vec<(usize, usize)> {
    model
        .network()
        .graph()
        .edge_references()
        .map(|e| (e.source().index(), e.target().index()))
        .collect()
}

/// The model seed drives every thread the model ties
#[test]
fn test_seed_flows_through_model() {
    let model = run(50, 0.1, 1, 42, EndpointSampling::WithReplacement);

    let mut rng = SmallRng::seed_from_u64(42);
    let expected: Vec<(usize, usize)> = (0..5)
        .map(|_| (rng.gen_range(0..50), rng.gen_range(0..50)))
        .collect();

    assert_eq!(model.seed(), 42);
    assert_eq!(thread_list(&model), expected);
}

/// Same seed, same threads, same series
#[test]
fn test_model_determinism() {
    let a = run(300, 0.05, 20, 777, EndpointSampling::Distinct);
    let b = run(300, 0.05, 20, 777, EndpointSampling::Distinct);

    assert_eq!(thread_list(&a), thread_list(&b));
    assert_eq!(a.series(), b.series());
}

/// Different seeds tie different threads
#[test]
fn test_model_different_seeds() {
    let a = run(300, 0.05, 20, 1, EndpointSampling::Distinct);
    let b = run(300, 0.05, 20, 2, EndpointSampling::Distinct);

    assert_ne!(thread_list(&a), thread_list(&b));
    // Thread counts only depend on n and speed
    assert_eq!(a.threads(), b.threads());
}

/// The driver gives the same output as stepping by hand
#[test]
fn test_simulate_matches_manual_run() {
    let params = Parameters::new()
        .with("n", 120i64)
        .with("speed", 0.1)
        .with("steps", 15i64);
    let (series, _) = simulate::<ButtonModel>(&params, &ButtonOptions::default(), 99).unwrap();

    let manual = run(120, 0.1, 15, 99, EndpointSampling::default());
    assert_eq!(&series, manual.series());
}

/// Largest cluster agrees with a breadth-first search over the threads
#[test]
fn test_largest_cluster_matches_bfs() {
    for sampling in [EndpointSampling::Distinct, EndpointSampling::WithReplacement] {
        let model = run(150, 0.04, 25, 2024, sampling);
        let n = model.network().button_count();

        let mut adjacency = vec![Vec::new(); n];
        for (a, b) in thread_list(&model) {
            adjacency[a].push(b);
            adjacency[b].push(a);
        }

        let mut seen = vec![false; n];
        let mut largest = 0;
        for start in 0..n {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            let mut size = 0;
            let mut queue = VecDeque::from([start]);
            while let Some(node) = queue.pop_front() {
                size += 1;
                for &next in &adjacency[node] {
                    if !seen[next] {
                        seen[next] = true;
                        queue.push_back(next);
                    }
                }
            }
            largest = largest.max(size);
        }

        assert_eq!(model.network().largest_cluster(), largest);
        assert_eq!(model.max_cluster_size(), Some(largest as f64 / n as f64));
    }
}
