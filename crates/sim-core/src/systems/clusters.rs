//! Cluster System
//!
//! Measures the thread network after each step and at the end of a run.

use bevy_ecs::prelude::*;

use crate::components::{ButtonParams, ModelClock, ThreadCount, ThreadNetwork};
use crate::output::{Recorder, CLUSTERS, MAX_CLUSTER_SIZE, THREADS, THREADS_TO_BUTTON};

/// System: Record `max_cluster_size` and `threads_to_button` for the current step
pub fn record_cluster_metrics(
    params: Res<ButtonParams>,
    clock: Res<ModelClock>,
    network: Res<ThreadNetwork>,
    threads: Res<ThreadCount>,
    mut recorder: ResMut<Recorder>,
) {
    let n = params.n as f64;
    let largest = network.largest_cluster();

    recorder.record(clock.t, MAX_CLUSTER_SIZE, largest as f64 / n);
    recorder.record(clock.t, THREADS_TO_BUTTON, threads.0 as f64 / n);
}

/// System: Store end-of-run reporters
pub fn report_final_metrics(
    params: Res<ButtonParams>,
    network: Res<ThreadNetwork>,
    threads: Res<ThreadCount>,
    mut recorder: ResMut<Recorder>,
) {
    let n = params.n as f64;

    recorder.report(MAX_CLUSTER_SIZE, network.largest_cluster() as f64 / n);
    recorder.report(THREADS_TO_BUTTON, threads.0 as f64 / n);
    recorder.report(THREADS, threads.0 as f64);
    recorder.report(CLUSTERS, network.cluster_count() as f64);
}
