//! Thread System
//!
//! Ties `floor(n * speed)` random threads between buttons each step.

use bevy_ecs::prelude::*;
use petgraph::graph::NodeIndex;
use rand::Rng;

use crate::components::{
    Button, ButtonParams, EndpointSampling, ModelClock, ThreadCount, ThreadNetwork,
};
use crate::SimRng;

/// System: Move the model clock one step forward
pub fn advance_clock(mut clock: ResMut<ModelClock>) {
    clock.advance();
}

/// System: Tie this step's threads between randomly chosen buttons
pub fn tie_threads(
    params: Res<ButtonParams>,
    buttons: Query<&Button>,
    mut network: ResMut<ThreadNetwork>,
    mut threads: ResMut<ThreadCount>,
    mut rng: ResMut<SimRng>,
) {
    let count = params.threads_per_step();
    if count == 0 {
        return;
    }

    // Node order must not depend on entity storage layout
    let mut nodes: Vec<NodeIndex> = buttons.iter().map(|b| b.node).collect();
    if nodes.is_empty() {
        return;
    }
    nodes.sort_unstable();

    for _ in 0..count {
        let (a, b) = pick_endpoints(&nodes, params.sampling, &mut rng.0);
        network.tie(a, b);
        threads.0 += 1;
    }
}

/// Draw the two endpoints of one thread.
///
/// `nodes` must not be empty. With `Distinct` sampling and a single button
/// the thread loops back onto it.
pub fn pick_endpoints<R: Rng>(
    nodes: &[NodeIndex],
    sampling: EndpointSampling,
    rng: &mut R,
) -> (NodeIndex, NodeIndex) {
    let n = nodes.len();
    match sampling {
        EndpointSampling::Distinct if n >= 2 => {
            let a = rng.gen_range(0..n);
            let mut b = rng.gen_range(0..n - 1);
            if b >= a {
                b += 1;
            }
            (nodes[a], nodes[b])
        }
        EndpointSampling::Distinct => (nodes[0], nodes[0]),
        EndpointSampling::WithReplacement => {
            (nodes[rng.gen_range(0..n)], nodes[rng.gen_range(0..n)])
        }
    }
}
