//! Button Components
//!
//! Buttons are the agents of the model. Each one owns exactly one node
//! of the thread network.

use bevy_ecs::prelude::*;
use petgraph::graph::NodeIndex;

/// Component: An agent's node in the thread network
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub node: NodeIndex,
}

impl Button {
    pub fn new(node: NodeIndex) -> Self {
        Self { node }
    }
}

/// Resource: Total threads tied so far in this run
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreadCount(pub u64);

/// Resource: Current time step (0 right after setup)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelClock {
    pub t: u64,
}

impl ModelClock {
    pub fn advance(&mut self) {
        self.t += 1;
    }
}
