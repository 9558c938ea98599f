//! Button Setup
//!
//! Spawns one entity per button and gives each its own isolated node.

use bevy_ecs::prelude::*;

use crate::components::{Button, ThreadNetwork};

/// Spawn `n` buttons and return the network holding their nodes
pub fn spawn_buttons(world: &mut World, n: usize) -> ThreadNetwork {
    let mut network = ThreadNetwork::with_capacity(n, 0);

    for _ in 0..n {
        let entity = world.spawn_empty().id();
        let node = network.add_button(entity);
        world.entity_mut(entity).insert(Button::new(node));
    }

    network
}

/// Count spawned buttons
pub fn count_buttons(world: &mut World) -> usize {
    world.query::<&Button>().iter(world).count()
}
