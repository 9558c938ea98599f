//! Button Network Simulation Library
//!
//! The model lifecycle trait, its run driver, and the button network model
//! built on a small ECS world.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod button;
pub mod components;
pub mod model;
pub mod output;
pub mod setup;
pub mod systems;

pub use button::{ButtonModel, ButtonOptions};
pub use components::{Button, ButtonParams, EndpointSampling, ModelClock, ThreadCount, ThreadNetwork};
pub use model::{simulate, steps_from, Model, ParameterError, DEFAULT_STEPS};
pub use output::Recorder;

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
