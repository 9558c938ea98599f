//! Button Network Model
//!
//! N buttons start unconnected. Every step ties `floor(n * speed)` random
//! threads between them, then records how large the biggest cluster of
//! connected buttons has grown relative to `n` and how many threads per
//! button have been tied so far.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use sim_records::{Parameters, Reporters, TimeSeries};

use crate::components::{ButtonParams, EndpointSampling, ModelClock, ThreadCount, ThreadNetwork};
use crate::model::{Model, ParameterError};
use crate::output::{Recorder, MAX_CLUSTER_SIZE, THREADS_TO_BUTTON};
use crate::setup::spawn_buttons;
use crate::systems::{advance_clock, record_cluster_metrics, report_final_metrics, tie_threads};
use crate::SimRng;

/// Options of the button model that are not swept
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonOptions {
    pub sampling: EndpointSampling,
}

/// The button network model.
///
/// Owns its ECS world: buttons are entities, the thread network, counters,
/// clock and recorder are resources.
pub struct ButtonModel {
    world: World,
    seed: u64,
    step_schedule: Schedule,
    update_schedule: Schedule,
    end_schedule: Schedule,
}

impl ButtonModel {
    pub fn new(params: ButtonParams, seed: u64) -> Self {
        let mut world = World::new();
        world.insert_resource(params);
        world.insert_resource(SimRng(SmallRng::seed_from_u64(seed)));
        world.insert_resource(ThreadNetwork::new());
        world.insert_resource(ThreadCount::default());
        world.insert_resource(ModelClock::default());
        world.insert_resource(Recorder::new());

        Self {
            world,
            seed,
            step_schedule: single_threaded((advance_clock, tie_threads).chain()),
            update_schedule: single_threaded(record_cluster_metrics),
            end_schedule: single_threaded(report_final_metrics),
        }
    }

    /// Create `n` isolated buttons, reseed the RNG from the model seed and
    /// reset counters, clock and recorder.
    pub fn setup(&mut self) {
        let n = self.params().n;

        self.world.clear_entities();
        self.world
            .insert_resource(SimRng(SmallRng::seed_from_u64(self.seed)));
        let network = spawn_buttons(&mut self.world, n);
        self.world.insert_resource(network);
        self.world.insert_resource(ThreadCount::default());
        self.world.insert_resource(ModelClock::default());
        self.world.insert_resource(Recorder::new());

        tracing::trace!(n, "buttons spawned");
    }

    /// Advance one time step and tie this step's threads.
    pub fn step(&mut self) {
        self.step_schedule.run(&mut self.world);
    }

    /// Record cluster metrics for the current time step.
    pub fn update(&mut self) {
        self.update_schedule.run(&mut self.world);
    }

    /// Store end-of-run reporters.
    pub fn end(&mut self) {
        self.end_schedule.run(&mut self.world);
    }

    pub fn params(&self) -> &ButtonParams {
        self.world.resource::<ButtonParams>()
    }

    pub fn network(&self) -> &ThreadNetwork {
        self.world.resource::<ThreadNetwork>()
    }

    /// Threads tied so far
    pub fn threads(&self) -> u64 {
        self.world.resource::<ThreadCount>().0
    }

    pub fn t(&self) -> u64 {
        self.world.resource::<ModelClock>().t
    }

    /// Last recorded `max_cluster_size`
    pub fn max_cluster_size(&self) -> Option<f64> {
        self.series().last(MAX_CLUSTER_SIZE)
    }

    /// Last recorded `threads_to_button`
    pub fn threads_to_button(&self) -> Option<f64> {
        self.series().last(THREADS_TO_BUTTON)
    }

    pub fn series(&self) -> &TimeSeries {
        self.world.resource::<Recorder>().series()
    }

    pub fn reporters(&self) -> &Reporters {
        self.world.resource::<Recorder>().reporters()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

fn single_threaded<M>(systems: impl IntoSystemConfigs<M>) -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems(systems);
    schedule
}

impl Model for ButtonModel {
    const NAME: &'static str = "ButtonModel";
    type Options = ButtonOptions;

    fn from_parameters(
        params: &Parameters,
        options: &ButtonOptions,
        seed: u64,
    ) -> Result<Self, ParameterError> {
        let params = ButtonParams::from_parameters(params)?.with_sampling(options.sampling);
        Ok(Self::new(params, seed))
    }

    fn setup(&mut self) {
        ButtonModel::setup(self);
    }

    fn step(&mut self) {
        ButtonModel::step(self);
    }

    fn update(&mut self) {
        ButtonModel::update(self);
    }

    fn end(&mut self) {
        ButtonModel::end(self);
    }

    fn t(&self) -> u64 {
        ButtonModel::t(self)
    }

    fn into_outputs(mut self) -> (TimeSeries, Reporters) {
        self.world
            .remove_resource::<Recorder>()
            .unwrap_or_default()
            .into_parts()
    }
}
