//! Recorder
//!
//! Collects variables per time step and end-of-run reporters.

use bevy_ecs::prelude::*;
use sim_records::{Reporters, TimeSeries};

/// Resource to accumulate recorded output during a run
#[derive(Resource, Debug, Clone, Default)]
pub struct Recorder {
    series: TimeSeries,
    reporters: Reporters,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a variable at time step `t`
    pub fn record(&mut self, t: u64, name: &str, value: f64) {
        self.series.record(t, name, value);
    }

    /// Store an end-of-run value
    pub fn report(&mut self, name: &str, value: f64) {
        self.reporters.insert(name.to_string(), value);
    }

    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    pub fn reporters(&self) -> &Reporters {
        &self.reporters
    }

    pub fn into_parts(self) -> (TimeSeries, Reporters) {
        (self.series, self.reporters)
    }
}
