//! Model Parameters
//!
//! Validated parameters of a button model run.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use sim_records::Parameters;

use crate::model::ParameterError;

/// How the two endpoints of a thread are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointSampling {
    /// Both endpoints drawn independently; repeated pairs and self-loops are possible
    #[default]
    WithReplacement,
    /// Two different buttons per thread; repeated pairs across threads are possible
    Distinct,
}

/// Resource: Parameters of the running model
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ButtonParams {
    /// Number of buttons
    pub n: usize,
    /// Threads added per step, as a fraction of `n`
    pub speed: f64,
    pub sampling: EndpointSampling,
}

impl ButtonParams {
    pub fn new(n: usize, speed: f64) -> Result<Self, ParameterError> {
        if n == 0 {
            return Err(ParameterError::OutOfRange {
                name: "n".into(),
                reason: "at least one button is required".into(),
            });
        }
        if !speed.is_finite() || speed < 0.0 {
            return Err(ParameterError::OutOfRange {
                name: "speed".into(),
                reason: format!("expected a finite value >= 0, got {}", speed),
            });
        }
        Ok(Self {
            n,
            speed,
            sampling: EndpointSampling::default(),
        })
    }

    pub fn with_sampling(mut self, sampling: EndpointSampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Read `n` and `speed` from a parameter set.
    pub fn from_parameters(params: &Parameters) -> Result<Self, ParameterError> {
        let n_value = params
            .get("n")
            .ok_or_else(|| ParameterError::Missing("n".into()))?;
        let n = n_value.as_i64().ok_or(ParameterError::InvalidType {
            name: "n".into(),
            expected: "an integer",
            value: n_value,
        })?;
        if n < 1 {
            return Err(ParameterError::OutOfRange {
                name: "n".into(),
                reason: format!("expected n >= 1, got {}", n),
            });
        }

        let speed = params
            .get_f64("speed")
            .ok_or_else(|| ParameterError::Missing("speed".into()))?;

        Self::new(n as usize, speed)
    }

    /// Threads tied per step: `floor(n * speed)`
    pub fn threads_per_step(&self) -> u64 {
        (self.n as f64 * self.speed).floor() as u64
    }
}
