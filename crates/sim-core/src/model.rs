//! Model Lifecycle
//!
//! The `Model` trait every simulation implements, and `simulate`, which
//! drives one run through setup, the step/update loop and end.

use sim_records::{ParamValue, Parameters, Reporters, TimeSeries};
use thiserror::Error;

/// Step count used when a parameter set has no `steps` entry
pub const DEFAULT_STEPS: u64 = 100;

/// Errors raised while turning a parameter set into a model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("missing parameter '{0}'")]
    Missing(String),

    #[error("parameter '{name}' must be {expected}, got {value}")]
    InvalidType {
        name: String,
        expected: &'static str,
        value: ParamValue,
    },

    #[error("parameter '{name}' out of range: {reason}")]
    OutOfRange { name: String, reason: String },
}

/// A simulation that can be driven by [`simulate`].
///
/// Lifecycle: `setup`, `update` (records t = 0), then `step` + `update` once
/// per time step, then `end`.
pub trait Model: Sized {
    /// Name recorded in experiment metadata
    const NAME: &'static str;

    /// Options that are not part of the swept parameters
    type Options: Clone + Default + Send + Sync;

    fn from_parameters(
        params: &Parameters,
        options: &Self::Options,
        seed: u64,
    ) -> Result<Self, ParameterError>;

    fn setup(&mut self);

    fn step(&mut self);

    fn update(&mut self);

    fn end(&mut self) {}

    /// Current time step
    fn t(&self) -> u64;

    /// Consume the model, keeping only what it recorded.
    fn into_outputs(self) -> (TimeSeries, Reporters);
}

/// Read the `steps` parameter, falling back to [`DEFAULT_STEPS`].
pub fn steps_from(params: &Parameters) -> Result<u64, ParameterError> {
    let Some(value) = params.get("steps") else {
        return Ok(DEFAULT_STEPS);
    };
    match value.as_i64() {
        Some(steps) if steps >= 0 => Ok(steps as u64),
        Some(steps) => Err(ParameterError::OutOfRange {
            name: "steps".into(),
            reason: format!("expected steps >= 0, got {}", steps),
        }),
        None => Err(ParameterError::InvalidType {
            name: "steps".into(),
            expected: "an integer",
            value,
        }),
    }
}

/// Run one model from setup to end.
pub fn simulate<M: Model>(
    params: &Parameters,
    options: &M::Options,
    seed: u64,
) -> Result<(TimeSeries, Reporters), ParameterError> {
    let steps = steps_from(params)?;
    let mut model = M::from_parameters(params, options, seed)?;

    model.setup();
    model.update();
    while model.t() < steps {
        model.step();
        model.update();
    }
    model.end();

    tracing::debug!(model = M::NAME, seed, steps, "run complete");
    Ok(model.into_outputs())
}
