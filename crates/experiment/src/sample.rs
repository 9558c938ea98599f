//! Parameter sampling.
//!
//! Turns per-parameter specs into the list of parameter sets an experiment
//! runs. Multi-valued specs are combined as a cartesian product in parameter
//! name order, with later names varying fastest.

use serde::{Deserialize, Serialize};
use sim_records::{ParamValue, Parameters};
use std::collections::BTreeMap;
use thiserror::Error;

/// How the values of one parameter are chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamSpec {
    /// A single value
    Fixed(ParamValue),
    /// An explicit list of values
    Values { values: Vec<ParamValue> },
    /// Evenly spaced floats from `range[0]` to `range[1]`, inclusive
    Range { range: [f64; 2] },
    /// Evenly spaced integers from `int_range[0]` to `int_range[1]`, inclusive
    IntRange { int_range: [i64; 2] },
}

impl ParamSpec {
    /// Concrete values of this spec.
    ///
    /// Ranges need `sample_size` points; integer ranges drop values that
    /// round to the same integer.
    pub fn expand(&self, name: &str, sample_size: Option<usize>) -> Result<Vec<ParamValue>, SampleError> {
        match self {
            ParamSpec::Fixed(value) => Ok(vec![*value]),
            ParamSpec::Values { values } => {
                if values.is_empty() {
                    return Err(SampleError::EmptyValues(name.to_string()));
                }
                Ok(values.clone())
            }
            ParamSpec::Range { range: [min, max] } => {
                let points = range_points(name, *min, *max, sample_size)?;
                Ok(points.into_iter().map(ParamValue::Float).collect())
            }
            ParamSpec::IntRange { int_range: [min, max] } => {
                let points = range_points(name, *min as f64, *max as f64, sample_size)?;
                let mut values: Vec<i64> = points.into_iter().map(|p| p.round() as i64).collect();
                values.dedup();
                Ok(values.into_iter().map(ParamValue::Int).collect())
            }
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(self, ParamSpec::Range { .. } | ParamSpec::IntRange { .. })
    }
}

fn range_points(
    name: &str,
    min: f64,
    max: f64,
    sample_size: Option<usize>,
) -> Result<Vec<f64>, SampleError> {
    let size = sample_size.ok_or_else(|| SampleError::MissingSampleSize(name.to_string()))?;
    if size == 0 {
        return Err(SampleError::ZeroSampleSize);
    }
    if !(min <= max) {
        return Err(SampleError::InvertedRange {
            name: name.to_string(),
            min,
            max,
        });
    }
    if size == 1 {
        return Ok(vec![min]);
    }

    let step = (max - min) / (size - 1) as f64;
    Ok((0..size)
        .map(|i| if i == size - 1 { max } else { min + step * i as f64 })
        .collect())
}

/// Errors that can occur while building a sample.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    #[error("parameter '{0}' has an empty value list")]
    EmptyValues(String),

    #[error("parameter '{0}' is a range but no sample size was given")]
    MissingSampleSize(String),

    #[error("sample size must be at least 1")]
    ZeroSampleSize,

    #[error("parameter '{name}' has an inverted range [{min}, {max}]")]
    InvertedRange { name: String, min: f64, max: f64 },
}

/// Ordered list of parameter sets; a set's position is its sample id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sample {
    sets: Vec<Parameters>,
}

impl Sample {
    /// Build the cartesian product of all parameter specs.
    pub fn new(
        specs: &BTreeMap<String, ParamSpec>,
        sample_size: Option<usize>,
    ) -> Result<Self, SampleError> {
        let mut sets = vec![Parameters::new()];

        for (name, spec) in specs {
            let values = spec.expand(name, sample_size)?;
            sets = sets
                .into_iter()
                .flat_map(|set| {
                    values
                        .iter()
                        .map(move |value| set.clone().with(name.as_str(), *value))
                })
                .collect();
        }

        Ok(Self { sets })
    }

    pub fn from_sets(sets: Vec<Parameters>) -> Self {
        Self { sets }
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn get(&self, sample_id: usize) -> Option<&Parameters> {
        self.sets.get(sample_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameters> {
        self.sets.iter()
    }

    pub fn as_slice(&self) -> &[Parameters] {
        &self.sets
    }

    pub fn into_vec(self) -> Vec<Parameters> {
        self.sets
    }
}
