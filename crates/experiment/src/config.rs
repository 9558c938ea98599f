//! Configuration loading for experiments.
//!
//! Experiment settings, model options and parameter specs are loaded from a
//! TOML configuration file. Every section is optional; missing sections fall
//! back to the classic button network sweep.

use serde::{Deserialize, Serialize};
use sim_core::{ButtonOptions, EndpointSampling};
use sim_records::ParamValue;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::sample::ParamSpec;

/// Complete experiment configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Repetitions, seeding and execution settings
    #[serde(default)]
    pub experiment: RunSettings,
    /// Model options that are not swept
    #[serde(default)]
    pub model: ModelSettings,
    /// Parameter specs, by parameter name
    #[serde(default = "default_parameters")]
    pub parameters: BTreeMap<String, ParamSpec>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            experiment: RunSettings::default(),
            model: ModelSettings::default(),
            parameters: default_parameters(),
        }
    }
}

impl ExperimentConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes the configuration back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Options handed to every button model run.
    pub fn button_options(&self) -> ButtonOptions {
        ButtonOptions {
            sampling: self.model.sampling,
        }
    }
}

/// How many runs, seeded how, executed how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Independent repetitions per parameter set
    pub iterations: usize,
    /// Seed from which all run seeds are drawn
    pub seed: u64,
    /// Run on the rayon thread pool
    pub parallel: bool,
    /// Points drawn from each range spec
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_size: Option<usize>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            iterations: 25,
            seed: 42,
            parallel: true,
            sample_size: None,
        }
    }
}

/// Model options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub sampling: EndpointSampling,
}

/// The classic sweep: 30 steps at speed 0.05 for 100, 1000 and 10000 buttons.
pub fn default_parameters() -> BTreeMap<String, ParamSpec> {
    let mut parameters = BTreeMap::new();
    parameters.insert("steps".to_string(), ParamSpec::Fixed(ParamValue::Int(30)));
    parameters.insert("speed".to_string(), ParamSpec::Fixed(ParamValue::Float(0.05)));
    parameters.insert(
        "n".to_string(),
        ParamSpec::Values {
            values: vec![
                ParamValue::Int(100),
                ParamValue::Int(1000),
                ParamValue::Int(10000),
            ],
        },
    );
    parameters
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Button network experiment

[experiment]
iterations = 25
seed = 42
parallel = true
# sample_size = 5        # points per range spec

[model]
sampling = "with_replacement"    # or "distinct"

# Each parameter is a fixed value, a list of values,
# a float range or an integer range:
#   speed = 0.05
#   n = { values = [100, 1000, 10000] }
#   speed = { range = [0.01, 0.1] }
#   n = { int_range = [10, 1000] }
[parameters]
steps = 30
speed = 0.05
n = { values = [100, 1000, 10000] }
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExperimentConfig::default();

        assert_eq!(config.experiment.iterations, 25);
        assert_eq!(config.experiment.seed, 42);
        assert!(config.experiment.parallel);
        assert_eq!(config.model.sampling, EndpointSampling::WithReplacement);
        assert_eq!(config.parameters.len(), 3);
    }

    #[test]
    fn test_default_config_toml_parses() {
        let config = ExperimentConfig::from_str(&default_config_toml()).unwrap();
        assert_eq!(config, ExperimentConfig::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
            [experiment]
            iterations = 3
        "#;

        let config = ExperimentConfig::from_str(toml).unwrap();

        assert_eq!(config.experiment.iterations, 3);
        assert_eq!(config.experiment.seed, 42);
        assert_eq!(config.parameters, default_parameters());
    }

    #[test]
    fn test_parse_parameter_specs() {
        let toml = r#"
            [model]
            sampling = "distinct"

            [parameters]
            steps = 10
            speed = { range = [0.01, 0.1] }
            n = { int_range = [10, 50] }
        "#;

        let config = ExperimentConfig::from_str(toml).unwrap();

        assert_eq!(config.model.sampling, EndpointSampling::Distinct);
        assert_eq!(config.parameters["steps"], ParamSpec::Fixed(ParamValue::Int(10)));
        assert_eq!(config.parameters["speed"], ParamSpec::Range { range: [0.01, 0.1] });
        assert_eq!(config.parameters["n"], ParamSpec::IntRange { int_range: [10, 50] });
        assert_eq!(config.button_options().sampling, EndpointSampling::Distinct);
    }

    #[test]
    fn test_config_to_toml_round_trip() {
        let config = ExperimentConfig::default();
        let toml = config.to_toml().unwrap();

        assert!(toml.contains("[experiment]"));
        assert!(toml.contains("[parameters]"));
        assert_eq!(ExperimentConfig::from_str(&toml).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = ExperimentConfig::from_str("[experiment\niterations = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = ExperimentConfig::from_file(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
