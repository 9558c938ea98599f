//! Experiments over button network runs.
//!
//! Expands parameter specs into a sample, runs a model for every parameter
//! set and iteration, and turns the run records into tables ready for
//! analysis or plotting.
//!
//! # Modules
//!
//! - [`config`]: TOML experiment configuration
//! - [`sample`]: Parameter specs and the cartesian sample
//! - [`runner`]: The `Experiment` runner, sequential or parallel
//! - [`results`]: Arranged tables, aggregation, save and load
//! - [`summary`]: Terminal summaries

pub mod config;
pub mod results;
pub mod runner;
pub mod sample;
pub mod summary;

// Re-export config types
pub use config::{default_config_toml, ConfigError, ExperimentConfig, ModelSettings, RunSettings};

// Re-export sampling types
pub use sample::{ParamSpec, Sample, SampleError};

// Re-export runner types
pub use runner::{Experiment, ExperimentError, RunTask};

// Re-export result types
pub use results::{ExperimentResults, OutputError};

pub use summary::{format_sample_series, format_summary_table};
