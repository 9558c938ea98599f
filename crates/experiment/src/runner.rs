//! Experiment runner.
//!
//! Runs a model once per (parameter set, iteration) pair, sequentially or on
//! the rayon thread pool, and gathers the run records.
//!
//! Run seeds are drawn up front from the experiment seed in
//! `(sample_id, iteration)` order, so the outcome does not depend on how the
//! runs are scheduled.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use sim_core::{simulate, Model, ParameterError};
use sim_records::{ExperimentInfo, RunRecord};
use std::marker::PhantomData;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::config::ExperimentConfig;
use crate::results::ExperimentResults;
use crate::sample::{Sample, SampleError};

/// Errors that can occur while running an experiment.
#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error(transparent)]
    Sample(#[from] SampleError),

    #[error("sample {sample_id} ({label}): {source}")]
    Parameter {
        sample_id: usize,
        label: String,
        #[source]
        source: ParameterError,
    },

    #[error("experiment has no runs (sample size {sample_size}, iterations {iterations})")]
    NoRuns { sample_size: usize, iterations: usize },
}

/// One scheduled model run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTask {
    pub sample_id: usize,
    pub iteration: usize,
    pub seed: u64,
}

/// Repeated runs of model `M` over a parameter sample.
pub struct Experiment<M: Model> {
    sample: Sample,
    iterations: usize,
    seed: u64,
    parallel: bool,
    options: M::Options,
    _model: PhantomData<fn() -> M>,
}

impl<M: Model> Experiment<M> {
    pub fn new(sample: Sample, iterations: usize) -> Self {
        Self {
            sample,
            iterations,
            seed: 0,
            parallel: false,
            options: M::Options::default(),
            _model: PhantomData,
        }
    }

    /// Build the sample and settings described by `config`.
    pub fn from_config(config: &ExperimentConfig, options: M::Options) -> Result<Self, ExperimentError> {
        let sample = Sample::new(&config.parameters, config.experiment.sample_size)?;
        Ok(Self::new(sample, config.experiment.iterations)
            .with_seed(config.experiment.seed)
            .with_parallel(config.experiment.parallel)
            .with_options(options))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_options(mut self, options: M::Options) -> Self {
        self.options = options;
        self
    }

    pub fn sample(&self) -> &Sample {
        &self.sample
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn run_count(&self) -> usize {
        self.sample.len() * self.iterations
    }

    /// All runs in `(sample_id, iteration)` order, with their seeds.
    pub fn plan(&self) -> Vec<RunTask> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut tasks = Vec::with_capacity(self.run_count());
        for sample_id in 0..self.sample.len() {
            for iteration in 0..self.iterations {
                tasks.push(RunTask {
                    sample_id,
                    iteration,
                    seed: rng.gen(),
                });
            }
        }
        tasks
    }

    /// Execute every planned run.
    pub fn run(&self) -> Result<ExperimentResults, ExperimentError> {
        let tasks = self.plan();
        if tasks.is_empty() {
            return Err(ExperimentError::NoRuns {
                sample_size: self.sample.len(),
                iterations: self.iterations,
            });
        }

        let started_at_unix_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let start = Instant::now();

        tracing::info!(
            model = M::NAME,
            runs = tasks.len(),
            sample_size = self.sample.len(),
            iterations = self.iterations,
            parallel = self.parallel,
            "starting experiment"
        );

        let runs: Vec<RunRecord> = if self.parallel {
            tasks
                .into_par_iter()
                .map(|task| self.run_task(task))
                .collect::<Result<_, _>>()?
        } else {
            tasks
                .into_iter()
                .map(|task| self.run_task(task))
                .collect::<Result<_, _>>()?
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;
        tracing::info!(runs = runs.len(), elapsed_ms, "experiment complete");

        Ok(ExperimentResults {
            info: ExperimentInfo {
                model: M::NAME.to_string(),
                iterations: self.iterations,
                sample_size: self.sample.len(),
                total_runs: runs.len(),
                seed: self.seed,
                parallel: self.parallel,
                started_at_unix_ms,
                elapsed_ms,
            },
            sample: self.sample.clone().into_vec(),
            runs,
        })
    }

    fn run_task(&self, task: RunTask) -> Result<RunRecord, ExperimentError> {
        let parameters = self
            .sample
            .get(task.sample_id)
            .cloned()
            .unwrap_or_default();

        let (series, reporters) = simulate::<M>(&parameters, &self.options, task.seed).map_err(
            |source| ExperimentError::Parameter {
                sample_id: task.sample_id,
                label: parameters.label(),
                source,
            },
        )?;

        let mut record = RunRecord::new(task.sample_id, task.iteration, task.seed, parameters);
        record.series = series;
        record.reporters = reporters;
        Ok(record)
    }
}
