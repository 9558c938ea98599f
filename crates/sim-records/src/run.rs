//! Run Records
//!
//! Output of a single model run and metadata of a whole experiment.

use serde::{Deserialize, Serialize};

use crate::{Parameters, Reporters, TimeSeries};

/// Generates a run ID from sample index and iteration.
pub fn generate_run_id(sample_id: usize, iteration: usize) -> String {
    format!("run_{:04}_{:03}", sample_id, iteration)
}

/// Everything one model run leaves behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub sample_id: usize,
    pub iteration: usize,
    pub seed: u64,
    pub parameters: Parameters,
    #[serde(default)]
    pub series: TimeSeries,
    #[serde(default)]
    pub reporters: Reporters,
}

impl RunRecord {
    pub fn new(sample_id: usize, iteration: usize, seed: u64, parameters: Parameters) -> Self {
        Self {
            sample_id,
            iteration,
            seed,
            parameters,
            series: TimeSeries::default(),
            reporters: Reporters::default(),
        }
    }

    pub fn run_id(&self) -> String {
        generate_run_id(self.sample_id, self.iteration)
    }
}

/// Metadata describing an experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentInfo {
    pub model: String,
    pub iterations: usize,
    pub sample_size: usize,
    pub total_runs: usize,
    pub seed: u64,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default)]
    pub started_at_unix_ms: u64,
    #[serde(default)]
    pub elapsed_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_run_id() {
        assert_eq!(generate_run_id(0, 0), "run_0000_000");
        assert_eq!(generate_run_id(2, 24), "run_0002_024");
    }

    #[test]
    fn test_run_record_new_is_empty() {
        let record = RunRecord::new(1, 3, 99, Parameters::new().with("n", 10i64));

        assert_eq!(record.run_id(), "run_0001_003");
        assert!(record.series.is_empty());
        assert!(record.reporters.is_empty());
    }
}
