//! Table Rows
//!
//! Flattened views over experiment output, one row per record.
//! These are the shapes handed to plotting or analysis tools.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Parameters, Reporters};

/// One (run, time step) row of the arranged variable table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableRow {
    pub sample_id: usize,
    pub iteration: usize,
    pub t: u64,
    pub parameters: Parameters,
    pub variables: BTreeMap<String, f64>,
}

/// End-of-run reporters of one run, joined with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReporterRow {
    pub sample_id: usize,
    pub iteration: usize,
    pub seed: u64,
    pub parameters: Parameters,
    pub reporters: Reporters,
}

/// Mean and spread of each variable across iterations of one sample at one `t`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatePoint {
    pub sample_id: usize,
    pub parameters: Parameters,
    pub t: u64,
    /// Number of iterations contributing
    pub count: usize,
    pub means: BTreeMap<String, f64>,
    pub std_devs: BTreeMap<String, f64>,
}

impl AggregatePoint {
    pub fn mean(&self, name: &str) -> Option<f64> {
        self.means.get(name).copied()
    }

    pub fn std_dev(&self, name: &str) -> Option<f64> {
        self.std_devs.get(name).copied()
    }
}
