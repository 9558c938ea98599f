//! Time Series
//!
//! Recorded variables of a single model run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// End-of-run scalar values, keyed by reporter name.
pub type Reporters = BTreeMap<String, f64>;

/// Variables recorded at each time step of one run.
///
/// Every variable vector is aligned with `t`: `variables[name][i]` was
/// recorded at `t[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub t: Vec<u64>,
    #[serde(default)]
    pub variables: BTreeMap<String, Vec<f64>>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for `name` at time step `t`.
    ///
    /// The first record at a new `t` opens a row. Recording the same
    /// variable twice at one `t` overwrites the earlier value.
    pub fn record(&mut self, t: u64, name: &str, value: f64) {
        if self.t.last() != Some(&t) {
            self.t.push(t);
        }
        let row = self.t.len() - 1;

        let column = self.variables.entry(name.to_string()).or_default();
        if column.len() > row {
            column[row] = value;
        } else {
            column.resize(row, f64::NAN);
            column.push(value);
        }
    }

    /// Number of recorded time steps.
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.variables.get(name).map(|v| v.as_slice())
    }

    /// Value of `name` at row `index`.
    pub fn value_at(&self, name: &str, index: usize) -> Option<f64> {
        self.variables.get(name).and_then(|v| v.get(index)).copied()
    }

    /// Last recorded value of `name`.
    pub fn last(&self, name: &str) -> Option<f64> {
        self.variables.get(name).and_then(|v| v.last()).copied()
    }

    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(|k| k.as_str())
    }
}
