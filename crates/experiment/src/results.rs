//! Experiment results.
//!
//! Run records of a finished experiment, the tables derived from them, and
//! their on-disk form.
//!
//! # Output Files
//!
//! - `info.json` - Experiment metadata
//! - `parameters_sample.json` - The parameter sets, indexed by sample id
//! - `variables.jsonl` - One arranged variable row per line
//! - `reporters.json` - End-of-run reporters per run
//! - `aggregate.json` - Mean and standard deviation per sample and time step

use serde::{Deserialize, Serialize};
use sim_records::{
    AggregatePoint, ExperimentInfo, Parameters, ReporterRow, RunRecord, VariableRow,
};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

pub const INFO_FILE: &str = "info.json";
pub const SAMPLE_FILE: &str = "parameters_sample.json";
pub const VARIABLES_FILE: &str = "variables.jsonl";
pub const REPORTERS_FILE: &str = "reporters.json";
pub const AGGREGATE_FILE: &str = "aggregate.json";

/// Errors that can occur during output operations.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{file} line {line}: {source}")]
    Line {
        file: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Everything an experiment produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResults {
    pub info: ExperimentInfo,
    /// Parameter sets, indexed by sample id
    pub sample: Vec<Parameters>,
    /// Runs in `(sample_id, iteration)` order
    pub runs: Vec<RunRecord>,
}

impl ExperimentResults {
    /// Runs of one parameter set.
    pub fn runs_for(&self, sample_id: usize) -> impl Iterator<Item = &RunRecord> {
        self.runs.iter().filter(move |r| r.sample_id == sample_id)
    }

    /// Long table: one row per run and recorded time step.
    ///
    /// Variables without a finite value at a step (not yet recorded, or
    /// NaN) are left out of that row.
    pub fn arrange_variables(&self) -> Vec<VariableRow> {
        let mut rows = Vec::new();
        for run in &self.runs {
            for (index, &t) in run.series.t.iter().enumerate() {
                let variables = run
                    .series
                    .variables
                    .iter()
                    .filter_map(|(name, values)| match values.get(index) {
                        Some(&v) if v.is_finite() => Some((name.clone(), v)),
                        _ => None,
                    })
                    .collect();
                rows.push(VariableRow {
                    sample_id: run.sample_id,
                    iteration: run.iteration,
                    t,
                    parameters: run.parameters.clone(),
                    variables,
                });
            }
        }
        rows
    }

    /// One row per run with its end-of-run reporters.
    pub fn reporters(&self) -> Vec<ReporterRow> {
        self.runs
            .iter()
            .map(|run| ReporterRow {
                sample_id: run.sample_id,
                iteration: run.iteration,
                seed: run.seed,
                parameters: run.parameters.clone(),
                reporters: run.reporters.clone(),
            })
            .collect()
    }

    /// Mean and sample standard deviation of every variable across
    /// iterations, per sample and time step.
    pub fn aggregate(&self) -> Vec<AggregatePoint> {
        // (sample_id, t) -> (runs seen, variable -> values)
        let mut groups: BTreeMap<(usize, u64), (usize, BTreeMap<&str, Vec<f64>>)> = BTreeMap::new();

        for run in &self.runs {
            for (index, &t) in run.series.t.iter().enumerate() {
                let (count, values) = groups.entry((run.sample_id, t)).or_default();
                *count += 1;
                for (name, column) in &run.series.variables {
                    if let Some(&v) = column.get(index) {
                        if v.is_finite() {
                            values.entry(name.as_str()).or_default().push(v);
                        }
                    }
                }
            }
        }

        groups
            .into_iter()
            .map(|((sample_id, t), (count, values))| {
                let mut means = BTreeMap::new();
                let mut std_devs = BTreeMap::new();
                for (name, column) in values {
                    let (mean, std_dev) = mean_and_std(&column);
                    means.insert(name.to_string(), mean);
                    std_devs.insert(name.to_string(), std_dev);
                }
                AggregatePoint {
                    sample_id,
                    parameters: self.sample.get(sample_id).cloned().unwrap_or_default(),
                    t,
                    count,
                    means,
                    std_devs,
                }
            })
            .collect()
    }

    /// The aggregate at the last recorded time step of each sample.
    pub fn final_summary(&self) -> Vec<AggregatePoint> {
        let mut last: BTreeMap<usize, AggregatePoint> = BTreeMap::new();
        for point in self.aggregate() {
            // Points arrive in (sample_id, t) order, so the last one wins
            last.insert(point.sample_id, point);
        }
        last.into_values().collect()
    }

    /// Write all output files to `output_dir`, creating it if needed.
    pub fn save(&self, output_dir: &Path) -> Result<(), OutputError> {
        fs::create_dir_all(output_dir)?;

        write_json(&output_dir.join(INFO_FILE), &self.info)?;
        write_json(&output_dir.join(SAMPLE_FILE), &self.sample)?;
        write_json(&output_dir.join(REPORTERS_FILE), &self.reporters())?;
        write_json(&output_dir.join(AGGREGATE_FILE), &self.aggregate())?;

        let file = File::create(output_dir.join(VARIABLES_FILE))?;
        let mut writer = BufWriter::new(file);
        for row in self.arrange_variables() {
            let json = serde_json::to_string(&row)?;
            writeln!(writer, "{}", json)?;
        }
        writer.flush()?;

        tracing::info!(dir = %output_dir.display(), runs = self.runs.len(), "saved results");
        Ok(())
    }

    /// Read results written by [`save`](Self::save).
    pub fn load(output_dir: &Path) -> Result<Self, OutputError> {
        let info: ExperimentInfo = read_json(&output_dir.join(INFO_FILE))?;
        let sample: Vec<Parameters> = read_json(&output_dir.join(SAMPLE_FILE))?;
        let reporter_rows: Vec<ReporterRow> = read_json(&output_dir.join(REPORTERS_FILE))?;

        let mut runs: BTreeMap<(usize, usize), RunRecord> = reporter_rows
            .into_iter()
            .map(|row| {
                let mut record = RunRecord::new(row.sample_id, row.iteration, row.seed, row.parameters);
                record.reporters = row.reporters;
                ((row.sample_id, row.iteration), record)
            })
            .collect();

        let file = File::open(output_dir.join(VARIABLES_FILE))?;
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let row: VariableRow = serde_json::from_str(&line).map_err(|source| OutputError::Line {
                file: VARIABLES_FILE.to_string(),
                line: index + 1,
                source,
            })?;

            let record = runs
                .entry((row.sample_id, row.iteration))
                .or_insert_with(|| RunRecord::new(row.sample_id, row.iteration, 0, row.parameters.clone()));
            for (name, value) in &row.variables {
                record.series.record(row.t, name, *value);
            }
        }

        Ok(Self {
            info,
            sample,
            runs: runs.into_values().collect(),
        })
    }
}

fn mean_and_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    if values.len() == 1 {
        return (mean, 0.0);
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1.0);
    (mean, variance.sqrt())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), OutputError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, OutputError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
