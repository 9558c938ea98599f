//! Shared record types for button network experiments.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for all other crates in the workspace.

pub mod params;
pub mod run;
pub mod series;
pub mod table;

// Re-export parameter types
pub use params::{ParamValue, Parameters};

// Re-export series types
pub use series::{Reporters, TimeSeries};

// Re-export run types
pub use run::{generate_run_id, ExperimentInfo, RunRecord};

// Re-export table types
pub use table::{AggregatePoint, ReporterRow, VariableRow};
