//! Recorded Output
//!
//! Time series and reporters collected during a run.

pub mod recorder;

pub use recorder::Recorder;

/// Relative size of the largest cluster: `max_component_size / n`
pub const MAX_CLUSTER_SIZE: &str = "max_cluster_size";

/// Threads tied so far per button: `threads / n`
pub const THREADS_TO_BUTTON: &str = "threads_to_button";

/// Absolute thread count (reporter)
pub const THREADS: &str = "threads";

/// Number of connected components (reporter)
pub const CLUSTERS: &str = "clusters";
