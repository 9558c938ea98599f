//! ECS Systems
//!
//! Thread tying (step) and cluster measurement (update).

pub mod clusters;
pub mod threads;

pub use clusters::{record_cluster_metrics, report_final_metrics};
pub use threads::{advance_clock, pick_endpoints, tie_threads};
