//! Job model.
//!
//! A job is a unit of work with a length in abstract instruction-count
//! units (e.g. million instructions). Jobs are immutable once created.

use serde::{Deserialize, Serialize};

/// A job to be assigned to a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique, stable job identifier.
    pub id: u32,
    /// Work size (instruction units, must be positive).
    pub length: f64,
}

impl Job {
    /// Creates a new job.
    pub fn new(id: u32, length: f64) -> Self {
        Self { id, length }
    }

    /// Execution time of this job on a resource with the given throughput.
    #[inline]
    pub fn exec_time(&self, throughput: f64) -> f64 {
        self.length / throughput
    }
}

/// Total work across a job list.
pub fn total_length(jobs: &[Job]) -> f64 {
    jobs.iter().map(|j| j.length).sum()
}
