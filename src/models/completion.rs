//! Completion records produced by an execution engine.

use serde::{Deserialize, Serialize};

/// Timing record for one executed job.
///
/// All times are non-negative and share the engine's clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Executed job.
    pub job_id: u32,
    /// Resource the job ran on.
    pub resource_id: u32,
    /// CPU time actually consumed.
    pub actual_cpu_time: f64,
    /// Time spent queued before execution started.
    pub waiting_time: f64,
    /// Execution start time.
    pub exec_start_time: f64,
    /// Completion time.
    pub finish_time: f64,
}

impl CompletionRecord {
    /// Creates a record with the given start and finish, and CPU time equal
    /// to the elapsed interval.
    pub fn new(job_id: u32, resource_id: u32, exec_start_time: f64, finish_time: f64) -> Self {
        Self {
            job_id,
            resource_id,
            actual_cpu_time: finish_time - exec_start_time,
            waiting_time: 0.0,
            exec_start_time,
            finish_time,
        }
    }

    /// Sets the waiting time.
    pub fn with_waiting_time(mut self, waiting_time: f64) -> Self {
        self.waiting_time = waiting_time;
        self
    }

    /// Overrides the CPU time.
    pub fn with_cpu_time(mut self, actual_cpu_time: f64) -> Self {
        self.actual_cpu_time = actual_cpu_time;
        self
    }
}
