//! Run metrics aggregated from completion records.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total CPU | Σ actual CPU time |
//! | Total Wait | Σ waiting time |
//! | Avg Start / Exec / Finish | Mean start time / CPU time / finish time |
//! | Throughput | Completed jobs / makespan |
//! | Makespan | Latest finish time |
//! | Imbalance Degree | Avg finish − avg exec (signed) |
//! | Utilization (%) | 100 · total CPU / (resources · makespan) |
//! | Energy (kWh) | makespan · 0.000277 |
//!
//! The energy figure is a flat linear proxy of makespan, not a power model.

use serde::{Deserialize, Serialize};

use crate::error::{AssignError, Result};
use crate::models::CompletionRecord;

/// kWh charged per unit of makespan.
pub const ENERGY_KWH_PER_TIME_UNIT: f64 = 0.000277;

/// Summary statistics of one execution run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    /// Sum of CPU time over all jobs.
    pub total_cpu: f64,
    /// Sum of waiting time over all jobs.
    pub total_wait: f64,
    /// Mean execution start time.
    pub avg_start: f64,
    /// Mean CPU time.
    pub avg_exec: f64,
    /// Mean finish time.
    pub avg_finish: f64,
    /// Completed jobs per time unit.
    pub throughput: f64,
    /// Latest finish time.
    pub makespan: f64,
    /// `avg_finish - avg_exec`.
    pub imbalance_degree: f64,
    /// Resource utilization in percent.
    pub utilization_percent: f64,
    /// Energy estimate in kWh.
    pub energy_kwh: f64,
}

impl RunMetrics {
    /// Field names, in the order of [`RunMetrics::values`].
    pub const FIELD_NAMES: [&'static str; 10] = [
        "total_cpu",
        "total_wait",
        "avg_start",
        "avg_exec",
        "avg_finish",
        "throughput",
        "makespan",
        "imbalance_degree",
        "utilization_percent",
        "energy_kwh",
    ];

    /// Computes metrics from completion records.
    ///
    /// # Errors
    /// - `EmptyCompletionSet` if `records` is empty.
    /// - `ZeroMakespan` if every job finishes at time 0.
    /// - `InvalidInput` if `resource_count` is 0.
    pub fn calculate(records: &[CompletionRecord], resource_count: usize) -> Result<Self> {
        if records.is_empty() {
            return Err(AssignError::EmptyCompletionSet);
        }
        if resource_count == 0 {
            return Err(AssignError::InvalidInput(
                "utilization needs at least one resource".into(),
            ));
        }

        let mut total_cpu = 0.0;
        let mut total_wait = 0.0;
        let mut sum_start = 0.0;
        let mut sum_finish = 0.0;
        let mut makespan: f64 = 0.0;

        for r in records {
            total_cpu += r.actual_cpu_time;
            total_wait += r.waiting_time;
            sum_start += r.exec_start_time;
            sum_finish += r.finish_time;
            makespan = makespan.max(r.finish_time);
        }

        if makespan <= 0.0 {
            return Err(AssignError::ZeroMakespan);
        }

        let count = records.len() as f64;
        let avg_start = sum_start / count;
        let avg_exec = total_cpu / count;
        let avg_finish = sum_finish / count;

        Ok(Self {
            total_cpu,
            total_wait,
            avg_start,
            avg_exec,
            avg_finish,
            throughput: count / makespan,
            makespan,
            imbalance_degree: avg_finish - avg_exec,
            utilization_percent: 100.0 * total_cpu / (resource_count as f64 * makespan),
            energy_kwh: makespan * ENERGY_KWH_PER_TIME_UNIT,
        })
    }

    /// Field-wise arithmetic mean. Returns `None` for an empty slice.
    pub fn mean(runs: &[RunMetrics]) -> Option<RunMetrics> {
        if runs.is_empty() {
            return None;
        }
        let mut sums = [0.0; 10];
        for run in runs {
            for (sum, value) in sums.iter_mut().zip(run.values()) {
                *sum += value;
            }
        }
        let n = runs.len() as f64;
        Some(Self::from_values(sums.map(|s| s / n)))
    }

    /// All ten fields in [`RunMetrics::FIELD_NAMES`] order.
    pub fn values(&self) -> [f64; 10] {
        [
            self.total_cpu,
            self.total_wait,
            self.avg_start,
            self.avg_exec,
            self.avg_finish,
            self.throughput,
            self.makespan,
            self.imbalance_degree,
            self.utilization_percent,
            self.energy_kwh,
        ]
    }

    /// Builds metrics from values in [`RunMetrics::FIELD_NAMES`] order.
    pub fn from_values(v: [f64; 10]) -> Self {
        Self {
            total_cpu: v[0],
            total_wait: v[1],
            avg_start: v[2],
            avg_exec: v[3],
            avg_finish: v[4],
            throughput: v[5],
            makespan: v[6],
            imbalance_degree: v[7],
            utilization_percent: v[8],
            energy_kwh: v[9],
        }
    }
}
