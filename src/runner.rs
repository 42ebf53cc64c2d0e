//! Experiment runner.
//!
//! Repeats {workload → policy → execution → metrics} a fixed number of
//! times and averages the ten metrics field by field.
//!
//! # Reproducibility
//!
//! A seeder generator built from the base seed hands each repetition two
//! fresh `StdRng` streams: one for the workload source and one for the
//! policy. No RNG state carries over between repetitions, and policies that
//! draw different amounts of randomness still see identical workloads.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dbo::{DboConfig, MetaheuristicPolicy};
use crate::error::{AssignError, Result};
use crate::execution::ExecutionEngine;
use crate::metrics::RunMetrics;
use crate::policy::{AssignmentPolicy, RoundRobinPolicy};
use crate::validation::{validate_assignment, validate_input};
use crate::workload::WorkloadSource;

/// Policy selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyKind {
    /// Cyclic baseline.
    RoundRobin,
    /// Dung Beetle Optimizer.
    Dbo(DboConfig),
}

impl Default for PolicyKind {
    fn default() -> Self {
        PolicyKind::Dbo(DboConfig::default())
    }
}

impl PolicyKind {
    /// Instantiates the selected policy.
    pub fn build(&self) -> Box<dyn AssignmentPolicy> {
        match self {
            PolicyKind::RoundRobin => Box::new(RoundRobinPolicy),
            PolicyKind::Dbo(config) => Box::new(MetaheuristicPolicy::new(config.clone())),
        }
    }
}

/// Experiment parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Number of independent repetitions (default: 10).
    pub repetitions: usize,
    /// Base seed for all derived RNG streams (default: 42).
    pub seed: u64,
    /// Assignment policy.
    pub policy: PolicyKind,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            repetitions: 10,
            seed: 42,
            policy: PolicyKind::default(),
        }
    }
}

impl ExperimentConfig {
    /// Sets the repetition count.
    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Sets the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the policy.
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }
}

/// Per-repetition rows and their field-wise mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    /// Name of the policy that produced the assignments.
    pub policy: String,
    /// One row per repetition, in order.
    pub runs: Vec<RunMetrics>,
    /// Field-wise mean over `runs`.
    pub mean: RunMetrics,
}

/// Runs repeated experiments.
///
/// # Example
/// ```
/// use u_assign::execution::TimeSharedEngine;
/// use u_assign::runner::{ExperimentConfig, ExperimentRunner, PolicyKind};
/// use u_assign::workload::{SyntheticWorkload, WorkloadConfig};
///
/// let config = ExperimentConfig::default()
///     .with_repetitions(3)
///     .with_policy(PolicyKind::RoundRobin);
/// let mut workload = SyntheticWorkload::new(WorkloadConfig::default().with_job_count(20));
///
/// let report = ExperimentRunner::new(config)
///     .run(&mut workload, &mut TimeSharedEngine)
///     .unwrap();
/// assert_eq!(report.runs.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExperimentRunner {
    config: ExperimentConfig,
}

impl ExperimentRunner {
    /// Creates a runner.
    pub fn new(config: ExperimentConfig) -> Self {
        Self { config }
    }

    /// The experiment configuration.
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Runs the experiment with the configured policy.
    pub fn run<W, E>(&self, workload: &mut W, engine: &mut E) -> Result<ExperimentReport>
    where
        W: WorkloadSource + ?Sized,
        E: ExecutionEngine + ?Sized,
    {
        let policy = self.config.policy.build();
        self.run_with_policy(policy.as_ref(), workload, engine)
    }

    /// Runs the experiment with an explicit policy.
    ///
    /// # Errors
    /// - `InvalidInput` if `repetitions` is 0.
    /// - `Validation` if a repetition's workload is malformed, or the
    ///   policy returns an assignment that is not total over it.
    /// - Any error from the policy, engine, or metrics aggregation.
    pub fn run_with_policy<W, E>(
        &self,
        policy: &dyn AssignmentPolicy,
        workload: &mut W,
        engine: &mut E,
    ) -> Result<ExperimentReport>
    where
        W: WorkloadSource + ?Sized,
        E: ExecutionEngine + ?Sized,
    {
        if self.config.repetitions == 0 {
            return Err(AssignError::InvalidInput(
                "experiment needs at least one repetition".into(),
            ));
        }

        let mut seeder = StdRng::seed_from_u64(self.config.seed);
        let mut runs = Vec::with_capacity(self.config.repetitions);
        for repetition in 0..self.config.repetitions {
            let mut workload_rng = StdRng::from_rng(&mut seeder);
            let mut policy_rng = StdRng::from_rng(&mut seeder);

            let w = workload.next_workload(&mut workload_rng)?;
            validate_input(&w.jobs, &w.resources).map_err(AssignError::Validation)?;
            debug!(
                repetition,
                jobs = w.jobs.len(),
                resources = w.resources.len(),
                policy = policy.name(),
                "repetition started"
            );

            let assignment = policy.assign(&w.jobs, &w.resources, &mut policy_rng)?;
            validate_assignment(&assignment, &w.jobs, &w.resources)
                .map_err(AssignError::Validation)?;
            let records = engine.execute(&w.jobs, &w.resources, &assignment)?;
            let metrics = RunMetrics::calculate(&records, w.resources.len())?;

            info!(
                repetition,
                policy = policy.name(),
                makespan = metrics.makespan,
                throughput = metrics.throughput,
                utilization = metrics.utilization_percent,
                "repetition complete"
            );
            runs.push(metrics);
        }

        let mean = RunMetrics::mean(&runs)
            .ok_or_else(|| AssignError::InvalidInput("no repetitions completed".into()))?;
        info!(
            policy = policy.name(),
            repetitions = runs.len(),
            makespan = mean.makespan,
            "experiment complete"
        );

        Ok(ExperimentReport {
            policy: policy.name().to_string(),
            runs,
            mean,
        })
    }
}
