//! DBO search loop and policy adapter.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use super::{DboConfig, Population};
use crate::error::{AssignError, Result};
use crate::fitness::FitnessEvaluator;
use crate::models::{Assignment, Job, Resource};
use crate::policy::AssignmentPolicy;

/// Statistics recorded after each iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationStats {
    /// Iteration number (0-based).
    pub iteration: usize,
    /// Global best makespan after the iteration.
    pub best_fitness: f64,
    /// Mean makespan across the population after the sweep.
    pub mean_fitness: f64,
    /// Candidates that accepted their move.
    pub improved_candidates: usize,
}

/// Final result of a DBO run.
#[derive(Debug, Clone)]
pub struct DboResult {
    /// Best assignment found, keyed by job id.
    pub assignment: Assignment,
    /// Makespan of `assignment`.
    pub best_fitness: f64,
    /// Best makespan of the initial population.
    pub initial_best_fitness: f64,
    /// Iterations actually completed.
    pub iterations: usize,
    /// Whether the run stopped on the cancellation flag.
    pub cancelled: bool,
    /// Per-iteration statistics.
    pub history: Vec<IterationStats>,
}

/// Dung Beetle Optimizer assignment policy.
///
/// Minimizes makespan by evolving a population of random assignments.
/// Each iteration moves every candidate by following the global best or
/// jumping to random resources, keeps only strict improvements, and then
/// refreshes the global best.
///
/// The search consumes draws only from the caller's RNG, so a fixed seed
/// reproduces the full trajectory.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_assign::dbo::{DboConfig, MetaheuristicPolicy};
/// use u_assign::models::{Job, Resource};
///
/// let jobs: Vec<Job> = (0..20).map(|i| Job::new(i, 5000.0 + 100.0 * i as f64)).collect();
/// let resources = vec![Resource::new(0, 500.0), Resource::new(1, 1500.0)];
/// let policy = MetaheuristicPolicy::new(DboConfig::default().with_max_iterations(20));
///
/// let mut rng = SmallRng::seed_from_u64(42);
/// let result = policy.optimize(&jobs, &resources, &mut rng).unwrap();
/// assert_eq!(result.assignment.len(), 20);
/// assert!(result.best_fitness <= result.initial_best_fitness);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetaheuristicPolicy {
    config: DboConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl MetaheuristicPolicy {
    /// Creates the policy.
    pub fn new(config: DboConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Installs a cooperative cancellation flag, checked before each
    /// iteration. When set, the best found so far is returned.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &DboConfig {
        &self.config
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Runs the full search.
    ///
    /// # Errors
    /// - `InvalidInput` for an invalid configuration or no resources.
    /// - `EmptyWorkload` when `jobs` is empty.
    /// - `InvalidResource` when a resource has non-positive speed.
    pub fn optimize(
        &self,
        jobs: &[Job],
        resources: &[Resource],
        rng: &mut dyn RngCore,
    ) -> Result<DboResult> {
        self.config.validate()?;
        let evaluator = FitnessEvaluator::new(jobs, resources)?;

        let mut population = Population::initialize(&self.config, &evaluator, &mut *rng)?;
        let initial_best_fitness = population.best_fitness();
        debug!(
            jobs = jobs.len(),
            resources = resources.len(),
            population = population.len(),
            best = initial_best_fitness,
            "dbo population initialized"
        );

        let mut history = Vec::with_capacity(self.config.max_iterations);
        let mut cancelled = false;

        for iteration in 0..self.config.max_iterations {
            if self.is_cancelled() {
                warn!(iteration, "dbo cancelled, returning best so far");
                cancelled = true;
                break;
            }

            let sweep = population.sweep(&self.config, &evaluator, &mut *rng)?;
            population.refresh_best(&evaluator)?;

            trace!(
                iteration,
                best = population.best_fitness(),
                mean = sweep.mean_fitness,
                improved = sweep.improved,
                "dbo iteration"
            );
            history.push(IterationStats {
                iteration,
                best_fitness: population.best_fitness(),
                mean_fitness: sweep.mean_fitness,
                improved_candidates: sweep.improved,
            });
        }

        let assignment = evaluator.to_assignment(&population.best().genes)?;
        let best_fitness = population.best_fitness();
        info!(
            initial = initial_best_fitness,
            best = best_fitness,
            iterations = history.len(),
            "dbo optimized makespan"
        );

        Ok(DboResult {
            assignment,
            best_fitness,
            initial_best_fitness,
            iterations: history.len(),
            cancelled,
            history,
        })
    }
}

impl AssignmentPolicy for MetaheuristicPolicy {
    fn name(&self) -> &str {
        "dbo"
    }

    fn assign(
        &self,
        jobs: &[Job],
        resources: &[Resource],
        rng: &mut dyn RngCore,
    ) -> Result<Assignment> {
        if resources.is_empty() {
            return Err(AssignError::InvalidInput(
                "dbo requires at least one resource".into(),
            ));
        }
        if jobs.is_empty() {
            return Ok(Assignment::new());
        }
        Ok(self.optimize(jobs, resources, rng)?.assignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::RoundRobinPolicy;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn heterogeneous(n: u32, m: u32, seed: u64) -> (Vec<Job>, Vec<Resource>) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let jobs = (0..n)
            .map(|i| Job::new(i, 5000.0 + rng.random_range(0.0..15000.0)))
            .collect();
        let resources = (0..m)
            .map(|i| Resource::new(i, 500.0 + rng.random_range(0.0..1500.0)))
            .collect();
        (jobs, resources)
    }

    fn small_config() -> DboConfig {
        DboConfig::default()
            .with_population_size(10)
            .with_max_iterations(30)
    }

    #[test]
    fn test_best_not_worse_than_initial() {
        let (jobs, resources) = heterogeneous(40, 6, 1);
        let policy = MetaheuristicPolicy::new(small_config());
        for seed in 0..5 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let result = policy.optimize(&jobs, &resources, &mut rng).unwrap();
            assert!(result.best_fitness <= result.initial_best_fitness);
        }
    }

    #[test]
    fn test_history_non_increasing() {
        let (jobs, resources) = heterogeneous(30, 5, 2);
        let policy = MetaheuristicPolicy::new(small_config());
        let mut rng = SmallRng::seed_from_u64(7);
        let result = policy.optimize(&jobs, &resources, &mut rng).unwrap();

        assert_eq!(result.iterations, 30);
        assert_eq!(result.history.len(), 30);
        let mut last = result.initial_best_fitness;
        for stats in &result.history {
            assert!(stats.best_fitness <= last);
            assert!(stats.mean_fitness >= stats.best_fitness - 1e-9);
            last = stats.best_fitness;
        }
        assert_eq!(last, result.best_fitness);
    }

    #[test]
    fn test_same_seed_same_assignment() {
        let (jobs, resources) = heterogeneous(50, 8, 3);
        let policy = MetaheuristicPolicy::new(small_config());

        let r1 = policy
            .optimize(&jobs, &resources, &mut SmallRng::seed_from_u64(42))
            .unwrap();
        let r2 = policy
            .optimize(&jobs, &resources, &mut SmallRng::seed_from_u64(42))
            .unwrap();

        assert_eq!(r1.assignment, r2.assignment);
        assert_eq!(r1.best_fitness.to_bits(), r2.best_fitness.to_bits());
        assert_eq!(r1.history, r2.history);
    }

    #[test]
    fn test_assignment_matches_reported_fitness() {
        let (jobs, resources) = heterogeneous(25, 4, 4);
        let policy = MetaheuristicPolicy::new(small_config());
        let mut rng = SmallRng::seed_from_u64(9);
        let result = policy.optimize(&jobs, &resources, &mut rng).unwrap();

        let evaluator = FitnessEvaluator::new(&jobs, &resources).unwrap();
        let makespan = evaluator.assignment_makespan(&result.assignment).unwrap();
        assert!((makespan - result.best_fitness).abs() < 1e-9);
        assert_eq!(result.assignment.len(), jobs.len());
    }

    #[test]
    fn test_zero_iterations_returns_initial_best() {
        let (jobs, resources) = heterogeneous(10, 3, 5);
        let policy = MetaheuristicPolicy::new(small_config().with_max_iterations(0));
        let mut rng = SmallRng::seed_from_u64(1);
        let result = policy.optimize(&jobs, &resources, &mut rng).unwrap();

        assert_eq!(result.iterations, 0);
        assert!(result.history.is_empty());
        assert_eq!(result.best_fitness, result.initial_best_fitness);
    }

    #[test]
    fn test_finds_balanced_split() {
        // Two equal jobs on two equal resources: optimum puts one on each.
        let jobs = vec![Job::new(0, 100.0), Job::new(1, 100.0)];
        let resources = vec![Resource::new(0, 10.0), Resource::new(1, 10.0)];
        let policy = MetaheuristicPolicy::new(small_config());
        let mut rng = SmallRng::seed_from_u64(3);
        let result = policy.optimize(&jobs, &resources, &mut rng).unwrap();

        assert!((result.best_fitness - 10.0).abs() < 1e-10);
        assert_ne!(result.assignment.resource_for(0), result.assignment.resource_for(1));
    }

    #[test]
    fn test_prefers_fast_resource() {
        // A single job belongs on the fastest resource.
        let jobs = vec![Job::new(0, 1000.0)];
        let resources = vec![
            Resource::new(0, 100.0),
            Resource::new(1, 1000.0),
            Resource::new(2, 200.0),
        ];
        let policy = MetaheuristicPolicy::new(small_config());
        let mut rng = SmallRng::seed_from_u64(8);
        let result = policy.optimize(&jobs, &resources, &mut rng).unwrap();

        assert_eq!(result.assignment.resource_for(0), Some(1));
        assert!((result.best_fitness - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_beats_round_robin_on_skewed_speeds() {
        let jobs: Vec<Job> = (0..12).map(|i| Job::new(i, 1000.0)).collect();
        let resources = vec![Resource::new(0, 100.0), Resource::new(1, 10_000.0)];
        let evaluator = FitnessEvaluator::new(&jobs, &resources).unwrap();

        let mut rng = SmallRng::seed_from_u64(5);
        let rr = RoundRobinPolicy.assign(&jobs, &resources, &mut rng).unwrap();
        let rr_makespan = evaluator.assignment_makespan(&rr).unwrap();

        let policy = MetaheuristicPolicy::new(DboConfig::default().with_max_iterations(50));
        let result = policy.optimize(&jobs, &resources, &mut rng).unwrap();
        assert!(result.best_fitness < rr_makespan);
    }

    #[test]
    fn test_cancel_before_start() {
        let (jobs, resources) = heterogeneous(10, 3, 6);
        let flag = Arc::new(AtomicBool::new(true));
        let policy = MetaheuristicPolicy::new(small_config()).with_cancel_flag(flag);
        let mut rng = SmallRng::seed_from_u64(1);
        let result = policy.optimize(&jobs, &resources, &mut rng).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.assignment.len(), 10);
    }

    #[test]
    fn test_unset_cancel_flag_does_not_change_output() {
        let (jobs, resources) = heterogeneous(20, 4, 7);
        let plain = MetaheuristicPolicy::new(small_config());
        let flagged = MetaheuristicPolicy::new(small_config())
            .with_cancel_flag(Arc::new(AtomicBool::new(false)));

        let a = plain
            .optimize(&jobs, &resources, &mut SmallRng::seed_from_u64(2))
            .unwrap();
        let b = flagged
            .optimize(&jobs, &resources, &mut SmallRng::seed_from_u64(2))
            .unwrap();
        assert_eq!(a.assignment, b.assignment);
        assert!(!b.cancelled);
    }

    #[test]
    fn test_policy_empty_workload() {
        let policy = MetaheuristicPolicy::default();
        let mut rng = SmallRng::seed_from_u64(1);
        let a = policy.assign(&[], &[Resource::new(0, 1.0)], &mut rng).unwrap();
        assert!(a.is_empty());

        assert!(matches!(
            policy.optimize(&[], &[Resource::new(0, 1.0)], &mut rng),
            Err(AssignError::EmptyWorkload)
        ));
    }

    #[test]
    fn test_policy_no_resources() {
        let policy = MetaheuristicPolicy::default();
        let mut rng = SmallRng::seed_from_u64(1);
        let result = policy.assign(&[Job::new(0, 1.0)], &[], &mut rng);
        assert!(matches!(result, Err(AssignError::InvalidInput(_))));
    }

    #[test]
    fn test_invalid_resource_speed() {
        let policy = MetaheuristicPolicy::new(small_config());
        let mut rng = SmallRng::seed_from_u64(1);
        let result = policy.assign(&[Job::new(0, 1.0)], &[Resource::new(0, 0.0)], &mut rng);
        assert!(matches!(result, Err(AssignError::InvalidResource(_))));
    }

    #[test]
    fn test_invalid_config() {
        let policy = MetaheuristicPolicy::new(DboConfig::default().with_population_size(0));
        let mut rng = SmallRng::seed_from_u64(1);
        let result = policy.assign(&[Job::new(0, 1.0)], &[Resource::new(0, 1.0)], &mut rng);
        assert!(matches!(result, Err(AssignError::InvalidInput(_))));
    }
}
