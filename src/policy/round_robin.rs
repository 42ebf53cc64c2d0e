//! Cyclic round-robin assignment.
//!
//! # Algorithm
//! Job at position `i` goes to the resource at position `i mod m`.
//! Every resource receives `⌊n/m⌋` or `⌊n/m⌋ + 1` jobs; resource speed
//! is ignored.
//!
//! # Complexity
//! O(n) where n=jobs.

use rand::RngCore;
use tracing::debug;

use super::AssignmentPolicy;
use crate::error::{AssignError, Result};
use crate::models::{Assignment, Job, Resource};

/// Deterministic cyclic assignment.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_assign::models::{Job, Resource};
/// use u_assign::policy::{AssignmentPolicy, RoundRobinPolicy};
///
/// let jobs: Vec<Job> = (0..5).map(|i| Job::new(i, 1000.0)).collect();
/// let resources = vec![Resource::new(10, 500.0), Resource::new(20, 900.0)];
/// let mut rng = SmallRng::seed_from_u64(0);
///
/// let a = RoundRobinPolicy.assign(&jobs, &resources, &mut rng).unwrap();
/// assert_eq!(a.resource_for(0), Some(10));
/// assert_eq!(a.resource_for(1), Some(20));
/// assert_eq!(a.resource_for(4), Some(10));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobinPolicy;

impl RoundRobinPolicy {
    /// Creates the policy.
    pub fn new() -> Self {
        Self
    }

    /// Positional genes: `i mod resource_count` for each job position.
    pub fn genes(job_count: usize, resource_count: usize) -> Result<Vec<usize>> {
        if resource_count == 0 {
            return Err(AssignError::InvalidInput(
                "round-robin requires at least one resource".into(),
            ));
        }
        Ok((0..job_count).map(|i| i % resource_count).collect())
    }
}

impl AssignmentPolicy for RoundRobinPolicy {
    fn name(&self) -> &str {
        "round-robin"
    }

    fn assign(
        &self,
        jobs: &[Job],
        resources: &[Resource],
        _rng: &mut dyn RngCore,
    ) -> Result<Assignment> {
        let genes = Self::genes(jobs.len(), resources.len())?;
        let assignment: Assignment = jobs
            .iter()
            .zip(genes)
            .map(|(job, idx)| (job.id, resources[idx].id))
            .collect();

        debug!(
            jobs = jobs.len(),
            resources = resources.len(),
            "round-robin cyclic assignment"
        );
        Ok(assignment)
    }
}
