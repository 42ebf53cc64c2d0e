//! Makespan fitness evaluation.
//!
//! The fitness of an assignment is its makespan: the largest total
//! execution time over all resources, where a job of length `L` placed on
//! a resource with throughput `S` contributes `L / S`.
//!
//! ```text
//! makespan = max_r  Σ_{j assigned to r}  length(j) / throughput(r)
//! ```
//!
//! Evaluation is a pure function of its inputs: there is no caching, and
//! re-evaluating the same genes always gives the same value.
//!
//! # Complexity
//! O(n + m) per call where n=jobs, m=resources.

use std::collections::HashMap;

use crate::error::{AssignError, Result};
use crate::models::{Assignment, Job, Resource};

/// Makespan evaluator bound to a job list and a resource list.
///
/// Genes address resources by position in the resource list; gene `i`
/// belongs to the job at position `i` in the job list.
///
/// # Example
/// ```
/// use u_assign::fitness::FitnessEvaluator;
/// use u_assign::models::{Job, Resource};
///
/// let jobs = vec![Job::new(0, 1000.0), Job::new(1, 3000.0)];
/// let resources = vec![Resource::new(10, 500.0), Resource::new(11, 1000.0)];
/// let evaluator = FitnessEvaluator::new(&jobs, &resources).unwrap();
///
/// // Job 0 on resource 10 (2.0), job 1 on resource 11 (3.0)
/// assert_eq!(evaluator.makespan(&[0, 1]).unwrap(), 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct FitnessEvaluator<'a> {
    jobs: &'a [Job],
    resources: &'a [Resource],
    throughputs: Vec<f64>,
}

impl<'a> FitnessEvaluator<'a> {
    /// Creates an evaluator.
    ///
    /// # Errors
    /// - `EmptyWorkload` if `jobs` is empty (makespan is undefined).
    /// - `InvalidInput` if `resources` is empty.
    /// - `InvalidResource` if any resource has a non-positive speed or no cores.
    pub fn new(jobs: &'a [Job], resources: &'a [Resource]) -> Result<Self> {
        if jobs.is_empty() {
            return Err(AssignError::EmptyWorkload);
        }
        if resources.is_empty() {
            return Err(AssignError::InvalidInput("no resources to evaluate against".into()));
        }
        if let Some(bad) = resources.iter().find(|r| !r.is_usable()) {
            return Err(AssignError::InvalidResource(format!(
                "resource {} has speed {} and {} core(s)",
                bad.id, bad.speed, bad.cores
            )));
        }

        Ok(Self {
            jobs,
            resources,
            throughputs: resources.iter().map(Resource::throughput).collect(),
        })
    }

    /// Number of jobs (gene count).
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Number of resources (exclusive upper bound of a gene).
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Accumulated execution time per resource position.
    ///
    /// # Errors
    /// - `InvalidInput` if `genes.len()` differs from the job count.
    /// - `InvalidResource` if a gene is outside `[0, resource_count)`.
    pub fn loads(&self, genes: &[usize]) -> Result<Vec<f64>> {
        if genes.len() != self.jobs.len() {
            return Err(AssignError::InvalidInput(format!(
                "expected {} genes, got {}",
                self.jobs.len(),
                genes.len()
            )));
        }

        let mut loads = vec![0.0; self.throughputs.len()];
        for (job, &gene) in self.jobs.iter().zip(genes) {
            let throughput = self.throughputs.get(gene).copied().ok_or_else(|| {
                AssignError::InvalidResource(format!(
                    "job {} assigned to resource index {gene}, only {} resources",
                    job.id,
                    self.throughputs.len()
                ))
            })?;
            loads[gene] += job.exec_time(throughput);
        }
        Ok(loads)
    }

    /// Makespan of a gene vector.
    pub fn makespan(&self, genes: &[usize]) -> Result<f64> {
        Ok(self.loads(genes)?.into_iter().fold(0.0, f64::max))
    }

    /// Converts an assignment into positional genes.
    ///
    /// # Errors
    /// - `InvalidInput` if a job has no placement.
    /// - `InvalidResource` if a placement names an unknown resource id.
    pub fn genes_for(&self, assignment: &Assignment) -> Result<Vec<usize>> {
        let position: HashMap<u32, usize> = self
            .resources
            .iter()
            .enumerate()
            .map(|(idx, r)| (r.id, idx))
            .collect();

        self.jobs
            .iter()
            .map(|job| {
                let resource_id = assignment.resource_for(job.id).ok_or_else(|| {
                    AssignError::InvalidInput(format!("job {} is not assigned", job.id))
                })?;
                position.get(&resource_id).copied().ok_or_else(|| {
                    AssignError::InvalidResource(format!(
                        "job {} references unknown resource {resource_id}",
                        job.id
                    ))
                })
            })
            .collect()
    }

    /// Makespan of an assignment keyed by ids.
    pub fn assignment_makespan(&self, assignment: &Assignment) -> Result<f64> {
        let genes = self.genes_for(assignment)?;
        self.makespan(&genes)
    }

    /// Resolves genes to an assignment keyed by job id and resource id.
    pub fn to_assignment(&self, genes: &[usize]) -> Result<Assignment> {
        if genes.len() != self.jobs.len() {
            return Err(AssignError::InvalidInput(format!(
                "expected {} genes, got {}",
                self.jobs.len(),
                genes.len()
            )));
        }
        self.jobs
            .iter()
            .zip(genes)
            .map(|(job, &gene)| {
                self.resources
                    .get(gene)
                    .map(|r| (job.id, r.id))
                    .ok_or_else(|| {
                        AssignError::InvalidResource(format!(
                            "resource index {gene} out of range"
                        ))
                    })
            })
            .collect()
    }
}

/// Convenience: makespan of `genes` without keeping an evaluator around.
pub fn makespan(genes: &[usize], jobs: &[Job], resources: &[Resource]) -> Result<f64> {
    FitnessEvaluator::new(jobs, resources)?.makespan(genes)
}
