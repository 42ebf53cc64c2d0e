//! Execution engines.
//!
//! An [`ExecutionEngine`] runs an assignment and reports per-job timing.
//! Real deployments plug in a discrete-event simulator or a cluster
//! backend; the two engines here are closed-form models for batch
//! workloads where every job arrives at time 0.
//!
//! | Engine | Sharing | Waiting |
//! |--------|---------|---------|
//! | [`TimeSharedEngine`] | All jobs on a resource progress together | none |
//! | [`SpaceSharedEngine`] | One job per core, FIFO in job order | start time |

use tracing::debug;

use crate::error::Result;
use crate::fitness::FitnessEvaluator;
use crate::models::{Assignment, CompletionRecord, Job, Resource};

/// Executes an assignment and returns one record per job.
pub trait ExecutionEngine {
    /// Runs `assignment` and returns completion records in job-list order.
    fn execute(
        &mut self,
        jobs: &[Job],
        resources: &[Resource],
        assignment: &Assignment,
    ) -> Result<Vec<CompletionRecord>>;
}

/// Resolves the assignment to resource positions and groups job positions
/// per resource, preserving job-list order.
fn group_by_resource(
    jobs: &[Job],
    resources: &[Resource],
    assignment: &Assignment,
) -> Result<Vec<Vec<usize>>> {
    let genes = FitnessEvaluator::new(jobs, resources)?.genes_for(assignment)?;
    let mut groups = vec![Vec::new(); resources.len()];
    for (job_idx, &res_idx) in genes.iter().enumerate() {
        groups[res_idx].push(job_idx);
    }
    Ok(groups)
}

/// Processor-sharing model.
///
/// Jobs on the same resource share it equally, each limited to one
/// core's speed. When a job finishes, its share goes to the rest.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeSharedEngine;

impl ExecutionEngine for TimeSharedEngine {
    fn execute(
        &mut self,
        jobs: &[Job],
        resources: &[Resource],
        assignment: &Assignment,
    ) -> Result<Vec<CompletionRecord>> {
        if jobs.is_empty() {
            return Ok(Vec::new());
        }
        let groups = group_by_resource(jobs, resources, assignment)?;
        let mut finish = vec![(0_u32, 0.0); jobs.len()];

        for (resource, group) in resources.iter().zip(&groups) {
            let mut order = group.clone();
            order.sort_by(|&a, &b| jobs[a].length.total_cmp(&jobs[b].length));

            let mut now = 0.0;
            let mut done = 0.0;
            let mut active = order.len();
            for &job_idx in &order {
                let share = (resource.cores as f64 / active as f64).min(1.0);
                now += (jobs[job_idx].length - done) / (resource.speed * share);
                done = jobs[job_idx].length;
                finish[job_idx] = (resource.id, now);
                active -= 1;
            }
        }

        debug!(jobs = jobs.len(), "time-shared execution complete");
        Ok(jobs
            .iter()
            .zip(&finish)
            .map(|(job, &(resource_id, f))| CompletionRecord::new(job.id, resource_id, 0.0, f))
            .collect())
    }
}

/// Queueing model: each core runs one job at a time; jobs take the
/// earliest-free core of their resource in job-list order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaceSharedEngine;

impl ExecutionEngine for SpaceSharedEngine {
    fn execute(
        &mut self,
        jobs: &[Job],
        resources: &[Resource],
        assignment: &Assignment,
    ) -> Result<Vec<CompletionRecord>> {
        if jobs.is_empty() {
            return Ok(Vec::new());
        }
        let groups = group_by_resource(jobs, resources, assignment)?;
        let mut records: Vec<Option<CompletionRecord>> = vec![None; jobs.len()];

        for (resource, group) in resources.iter().zip(&groups) {
            let mut cores = vec![0.0_f64; resource.cores as usize];
            for &job_idx in group {
                let (core, &free_at) = cores
                    .iter()
                    .enumerate()
                    .min_by(|a, b| a.1.total_cmp(b.1))
                    .unwrap_or((0, &0.0));
                let end = free_at + jobs[job_idx].exec_time(resource.speed);
                cores[core] = end;
                records[job_idx] = Some(
                    CompletionRecord::new(jobs[job_idx].id, resource.id, free_at, end)
                        .with_waiting_time(free_at),
                );
            }
        }

        debug!(jobs = jobs.len(), "space-shared execution complete");
        Ok(records.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssignError;

    fn setup() -> (Vec<Job>, Vec<Resource>) {
        let jobs = vec![Job::new(0, 100.0), Job::new(1, 300.0), Job::new(2, 200.0)];
        let resources = vec![Resource::new(7, 100.0), Resource::new(8, 50.0)];
        (jobs, resources)
    }

    #[test]
    fn test_time_shared_processor_sharing() {
        let (jobs, resources) = setup();
        // Jobs 0 and 1 share resource 7; job 2 alone on 8.
        let a: Assignment = vec![(0, 7), (1, 7), (2, 8)].into_iter().collect();
        let records = TimeSharedEngine.execute(&jobs, &resources, &a).unwrap();

        assert_eq!(records.len(), 3);
        // Both at 50/s until job 0 finishes at t=2; job 1 then has 200 left at 100/s.
        assert!((records[0].finish_time - 2.0).abs() < 1e-10);
        assert!((records[1].finish_time - 4.0).abs() < 1e-10);
        assert!((records[2].finish_time - 4.0).abs() < 1e-10);
        assert!(records.iter().all(|r| r.exec_start_time == 0.0 && r.waiting_time == 0.0));
        assert!((records[1].actual_cpu_time - 4.0).abs() < 1e-10);
        assert_eq!(records[2].resource_id, 8);
    }

    #[test]
    fn test_time_shared_multi_core() {
        let jobs = vec![Job::new(0, 100.0), Job::new(1, 100.0)];
        let resources = vec![Resource::new(0, 100.0).with_cores(2)];
        let a: Assignment = vec![(0, 0), (1, 0)].into_iter().collect();
        let records = TimeSharedEngine.execute(&jobs, &resources, &a).unwrap();

        // Each job gets a full core.
        assert!((records[0].finish_time - 1.0).abs() < 1e-10);
        assert!((records[1].finish_time - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_space_shared_fifo() {
        let (jobs, resources) = setup();
        let a: Assignment = vec![(0, 7), (1, 7), (2, 8)].into_iter().collect();
        let records = SpaceSharedEngine.execute(&jobs, &resources, &a).unwrap();

        assert!((records[0].exec_start_time - 0.0).abs() < 1e-10);
        assert!((records[0].finish_time - 1.0).abs() < 1e-10);
        assert!((records[1].exec_start_time - 1.0).abs() < 1e-10);
        assert!((records[1].waiting_time - 1.0).abs() < 1e-10);
        assert!((records[1].finish_time - 4.0).abs() < 1e-10);
        assert!((records[1].actual_cpu_time - 3.0).abs() < 1e-10);
        assert!((records[2].finish_time - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_makespan_matches_fitness_single_core() {
        let (jobs, resources) = setup();
        let a: Assignment = vec![(0, 8), (1, 7), (2, 7)].into_iter().collect();
        let evaluator = FitnessEvaluator::new(&jobs, &resources).unwrap();
        let expected = evaluator.assignment_makespan(&a).unwrap();

        for records in [
            TimeSharedEngine.execute(&jobs, &resources, &a).unwrap(),
            SpaceSharedEngine.execute(&jobs, &resources, &a).unwrap(),
        ] {
            let makespan = records.iter().map(|r| r.finish_time).fold(0.0, f64::max);
            assert!((makespan - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rejects_unknown_resource() {
        let (jobs, resources) = setup();
        let a: Assignment = vec![(0, 7), (1, 7), (2, 99)].into_iter().collect();
        assert!(matches!(
            TimeSharedEngine.execute(&jobs, &resources, &a),
            Err(AssignError::InvalidResource(_))
        ));
    }

    #[test]
    fn test_rejects_partial_assignment() {
        let (jobs, resources) = setup();
        let a: Assignment = vec![(0, 7)].into_iter().collect();
        assert!(matches!(
            SpaceSharedEngine.execute(&jobs, &resources, &a),
            Err(AssignError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_empty_workload() {
        let (_, resources) = setup();
        let records = TimeSharedEngine
            .execute(&[], &resources, &Assignment::new())
            .unwrap();
        assert!(records.is_empty());
    }
}
