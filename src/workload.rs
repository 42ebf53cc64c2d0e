//! Workload sources.
//!
//! A [`WorkloadSource`] supplies a fresh job/resource set for each
//! experiment repetition. [`SyntheticWorkload`] generates a heterogeneous
//! cloud-style infrastructure (datacenters × hosts × VMs) and random job
//! lengths; [`FixedWorkload`] replays a caller-supplied set, e.g. the
//! output of a dataset loader.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{AssignError, Result};
use crate::models::{Job, Resource};

/// Jobs and resources for one repetition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    /// Jobs in submission order.
    pub jobs: Vec<Job>,
    /// Resources in positional order.
    pub resources: Vec<Resource>,
}

impl Workload {
    /// Creates a workload.
    pub fn new(jobs: Vec<Job>, resources: Vec<Resource>) -> Self {
        Self { jobs, resources }
    }
}

/// Supplies workloads to the experiment runner.
pub trait WorkloadSource {
    /// Produces the workload for the next repetition.
    fn next_workload(&mut self, rng: &mut dyn RngCore) -> Result<Workload>;
}

/// Parameters of the synthetic workload generator.
///
/// Speeds and lengths are drawn as integers, uniform over the half-open
/// ranges `[min_speed, max_speed)` and `[min_length, max_length)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Number of datacenters.
    pub datacenters: u32,
    /// Hosts per datacenter.
    pub hosts_per_datacenter: u32,
    /// Resources (VMs) per host.
    pub resources_per_host: u32,
    /// Cores per resource.
    pub cores_per_resource: u32,
    /// Minimum resource speed (inclusive).
    pub min_speed: u32,
    /// Maximum resource speed (exclusive).
    pub max_speed: u32,
    /// Number of jobs.
    pub job_count: u32,
    /// Minimum job length (inclusive).
    pub min_length: u64,
    /// Maximum job length (exclusive).
    pub max_length: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            datacenters: 6,
            hosts_per_datacenter: 3,
            resources_per_host: 3,
            cores_per_resource: 1,
            min_speed: 500,
            max_speed: 2000,
            job_count: 100,
            min_length: 5000,
            max_length: 20_000,
        }
    }
}

impl WorkloadConfig {
    /// Sets the infrastructure shape.
    pub fn with_topology(mut self, datacenters: u32, hosts: u32, resources_per_host: u32) -> Self {
        self.datacenters = datacenters;
        self.hosts_per_datacenter = hosts;
        self.resources_per_host = resources_per_host;
        self
    }

    /// Sets the speed range.
    pub fn with_speed_range(mut self, min: u32, max: u32) -> Self {
        self.min_speed = min;
        self.max_speed = max;
        self
    }

    /// Sets the job count.
    pub fn with_job_count(mut self, count: u32) -> Self {
        self.job_count = count;
        self
    }

    /// Sets the job length range.
    pub fn with_length_range(mut self, min: u64, max: u64) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// Total number of resources, or `None` if the topology overflows `u32`.
    pub fn resource_count(&self) -> Option<u32> {
        self.datacenters
            .checked_mul(self.hosts_per_datacenter)?
            .checked_mul(self.resources_per_host)
    }

    /// Checks ranges and counts, returning the resource count.
    pub fn validate(&self) -> Result<u32> {
        let resource_count = self.resource_count().ok_or_else(|| {
            AssignError::InvalidInput(format!(
                "topology {} x {} x {} overflows the resource count",
                self.datacenters, self.hosts_per_datacenter, self.resources_per_host
            ))
        })?;
        if resource_count == 0 {
            return Err(AssignError::InvalidInput("workload has no resources".into()));
        }
        if self.cores_per_resource == 0 {
            return Err(AssignError::InvalidInput(
                "cores_per_resource must be positive".into(),
            ));
        }
        if self.min_speed == 0 || self.min_speed >= self.max_speed {
            return Err(AssignError::InvalidInput(format!(
                "invalid speed range [{}, {})",
                self.min_speed, self.max_speed
            )));
        }
        if self.min_length == 0 || self.min_length >= self.max_length {
            return Err(AssignError::InvalidInput(format!(
                "invalid length range [{}, {})",
                self.min_length, self.max_length
            )));
        }
        Ok(resource_count)
    }
}

/// Random heterogeneous workload generator.
///
/// Resources are generated first, then jobs; ids are positional from 0.
#[derive(Debug, Clone, Default)]
pub struct SyntheticWorkload {
    config: WorkloadConfig,
}

impl SyntheticWorkload {
    /// Creates a generator.
    pub fn new(config: WorkloadConfig) -> Self {
        Self { config }
    }

    /// The generator configuration.
    pub fn config(&self) -> &WorkloadConfig {
        &self.config
    }
}

impl WorkloadSource for SyntheticWorkload {
    fn next_workload(&mut self, rng: &mut dyn RngCore) -> Result<Workload> {
        let c = &self.config;
        let resource_count = c.validate()?;

        let resources = (0..resource_count)
            .map(|id| {
                let speed = rng.random_range(c.min_speed..c.max_speed);
                Resource::new(id, speed as f64).with_cores(c.cores_per_resource)
            })
            .collect();
        let jobs = (0..c.job_count)
            .map(|id| Job::new(id, rng.random_range(c.min_length..c.max_length) as f64))
            .collect();

        Ok(Workload::new(jobs, resources))
    }
}

/// Replays the same workload every repetition.
#[derive(Debug, Clone, Default)]
pub struct FixedWorkload {
    workload: Workload,
}

impl FixedWorkload {
    /// Wraps a workload.
    pub fn new(workload: Workload) -> Self {
        Self { workload }
    }
}

impl WorkloadSource for FixedWorkload {
    fn next_workload(&mut self, _rng: &mut dyn RngCore) -> Result<Workload> {
        Ok(self.workload.clone())
    }
}
