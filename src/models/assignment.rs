//! Assignment (solution) model.
//!
//! An assignment is a total mapping from every job to exactly one
//! resource. Entries are kept ordered by job id so iteration and equality
//! are deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A job → resource mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Job id → resource id.
    pub placements: BTreeMap<u32, u32>,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a job on a resource, returning the previous resource if the
    /// job was already placed.
    pub fn insert(&mut self, job_id: u32, resource_id: u32) -> Option<u32> {
        self.placements.insert(job_id, resource_id)
    }

    /// Sets a placement (builder style).
    pub fn with_placement(mut self, job_id: u32, resource_id: u32) -> Self {
        self.insert(job_id, resource_id);
        self
    }

    /// Resource assigned to a job.
    pub fn resource_for(&self, job_id: u32) -> Option<u32> {
        self.placements.get(&job_id).copied()
    }

    /// Number of placed jobs.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether no job is placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Iterates `(job_id, resource_id)` in job id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.placements.iter().map(|(&j, &r)| (j, r))
    }

    /// Number of jobs placed on each resource.
    pub fn counts_by_resource(&self) -> BTreeMap<u32, usize> {
        let mut counts = BTreeMap::new();
        for &resource_id in self.placements.values() {
            *counts.entry(resource_id).or_insert(0) += 1;
        }
        counts
    }
}

impl FromIterator<(u32, u32)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        Self {
            placements: iter.into_iter().collect(),
        }
    }
}
