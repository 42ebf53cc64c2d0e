//! Assignment policies.
//!
//! A policy turns a job list and a resource list into an [`Assignment`].
//! Policies receive the pseudorandom source explicitly; deterministic
//! policies simply never draw from it.
//!
//! # Policies
//!
//! - [`RoundRobinPolicy`]: cyclic assignment by position, ignores speed.
//! - [`crate::dbo::MetaheuristicPolicy`]: Dung Beetle Optimizer search
//!   minimizing makespan.

mod round_robin;

pub use round_robin::RoundRobinPolicy;

use rand::RngCore;

use crate::error::Result;
use crate::models::{Assignment, Job, Resource};

/// Contract shared by all assignment policies.
pub trait AssignmentPolicy {
    /// Short policy name for logs and reports.
    fn name(&self) -> &str;

    /// Produces a total assignment of `jobs` onto `resources`.
    ///
    /// An empty job list yields an empty assignment.
    fn assign(
        &self,
        jobs: &[Job],
        resources: &[Resource],
        rng: &mut dyn RngCore,
    ) -> Result<Assignment>;
}
