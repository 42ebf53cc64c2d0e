//! Resource model.
//!
//! Resources are the processing units jobs are assigned to (virtual
//! machines, workers, cores). Each resource has a speed and a core count;
//! the two together give its effective throughput.
//!
//! Resource list order matters: policies address resources by position,
//! not by id value.

use serde::{Deserialize, Serialize};

/// A processing resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: u32,
    /// Work units processed per time unit per core (must be positive).
    pub speed: f64,
    /// Number of cores (default: 1).
    pub cores: u32,
}

impl Resource {
    /// Creates a single-core resource.
    pub fn new(id: u32, speed: f64) -> Self {
        Self {
            id,
            speed,
            cores: 1,
        }
    }

    /// Sets the core count.
    pub fn with_cores(mut self, cores: u32) -> Self {
        self.cores = cores;
        self
    }

    /// Effective throughput: `speed × cores`.
    #[inline]
    pub fn throughput(&self) -> f64 {
        self.speed * self.cores as f64
    }

    /// Whether the resource can process work at all.
    pub fn is_usable(&self) -> bool {
        self.speed.is_finite() && self.speed > 0.0 && self.cores > 0
    }
}
