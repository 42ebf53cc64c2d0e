//! Job-to-resource assignment for the U-Engine ecosystem.
//!
//! Maps a set of jobs (work sizes) onto heterogeneous resources (speeds)
//! so that the makespan, the finish time of the most loaded resource, is
//! minimized. Provides a deterministic round-robin baseline and a Dung
//! Beetle Optimizer metaheuristic behind one policy contract, plus the
//! metrics pipeline used to compare them over repeated runs.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Job`, `Resource`, `Assignment`, `CompletionRecord`
//! - **`validation`**: Input integrity checks (duplicate IDs, bad speeds, partial assignments)
//! - **`fitness`**: Makespan evaluation of candidate assignments
//! - **`policy`**: `AssignmentPolicy` contract and `RoundRobinPolicy`
//! - **`dbo`**: Dung Beetle Optimizer (`MetaheuristicPolicy`)
//! - **`metrics`**: Ten-field `RunMetrics` and field-wise averaging
//! - **`execution`**: `ExecutionEngine` seam with time- and space-shared models
//! - **`workload`**: `WorkloadSource` seam with a synthetic cloud generator
//! - **`runner`**: Repeated experiments producing per-run and mean rows
//!
//! # Randomness
//!
//! Nothing in this crate uses a global RNG. Every stochastic operation takes
//! the generator as an argument, so a fixed seed reproduces results exactly.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 5 (parallel machines)
//! - Xue & Shen (2023), "Dung beetle optimizer: a new meta-heuristic algorithm
//!   for global optimization"

pub mod dbo;
pub mod error;
pub mod execution;
pub mod fitness;
pub mod metrics;
pub mod models;
pub mod policy;
pub mod runner;
pub mod validation;
pub mod workload;

pub use error::{AssignError, Result};
