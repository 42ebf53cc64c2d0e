//! Dung Beetle Optimizer (DBO) for job-to-resource assignment.
//!
//! A population-based metaheuristic minimizing makespan. Each candidate
//! ("beetle") encodes one resource position per job.
//!
//! # Algorithm
//!
//! 1. **Init**: P random candidates; global best = strictly lowest
//!    makespan, first in population order on ties.
//! 2. **Iterate** T times (no early stop). For each candidate in order,
//!    build a moved copy gene by gene:
//!    - with probability `p_follow`, take the gene from the global best
//!      as it was before this sweep ("ball rolling");
//!    - otherwise, with probability `p_local` (a second, independent draw),
//!      take a fresh uniform resource ("breeding / local search");
//!    - otherwise keep the gene.
//!
//!    Accept the copy only if its makespan is strictly lower.
//! 3. After the sweep, rescan the population and update the global best.
//!
//! The two draws are nested, not a single three-way partition: a gene is
//! re-drawn with probability `(1 - p_follow) · p_local`.
//!
//! # Complexity
//! O(T · P · n) fitness work where n=jobs.
//!
//! # Reference
//! Xue & Shen (2023), "Dung beetle optimizer: a new meta-heuristic
//! algorithm for global optimization", J. Supercomputing 79.

mod candidate;
mod config;
mod optimizer;

pub use candidate::{Candidate, Population, SweepStats};
pub use config::DboConfig;
pub use optimizer::{DboResult, IterationStats, MetaheuristicPolicy};
