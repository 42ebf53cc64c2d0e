//! Candidate encoding and population for the Dung Beetle Optimizer.
//!
//! # Encoding
//!
//! A candidate is a vector of resource positions, one gene per job in
//! job-list order. Each candidate owns its buffer; moves are computed on a
//! copy and written back only when they strictly improve the makespan.
//!
//! # Best tracking
//!
//! The population keeps a separate copy of the global best. It is chosen
//! by strictly-lower fitness with the first candidate in population order
//! winning ties, and it only changes between sweeps, never during one.

use rand::Rng;

use super::DboConfig;
use crate::error::{AssignError, Result};
use crate::fitness::FitnessEvaluator;

/// One candidate assignment (a "beetle").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Resource position per job position.
    pub genes: Vec<usize>,
}

impl Candidate {
    /// Creates a candidate with every gene uniform in `[0, resource_count)`.
    pub fn random<R: Rng + ?Sized>(job_count: usize, resource_count: usize, rng: &mut R) -> Self {
        Self {
            genes: (0..job_count)
                .map(|_| rng.random_range(0..resource_count))
                .collect(),
        }
    }

    /// Builds a moved copy of this candidate.
    ///
    /// Per gene, a first draw decides whether to follow `best`; only when
    /// it does not, a second independent draw decides whether to jump to a
    /// fresh random resource. Otherwise the gene is kept.
    pub fn moved<R: Rng + ?Sized>(
        &self,
        best: &Candidate,
        config: &DboConfig,
        resource_count: usize,
        rng: &mut R,
    ) -> Candidate {
        let genes = self
            .genes
            .iter()
            .zip(&best.genes)
            .map(|(&gene, &best_gene)| {
                if rng.random::<f64>() < config.p_follow {
                    best_gene
                } else if rng.random::<f64>() < config.p_local {
                    rng.random_range(0..resource_count)
                } else {
                    gene
                }
            })
            .collect();
        Candidate { genes }
    }

    /// Copies another candidate's genes into this buffer.
    pub fn overwrite(&mut self, other: &Candidate) {
        self.genes.copy_from_slice(&other.genes);
    }
}

/// Outcome of one sweep over the population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepStats {
    /// Candidates whose move was accepted.
    pub improved: usize,
    /// Mean fitness of the population after the sweep.
    pub mean_fitness: f64,
}

/// Ordered population plus the tracked global best.
#[derive(Debug, Clone)]
pub struct Population {
    members: Vec<Candidate>,
    best: Candidate,
    best_fitness: f64,
}

impl Population {
    /// Generates and evaluates `config.population_size` random candidates.
    pub fn initialize<R: Rng + ?Sized>(
        config: &DboConfig,
        evaluator: &FitnessEvaluator<'_>,
        rng: &mut R,
    ) -> Result<Self> {
        let n = evaluator.job_count();
        let m = evaluator.resource_count();

        let members: Vec<Candidate> = (0..config.population_size)
            .map(|_| Candidate::random(n, m, rng))
            .collect();

        let mut best_idx = None;
        let mut best_fitness = f64::INFINITY;
        for (idx, member) in members.iter().enumerate() {
            let f = evaluator.makespan(&member.genes)?;
            if best_idx.is_none() || f < best_fitness {
                best_idx = Some(idx);
                best_fitness = f;
            }
        }

        let best_idx = best_idx
            .ok_or_else(|| AssignError::InvalidInput("population is empty".into()))?;
        let best = members[best_idx].clone();

        Ok(Self {
            members,
            best,
            best_fitness,
        })
    }

    /// Moves every candidate once, in order, against the current best.
    ///
    /// Both the moved copy and the original are re-evaluated; the move is
    /// kept only if strictly better. The global best is not touched here.
    pub fn sweep<R: Rng + ?Sized>(
        &mut self,
        config: &DboConfig,
        evaluator: &FitnessEvaluator<'_>,
        rng: &mut R,
    ) -> Result<SweepStats> {
        let m = evaluator.resource_count();
        let mut improved = 0;
        let mut fitness_sum = 0.0;

        for member in self.members.iter_mut() {
            let moved = member.moved(&self.best, config, m, rng);
            let new_fitness = evaluator.makespan(&moved.genes)?;
            let old_fitness = evaluator.makespan(&member.genes)?;
            if new_fitness < old_fitness {
                member.overwrite(&moved);
                improved += 1;
                fitness_sum += new_fitness;
            } else {
                fitness_sum += old_fitness;
            }
        }

        Ok(SweepStats {
            improved,
            mean_fitness: fitness_sum / self.members.len() as f64,
        })
    }

    /// Rescans the population in order and adopts any candidate strictly
    /// better than the current best. Returns whether the best changed.
    pub fn refresh_best(&mut self, evaluator: &FitnessEvaluator<'_>) -> Result<bool> {
        let mut changed = false;
        for member in &self.members {
            let f = evaluator.makespan(&member.genes)?;
            if f < self.best_fitness {
                self.best = member.clone();
                self.best_fitness = f;
                changed = true;
            }
        }
        Ok(changed)
    }

    /// Current global best.
    pub fn best(&self) -> &Candidate {
        &self.best
    }

    /// Fitness of the current global best.
    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    /// Candidates in population order.
    pub fn members(&self) -> &[Candidate] {
        &self.members
    }

    /// Population size.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the population has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
