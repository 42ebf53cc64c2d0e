//! DBO configuration.

use serde::{Deserialize, Serialize};

use crate::error::{AssignError, Result};

/// Parameters of the Dung Beetle Optimizer.
///
/// # Defaults
/// | Parameter | Value |
/// |-----------|-------|
/// | `population_size` | 30 |
/// | `max_iterations` | 200 |
/// | `p_local` | 0.7 |
/// | `p_follow` | 0.2 |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DboConfig {
    /// Number of candidates (beetles) in the population.
    pub population_size: usize,
    /// Number of full sweeps over the population. No early stop.
    pub max_iterations: usize,
    /// Probability that a gene not copied from the best is re-drawn at random.
    pub p_local: f64,
    /// Probability that a gene is copied from the global best.
    pub p_follow: f64,
}

impl Default for DboConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            max_iterations: 200,
            p_local: 0.7,
            p_follow: 0.2,
        }
    }
}

impl DboConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the iteration count.
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Sets the local-search probability.
    pub fn with_p_local(mut self, p: f64) -> Self {
        self.p_local = p;
        self
    }

    /// Sets the follow-best probability.
    pub fn with_p_follow(mut self, p: f64) -> Self {
        self.p_follow = p;
        self
    }

    /// Checks that the population is non-empty and both probabilities lie
    /// in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(AssignError::InvalidInput(
                "population_size must be at least 1".into(),
            ));
        }
        for (name, p) in [("p_local", self.p_local), ("p_follow", self.p_follow)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(AssignError::InvalidInput(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = DboConfig::default();
        assert_eq!(c.population_size, 30);
        assert_eq!(c.max_iterations, 200);
        assert!((c.p_local - 0.7).abs() < 1e-10);
        assert!((c.p_follow - 0.2).abs() < 1e-10);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let c = DboConfig::default()
            .with_population_size(8)
            .with_max_iterations(15)
            .with_p_local(0.5)
            .with_p_follow(0.1);
        assert_eq!(c.population_size, 8);
        assert_eq!(c.max_iterations, 15);
        assert!((c.p_local - 0.5).abs() < 1e-10);
        assert!((c.p_follow - 0.1).abs() < 1e-10);
    }

    #[test]
    fn test_validate_rejects() {
        assert!(DboConfig::default().with_population_size(0).validate().is_err());
        assert!(DboConfig::default().with_p_local(1.5).validate().is_err());
        assert!(DboConfig::default().with_p_follow(-0.1).validate().is_err());
        assert!(DboConfig::default().with_p_follow(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_partial_deserialize() {
        let c: DboConfig = serde_json::from_str(r#"{"max_iterations": 50}"#).unwrap();
        assert_eq!(c.max_iterations, 50);
        assert_eq!(c.population_size, 30);
    }
}
