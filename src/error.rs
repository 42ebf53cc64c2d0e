//! Error types for assignment, evaluation, and metrics.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur while assigning jobs or aggregating results.
#[derive(Debug, Error)]
pub enum AssignError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("workload contains no jobs")]
    EmptyWorkload,

    #[error("no completion records to aggregate")]
    EmptyCompletionSet,

    #[error("makespan is zero")]
    ZeroMakespan,

    #[error("validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    #[error("execution error: {0}")]
    Execution(String),
}

pub type Result<T> = std::result::Result<T, AssignError>;
