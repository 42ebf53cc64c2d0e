//! Input validation for assignment problems.
//!
//! Checks structural integrity of jobs, resources, and assignments
//! before optimization or execution. Detects:
//! - Duplicate IDs
//! - Non-positive job lengths
//! - Unusable resources (non-positive speed, zero cores)
//! - Partial assignments and dangling resource references
//!
//! All problems are collected rather than stopping at the first one.

use crate::models::{Assignment, Job, Resource};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A job has a zero, negative, or non-finite length.
    InvalidLength,
    /// A resource has a non-positive speed or no cores.
    InvalidResource,
    /// A job is missing from the assignment.
    UnassignedJob,
    /// The assignment places a job that is not in the workload.
    UnknownJob,
    /// The assignment references a resource that doesn't exist.
    InvalidResourceReference,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates jobs and resources.
///
/// Checks:
/// 1. No duplicate job IDs
/// 2. No duplicate resource IDs
/// 3. Every job length is finite and positive
/// 4. Every resource speed is finite and positive, with at least one core
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(jobs: &[Job], resources: &[Resource]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut resource_ids = HashSet::new();
    for r in resources {
        if !resource_ids.insert(r.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate resource ID: {}", r.id),
            ));
        }
        if !r.is_usable() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidResource,
                format!(
                    "Resource {} has speed {} and {} core(s)",
                    r.id, r.speed, r.cores
                ),
            ));
        }
    }

    let mut job_ids = HashSet::new();
    for job in jobs {
        if !job_ids.insert(job.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate job ID: {}", job.id),
            ));
        }
        if !(job.length.is_finite() && job.length > 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidLength,
                format!("Job {} has length {}", job.id, job.length),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates that an assignment is total over `jobs` and only references
/// resources in `resources`.
pub fn validate_assignment(
    assignment: &Assignment,
    jobs: &[Job],
    resources: &[Resource],
) -> ValidationResult {
    let mut errors = Vec::new();

    let resource_ids: HashSet<u32> = resources.iter().map(|r| r.id).collect();
    let job_ids: HashSet<u32> = jobs.iter().map(|j| j.id).collect();

    for job in jobs {
        if assignment.resource_for(job.id).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnassignedJob,
                format!("Job {} has no resource", job.id),
            ));
        }
    }

    for (job_id, resource_id) in assignment.iter() {
        if !job_ids.contains(&job_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownJob,
                format!("Assignment places unknown job {job_id}"),
            ));
        }
        if !resource_ids.contains(&resource_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidResourceReference,
                format!("Job {job_id} references unknown resource {resource_id}"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
