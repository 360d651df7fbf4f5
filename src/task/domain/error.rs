//! Error types for task domain validation and parsing.

use super::AssignmentId;
use thiserror::Error;

/// Errors returned while constructing or changing tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The primary POC's assignment row cannot be removed directly.
    #[error("assignment {0} belongs to the primary POC; transfer the POC first")]
    PrimaryPocRemoval(AssignmentId),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
