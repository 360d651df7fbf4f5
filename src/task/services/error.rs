//! Service-level errors for task operations.

use thiserror::Error;

use crate::access::AccessDenied;
use crate::error::ErrorKind;
use crate::identity::{domain::ProfileId, ports::ProfileRepositoryError};
use crate::task::{
    domain::{AssignmentId, TaskDomainError, TaskId},
    ports::TaskRepositoryError,
};

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// The requester may not perform the operation.
    #[error(transparent)]
    Access(#[from] AccessDenied),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// A referenced person is not on the roster.
    #[error("profile not found: {0}")]
    ProfileNotFound(ProfileId),
    /// The assignment row does not exist on the task.
    #[error("assignment not found: {0}")]
    AssignmentNotFound(AssignmentId),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Profile lookup failed.
    #[error(transparent)]
    Profiles(#[from] ProfileRepositoryError),
}

impl TaskServiceError {
    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(_) => ErrorKind::PermissionDenied,
            Self::Domain(_) => ErrorKind::Validation,
            Self::TaskNotFound(_)
            | Self::ProfileNotFound(_)
            | Self::AssignmentNotFound(_)
            | Self::Repository(TaskRepositoryError::NotFound(_))
            | Self::Profiles(ProfileRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Repository(TaskRepositoryError::DuplicateAssignment { .. }) => {
                ErrorKind::Conflict
            }
            Self::Repository(TaskRepositoryError::Persistence(_))
            | Self::Profiles(ProfileRepositoryError::Persistence(_)) => ErrorKind::Upstream,
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;
