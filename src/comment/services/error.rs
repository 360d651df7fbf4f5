//! Service-level errors for comment operations.

use thiserror::Error;

use crate::access::AccessDenied;
use crate::comment::{
    domain::{CommentDomainError, CommentId},
    ports::CommentRepositoryError,
};
use crate::error::ErrorKind;
use crate::task::{domain::TaskId, ports::TaskRepositoryError};

/// Service-level errors for comment operations.
#[derive(Debug, Error)]
pub enum CommentServiceError {
    /// The requester may not perform the operation.
    #[error(transparent)]
    Access(#[from] AccessDenied),
    /// Comment validation failed.
    #[error(transparent)]
    Domain(#[from] CommentDomainError),
    /// The comment does not exist.
    #[error("comment not found: {0}")]
    CommentNotFound(CommentId),
    /// The task being commented on does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// Comment repository operation failed.
    #[error(transparent)]
    Repository(#[from] CommentRepositoryError),
    /// Task lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
}

impl CommentServiceError {
    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(_) => ErrorKind::PermissionDenied,
            Self::Domain(_) => ErrorKind::Validation,
            Self::CommentNotFound(_)
            | Self::TaskNotFound(_)
            | Self::Repository(CommentRepositoryError::NotFound(_))
            | Self::Tasks(TaskRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Tasks(TaskRepositoryError::DuplicateAssignment { .. }) => ErrorKind::Conflict,
            Self::Repository(CommentRepositoryError::Persistence(_))
            | Self::Tasks(TaskRepositoryError::Persistence(_)) => ErrorKind::Upstream,
        }
    }
}

/// Result type for comment service operations.
pub type CommentServiceResult<T> = Result<T, CommentServiceError>;
