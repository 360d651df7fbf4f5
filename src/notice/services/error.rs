//! Service-level errors for notice operations.

use thiserror::Error;

use crate::access::AccessDenied;
use crate::error::ErrorKind;
use crate::notice::{
    domain::{NoticeDomainError, NoticeId},
    ports::NoticeRepositoryError,
};
use crate::platform::ports::StorageError;

/// Service-level errors for notice operations.
#[derive(Debug, Error)]
pub enum NoticeServiceError {
    /// The requester may not perform the operation.
    #[error(transparent)]
    Access(#[from] AccessDenied),
    /// Notice or image validation failed.
    #[error(transparent)]
    Domain(#[from] NoticeDomainError),
    /// The notice does not exist.
    #[error("notice not found: {0}")]
    NoticeNotFound(NoticeId),
    /// Image upload failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] NoticeRepositoryError),
}

impl NoticeServiceError {
    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(_) => ErrorKind::PermissionDenied,
            Self::Domain(_) => ErrorKind::Validation,
            Self::NoticeNotFound(_) | Self::Repository(NoticeRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::Storage(StorageError::AlreadyExists { .. })
            | Self::Repository(
                NoticeRepositoryError::DuplicateTagAssignment { .. }
                | NoticeRepositoryError::DuplicateTagName(_),
            ) => ErrorKind::Conflict,
            Self::Storage(StorageError::Backend(_))
            | Self::Repository(
                NoticeRepositoryError::MissingRow(_) | NoticeRepositoryError::Persistence(_),
            ) => ErrorKind::Upstream,
        }
    }
}

/// Result type for notice service operations.
pub type NoticeServiceResult<T> = Result<T, NoticeServiceError>;
