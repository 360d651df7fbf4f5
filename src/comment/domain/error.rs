//! Comment validation errors.

use thiserror::Error;

/// Errors returned while writing or changing a comment.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CommentDomainError {
    /// The comment text is empty after trimming.
    #[error("comment text must not be empty")]
    EmptyText,
}
