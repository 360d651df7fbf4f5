//! Notice validation errors.

use thiserror::Error;

/// Errors returned while building a notice or its image.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NoticeDomainError {
    /// The title is empty after trimming.
    #[error("notice title must not be empty")]
    EmptyTitle,
    /// The body is empty after trimming.
    #[error("notice content must not be empty")]
    EmptyContent,
    /// A category or tag name is empty after trimming.
    #[error("name must not be empty")]
    EmptyName,
    /// The image file name has no usable extension.
    #[error("image file name has no extension: {0}")]
    MissingImageExtension(String),
    /// The image exceeds the upload limit.
    #[error("image is {size} bytes; the limit is {limit}")]
    ImageTooLarge {
        /// Image size in bytes.
        size: usize,
        /// Limit in bytes.
        limit: usize,
    },
}
