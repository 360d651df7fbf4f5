//! Object storage port for binary uploads.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for object storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A binary object to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Raw bytes.
    pub bytes: Vec<u8>,
    /// MIME type, e.g. `image/png`.
    pub content_type: String,
}

impl StoredObject {
    /// Creates an object from bytes and a MIME type.
    #[must_use]
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }
}

/// Bucket-scoped blob storage with public URLs.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Uploads an object at `path` inside `bucket`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::AlreadyExists`] when the path is taken.
    async fn upload(&self, bucket: &str, path: &str, object: StoredObject) -> StorageResult<()>;

    /// Returns the public URL for an object path.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}

/// Errors returned by object storage adapters.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// An object already exists at the path.
    #[error("object already exists: {bucket}/{path}")]
    AlreadyExists {
        /// Bucket name.
        bucket: String,
        /// Object path.
        path: String,
    },

    /// Transport or backend failure.
    #[error("object storage error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl StorageError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
