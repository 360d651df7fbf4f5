//! Notice image uploads.

use super::NoticeDomainError;
use crate::platform::ports::StoredObject;

/// Largest accepted image: 5 MiB.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// An image attached to a new notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    file_name: String,
    object: StoredObject,
}

impl ImageUpload {
    /// Wraps an image read from `file_name`.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            object: StoredObject::new(bytes, content_type),
        }
    }

    /// Returns the original file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the lowercase extension after the last `.`.
    ///
    /// # Errors
    ///
    /// Returns [`NoticeDomainError::MissingImageExtension`] when there is
    /// none.
    pub fn extension(&self) -> Result<String, NoticeDomainError> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.trim().to_ascii_lowercase())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|ch| ch.is_ascii_alphanumeric()))
            .ok_or_else(|| NoticeDomainError::MissingImageExtension(self.file_name.clone()))
    }

    /// Checks the size limit and extension.
    ///
    /// # Errors
    ///
    /// Returns [`NoticeDomainError::ImageTooLarge`] or
    /// [`NoticeDomainError::MissingImageExtension`].
    pub fn validate(&self) -> Result<(), NoticeDomainError> {
        let size = self.object.bytes.len();
        if size > MAX_IMAGE_BYTES {
            return Err(NoticeDomainError::ImageTooLarge {
                size,
                limit: MAX_IMAGE_BYTES,
            });
        }
        self.extension().map(|_| ())
    }

    /// Consumes the upload, returning the object to store.
    #[must_use]
    pub fn into_object(self) -> StoredObject {
        self.object
    }
}
