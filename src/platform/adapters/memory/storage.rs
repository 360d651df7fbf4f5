//! In-memory object storage.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::platform::ports::{ObjectStorage, StorageError, StorageResult, StoredObject};

/// Bucketed blob store that produces platform-style public URLs.
#[derive(Debug, Clone)]
pub struct InMemoryObjectStorage {
    base_url: String,
    objects: Arc<RwLock<HashMap<(String, String), StoredObject>>>,
}

impl InMemoryObjectStorage {
    /// Creates an empty store whose public URLs are rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            objects: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns a stored object.
    ///
    /// # Errors
    ///
    /// Returns a backend error when lock acquisition fails.
    pub fn get(&self, bucket: &str, path: &str) -> StorageResult<Option<StoredObject>> {
        let objects = self
            .objects
            .read()
            .map_err(|err| StorageError::backend(std::io::Error::other(err.to_string())))?;
        Ok(objects
            .get(&(bucket.to_owned(), path.to_owned()))
            .cloned())
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn upload(&self, bucket: &str, path: &str, object: StoredObject) -> StorageResult<()> {
        let mut objects = self
            .objects
            .write()
            .map_err(|err| StorageError::backend(std::io::Error::other(err.to_string())))?;
        let key = (bucket.to_owned(), path.to_owned());
        if objects.contains_key(&key) {
            return Err(StorageError::AlreadyExists {
                bucket: bucket.to_owned(),
                path: path.to_owned(),
            });
        }
        objects.insert(key, object);
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{bucket}/{path}",
            self.base_url
        )
    }
}
