//! Repository port for roster profiles.

use crate::identity::domain::{Profile, ProfileId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for profile repository operations.
pub type ProfileRepositoryResult<T> = Result<T, ProfileRepositoryError>;

/// Profile persistence contract.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Finds a profile by identifier.
    ///
    /// Returns `None` when the profile does not exist.
    async fn find_by_id(&self, id: ProfileId) -> ProfileRepositoryResult<Option<Profile>>;

    /// Returns every profile on the roster, in no particular order.
    async fn list_all(&self) -> ProfileRepositoryResult<Vec<Profile>>;

    /// Stores the profile unless one with the same identifier exists.
    ///
    /// Returns `true` when a row was created. An existing profile is never
    /// modified, so concurrent sign-ups cannot reset a role.
    async fn provision(&self, profile: &Profile) -> ProfileRepositoryResult<bool>;

    /// Persists changes to an existing profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::NotFound`] when the profile does not
    /// exist.
    async fn update(&self, profile: &Profile) -> ProfileRepositoryResult<()>;

    /// Deletes a profile together with the tasks it is primary POC of and
    /// every assignment row referencing it.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::NotFound`] when the profile does not
    /// exist.
    async fn delete(&self, id: ProfileId) -> ProfileRepositoryResult<()>;
}

/// Errors returned by profile repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProfileRepositoryError {
    /// The profile was not found.
    #[error("profile not found: {0}")]
    NotFound(ProfileId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProfileRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
