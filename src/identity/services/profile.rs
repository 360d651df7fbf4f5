//! Profile resolution, provisioning and roster administration.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;
use tracing::{debug, info};

use crate::access::{AccessDenied, Action, Resource, authorize};
use crate::error::ErrorKind;
use crate::identity::{
    domain::{Principal, Profile, ProfileId, ProfileUpdate, Role},
    ports::{ProfileRepository, ProfileRepositoryError},
};

/// Service-level errors for profile operations.
#[derive(Debug, Error)]
pub enum ProfileServiceError {
    /// The requester may not perform the operation.
    #[error(transparent)]
    Access(#[from] AccessDenied),
    /// No profile exists for the principal.
    #[error("profile not found: {0}")]
    NotFound(ProfileId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProfileRepositoryError),
}

impl ProfileServiceError {
    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(_) => ErrorKind::PermissionDenied,
            Self::NotFound(_) | Self::Repository(ProfileRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::Repository(ProfileRepositoryError::Persistence(_)) => ErrorKind::Upstream,
        }
    }
}

/// Result type for profile service operations.
pub type ProfileServiceResult<T> = Result<T, ProfileServiceError>;

/// Roster orchestration service.
#[derive(Clone)]
pub struct ProfileService<R, C>
where
    R: ProfileRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ProfileService<R, C>
where
    R: ProfileRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new profile service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Loads the profile of a principal.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::NotFound`] when no profile exists.
    pub async fn resolve_profile(&self, id: ProfileId) -> ProfileServiceResult<Profile> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProfileServiceError::NotFound(id))
    }

    /// Resolves the principal's current role and display name.
    ///
    /// Always reads the store; callers re-resolve after role changes.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::NotFound`] when no profile exists.
    pub async fn resolve_principal(&self, id: ProfileId) -> ProfileServiceResult<Principal> {
        let profile = self.resolve_profile(id).await?;
        debug!(profile_id = %id, role = %profile.role(), "principal resolved");
        Ok(profile.principal())
    }

    /// Ensures a `member` profile exists for a newly signed-up principal.
    ///
    /// Idempotent: an existing profile, including its role, is left as is
    /// and returned.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Repository`] when persistence fails.
    pub async fn provision_profile(
        &self,
        id: ProfileId,
        email: &str,
        full_name: Option<&str>,
    ) -> ProfileServiceResult<Profile> {
        let candidate = Profile::new(id, email, full_name.map(str::to_owned), &*self.clock);
        let created = self.repository.provision(&candidate).await?;
        if created {
            info!(profile_id = %id, "profile provisioned");
        } else {
            debug!(profile_id = %id, "profile already provisioned");
        }
        self.resolve_profile(id).await
    }

    /// Applies self-service changes to the requester's own profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::NotFound`] when the requester has no
    /// profile.
    pub async fn update_own_profile(
        &self,
        requester: &Principal,
        update: ProfileUpdate,
    ) -> ProfileServiceResult<Profile> {
        authorize(
            requester,
            &Action::UpdateProfile,
            &Resource::Member(requester.id()),
        )?;
        let mut profile = self.resolve_profile(requester.id()).await?;
        profile.apply_update(update, &*self.clock);
        self.repository.update(&profile).await?;
        info!(profile_id = %requester.id(), "profile updated");
        self.resolve_profile(requester.id()).await
    }

    /// Changes another person's role.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Access`] unless the requester is an
    /// admin, or [`ProfileServiceError::NotFound`] for an unknown target.
    pub async fn change_role(
        &self,
        requester: &Principal,
        target: ProfileId,
        role: Role,
    ) -> ProfileServiceResult<Profile> {
        authorize(requester, &Action::ChangeRole, &Resource::Member(target))?;
        let mut profile = self.resolve_profile(target).await?;
        profile.set_role(role, &*self.clock);
        self.repository.update(&profile).await?;
        info!(profile_id = %target, %role, changed_by = %requester.id(), "role changed");
        self.resolve_profile(target).await
    }

    /// Removes a person from the roster together with the tasks they own.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Access`] unless the requester is an
    /// admin, or [`ProfileServiceError::NotFound`] for an unknown target.
    pub async fn delete_user(
        &self,
        requester: &Principal,
        target: ProfileId,
    ) -> ProfileServiceResult<()> {
        authorize(requester, &Action::DeleteUser, &Resource::Member(target))?;
        self.repository
            .delete(target)
            .await
            .map_err(|err| match err {
                ProfileRepositoryError::NotFound(id) => ProfileServiceError::NotFound(id),
                other @ ProfileRepositoryError::Persistence(_) => other.into(),
            })?;
        info!(profile_id = %target, deleted_by = %requester.id(), "user deleted");
        Ok(())
    }

    /// Returns every profile ordered by display name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Repository`] when persistence fails.
    pub async fn roster(&self) -> ProfileServiceResult<Vec<Profile>> {
        let mut profiles = self.repository.list_all().await?;
        profiles.sort_by_cached_key(|profile| profile.display_name().to_lowercase());
        Ok(profiles)
    }
}
