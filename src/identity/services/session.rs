//! Sign-up, sign-in and session flows over the identity provider.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;
use tracing::{info, warn};

use super::{ProfileService, ProfileServiceError};
use crate::error::ErrorKind;
use crate::identity::{
    domain::{Principal, ProfileId},
    ports::ProfileRepository,
};
use crate::platform::ports::{Credentials, IdentityError, IdentityProvider, SignUpOutcome};

/// Service-level errors for session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The identity provider rejected the request.
    #[error(transparent)]
    Identity(#[from] IdentityError),
    /// Profile resolution failed.
    #[error(transparent)]
    Profile(#[from] ProfileServiceError),
}

impl SessionError {
    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Identity(IdentityError::WeakPassword { .. }) => ErrorKind::Validation,
            Self::Identity(IdentityError::EmailTaken(_)) => ErrorKind::Conflict,
            Self::Identity(
                IdentityError::InvalidCredentials | IdentityError::EmailNotConfirmed(_),
            ) => ErrorKind::PermissionDenied,
            Self::Identity(IdentityError::Provider(_)) => ErrorKind::Upstream,
            Self::Profile(err) => err.kind(),
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Session orchestration: authentication plus profile provisioning.
#[derive(Clone)]
pub struct SessionService<I, R, C>
where
    I: IdentityProvider,
    R: ProfileRepository,
    C: Clock + Send + Sync,
{
    identity: Arc<I>,
    profiles: ProfileService<R, C>,
}

impl<I, R, C> SessionService<I, R, C>
where
    I: IdentityProvider,
    R: ProfileRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new session service.
    #[must_use]
    pub const fn new(identity: Arc<I>, profiles: ProfileService<R, C>) -> Self {
        Self { identity, profiles }
    }

    /// Registers an account and provisions its profile.
    ///
    /// A provisioning failure is logged and not surfaced; the profile is
    /// provisioned again on the next sign-in.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Identity`] when the provider rejects the
    /// sign-up.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> SessionResult<SignUpOutcome> {
        let credentials = Credentials::new(email, password);
        let outcome = self.identity.sign_up(&credentials, full_name).await?;
        let id = ProfileId::from_uuid(outcome.user.id);
        match self
            .profiles
            .provision_profile(id, &outcome.user.email, Some(full_name))
            .await
        {
            Ok(_) => info!(profile_id = %id, "account signed up"),
            Err(err) => warn!(profile_id = %id, error = %err, "profile provisioning failed"),
        }
        Ok(outcome)
    }

    /// Opens a session and resolves the signed-in principal.
    ///
    /// Provisions the profile when an earlier sign-up failed to.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Identity`] for rejected credentials.
    pub async fn sign_in(&self, email: &str, password: &str) -> SessionResult<Principal> {
        let session = self
            .identity
            .sign_in(&Credentials::new(email, password))
            .await?;
        let id = ProfileId::from_uuid(session.user.id);
        let principal = match self.profiles.resolve_principal(id).await {
            Ok(principal) => principal,
            Err(ProfileServiceError::NotFound(_)) => self
                .profiles
                .provision_profile(id, &session.user.email, None)
                .await?
                .principal(),
            Err(err) => return Err(err.into()),
        };
        info!(profile_id = %id, role = %principal.role(), "signed in");
        Ok(principal)
    }

    /// Closes the current session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Identity`] when the provider fails.
    pub async fn sign_out(&self) -> SessionResult<()> {
        self.identity.sign_out().await?;
        info!("signed out");
        Ok(())
    }

    /// Resolves the principal of the current session, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Profile`] when the session's profile cannot be
    /// resolved.
    pub async fn current_principal(&self) -> SessionResult<Option<Principal>> {
        let Some(session) = self.identity.current_session().await? else {
            return Ok(None);
        };
        let principal = self
            .profiles
            .resolve_principal(ProfileId::from_uuid(session.user.id))
            .await?;
        Ok(Some(principal))
    }
}
