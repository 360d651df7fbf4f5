//! Identity provider port: sign-up, sign-in, sessions and auth events.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Result type for identity provider operations.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Email and password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Plain-text password; never logged.
    pub password: String,
}

impl Credentials {
    /// Creates credentials, normalizing the email to trimmed lowercase.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_lowercase(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An authenticated account as known to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// Stable principal identifier.
    pub id: Uuid,
    /// Account email.
    pub email: String,
}

/// An active session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Signed-in account.
    pub user: AuthUser,
    /// Opaque bearer token.
    pub access_token: String,
}

/// Result of a sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOutcome {
    /// The created account.
    pub user: AuthUser,
    /// Session opened by the sign-up, or `None` when the provider requires
    /// email confirmation first.
    pub session: Option<Session>,
}

/// Authentication state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// A session was opened.
    SignedIn(AuthUser),
    /// The session was closed.
    SignedOut,
}

/// External authentication service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the current session, if any.
    async fn current_session(&self) -> IdentityResult<Option<Session>>;

    /// Registers a new account.
    async fn sign_up(
        &self,
        credentials: &Credentials,
        display_name: &str,
    ) -> IdentityResult<SignUpOutcome>;

    /// Opens a session with email and password.
    async fn sign_in(&self, credentials: &Credentials) -> IdentityResult<Session>;

    /// Closes the current session.
    async fn sign_out(&self) -> IdentityResult<()>;

    /// Subscribes to authentication state changes.
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}

/// Errors returned by identity provider adapters.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// An account with the email already exists.
    #[error("an account already exists for {0}")]
    EmailTaken(String),

    /// Email or password did not match.
    #[error("invalid login credentials")]
    InvalidCredentials,

    /// The password does not meet the provider's policy.
    #[error("password must be at least {min_length} characters")]
    WeakPassword {
        /// Minimum accepted length.
        min_length: usize,
    },

    /// The account exists but its email is unconfirmed.
    #[error("email not confirmed for {0}")]
    EmailNotConfirmed(String),

    /// Transport or provider failure.
    #[error("identity provider error: {0}")]
    Provider(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityError {
    /// Wraps a provider error.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Arc::new(err))
    }
}
