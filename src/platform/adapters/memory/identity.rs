//! In-memory identity provider with salted SHA-256 password digests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::platform::ports::{
    AuthEvent, AuthUser, Credentials, IdentityError, IdentityProvider, IdentityResult, Session,
    SignUpOutcome,
};

/// Shortest password accepted at sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone)]
struct Account {
    user: AuthUser,
    display_name: String,
    password_digest: String,
    confirmed: bool,
}

#[derive(Debug, Default)]
struct IdentityState {
    accounts: HashMap<String, Account>,
    session: Option<Session>,
}

/// Identity provider holding accounts and a single session in memory.
#[derive(Debug, Clone)]
pub struct InMemoryIdentityProvider {
    state: Arc<RwLock<IdentityState>>,
    events: broadcast::Sender<AuthEvent>,
    require_confirmation: bool,
}

impl Default for InMemoryIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryIdentityProvider {
    /// Creates a provider that opens a session immediately on sign-up.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            state: Arc::new(RwLock::new(IdentityState::default())),
            events,
            require_confirmation: false,
        }
    }

    /// Requires email confirmation before the first sign-in.
    #[must_use]
    pub const fn with_email_confirmation(mut self) -> Self {
        self.require_confirmation = true;
        self
    }

    /// Marks an account's email as confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidCredentials`] when no account exists
    /// for the email.
    pub fn confirm_email(&self, email: &str) -> IdentityResult<()> {
        let mut state = self.write_state()?;
        let account = state
            .accounts
            .get_mut(&email.trim().to_lowercase())
            .ok_or(IdentityError::InvalidCredentials)?;
        account.confirmed = true;
        Ok(())
    }

    /// Returns the display name captured at sign-up.
    ///
    /// # Errors
    ///
    /// Returns a provider error when lock acquisition fails.
    pub fn display_name(&self, email: &str) -> IdentityResult<Option<String>> {
        let state = self
            .state
            .read()
            .map_err(|err| IdentityError::provider(std::io::Error::other(err.to_string())))?;
        Ok(state
            .accounts
            .get(&email.trim().to_lowercase())
            .map(|account| account.display_name.clone()))
    }

    fn write_state(&self) -> IdentityResult<std::sync::RwLockWriteGuard<'_, IdentityState>> {
        self.state
            .write()
            .map_err(|err| IdentityError::provider(std::io::Error::other(err.to_string())))
    }

    fn open_session(state: &mut IdentityState, user: &AuthUser) -> Session {
        let session = Session {
            user: user.clone(),
            access_token: Uuid::new_v4().simple().to_string(),
        };
        state.session = Some(session.clone());
        session
    }

    fn notify(&self, event: AuthEvent) {
        if self.events.send(event).is_err() {
            tracing::trace!("no auth event subscribers");
        }
    }
}

fn digest(salt: Uuid, password: &str) -> String {
    let hash = Sha256::new()
        .chain_update(salt.as_bytes())
        .chain_update(password.as_bytes())
        .finalize();
    hash.iter().map(|byte| format!("{byte:02x}")).collect()
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn current_session(&self) -> IdentityResult<Option<Session>> {
        let state = self
            .state
            .read()
            .map_err(|err| IdentityError::provider(std::io::Error::other(err.to_string())))?;
        Ok(state.session.clone())
    }

    async fn sign_up(
        &self,
        credentials: &Credentials,
        display_name: &str,
    ) -> IdentityResult<SignUpOutcome> {
        if credentials.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(IdentityError::WeakPassword {
                min_length: MIN_PASSWORD_LENGTH,
            });
        }
        let outcome = {
            let mut state = self.write_state()?;
            if state.accounts.contains_key(&credentials.email) {
                return Err(IdentityError::EmailTaken(credentials.email.clone()));
            }
            let user = AuthUser {
                id: Uuid::new_v4(),
                email: credentials.email.clone(),
            };
            state.accounts.insert(
                credentials.email.clone(),
                Account {
                    user: user.clone(),
                    display_name: display_name.to_owned(),
                    password_digest: digest(user.id, &credentials.password),
                    confirmed: !self.require_confirmation,
                },
            );
            let session =
                (!self.require_confirmation).then(|| Self::open_session(&mut state, &user));
            SignUpOutcome { user, session }
        };
        if outcome.session.is_some() {
            self.notify(AuthEvent::SignedIn(outcome.user.clone()));
        }
        Ok(outcome)
    }

    async fn sign_in(&self, credentials: &Credentials) -> IdentityResult<Session> {
        let session = {
            let mut state = self.write_state()?;
            let account = state
                .accounts
                .get(&credentials.email)
                .filter(|account| {
                    account.password_digest == digest(account.user.id, &credentials.password)
                })
                .cloned()
                .ok_or(IdentityError::InvalidCredentials)?;
            if !account.confirmed {
                return Err(IdentityError::EmailNotConfirmed(credentials.email.clone()));
            }
            Self::open_session(&mut state, &account.user)
        };
        self.notify(AuthEvent::SignedIn(session.user.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> IdentityResult<()> {
        let had_session = self.write_state()?.session.take().is_some();
        if had_session {
            self.notify(AuthEvent::SignedOut);
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}
