//! The authenticated actor performing an operation.

use super::{ProfileId, Role};

/// An authenticated person with their current role.
///
/// Resolved from the roster on every request; holding on to a principal
/// across a role change yields stale authorization decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    id: ProfileId,
    role: Role,
    display_name: String,
}

impl Principal {
    /// Creates a principal.
    #[must_use]
    pub fn new(id: ProfileId, role: Role, display_name: impl Into<String>) -> Self {
        Self {
            id,
            role,
            display_name: display_name.into(),
        }
    }

    /// Returns the principal's profile identifier.
    #[must_use]
    pub const fn id(&self) -> ProfileId {
        self.id
    }

    /// Returns the principal's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the name written into denormalised name caches.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns `true` when the principal is an admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
