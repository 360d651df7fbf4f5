//! Roster profile aggregate.

use super::{Principal, ProfileId, Role};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A person on the roster.
///
/// Serialises with the column names of the `profiles` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    id: ProfileId,
    email: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    designation: Option<String>,
    #[serde(default)]
    role: Role,
    #[serde(default)]
    present: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Self-service profile changes. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    full_name: Option<String>,
    phone: Option<String>,
    designation: Option<String>,
    present: Option<bool>,
}

impl ProfileUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the full name. A blank name clears it.
    #[must_use]
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// Sets the phone number. A blank value clears it.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the designation. A blank value clears it.
    #[must_use]
    pub fn with_designation(mut self, designation: impl Into<String>) -> Self {
        self.designation = Some(designation.into());
        self
    }

    /// Sets the presence flag.
    #[must_use]
    pub const fn with_present(mut self, present: bool) -> Self {
        self.present = Some(present);
        self
    }
}

impl Profile {
    /// Creates a freshly provisioned `member` profile.
    #[must_use]
    pub fn new(
        id: ProfileId,
        email: impl Into<String>,
        full_name: Option<String>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            email: email.into(),
            full_name: full_name.as_deref().and_then(non_blank),
            phone: None,
            designation: None,
            role: Role::Member,
            present: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the profile identifier.
    #[must_use]
    pub const fn id(&self) -> ProfileId {
        self.id
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the full name, if set.
    #[must_use]
    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    /// Returns the phone number, if set.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the designation, if set.
    #[must_use]
    pub fn designation(&self) -> Option<&str> {
        self.designation.as_deref()
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the presence flag.
    #[must_use]
    pub const fn present(&self) -> bool {
        self.present
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the full name when non-blank, otherwise the email.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }

    /// Returns the principal view of this profile.
    #[must_use]
    pub fn principal(&self) -> Principal {
        Principal::new(self.id, self.role, self.display_name())
    }

    /// Applies self-service changes.
    pub fn apply_update(&mut self, update: ProfileUpdate, clock: &impl Clock) {
        if let Some(full_name) = update.full_name {
            self.full_name = non_blank(&full_name);
        }
        if let Some(phone) = update.phone {
            self.phone = non_blank(&phone);
        }
        if let Some(designation) = update.designation {
            self.designation = non_blank(&designation);
        }
        if let Some(present) = update.present {
            self.present = present;
        }
        self.touch(clock);
    }

    /// Changes the role.
    pub fn set_role(&mut self, role: Role, clock: &impl Clock) {
        self.role = role;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
