//! Error categories shared by every service error.

use std::fmt;

/// Category a caller can branch on without matching concrete error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input failed validation.
    Validation,
    /// The requester is not allowed to perform the action.
    PermissionDenied,
    /// A referenced entity does not exist.
    NotFound,
    /// A write collided with existing state.
    Conflict,
    /// The hosted platform failed.
    Upstream,
}

impl ErrorKind {
    /// Returns the stable snake-case name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::PermissionDenied => "permission_denied",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Upstream => "upstream",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
