//! Task assignment rows.

use super::{AssignmentId, TaskId};
use crate::identity::domain::ProfileId;
use serde::{Deserialize, Serialize};

/// Membership of a person in a task.
///
/// Unique per `(task_id, user_id)`; at most one row per task carries
/// `is_primary_poc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAssignment {
    id: AssignmentId,
    task_id: TaskId,
    user_id: ProfileId,
    #[serde(default)]
    user_name: Option<String>,
    #[serde(default)]
    is_primary_poc: bool,
}

impl TaskAssignment {
    /// Creates a new assignment row.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        user_id: ProfileId,
        user_name: impl Into<String>,
        is_primary_poc: bool,
    ) -> Self {
        Self {
            id: AssignmentId::new(),
            task_id,
            user_id,
            user_name: Some(user_name.into()),
            is_primary_poc,
        }
    }

    /// Returns the assignment identifier.
    #[must_use]
    pub const fn id(&self) -> AssignmentId {
        self.id
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the assigned person.
    #[must_use]
    pub const fn user_id(&self) -> ProfileId {
        self.user_id
    }

    /// Returns the cached display name of the assigned person.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// Returns `true` for the primary POC's row.
    #[must_use]
    pub const fn is_primary_poc(&self) -> bool {
        self.is_primary_poc
    }
}
