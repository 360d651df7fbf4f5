//! Task aggregate root.

use super::{TaskAssignment, TaskDomainError, TaskId, TaskPatch, TaskStatus};
use crate::access::TaskAccess;
use crate::identity::domain::{Principal, ProfileId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// Serialises with the column names of the `tasks` collection.
/// `assigned_to`/`assigned_to_name` mirror the primary POC for readers that
/// predate assignment rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    current_status: TaskStatus,
    #[serde(default)]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    expected_completion_date: Option<NaiveDate>,
    assigned_date: DateTime<Utc>,
    #[serde(default)]
    primary_poc: Option<ProfileId>,
    #[serde(default)]
    primary_poc_name: Option<String>,
    #[serde(default)]
    assigned_to: Option<ProfileId>,
    #[serde(default)]
    assigned_to_name: Option<String>,
    #[serde(default)]
    assigned_by: Option<ProfileId>,
    #[serde(default)]
    assigned_by_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask<'a> {
    /// Title; must not be blank.
    pub title: &'a str,
    /// Optional description.
    pub description: Option<&'a str>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Primary POC and their display name.
    pub primary_poc: (ProfileId, &'a str),
    /// The creator.
    pub creator: &'a Principal,
}

impl Task {
    /// Creates an `Open` task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(new_task: NewTask<'_>, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = validated_title(new_task.title)?;
        let timestamp = clock.utc();
        let (poc_id, poc_name) = new_task.primary_poc;
        Ok(Self {
            id: TaskId::new(),
            title,
            description: new_task.description.and_then(non_blank),
            current_status: TaskStatus::Open,
            due_date: new_task.due_date,
            expected_completion_date: None,
            assigned_date: timestamp,
            primary_poc: Some(poc_id),
            primary_poc_name: Some(poc_name.to_owned()),
            assigned_to: Some(poc_id),
            assigned_to_name: Some(poc_name.to_owned()),
            assigned_by: Some(new_task.creator.id()),
            assigned_by_name: Some(new_task.creator.display_name().to_owned()),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the status.
    #[must_use]
    pub const fn current_status(&self) -> TaskStatus {
        self.current_status
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the expected completion date, if any.
    #[must_use]
    pub const fn expected_completion_date(&self) -> Option<NaiveDate> {
        self.expected_completion_date
    }

    /// Returns when the task was assigned.
    #[must_use]
    pub const fn assigned_date(&self) -> DateTime<Utc> {
        self.assigned_date
    }

    /// Returns the primary POC.
    #[must_use]
    pub const fn primary_poc(&self) -> Option<ProfileId> {
        self.primary_poc
    }

    /// Returns the cached primary POC name.
    #[must_use]
    pub fn primary_poc_name(&self) -> Option<&str> {
        self.primary_poc_name.as_deref()
    }

    /// Returns the legacy assignee mirror.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<ProfileId> {
        self.assigned_to
    }

    /// Returns the cached legacy assignee name.
    #[must_use]
    pub fn assigned_to_name(&self) -> Option<&str> {
        self.assigned_to_name.as_deref()
    }

    /// Returns who created the task.
    #[must_use]
    pub const fn assigned_by(&self) -> Option<ProfileId> {
        self.assigned_by
    }

    /// Returns the cached creator name.
    #[must_use]
    pub fn assigned_by_name(&self) -> Option<&str> {
        self.assigned_by_name.as_deref()
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

    /// Returns the assignment facts used for authorization.
    #[must_use]
    pub fn access(&self, assignments: &[TaskAssignment]) -> TaskAccess {
        TaskAccess {
            primary_poc: self.primary_poc,
            assignees: assignments
                .iter()
                .filter(|assignment| assignment.task_id() == self.id)
                .map(TaskAssignment::user_id)
                .collect(),
        }
    }

    /// Applies every field of `patch` except the primary POC.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the new title is blank;
    /// the task is left unchanged.
    pub fn apply_patch(
        &mut self,
        patch: TaskPatch,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if let Some(title) = patch.title.as_deref().map(validated_title).transpose()? {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description.as_deref().and_then(non_blank);
        }
        if let Some(status) = patch.current_status {
            self.current_status = status;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(date) = patch.expected_completion_date {
            self.expected_completion_date = date;
        }
        self.touch(clock);
        Ok(())
    }

    /// Points the task and its legacy mirror at a new primary POC.
    pub fn set_primary_poc(&mut self, id: ProfileId, name: &str, clock: &impl Clock) {
        self.primary_poc = Some(id);
        self.primary_poc_name = Some(name.to_owned());
        self.assigned_to = Some(id);
        self.assigned_to_name = Some(name.to_owned());
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn validated_title(title: &str) -> Result<String, TaskDomainError> {
    non_blank(title).ok_or(TaskDomainError::EmptyTitle)
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
