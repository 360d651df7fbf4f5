//! Partial task updates.

use super::{TaskField, TaskFieldSet, TaskStatus};
use crate::identity::domain::ProfileId;
use chrono::NaiveDate;

/// Requested changes to a task. Unset fields are left untouched.
///
/// Optional columns use `Option<Option<_>>`: `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<Option<String>>,
    pub(crate) current_status: Option<TaskStatus>,
    pub(crate) due_date: Option<Option<NaiveDate>>,
    pub(crate) expected_completion_date: Option<Option<NaiveDate>>,
    pub(crate) primary_poc: Option<ProfileId>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.current_status = Some(status);
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets or clears the expected completion date.
    #[must_use]
    pub const fn with_expected_completion_date(mut self, date: Option<NaiveDate>) -> Self {
        self.expected_completion_date = Some(date);
        self
    }

    /// Moves the primary POC to another person.
    #[must_use]
    pub const fn with_primary_poc(mut self, primary_poc: ProfileId) -> Self {
        self.primary_poc = Some(primary_poc);
        self
    }

    /// Returns the fields this patch touches.
    #[must_use]
    pub fn fields(&self) -> TaskFieldSet {
        [
            (self.title.is_some(), TaskField::Title),
            (self.description.is_some(), TaskField::Description),
            (self.current_status.is_some(), TaskField::CurrentStatus),
            (self.due_date.is_some(), TaskField::DueDate),
            (
                self.expected_completion_date.is_some(),
                TaskField::ExpectedCompletionDate,
            ),
            (self.primary_poc.is_some(), TaskField::PrimaryPoc),
        ]
        .into_iter()
        .filter_map(|(touched, field)| touched.then_some(field))
        .collect()
    }

    /// Returns the requested primary POC, if any.
    #[must_use]
    pub const fn primary_poc(&self) -> Option<ProfileId> {
        self.primary_poc
    }

    /// Returns the patch without the primary POC change.
    #[must_use]
    pub const fn without_primary_poc(mut self) -> Self {
        self.primary_poc = None;
        self
    }
}
