//! Editable task fields, used for field-level edit gating.

use std::collections::BTreeSet;

/// A task field a patch may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskField {
    /// `title`
    Title,
    /// `description`
    Description,
    /// `current_status`
    CurrentStatus,
    /// `due_date`
    DueDate,
    /// `expected_completion_date`
    ExpectedCompletionDate,
    /// `primary_poc`
    PrimaryPoc,
}

impl TaskField {
    /// Returns the column name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::CurrentStatus => "current_status",
            Self::DueDate => "due_date",
            Self::ExpectedCompletionDate => "expected_completion_date",
            Self::PrimaryPoc => "primary_poc",
        }
    }
}

/// An ordered set of task fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFieldSet(BTreeSet<TaskField>);

impl TaskFieldSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Adds a field.
    pub fn insert(&mut self, field: TaskField) {
        self.0.insert(field);
    }

    /// Returns `true` when the set holds `field`.
    #[must_use]
    pub fn contains(&self, field: TaskField) -> bool {
        self.0.contains(&field)
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = TaskField> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<TaskField> for TaskFieldSet {
    fn from_iter<I: IntoIterator<Item = TaskField>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
