//! Actions and the resource facts they are judged against.

use chrono::{DateTime, Duration, Utc};
use std::fmt;

use crate::identity::domain::ProfileId;
use crate::task::domain::TaskFieldSet;

/// An operation a principal wants to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Create a task.
    CreateTask,
    /// Edit the given task fields.
    EditTask(TaskFieldSet),
    /// Delete a task with its comments and assignments.
    DeleteTask,
    /// Add or remove task members.
    ManageTaskMembers,
    /// Move the primary POC to another member.
    TransferPrimaryPoc,
    /// Comment on a task.
    PostComment,
    /// Edit a comment.
    EditComment,
    /// Delete a comment.
    DeleteComment,
    /// Record attendance for a person.
    MarkAttendance,
    /// Read a person's attendance.
    ViewAttendance,
    /// Read everyone's attendance.
    ViewAllAttendance,
    /// Publish a notice.
    PublishNotice,
    /// Delete a notice.
    DeleteNotice,
    /// Create notice categories and tags.
    ManageNoticeTaxonomy,
    /// Change a person's own profile.
    UpdateProfile,
    /// Change a person's role.
    ChangeRole,
    /// Remove a person from the roster.
    DeleteUser,
}

impl Action {
    /// Returns a short name used in denial messages and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateTask => "create task",
            Self::EditTask(_) => "edit task",
            Self::DeleteTask => "delete task",
            Self::ManageTaskMembers => "manage task members",
            Self::TransferPrimaryPoc => "transfer primary POC",
            Self::PostComment => "post comment",
            Self::EditComment => "edit comment",
            Self::DeleteComment => "delete comment",
            Self::MarkAttendance => "mark attendance",
            Self::ViewAttendance => "view attendance",
            Self::ViewAllAttendance => "view all attendance",
            Self::PublishNotice => "publish notice",
            Self::DeleteNotice => "delete notice",
            Self::ManageNoticeTaxonomy => "manage notice taxonomy",
            Self::UpdateProfile => "update profile",
            Self::ChangeRole => "change role",
            Self::DeleteUser => "delete user",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Assignment facts about a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskAccess {
    /// Current primary POC.
    pub primary_poc: Option<ProfileId>,
    /// Every member with an assignment row, primary included.
    pub assignees: Vec<ProfileId>,
}

impl TaskAccess {
    /// Returns `true` when `id` is the primary POC or holds an assignment.
    #[must_use]
    pub fn is_assigned(&self, id: ProfileId) -> bool {
        self.primary_poc == Some(id) || self.assignees.contains(&id)
    }
}

/// What the action targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// No specific resource.
    None,
    /// An existing task.
    Task(TaskAccess),
    /// An existing comment, judged at `now`.
    Comment {
        /// Comment author.
        author: ProfileId,
        /// When the comment was posted.
        created_at: DateTime<Utc>,
        /// Current time.
        now: DateTime<Utc>,
        /// How long after posting the author may still edit.
        edit_window: Duration,
    },
    /// A person on the roster.
    Member(ProfileId),
}
