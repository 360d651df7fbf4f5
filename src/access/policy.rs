//! The authorization decision function.

use std::fmt;

use thiserror::Error;

use super::{Action, Resource, TaskAccess};
use crate::identity::domain::{Principal, Role};
use crate::task::domain::TaskField;

/// Which task fields a principal may edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskEditScope {
    /// Every field, including the primary POC.
    Full,
    /// Every field except the primary POC.
    FullWithoutPoc,
    /// Only `current_status` and `expected_completion_date`.
    StatusOnly,
    /// Nothing.
    None,
}

impl TaskEditScope {
    /// Returns `true` when the scope covers `field`.
    #[must_use]
    pub const fn permits(self, field: TaskField) -> bool {
        match self {
            Self::Full => true,
            Self::FullWithoutPoc => !matches!(field, TaskField::PrimaryPoc),
            Self::StatusOnly => matches!(
                field,
                TaskField::CurrentStatus | TaskField::ExpectedCompletionDate
            ),
            Self::None => false,
        }
    }
}

/// Derives the edit scope of `principal` on a task.
#[must_use]
pub fn task_edit_scope(principal: &Principal, task: &TaskAccess) -> TaskEditScope {
    match principal.role() {
        Role::Admin => TaskEditScope::Full,
        Role::Collaborator if task.is_assigned(principal.id()) => TaskEditScope::FullWithoutPoc,
        Role::Member if task.primary_poc == Some(principal.id()) => TaskEditScope::StatusOnly,
        Role::Collaborator | Role::Member => TaskEditScope::None,
    }
}

/// Why an action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// The principal's role never allows the action.
    RoleNotPermitted(Role),
    /// The principal is not assigned to the task.
    NotAssigned,
    /// Only the comment author may do this.
    NotAuthor,
    /// The comment is older than the edit window.
    EditWindowExpired,
    /// The principal may edit the task but not this field.
    FieldNotEditable(TaskField),
    /// The principal may only act on their own record.
    NotOwner,
    /// The action was checked against the wrong kind of resource.
    ResourceMismatch,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoleNotPermitted(role) => write!(f, "role {role} is not permitted"),
            Self::NotAssigned => f.write_str("not assigned to the task"),
            Self::NotAuthor => f.write_str("only the author may do this"),
            Self::EditWindowExpired => f.write_str("the edit window has expired"),
            Self::FieldNotEditable(field) => write!(f, "field {} is not editable", field.as_str()),
            Self::NotOwner => f.write_str("only the owner may do this"),
            Self::ResourceMismatch => f.write_str("action does not apply to this resource"),
        }
    }
}

/// Refusal returned by [`authorize`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{action} denied: {reason}")]
pub struct AccessDenied {
    action: &'static str,
    reason: DenialReason,
}

impl AccessDenied {
    const fn new(action: &Action, reason: DenialReason) -> Self {
        Self {
            action: action.name(),
            reason,
        }
    }

    /// Returns the name of the refused action.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        self.action
    }

    /// Returns why the action was refused.
    #[must_use]
    pub const fn reason(&self) -> DenialReason {
        self.reason
    }
}

/// Decides whether `principal` may perform `action` on `resource`.
///
/// # Errors
///
/// Returns [`AccessDenied`] describing the first rule the request breaks.
pub fn authorize(
    principal: &Principal,
    action: &Action,
    resource: &Resource,
) -> Result<(), AccessDenied> {
    let deny = |reason| Err(AccessDenied::new(action, reason));
    let role = principal.role();
    match action {
        Action::PostComment => Ok(()),
        Action::CreateTask => match role {
            Role::Admin | Role::Collaborator => Ok(()),
            Role::Member => deny(DenialReason::RoleNotPermitted(role)),
        },
        Action::DeleteTask
        | Action::ManageTaskMembers
        | Action::TransferPrimaryPoc
        | Action::DeleteComment
        | Action::ViewAllAttendance
        | Action::PublishNotice
        | Action::DeleteNotice
        | Action::ManageNoticeTaxonomy
        | Action::ChangeRole
        | Action::DeleteUser => {
            if role.is_admin() {
                Ok(())
            } else {
                deny(DenialReason::RoleNotPermitted(role))
            }
        }
        Action::EditTask(fields) => {
            let Resource::Task(task) = resource else {
                return deny(DenialReason::ResourceMismatch);
            };
            let scope = task_edit_scope(principal, task);
            if scope == TaskEditScope::None {
                return deny(DenialReason::NotAssigned);
            }
            fields
                .iter()
                .find(|field| !scope.permits(*field))
                .map_or(Ok(()), |field| deny(DenialReason::FieldNotEditable(field)))
        }
        Action::EditComment => {
            let Resource::Comment {
                author,
                created_at,
                now,
                edit_window,
            } = resource
            else {
                return deny(DenialReason::ResourceMismatch);
            };
            if *author != principal.id() {
                deny(DenialReason::NotAuthor)
            } else if *now - *created_at > *edit_window {
                deny(DenialReason::EditWindowExpired)
            } else {
                Ok(())
            }
        }
        Action::MarkAttendance | Action::ViewAttendance => {
            let Resource::Member(target) = resource else {
                return deny(DenialReason::ResourceMismatch);
            };
            if role.is_admin() || *target == principal.id() {
                Ok(())
            } else {
                deny(DenialReason::NotOwner)
            }
        }
        Action::UpdateProfile => {
            let Resource::Member(target) = resource else {
                return deny(DenialReason::ResourceMismatch);
            };
            if *target == principal.id() {
                Ok(())
            } else {
                deny(DenialReason::NotOwner)
            }
        }
    }
}
