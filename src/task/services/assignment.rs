//! Assignment merge, membership changes and primary POC transfer.

use mockable::Clock;
use tracing::{debug, info, warn};

use super::{TaskService, TaskServiceError, TaskServiceResult, lifecycle::not_found};
use crate::access::{Action, Resource, authorize};
use crate::identity::{
    domain::{Principal, ProfileId},
    ports::ProfileRepository,
};
use crate::task::{
    domain::{AssignmentId, Task, TaskAssignment, TaskDomainError, TaskId},
    ports::{AssignmentRepository, TaskRepository, TaskRepositoryError},
};

impl<R, P, C> TaskService<R, P, C>
where
    R: TaskRepository + AssignmentRepository,
    P: ProfileRepository,
    C: Clock + Send + Sync,
{
    /// Brings a task's assignment rows in line with its member set.
    ///
    /// Inserts a row for each missing member and flags the primary POC's
    /// row. Rows that already exist are left alone, so re-running after a
    /// partial failure never duplicates `(task_id, user_id)`. Requires the
    /// same role as task creation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ProfileNotFound`] for unknown people or
    /// [`TaskServiceError::TaskNotFound`] for an unknown task.
    pub async fn merge_assignments(
        &self,
        task_id: TaskId,
        primary_poc: ProfileId,
        members: &[ProfileId],
        requester: &Principal,
    ) -> TaskServiceResult<Vec<TaskAssignment>> {
        authorize(requester, &Action::CreateTask, &Resource::None)?;
        self.get_task(task_id).await?;
        self.merge_rows(task_id, primary_poc, members).await
    }

    pub(super) async fn merge_rows(
        &self,
        task_id: TaskId,
        primary_poc: ProfileId,
        members: &[ProfileId],
    ) -> TaskServiceResult<Vec<TaskAssignment>> {
        let existing = self.tasks.list_for_task(task_id).await?;
        let mut wanted: Vec<ProfileId> = Vec::with_capacity(members.len() + 1);
        for id in std::iter::once(primary_poc).chain(members.iter().copied()) {
            if !wanted.contains(&id) {
                wanted.push(id);
            }
        }

        for user_id in wanted {
            if existing.iter().any(|row| row.user_id() == user_id) {
                continue;
            }
            let profile = self.require_profile(user_id).await?;
            let row = TaskAssignment::new(
                task_id,
                user_id,
                profile.display_name(),
                user_id == primary_poc,
            );
            self.insert_row(&row).await?;
        }

        let rows = self.tasks.list_for_task(task_id).await?;
        let mut flagged = rows.iter().filter(|row| row.is_primary_poc());
        let flag_is_correct = flagged
            .next()
            .is_some_and(|row| row.user_id() == primary_poc)
            && flagged.next().is_none();
        if flag_is_correct {
            return Ok(rows);
        }
        self.tasks.set_primary_flag(task_id, primary_poc).await?;
        self.list_assignments(task_id).await
    }

    /// Assigns another person to a task. Adding an existing member is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Access`] unless the requester is an
    /// admin.
    pub async fn add_member(
        &self,
        task_id: TaskId,
        user_id: ProfileId,
        requester: &Principal,
    ) -> TaskServiceResult<Vec<TaskAssignment>> {
        authorize(requester, &Action::ManageTaskMembers, &Resource::None)?;
        self.get_task(task_id).await?;
        let profile = self.require_profile(user_id).await?;
        let existing = self.tasks.list_for_task(task_id).await?;
        if existing.iter().any(|row| row.user_id() == user_id) {
            debug!(task_id = %task_id, user_id = %user_id, "already a member");
            return Ok(existing);
        }
        self.insert_row(&TaskAssignment::new(
            task_id,
            user_id,
            profile.display_name(),
            false,
        ))
        .await?;
        info!(task_id = %task_id, user_id = %user_id, "member added");
        self.list_assignments(task_id).await
    }

    /// Removes a non-primary assignment row.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::PrimaryPocRemoval`] for the primary POC's
    /// row and [`TaskServiceError::AssignmentNotFound`] when the row is not
    /// on the task.
    pub async fn remove_member(
        &self,
        task_id: TaskId,
        assignment_id: AssignmentId,
        requester: &Principal,
    ) -> TaskServiceResult<()> {
        authorize(requester, &Action::ManageTaskMembers, &Resource::None)?;
        let row = self
            .tasks
            .find_assignment(assignment_id)
            .await?
            .filter(|row| row.task_id() == task_id)
            .ok_or(TaskServiceError::AssignmentNotFound(assignment_id))?;
        if row.is_primary_poc() {
            return Err(TaskDomainError::PrimaryPocRemoval(assignment_id).into());
        }
        if !self.tasks.delete_assignment(assignment_id).await? {
            return Err(TaskServiceError::AssignmentNotFound(assignment_id));
        }
        info!(task_id = %task_id, user_id = %row.user_id(), "member removed");
        Ok(())
    }

    /// Makes another person the task's primary POC.
    ///
    /// Ensures the person has a row, moves the flag to it and updates the
    /// task's POC fields. Every step is safe to re-run.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Access`] unless the requester is an
    /// admin.
    pub async fn change_primary_poc(
        &self,
        task_id: TaskId,
        new_poc: ProfileId,
        requester: &Principal,
    ) -> TaskServiceResult<Task> {
        authorize(requester, &Action::TransferPrimaryPoc, &Resource::None)?;
        let mut task = self.get_task(task_id).await?;
        let profile = self.require_profile(new_poc).await?;

        let existing = self.tasks.list_for_task(task_id).await?;
        if !existing.iter().any(|row| row.user_id() == new_poc) {
            self.insert_row(&TaskAssignment::new(
                task_id,
                new_poc,
                profile.display_name(),
                false,
            ))
            .await?;
        }
        self.tasks.set_primary_flag(task_id, new_poc).await?;

        task.set_primary_poc(new_poc, profile.display_name(), &*self.clock);
        self.tasks.update(&task).await.map_err(not_found(task_id))?;
        info!(task_id = %task_id, primary_poc = %new_poc, "primary POC changed");
        self.get_task(task_id).await
    }

    /// Lists a task's assignment rows, primary POC first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when persistence fails.
    pub async fn list_assignments(
        &self,
        task_id: TaskId,
    ) -> TaskServiceResult<Vec<TaskAssignment>> {
        let mut rows = self.tasks.list_for_task(task_id).await?;
        rows.sort_by_key(|row| !row.is_primary_poc());
        Ok(rows)
    }

    async fn insert_row(&self, row: &TaskAssignment) -> TaskServiceResult<()> {
        match self.tasks.insert_assignment(row).await {
            Ok(()) => Ok(()),
            Err(TaskRepositoryError::DuplicateAssignment { task_id, user_id }) => {
                warn!(
                    task_id = %task_id,
                    user_id = %user_id,
                    "assignment already exists; skipping"
                );
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}
