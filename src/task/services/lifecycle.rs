//! Task creation, editing, deletion and reads.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;
use tracing::{debug, info};

use super::{TaskServiceError, TaskServiceResult};
use crate::access::{Action, Resource, TaskEditScope, authorize, task_edit_scope};
use crate::identity::{
    domain::{Principal, Profile, ProfileId},
    ports::ProfileRepository,
};
use crate::task::{
    domain::{NewTask, Task, TaskId, TaskPatch, TaskStatusCounts},
    ports::{AssignmentRepository, TaskRepository, TaskRepositoryError},
};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    primary_poc: ProfileId,
    additional_members: Vec<ProfileId>,
    due_date: Option<NaiveDate>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, primary_poc: ProfileId) -> Self {
        Self {
            title: title.into(),
            description: None,
            primary_poc,
            additional_members: Vec::new(),
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the members assigned alongside the primary POC.
    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = ProfileId>) -> Self {
        self.additional_members = members.into_iter().collect();
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Task and assignment orchestration service.
#[derive(Clone)]
pub struct TaskService<R, P, C>
where
    R: TaskRepository + AssignmentRepository,
    P: ProfileRepository,
    C: Clock + Send + Sync,
{
    pub(super) tasks: Arc<R>,
    pub(super) profiles: Arc<P>,
    pub(super) clock: Arc<C>,
}

impl<R, P, C> TaskService<R, P, C>
where
    R: TaskRepository + AssignmentRepository,
    P: ProfileRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(tasks: Arc<R>, profiles: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            profiles,
            clock,
        }
    }

    /// Creates a task and assigns its members.
    ///
    /// The task row is written first; if the assignment step then fails the
    /// task stays created and [`Self::merge_assignments`] can be re-run.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Access`] for members,
    /// [`TaskServiceError::Domain`] for a blank title and
    /// [`TaskServiceError::ProfileNotFound`] for unknown people.
    pub async fn create_task(
        &self,
        request: CreateTaskRequest,
        creator: &Principal,
    ) -> TaskServiceResult<Task> {
        authorize(creator, &Action::CreateTask, &Resource::None)?;
        let primary = self.require_profile(request.primary_poc).await?;
        for member in &request.additional_members {
            self.require_profile(*member).await?;
        }

        let task = Task::new(
            NewTask {
                title: &request.title,
                description: request.description.as_deref(),
                due_date: request.due_date,
                primary_poc: (primary.id(), primary.display_name()),
                creator,
            },
            &*self.clock,
        )?;
        self.tasks.store(&task).await?;
        info!(task_id = %task.id(), created_by = %creator.id(), "task created");

        self.merge_rows(task.id(), primary.id(), &request.additional_members)
            .await?;
        self.get_task(task.id()).await
    }

    /// Applies a patch within the requester's edit scope.
    ///
    /// A primary POC change is delegated to [`Self::change_primary_poc`]
    /// before the other fields are written.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Access`] when any patched field lies
    /// outside the requester's scope.
    pub async fn update_task(
        &self,
        task_id: TaskId,
        patch: TaskPatch,
        requester: &Principal,
    ) -> TaskServiceResult<Task> {
        let before = self.get_task(task_id).await?;
        let assignments = self.tasks.list_for_task(task_id).await?;
        authorize(
            requester,
            &Action::EditTask(patch.fields()),
            &Resource::Task(before.access(&assignments)),
        )?;

        if let Some(new_poc) = patch.primary_poc()
            && before.primary_poc() != Some(new_poc)
        {
            self.change_primary_poc(task_id, new_poc, requester).await?;
        }

        let mut task = self.get_task(task_id).await?;
        task.apply_patch(patch.without_primary_poc(), &*self.clock)?;
        self.tasks.update(&task).await.map_err(not_found(task_id))?;
        info!(task_id = %task_id, updated_by = %requester.id(), "task updated");
        self.get_task(task_id).await
    }

    /// Deletes a task with its comments and assignments.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Access`] unless the requester is an
    /// admin.
    pub async fn delete_task(
        &self,
        task_id: TaskId,
        requester: &Principal,
    ) -> TaskServiceResult<()> {
        authorize(requester, &Action::DeleteTask, &Resource::None)?;
        self.tasks.delete(task_id).await.map_err(not_found(task_id))?;
        info!(task_id = %task_id, deleted_by = %requester.id(), "task deleted");
        Ok(())
    }

    /// Loads a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when it does not exist.
    pub async fn get_task(&self, task_id: TaskId) -> TaskServiceResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(task_id))
    }

    /// Lists every task by due date, undated tasks last.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when persistence fails.
    pub async fn list_tasks(&self) -> TaskServiceResult<Vec<Task>> {
        let tasks = self.tasks.list_all().await?;
        debug!(count = tasks.len(), "tasks listed");
        Ok(tasks)
    }

    /// Counts tasks per status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when persistence fails.
    pub async fn status_counts(&self) -> TaskServiceResult<TaskStatusCounts> {
        Ok(TaskStatusCounts::tally(&self.list_tasks().await?))
    }

    /// Returns which fields the requester may edit on a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist.
    pub async fn edit_scope(
        &self,
        task_id: TaskId,
        requester: &Principal,
    ) -> TaskServiceResult<TaskEditScope> {
        let task = self.get_task(task_id).await?;
        let assignments = self.tasks.list_for_task(task_id).await?;
        Ok(task_edit_scope(requester, &task.access(&assignments)))
    }

    pub(super) async fn require_profile(&self, id: ProfileId) -> TaskServiceResult<Profile> {
        self.profiles
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::ProfileNotFound(id))
    }
}

pub(super) fn not_found(
    task_id: TaskId,
) -> impl FnOnce(TaskRepositoryError) -> TaskServiceError {
    move |err| match err {
        TaskRepositoryError::NotFound(_) => TaskServiceError::TaskNotFound(task_id),
        other => other.into(),
    }
}
