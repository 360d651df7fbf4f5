//! Repository ports for tasks and their assignment rows.

use crate::identity::domain::ProfileId;
use crate::task::domain::{AssignmentId, Task, TaskAssignment, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the store rejects
    /// the write.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task ordered by due date ascending, undated tasks last.
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Deletes a task together with its comments and assignment rows.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Assignment row persistence contract.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Returns the assignment rows of a task.
    async fn list_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskAssignment>>;

    /// Finds an assignment row by identifier.
    async fn find_assignment(
        &self,
        id: AssignmentId,
    ) -> TaskRepositoryResult<Option<TaskAssignment>>;

    /// Inserts an assignment row.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateAssignment`] when the person
    /// already holds a row on the task.
    async fn insert_assignment(&self, assignment: &TaskAssignment) -> TaskRepositoryResult<()>;

    /// Clears the primary flag on every row of the task, then sets it on the
    /// row of `primary_poc`.
    async fn set_primary_flag(
        &self,
        task_id: TaskId,
        primary_poc: ProfileId,
    ) -> TaskRepositoryResult<()>;

    /// Deletes an assignment row. Returns `false` when it did not exist.
    async fn delete_assignment(&self, id: AssignmentId) -> TaskRepositoryResult<bool>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The person already holds an assignment row on the task.
    #[error("{user_id} is already assigned to task {task_id}")]
    DuplicateAssignment {
        /// Task identifier.
        task_id: TaskId,
        /// Assigned person.
        user_id: ProfileId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
