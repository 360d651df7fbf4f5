//! Task and assignment repositories backed by the platform data store.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::identity::domain::ProfileId;
use crate::platform::{
    domain::{Collection, Direction, Query, Record, from_record, to_record},
    ports::{DataStore, StoreError},
};
use crate::task::{
    domain::{AssignmentId, Task, TaskAssignment, TaskId},
    ports::{AssignmentRepository, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// [`TaskRepository`] and [`AssignmentRepository`] over the `tasks` and
/// `task_assignments` collections.
#[derive(Debug)]
pub struct PlatformTaskRepository<S: DataStore> {
    store: Arc<S>,
}

impl<S: DataStore> Clone for PlatformTaskRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DataStore> PlatformTaskRepository<S> {
    /// Creates a repository over the given store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn select<T: serde::de::DeserializeOwned + Send>(
        &self,
        collection: Collection,
        query: &Query,
    ) -> TaskRepositoryResult<Vec<T>> {
        self.store
            .select(collection, query)
            .await
            .map_err(TaskRepositoryError::persistence)?
            .into_iter()
            .map(|row| from_record(row).map_err(TaskRepositoryError::persistence))
            .collect()
    }
}

fn by_id(id: Uuid) -> Query {
    Query::new().eq("id", id.to_string())
}

fn encode<T: serde::Serialize>(value: &T) -> TaskRepositoryResult<Record> {
    to_record(value).map_err(TaskRepositoryError::persistence)
}

#[async_trait]
impl<S: DataStore> TaskRepository for PlatformTaskRepository<S> {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.store
            .insert(Collection::Tasks, vec![encode(task)?])
            .await
            .map_err(TaskRepositoryError::persistence)?;
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let updated = self
            .store
            .update(Collection::Tasks, &by_id(task.id().into_inner()), encode(task)?)
            .await
            .map_err(TaskRepositoryError::persistence)?;
        if updated.is_empty() {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        Ok(self
            .select(Collection::Tasks, &by_id(id.into_inner()).limit(1))
            .await?
            .into_iter()
            .next())
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let query = Query::new()
            .order_by("due_date", Direction::Ascending)
            .order_by("created_at", Direction::Ascending);
        self.select(Collection::Tasks, &query).await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let by_task = Query::new().eq("task_id", id.to_string());
        for collection in [Collection::TaskComments, Collection::TaskAssignments] {
            self.store
                .delete(collection, &by_task)
                .await
                .map_err(TaskRepositoryError::persistence)?;
        }
        let removed = self
            .store
            .delete(Collection::Tasks, &by_id(id.into_inner()))
            .await
            .map_err(TaskRepositoryError::persistence)?;
        if removed == 0 {
            return Err(TaskRepositoryError::NotFound(id));
        }
        Ok(())
    }
}

#[async_trait]
impl<S: DataStore> AssignmentRepository for PlatformTaskRepository<S> {
    async fn list_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskAssignment>> {
        let query = Query::new()
            .eq("task_id", task_id.to_string())
            .order_by("is_primary_poc", Direction::Descending)
            .order_by("user_name", Direction::Ascending);
        self.select(Collection::TaskAssignments, &query).await
    }

    async fn find_assignment(
        &self,
        id: AssignmentId,
    ) -> TaskRepositoryResult<Option<TaskAssignment>> {
        Ok(self
            .select(Collection::TaskAssignments, &by_id(id.into_inner()).limit(1))
            .await?
            .into_iter()
            .next())
    }

    async fn insert_assignment(&self, assignment: &TaskAssignment) -> TaskRepositoryResult<()> {
        match self
            .store
            .insert(Collection::TaskAssignments, vec![encode(assignment)?])
            .await
        {
            Ok(_) => Ok(()),
            Err(StoreError::UniqueViolation { .. }) => {
                Err(TaskRepositoryError::DuplicateAssignment {
                    task_id: assignment.task_id(),
                    user_id: assignment.user_id(),
                })
            }
            Err(err) => Err(TaskRepositoryError::persistence(err)),
        }
    }

    async fn set_primary_flag(
        &self,
        task_id: TaskId,
        primary_poc: ProfileId,
    ) -> TaskRepositoryResult<()> {
        let by_task = Query::new().eq("task_id", task_id.to_string());
        let mut clear = Record::new();
        clear.insert("is_primary_poc".to_owned(), json!(false));
        self.store
            .update(Collection::TaskAssignments, &by_task, clear)
            .await
            .map_err(TaskRepositoryError::persistence)?;

        let mut set = Record::new();
        set.insert("is_primary_poc".to_owned(), json!(true));
        self.store
            .update(
                Collection::TaskAssignments,
                &by_task.eq("user_id", primary_poc.to_string()),
                set,
            )
            .await
            .map_err(TaskRepositoryError::persistence)?;
        Ok(())
    }

    async fn delete_assignment(&self, id: AssignmentId) -> TaskRepositoryResult<bool> {
        let removed = self
            .store
            .delete(Collection::TaskAssignments, &by_id(id.into_inner()))
            .await
            .map_err(TaskRepositoryError::persistence)?;
        Ok(removed > 0)
    }
}
