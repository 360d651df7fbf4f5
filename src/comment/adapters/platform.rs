//! Comment repository backed by the platform data store.

use std::sync::Arc;

use async_trait::async_trait;

use crate::comment::{
    domain::{Comment, CommentId},
    ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult},
};
use crate::platform::{
    domain::{Collection, Direction, Query, Record, from_record, to_record},
    ports::DataStore,
};
use crate::task::domain::TaskId;

/// [`CommentRepository`] over the `task_comments` collection.
#[derive(Debug)]
pub struct PlatformCommentRepository<S: DataStore> {
    store: Arc<S>,
}

impl<S: DataStore> Clone for PlatformCommentRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DataStore> PlatformCommentRepository<S> {
    /// Creates a repository over the given store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn select(&self, query: &Query) -> CommentRepositoryResult<Vec<Comment>> {
        self.store
            .select(Collection::TaskComments, query)
            .await
            .map_err(CommentRepositoryError::persistence)?
            .into_iter()
            .map(|row| from_record(row).map_err(CommentRepositoryError::persistence))
            .collect()
    }
}

fn by_id(id: CommentId) -> Query {
    Query::new().eq("id", id.to_string())
}

fn encode(comment: &Comment) -> CommentRepositoryResult<Record> {
    to_record(comment).map_err(CommentRepositoryError::persistence)
}

#[async_trait]
impl<S: DataStore> CommentRepository for PlatformCommentRepository<S> {
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        self.store
            .insert(Collection::TaskComments, vec![encode(comment)?])
            .await
            .map_err(CommentRepositoryError::persistence)?;
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let updated = self
            .store
            .update(Collection::TaskComments, &by_id(comment.id()), encode(comment)?)
            .await
            .map_err(CommentRepositoryError::persistence)?;
        if updated.is_empty() {
            return Err(CommentRepositoryError::NotFound(comment.id()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Option<Comment>> {
        Ok(self.select(&by_id(id).limit(1)).await?.into_iter().next())
    }

    async fn list_for_task(&self, task_id: TaskId) -> CommentRepositoryResult<Vec<Comment>> {
        let query = Query::new()
            .eq("task_id", task_id.to_string())
            .order_by("created_at", Direction::Ascending);
        self.select(&query).await
    }

    async fn delete(&self, id: CommentId) -> CommentRepositoryResult<()> {
        let removed = self
            .store
            .delete(Collection::TaskComments, &by_id(id))
            .await
            .map_err(CommentRepositoryError::persistence)?;
        if removed == 0 {
            return Err(CommentRepositoryError::NotFound(id));
        }
        Ok(())
    }
}
