//! Posting, editing, deleting and listing comments.

use std::sync::Arc;

use chrono::Duration;
use mockable::Clock;
use tracing::{debug, info};

use super::{CommentServiceError, CommentServiceResult};
use crate::access::{Action, Resource, authorize};
use crate::comment::{
    domain::{Comment, CommentId},
    ports::{CommentRepository, CommentRepositoryError},
};
use crate::identity::domain::Principal;
use crate::task::{domain::TaskId, ports::TaskRepository};

/// Default comment edit window: five minutes.
pub const DEFAULT_EDIT_WINDOW_SECS: i64 = 300;

/// Comment moderation service.
#[derive(Clone)]
pub struct CommentService<R, T, C>
where
    R: CommentRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    comments: Arc<R>,
    tasks: Arc<T>,
    clock: Arc<C>,
    edit_window: Duration,
}

impl<R, T, C> CommentService<R, T, C>
where
    R: CommentRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a comment service with the default edit window.
    #[must_use]
    pub const fn new(comments: Arc<R>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            comments,
            tasks,
            clock,
            edit_window: Duration::seconds(DEFAULT_EDIT_WINDOW_SECS),
        }
    }

    /// Overrides how long authors may edit after posting.
    #[must_use]
    pub const fn with_edit_window(mut self, edit_window: Duration) -> Self {
        self.edit_window = edit_window;
        self
    }

    /// Returns the configured edit window.
    #[must_use]
    pub const fn edit_window(&self) -> Duration {
        self.edit_window
    }

    /// Posts a comment on a task.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::TaskNotFound`] for an unknown task and
    /// [`CommentServiceError::Domain`] for blank text.
    pub async fn post_comment(
        &self,
        task_id: TaskId,
        text: &str,
        author: &Principal,
    ) -> CommentServiceResult<Comment> {
        authorize(author, &Action::PostComment, &Resource::None)?;
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(CommentServiceError::TaskNotFound(task_id))?;
        let comment = Comment::new(task_id, author, text, &*self.clock)?;
        self.comments.store(&comment).await?;
        info!(
            comment_id = %comment.id(),
            task_id = %task_id,
            author = %author.id(),
            mentions = comment.mentions().len(),
            "comment posted"
        );
        self.get_comment(comment.id()).await
    }

    /// Replaces a comment's text and marks it edited.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::Access`] when the requester is not the
    /// author or the edit window has closed.
    pub async fn edit_comment(
        &self,
        comment_id: CommentId,
        text: &str,
        requester: &Principal,
    ) -> CommentServiceResult<Comment> {
        let mut comment = self.get_comment(comment_id).await?;
        authorize(requester, &Action::EditComment, &self.resource(&comment))?;
        comment.edit(text)?;
        self.comments
            .update(&comment)
            .await
            .map_err(not_found(comment_id))?;
        info!(comment_id = %comment_id, "comment edited");
        self.get_comment(comment_id).await
    }

    /// Deletes a comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::Access`] unless the requester is an
    /// admin.
    pub async fn delete_comment(
        &self,
        comment_id: CommentId,
        requester: &Principal,
    ) -> CommentServiceResult<()> {
        authorize(requester, &Action::DeleteComment, &Resource::None)?;
        self.comments
            .delete(comment_id)
            .await
            .map_err(not_found(comment_id))?;
        info!(comment_id = %comment_id, deleted_by = %requester.id(), "comment deleted");
        Ok(())
    }

    /// Loads a comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::CommentNotFound`] when it does not
    /// exist.
    pub async fn get_comment(&self, comment_id: CommentId) -> CommentServiceResult<Comment> {
        self.comments
            .find_by_id(comment_id)
            .await?
            .ok_or(CommentServiceError::CommentNotFound(comment_id))
    }

    /// Lists a task's comments, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::Repository`] when persistence fails.
    pub async fn list_comments(&self, task_id: TaskId) -> CommentServiceResult<Vec<Comment>> {
        let comments = self.comments.list_for_task(task_id).await?;
        debug!(task_id = %task_id, count = comments.len(), "comments listed");
        Ok(comments)
    }

    /// Returns `true` when `requester` may still edit `comment`.
    #[must_use]
    pub fn can_edit(&self, comment: &Comment, requester: &Principal) -> bool {
        authorize(requester, &Action::EditComment, &self.resource(comment)).is_ok()
    }

    /// Minutes, rounded up, the requester has left to edit `comment`.
    ///
    /// Zero for anyone but the author.
    #[must_use]
    pub fn remaining_edit_minutes(&self, comment: &Comment, requester: &Principal) -> i64 {
        if comment.user_id() != requester.id() {
            return 0;
        }
        comment.remaining_edit_minutes(self.clock.utc(), self.edit_window)
    }

    fn resource(&self, comment: &Comment) -> Resource {
        Resource::Comment {
            author: comment.user_id(),
            created_at: comment.created_at(),
            now: self.clock.utc(),
            edit_window: self.edit_window,
        }
    }
}

fn not_found(
    comment_id: CommentId,
) -> impl FnOnce(CommentRepositoryError) -> CommentServiceError {
    move |err| match err {
        CommentRepositoryError::NotFound(_) => CommentServiceError::CommentNotFound(comment_id),
        other => other.into(),
    }
}
