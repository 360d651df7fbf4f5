//! Realtime comment lists per task.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{broadcast::error::RecvError, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::CommentServiceResult;
use crate::comment::{domain::Comment, ports::CommentRepository};
use crate::platform::{domain::Collection, ports::ChangeFeed};
use crate::task::domain::TaskId;

/// Publishes a task's full comment list whenever one of its comments
/// changes.
pub struct CommentFeed<R, F> {
    comments: Arc<R>,
    changes: Arc<F>,
}

impl<R, F> Clone for CommentFeed<R, F> {
    fn clone(&self) -> Self {
        Self {
            comments: Arc::clone(&self.comments),
            changes: Arc::clone(&self.changes),
        }
    }
}

impl<R, F> CommentFeed<R, F>
where
    R: CommentRepository + 'static,
    F: ChangeFeed + 'static,
{
    /// Creates a feed reading from `comments` and listening on `changes`.
    #[must_use]
    pub const fn new(comments: Arc<R>, changes: Arc<F>) -> Self {
        Self { comments, changes }
    }

    /// Starts following a task's comments.
    ///
    /// The subscription starts with the current list. Any change event on
    /// `task_comments` for the task, or a lagged receiver, triggers a full
    /// re-read. A failed re-read is logged and the previous list kept.
    /// Must be called inside a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns the repository error if the initial read fails.
    pub async fn subscribe(&self, task_id: TaskId) -> CommentServiceResult<CommentSubscription> {
        let mut events = self.changes.subscribe();
        let initial = self.comments.list_for_task(task_id).await?;
        let (sender, receiver) = watch::channel(initial);
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let comments = Arc::clone(&self.comments);
        let key = Value::String(task_id.to_string());

        tokio::spawn(async move {
            loop {
                let relevant = tokio::select! {
                    () = token.cancelled() => break,
                    received = events.recv() => match received {
                        Ok(event) => event.concerns(Collection::TaskComments, "task_id", &key),
                        Err(RecvError::Lagged(skipped)) => {
                            debug!(task_id = %task_id, skipped, "comment feed lagged");
                            true
                        }
                        Err(RecvError::Closed) => break,
                    },
                };
                if !relevant {
                    continue;
                }
                match comments.list_for_task(task_id).await {
                    Ok(latest) => {
                        if sender.send(latest).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        warn!(task_id = %task_id, error = %err, "comment re-read failed");
                    }
                }
            }
            debug!(task_id = %task_id, "comment feed stopped");
        });

        Ok(CommentSubscription { receiver, cancel })
    }
}

/// A live view of one task's comments. Dropping it stops the feed.
#[derive(Debug)]
pub struct CommentSubscription {
    receiver: watch::Receiver<Vec<Comment>>,
    cancel: CancellationToken,
}

impl CommentSubscription {
    /// Returns the most recently published list.
    #[must_use]
    pub fn latest(&self) -> Vec<Comment> {
        self.receiver.borrow().clone()
    }

    /// Waits for the next published list.
    ///
    /// Returns `None` once the feed has stopped.
    pub async fn next(&mut self) -> Option<Vec<Comment>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Returns a receiver that can be shared with other consumers.
    #[must_use]
    pub fn receiver(&self) -> watch::Receiver<Vec<Comment>> {
        self.receiver.clone()
    }

    /// Stops the feed.
    pub fn close(&self) {
        self.cancel.cancel();
    }
}

impl Drop for CommentSubscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
