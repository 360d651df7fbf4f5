//! Comment aggregate.

use super::{CommentDomainError, CommentId, Mention, extract_mentions};
use crate::identity::domain::{Principal, ProfileId};
use crate::task::domain::TaskId;
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

const SECONDS_PER_MINUTE: i64 = 60;

/// A comment on a task, serialised with the `task_comments` column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    user_id: ProfileId,
    #[serde(default)]
    user_name: Option<String>,
    comment_text: String,
    #[serde(default)]
    is_edited: bool,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment by `author` on a task.
    ///
    /// # Errors
    ///
    /// Returns [`CommentDomainError::EmptyText`] when the text is blank.
    pub fn new(
        task_id: TaskId,
        author: &Principal,
        text: &str,
        clock: &impl Clock,
    ) -> Result<Self, CommentDomainError> {
        Ok(Self {
            id: CommentId::new(),
            task_id,
            user_id: author.id(),
            user_name: Some(author.display_name().to_owned()),
            comment_text: validated_text(text)?,
            is_edited: false,
            created_at: clock.utc(),
        })
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the task the comment belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the author.
    #[must_use]
    pub const fn user_id(&self) -> ProfileId {
        self.user_id
    }

    /// Returns the author's cached display name.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// Returns the raw text, mentions still encoded.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.comment_text
    }

    /// Returns `true` once the comment has been edited.
    #[must_use]
    pub const fn is_edited(&self) -> bool {
        self.is_edited
    }

    /// Returns when the comment was posted.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the mentions in the text, in order.
    #[must_use]
    pub fn mentions(&self) -> Vec<Mention> {
        extract_mentions(&self.comment_text)
    }

    /// Whole minutes, rounded up, until `edit_window` closes; zero once it
    /// has.
    #[must_use]
    #[expect(
        clippy::integer_division,
        reason = "ceiling division over a positive second count"
    )]
    pub fn remaining_edit_minutes(&self, now: DateTime<Utc>, edit_window: Duration) -> i64 {
        let remaining = (self.created_at + edit_window - now).num_seconds();
        if remaining <= 0 {
            return 0;
        }
        (remaining + SECONDS_PER_MINUTE - 1) / SECONDS_PER_MINUTE
    }

    /// Replaces the text and marks the comment as edited.
    ///
    /// # Errors
    ///
    /// Returns [`CommentDomainError::EmptyText`] when the text is blank;
    /// the comment is left unchanged.
    pub fn edit(&mut self, text: &str) -> Result<(), CommentDomainError> {
        self.comment_text = validated_text(text)?;
        self.is_edited = true;
        Ok(())
    }
}

fn validated_text(text: &str) -> Result<String, CommentDomainError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CommentDomainError::EmptyText);
    }
    Ok(trimmed.to_owned())
}
