//! Repository port for notices, their tags and categories.

use crate::notice::domain::{Notice, NoticeCategory, NoticeId, NoticeTag, TagId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notice repository operations.
pub type NoticeRepositoryResult<T> = Result<T, NoticeRepositoryError>;

/// Notice persistence contract.
///
/// Notices returned by reads carry their tag ids.
#[async_trait]
pub trait NoticeRepository: Send + Sync {
    /// Stores a new notice row. Tags are attached separately.
    async fn store(&self, notice: &Notice) -> NoticeRepositoryResult<()>;

    /// Finds a notice by identifier.
    async fn find_by_id(&self, id: NoticeId) -> NoticeRepositoryResult<Option<Notice>>;

    /// Returns every notice.
    async fn list_all(&self) -> NoticeRepositoryResult<Vec<Notice>>;

    /// Deletes a notice and its tag rows.
    ///
    /// # Errors
    ///
    /// Returns [`NoticeRepositoryError::NotFound`] when the notice does not
    /// exist.
    async fn delete(&self, id: NoticeId) -> NoticeRepositoryResult<()>;

    /// Attaches a tag to a notice.
    ///
    /// # Errors
    ///
    /// Returns [`NoticeRepositoryError::DuplicateTagAssignment`] when the
    /// pair already exists.
    async fn assign_tag(&self, notice_id: NoticeId, tag_id: TagId) -> NoticeRepositoryResult<()>;

    /// Adds one to the view counter and returns the new value, or `None`
    /// when the notice does not exist.
    async fn increment_views(&self, id: NoticeId) -> NoticeRepositoryResult<Option<i64>>;

    /// Returns every category ordered by name.
    async fn categories(&self) -> NoticeRepositoryResult<Vec<NoticeCategory>>;

    /// Returns every tag ordered by name.
    async fn tags(&self) -> NoticeRepositoryResult<Vec<NoticeTag>>;

    /// Creates a category and returns it with its assigned id.
    async fn create_category(
        &self,
        name: &str,
        color: Option<&str>,
        icon: Option<&str>,
    ) -> NoticeRepositoryResult<NoticeCategory>;

    /// Creates a tag and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`NoticeRepositoryError::DuplicateTagName`] when the name is
    /// taken.
    async fn create_tag(&self, name: &str) -> NoticeRepositoryResult<NoticeTag>;
}

/// Errors returned by notice repository implementations.
#[derive(Debug, Clone, Error)]
pub enum NoticeRepositoryError {
    /// The notice was not found.
    #[error("notice not found: {0}")]
    NotFound(NoticeId),

    /// The notice already carries the tag.
    #[error("notice {notice_id} already has tag {tag_id}")]
    DuplicateTagAssignment {
        /// Notice.
        notice_id: NoticeId,
        /// Tag.
        tag_id: TagId,
    },

    /// A tag with the name already exists.
    #[error("tag already exists: {0}")]
    DuplicateTagName(String),

    /// The store returned no row for a write.
    #[error("store returned no row for {0}")]
    MissingRow(&'static str),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NoticeRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
