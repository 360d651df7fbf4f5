//! Notice aggregate.

use super::{CategoryId, NoticeDomainError, NoticeId, TagId};
use crate::identity::domain::{Principal, ProfileId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Fields an admin fills in when publishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotice {
    title: String,
    content: String,
    category_id: Option<CategoryId>,
    video_url: Option<String>,
    is_pinned: bool,
}

impl NewNotice {
    /// Creates an unpinned, uncategorised notice.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category_id: None,
            video_url: None,
            is_pinned: false,
        }
    }

    /// Files the notice under a category.
    #[must_use]
    pub const fn in_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Links a video.
    #[must_use]
    pub fn with_video_url(mut self, url: impl Into<String>) -> Self {
        let link = url.into();
        self.video_url = (!link.trim().is_empty()).then_some(link);
        self
    }

    /// Pins the notice to the top of the list.
    #[must_use]
    pub const fn pinned(mut self) -> Self {
        self.is_pinned = true;
        self
    }
}

/// A published notice, serialised with the `notices` column names.
///
/// `tag_ids` lives in `notice_tag_assignments` and is never written with the
/// notice row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    id: NoticeId,
    title: String,
    content: String,
    #[serde(default)]
    category_id: Option<CategoryId>,
    #[serde(default)]
    author_id: Option<ProfileId>,
    #[serde(default)]
    author_name: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    video_url: Option<String>,
    #[serde(default)]
    is_pinned: bool,
    #[serde(default)]
    view_count: i64,
    published_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(skip)]
    tag_ids: Vec<TagId>,
}

impl Notice {
    /// Builds a notice authored by `author`, published now.
    ///
    /// # Errors
    ///
    /// Returns [`NoticeDomainError::EmptyTitle`] or
    /// [`NoticeDomainError::EmptyContent`] for blank fields.
    pub fn new(
        new_notice: NewNotice,
        author: &Principal,
        clock: &impl Clock,
    ) -> Result<Self, NoticeDomainError> {
        let title = new_notice.title.trim();
        if title.is_empty() {
            return Err(NoticeDomainError::EmptyTitle);
        }
        if new_notice.content.trim().is_empty() {
            return Err(NoticeDomainError::EmptyContent);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: NoticeId::new(),
            title: title.to_owned(),
            content: new_notice.content,
            category_id: new_notice.category_id,
            author_id: Some(author.id()),
            author_name: Some(author.display_name().to_owned()),
            image_url: None,
            video_url: new_notice.video_url,
            is_pinned: new_notice.is_pinned,
            view_count: 0,
            published_at: timestamp,
            updated_at: timestamp,
            tag_ids: Vec::new(),
        })
    }

    /// Returns the notice identifier.
    #[must_use]
    pub const fn id(&self) -> NoticeId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the category, if any.
    #[must_use]
    pub const fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }

    /// Returns the author, unless they have left the roster.
    #[must_use]
    pub const fn author_id(&self) -> Option<ProfileId> {
        self.author_id
    }

    /// Returns the author's cached display name.
    #[must_use]
    pub fn author_name(&self) -> Option<&str> {
        self.author_name.as_deref()
    }

    /// Returns the public image URL.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Returns the video link.
    #[must_use]
    pub fn video_url(&self) -> Option<&str> {
        self.video_url.as_deref()
    }

    /// Returns `true` when pinned.
    #[must_use]
    pub const fn is_pinned(&self) -> bool {
        self.is_pinned
    }

    /// Returns how often the notice was opened.
    #[must_use]
    pub const fn view_count(&self) -> i64 {
        self.view_count
    }

    /// Returns the publication time.
    #[must_use]
    pub const fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    /// Returns the last modification time.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the attached tags.
    #[must_use]
    pub fn tag_ids(&self) -> &[TagId] {
        &self.tag_ids
    }

    /// Sets the public image URL.
    pub fn set_image_url(&mut self, url: impl Into<String>) {
        self.image_url = Some(url.into());
    }

    /// Attaches tags read from the assignment relation.
    #[must_use]
    pub fn with_tag_ids(mut self, tag_ids: Vec<TagId>) -> Self {
        self.tag_ids = tag_ids;
        self
    }
}
