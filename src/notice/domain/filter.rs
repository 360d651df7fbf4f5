//! Filtering and ordering of notice lists.

use super::{CategoryId, Notice, TagId};

/// Narrows a notice list. Unset criteria match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoticeFilter {
    /// Only notices in this category.
    pub category: Option<CategoryId>,
    /// Only notices carrying this tag.
    pub tag: Option<TagId>,
}

impl NoticeFilter {
    /// Matches every notice.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            category: None,
            tag: None,
        }
    }

    /// Restricts to a category.
    #[must_use]
    pub const fn in_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    /// Restricts to a tag.
    #[must_use]
    pub const fn tagged(mut self, tag: TagId) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Returns `true` when `notice` meets every set criterion.
    #[must_use]
    pub fn matches(&self, notice: &Notice) -> bool {
        self.category
            .is_none_or(|category| notice.category_id() == Some(category))
            && self.tag.is_none_or(|tag| notice.tag_ids().contains(&tag))
    }
}

/// Orders pinned notices first, then newest first. Ties keep their order.
pub fn sort_notices(notices: &mut [Notice]) {
    notices.sort_by(|left, right| {
        right
            .is_pinned()
            .cmp(&left.is_pinned())
            .then_with(|| right.published_at().cmp(&left.published_at()))
    });
}
