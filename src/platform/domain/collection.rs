//! Named collections exposed by the data platform.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Collection (table) names known to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Team member profiles.
    Profiles,
    /// Tasks.
    Tasks,
    /// Task to member assignments.
    TaskAssignments,
    /// Per-task comments.
    TaskComments,
    /// One attendance row per member per day.
    DailyAttendance,
    /// Announcements.
    Notices,
    /// Notice categories.
    NoticeCategories,
    /// Notice tags.
    NoticeTags,
    /// Notice to tag assignments.
    NoticeTagAssignments,
}

/// How a collection obtains its `id` column when a record omits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratedId {
    /// Random UUID.
    Uuid,
    /// Monotonic integer sequence.
    Serial,
    /// The collection has no surrogate `id` column.
    None,
}

impl Collection {
    /// Every known collection.
    pub const ALL: [Self; 9] = [
        Self::Profiles,
        Self::Tasks,
        Self::TaskAssignments,
        Self::TaskComments,
        Self::DailyAttendance,
        Self::Notices,
        Self::NoticeCategories,
        Self::NoticeTags,
        Self::NoticeTagAssignments,
    ];

    /// Returns the canonical table name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Profiles => "profiles",
            Self::Tasks => "tasks",
            Self::TaskAssignments => "task_assignments",
            Self::TaskComments => "task_comments",
            Self::DailyAttendance => "daily_attendance",
            Self::Notices => "notices",
            Self::NoticeCategories => "notice_categories",
            Self::NoticeTags => "notice_tags",
            Self::NoticeTagAssignments => "notice_tag_assignments",
        }
    }

    /// Returns the unique keys enforced on the collection.
    ///
    /// Each entry is the column list of one unique constraint.
    #[must_use]
    pub const fn unique_keys(self) -> &'static [&'static [&'static str]] {
        match self {
            Self::Profiles
            | Self::Tasks
            | Self::TaskComments
            | Self::Notices
            | Self::NoticeCategories => &[&["id"]],
            Self::NoticeTags => &[&["id"], &["name"]],
            Self::TaskAssignments => &[&["id"], &["task_id", "user_id"]],
            Self::DailyAttendance => &[&["user_id", "date"]],
            Self::NoticeTagAssignments => &[&["notice_id", "tag_id"]],
        }
    }

    /// Returns how the collection fills a missing `id`.
    #[must_use]
    pub const fn generated_id(self) -> GeneratedId {
        match self {
            Self::Profiles
            | Self::Tasks
            | Self::TaskAssignments
            | Self::TaskComments
            | Self::Notices => GeneratedId::Uuid,
            Self::NoticeCategories | Self::NoticeTags => GeneratedId::Serial,
            Self::DailyAttendance | Self::NoticeTagAssignments => GeneratedId::None,
        }
    }

    /// Returns the name of a unique constraint, e.g. `task_assignments_task_id_user_id_key`.
    #[must_use]
    pub fn constraint_name(self, columns: &[&str]) -> String {
        format!("{}_{}_key", self.as_str(), columns.join("_"))
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
