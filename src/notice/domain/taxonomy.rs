//! Notice categories and tags.

use super::{CategoryId, TagId};
use serde::{Deserialize, Serialize};

/// A category a notice may be filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeCategory {
    /// Identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Display colour, e.g. `#3b82f6`.
    #[serde(default)]
    pub color: Option<String>,
    /// Icon, usually an emoji.
    #[serde(default)]
    pub icon: Option<String>,
}

/// A free-form label; names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeTag {
    /// Identifier.
    pub id: TagId,
    /// Unique name.
    pub name: String,
}
