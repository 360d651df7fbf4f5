//! Identifier type for comments.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a task comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(Uuid);

impl_uuid_id!(CommentId, "comment");
