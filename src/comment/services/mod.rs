//! Comment orchestration services.

mod error;
mod feed;
mod moderation;

pub use error::{CommentServiceError, CommentServiceResult};
pub use feed::{CommentFeed, CommentSubscription};
pub use moderation::{CommentService, DEFAULT_EDIT_WINDOW_SECS};
