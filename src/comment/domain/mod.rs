//! Domain model for task comments and mentions.

mod comment;
mod error;
mod ids;
pub mod mention;

pub use comment::Comment;
pub use error::CommentDomainError;
pub use ids::CommentId;
pub use mention::{
    MENTION_QUERY_SPAN, Mention, encode_mention, extract_mentions, mention_candidates,
    mention_query, render_mentions,
};
