//! Domain model for notices, categories and tags.

mod error;
mod filter;
mod ids;
mod image;
mod notice;
mod taxonomy;

pub use error::NoticeDomainError;
pub use filter::{NoticeFilter, sort_notices};
pub use ids::{CategoryId, NoticeId, TagId};
pub use image::{ImageUpload, MAX_IMAGE_BYTES};
pub use notice::{NewNotice, Notice};
pub use taxonomy::{NoticeCategory, NoticeTag};
