//! Notice publishing services.

mod error;
mod publisher;

pub use error::{NoticeServiceError, NoticeServiceResult};
pub use publisher::{DEFAULT_IMAGE_BUCKET, NoticeService};
