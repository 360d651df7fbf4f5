//! Port contracts for notice persistence.

pub mod repository;

pub use repository::{NoticeRepository, NoticeRepositoryError, NoticeRepositoryResult};
