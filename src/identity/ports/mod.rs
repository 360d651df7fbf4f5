//! Port contracts for roster persistence.

mod repository;

pub use repository::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult};
