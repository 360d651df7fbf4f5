//! Port contracts for task and assignment persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;

pub use repository::{
    AssignmentRepository, TaskRepository, TaskRepositoryError, TaskRepositoryResult,
};
