//! Port contracts for attendance persistence.

pub mod repository;

pub use repository::{
    AttendanceRepository, AttendanceRepositoryError, AttendanceRepositoryResult,
};
