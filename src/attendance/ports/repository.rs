//! Repository port for daily attendance.

use crate::attendance::domain::{AttendanceRecord, AttendanceSummary, MarkedAttendance};
use crate::identity::domain::ProfileId;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

/// Result type for attendance repository operations.
pub type AttendanceRepositoryResult<T> = Result<T, AttendanceRepositoryError>;

/// Attendance persistence contract.
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Writes the row for `(user_id, date)`, replacing any existing one, and
    /// returns the stored row.
    async fn mark(&self, attendance: &MarkedAttendance)
    -> AttendanceRepositoryResult<AttendanceRecord>;

    /// Finds the row for a member on a day.
    async fn find_on(
        &self,
        user_id: ProfileId,
        day: NaiveDate,
    ) -> AttendanceRepositoryResult<Option<AttendanceRecord>>;

    /// Returns a member's rows from `as_of - days_back` to `as_of`
    /// inclusive, newest first.
    async fn history(
        &self,
        user_id: ProfileId,
        days_back: u32,
        as_of: NaiveDate,
    ) -> AttendanceRepositoryResult<Vec<AttendanceRecord>>;

    /// Returns a member's rows between two days inclusive, newest first.
    async fn list_between(
        &self,
        user_id: ProfileId,
        first: NaiveDate,
        last: NaiveDate,
    ) -> AttendanceRepositoryResult<Vec<AttendanceRecord>>;

    /// Returns one summary per member with rows in the month, ordered by
    /// name.
    async fn monthly_summary(
        &self,
        month: u32,
        year: i32,
    ) -> AttendanceRepositoryResult<Vec<AttendanceSummary>>;
}

/// Errors returned by attendance repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AttendanceRepositoryError {
    /// The store accepted the write but returned no row.
    #[error("attendance write for {user_id} on {date} returned no row")]
    MissingRow {
        /// Member.
        user_id: ProfileId,
        /// Day.
        date: NaiveDate,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AttendanceRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
