//! Marking, reading and summarising attendance.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;
use thiserror::Error;
use tracing::{debug, info};

use crate::access::{AccessDenied, Action, Resource, authorize};
use crate::attendance::{
    domain::{
        AttendanceRecord, AttendanceStatus, AttendanceSummary, MarkAttendanceRequest,
        MarkedAttendance, MonthRange, personal_report_csv, summary_report_csv,
    },
    ports::{AttendanceRepository, AttendanceRepositoryError},
};
use crate::error::ErrorKind;
use crate::identity::{
    domain::{Principal, ProfileId},
    ports::{ProfileRepository, ProfileRepositoryError},
};

/// Trailing window used by [`AttendanceService::recent_history`].
pub const DEFAULT_HISTORY_DAYS: u32 = 30;

/// Service-level errors for attendance operations.
#[derive(Debug, Error)]
pub enum AttendanceServiceError {
    /// The requester may not perform the operation.
    #[error(transparent)]
    Access(#[from] AccessDenied),
    /// The month or year does not name a calendar month.
    #[error("invalid month: {year}-{month}")]
    InvalidMonth {
        /// Requested year.
        year: i32,
        /// Requested month.
        month: u32,
    },
    /// The member is not on the roster.
    #[error("profile not found: {0}")]
    ProfileNotFound(ProfileId),
    /// Attendance repository operation failed.
    #[error(transparent)]
    Repository(#[from] AttendanceRepositoryError),
    /// Profile lookup failed.
    #[error(transparent)]
    Profiles(#[from] ProfileRepositoryError),
}

impl AttendanceServiceError {
    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(_) => ErrorKind::PermissionDenied,
            Self::InvalidMonth { .. } => ErrorKind::Validation,
            Self::ProfileNotFound(_) | Self::Profiles(ProfileRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::Repository(_) | Self::Profiles(ProfileRepositoryError::Persistence(_)) => {
                ErrorKind::Upstream
            }
        }
    }
}

/// Result type for attendance service operations.
pub type AttendanceServiceResult<T> = Result<T, AttendanceServiceError>;

/// Attendance recording service.
#[derive(Clone)]
pub struct AttendanceService<R, P, C>
where
    R: AttendanceRepository,
    P: ProfileRepository,
    C: Clock + Send + Sync,
{
    attendance: Arc<R>,
    profiles: Arc<P>,
    clock: Arc<C>,
    history_days: u32,
}

impl<R, P, C> AttendanceService<R, P, C>
where
    R: AttendanceRepository,
    P: ProfileRepository,
    C: Clock + Send + Sync,
{
    /// Creates an attendance service.
    #[must_use]
    pub const fn new(attendance: Arc<R>, profiles: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            attendance,
            profiles,
            clock,
            history_days: DEFAULT_HISTORY_DAYS,
        }
    }

    /// Overrides the window used by [`Self::recent_history`].
    #[must_use]
    pub const fn with_history_days(mut self, days: u32) -> Self {
        self.history_days = days;
        self
    }

    /// Records attendance, overwriting any earlier mark for the same day.
    ///
    /// The day defaults to today in UTC.
    ///
    /// # Errors
    ///
    /// Returns [`AttendanceServiceError::Access`] when a non-admin marks
    /// someone else and [`AttendanceServiceError::ProfileNotFound`] for an
    /// unknown member.
    pub async fn mark_attendance(
        &self,
        requester: &Principal,
        request: MarkAttendanceRequest,
    ) -> AttendanceServiceResult<AttendanceRecord> {
        authorize(
            requester,
            &Action::MarkAttendance,
            &Resource::Member(request.user_id),
        )?;
        let profile = self
            .profiles
            .find_by_id(request.user_id)
            .await?
            .ok_or(AttendanceServiceError::ProfileNotFound(request.user_id))?;
        let now = self.clock.utc();
        let marked = MarkedAttendance {
            user_id: request.user_id,
            user_name: profile.display_name().to_owned(),
            date: request.day.unwrap_or_else(|| now.date_naive()),
            status: request.status,
            remarks: request.remarks,
            marked_at: now,
        };
        let record = self.attendance.mark(&marked).await?;
        info!(
            user_id = %record.user_id(),
            date = %record.date(),
            status = %record.status(),
            marked_by = %requester.id(),
            "attendance marked"
        );
        Ok(record)
    }

    /// Returns a member's status on a day; `Absent` when nothing was marked.
    ///
    /// # Errors
    ///
    /// Returns [`AttendanceServiceError::Access`] when a non-admin reads
    /// someone else.
    pub async fn status_on(
        &self,
        requester: &Principal,
        user_id: ProfileId,
        day: NaiveDate,
    ) -> AttendanceServiceResult<AttendanceStatus> {
        authorize(requester, &Action::ViewAttendance, &Resource::Member(user_id))?;
        Ok(self
            .attendance
            .find_on(user_id, day)
            .await?
            .map_or(AttendanceStatus::Absent, |record| record.status()))
    }

    /// Returns the requester's own status today.
    ///
    /// # Errors
    ///
    /// Returns [`AttendanceServiceError::Repository`] when persistence fails.
    pub async fn status_today(
        &self,
        requester: &Principal,
    ) -> AttendanceServiceResult<AttendanceStatus> {
        let today = self.clock.utc().date_naive();
        self.status_on(requester, requester.id(), today).await
    }

    /// Returns a member's rows over the last `days_back` days, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AttendanceServiceError::Access`] when a non-admin reads
    /// someone else.
    pub async fn history(
        &self,
        requester: &Principal,
        user_id: ProfileId,
        days_back: u32,
    ) -> AttendanceServiceResult<Vec<AttendanceRecord>> {
        authorize(requester, &Action::ViewAttendance, &Resource::Member(user_id))?;
        let as_of = self.clock.utc().date_naive();
        let records = self.attendance.history(user_id, days_back, as_of).await?;
        debug!(user_id = %user_id, days_back, count = records.len(), "history read");
        Ok(records)
    }

    /// [`Self::history`] over the configured default window.
    ///
    /// # Errors
    ///
    /// As for [`Self::history`].
    pub async fn recent_history(
        &self,
        requester: &Principal,
        user_id: ProfileId,
    ) -> AttendanceServiceResult<Vec<AttendanceRecord>> {
        self.history(requester, user_id, self.history_days).await
    }

    /// Summarises a month.
    ///
    /// Admins get every member with rows in the month, ordered by name.
    /// Everyone else gets a single summary of their own rows.
    ///
    /// # Errors
    ///
    /// Returns [`AttendanceServiceError::InvalidMonth`] for a bad month.
    pub async fn monthly_summary(
        &self,
        requester: &Principal,
        month: u32,
        year: i32,
    ) -> AttendanceServiceResult<Vec<AttendanceSummary>> {
        let range = month_range(year, month)?;
        if requester.is_admin() {
            authorize(requester, &Action::ViewAllAttendance, &Resource::None)?;
            return Ok(self.attendance.monthly_summary(month, year).await?);
        }
        let records = self.own_month(requester, range).await?;
        Ok(vec![AttendanceSummary::tally(
            requester.id(),
            requester.display_name(),
            &records,
        )])
    }

    /// Exports a month as CSV.
    ///
    /// Admins get the team summary; everyone else gets their own days,
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AttendanceServiceError::InvalidMonth`] for a bad month.
    pub async fn monthly_report_csv(
        &self,
        requester: &Principal,
        month: u32,
        year: i32,
    ) -> AttendanceServiceResult<String> {
        let range = month_range(year, month)?;
        if requester.is_admin() {
            let summaries = self.monthly_summary(requester, month, year).await?;
            return Ok(summary_report_csv(&summaries));
        }
        let records = self.own_month(requester, range).await?;
        Ok(personal_report_csv(&records))
    }

    async fn own_month(
        &self,
        requester: &Principal,
        range: MonthRange,
    ) -> AttendanceServiceResult<Vec<AttendanceRecord>> {
        authorize(
            requester,
            &Action::ViewAttendance,
            &Resource::Member(requester.id()),
        )?;
        Ok(self
            .attendance
            .list_between(requester.id(), range.first, range.last)
            .await?)
    }
}

fn month_range(year: i32, month: u32) -> AttendanceServiceResult<MonthRange> {
    MonthRange::new(year, month).ok_or(AttendanceServiceError::InvalidMonth { year, month })
}
