//! Attendance rows and mark requests.

use super::AttendanceStatus;
use crate::identity::domain::ProfileId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One member's attendance on one day, with the `daily_attendance` column
/// names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    user_id: ProfileId,
    #[serde(default)]
    user_name: Option<String>,
    date: NaiveDate,
    status: AttendanceStatus,
    #[serde(default)]
    remarks: Option<String>,
    marked_at: DateTime<Utc>,
}

impl AttendanceRecord {
    /// Returns the member.
    #[must_use]
    pub const fn user_id(&self) -> ProfileId {
        self.user_id
    }

    /// Returns the member's cached display name.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// Returns the calendar day.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the recorded status.
    #[must_use]
    pub const fn status(&self) -> AttendanceStatus {
        self.status
    }

    /// Returns the free-text remarks.
    #[must_use]
    pub fn remarks(&self) -> Option<&str> {
        self.remarks.as_deref()
    }

    /// Returns when the row was last written.
    #[must_use]
    pub const fn marked_at(&self) -> DateTime<Utc> {
        self.marked_at
    }
}

/// Request to record a member's attendance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkAttendanceRequest {
    pub(crate) user_id: ProfileId,
    pub(crate) status: AttendanceStatus,
    pub(crate) remarks: Option<String>,
    pub(crate) day: Option<NaiveDate>,
}

impl MarkAttendanceRequest {
    /// Marks `user_id` with `status` for today.
    #[must_use]
    pub const fn new(user_id: ProfileId, status: AttendanceStatus) -> Self {
        Self {
            user_id,
            status,
            remarks: None,
            day: None,
        }
    }

    /// Attaches remarks. Blank remarks are stored as none.
    #[must_use]
    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        let text = remarks.into();
        self.remarks = (!text.trim().is_empty()).then_some(text);
        self
    }

    /// Marks a specific day instead of today.
    #[must_use]
    pub const fn on(mut self, day: NaiveDate) -> Self {
        self.day = Some(day);
        self
    }

    /// Returns the member being marked.
    #[must_use]
    pub const fn user_id(&self) -> ProfileId {
        self.user_id
    }
}

/// A fully resolved attendance write handed to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedAttendance {
    /// Member.
    pub user_id: ProfileId,
    /// Display name cached on the row.
    pub user_name: String,
    /// Day being marked.
    pub date: NaiveDate,
    /// Status.
    pub status: AttendanceStatus,
    /// Optional remarks.
    pub remarks: Option<String>,
    /// Write time.
    pub marked_at: DateTime<Utc>,
}
