//! Named remote procedures hosted by the data platform.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Remote procedures the application invokes by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Procedure {
    /// Upserts one attendance row keyed by member and day.
    MarkAttendance,
    /// Returns a member's attendance over a trailing window of days.
    GetUserAttendanceHistory,
    /// Aggregates attendance for every member over one calendar month.
    GetMonthlyAttendanceSummary,
    /// Increments a notice's view counter and returns the new value.
    IncrementNoticeViews,
}

impl Procedure {
    /// Returns the procedure name as registered on the platform.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MarkAttendance => "mark_attendance",
            Self::GetUserAttendanceHistory => "get_user_attendance_history",
            Self::GetMonthlyAttendanceSummary => "get_monthly_attendance_summary",
            Self::IncrementNoticeViews => "increment_notice_views",
        }
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
