//! Monthly attendance aggregates.

use super::{AttendanceRecord, AttendanceStatus};
use crate::identity::domain::ProfileId;
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Attendance counts for one member over one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Member.
    pub user_id: ProfileId,
    /// Display name.
    pub user_name: String,
    /// Days with a row, whatever the status.
    pub total_days: u32,
    /// `Present` days.
    pub present_days: u32,
    /// `Absent` days.
    pub absent_days: u32,
    /// `Leave` days.
    pub leave_days: u32,
    /// `WFH` days.
    pub wfh_days: u32,
    /// `present_days / total_days * 100`, two decimals.
    pub attendance_percentage: f64,
}

impl AttendanceSummary {
    /// Aggregates `records` for one member.
    #[must_use]
    pub fn tally<'a>(
        user_id: ProfileId,
        user_name: impl Into<String>,
        records: impl IntoIterator<Item = &'a AttendanceRecord>,
    ) -> Self {
        let mut summary = Self {
            user_id,
            user_name: user_name.into(),
            total_days: 0,
            present_days: 0,
            absent_days: 0,
            leave_days: 0,
            wfh_days: 0,
            attendance_percentage: 0.0,
        };
        for record in records {
            summary.total_days += 1;
            match record.status() {
                AttendanceStatus::Present => summary.present_days += 1,
                AttendanceStatus::Absent => summary.absent_days += 1,
                AttendanceStatus::Leave => summary.leave_days += 1,
                AttendanceStatus::Wfh => summary.wfh_days += 1,
                AttendanceStatus::Holiday => {}
            }
        }
        summary.attendance_percentage =
            attendance_percentage(summary.present_days, summary.total_days);
        summary
    }
}

/// `present / total * 100` rounded to two decimals; zero when `total` is
/// zero.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "percentages are reported as two-decimal floats"
)]
pub fn attendance_percentage(present: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (f64::from(present) / f64::from(total) * 10_000.0).round() / 100.0
}

/// First and last day of a calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    /// First day.
    pub first: NaiveDate,
    /// Last day.
    pub last: NaiveDate,
}

impl MonthRange {
    /// Returns the range for `month` (1-12) of `year`, or `None` for an
    /// invalid month.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
        Some(Self { first, last })
    }

    /// Returns `true` when `day` falls in the month.
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        day.year() == self.first.year() && day.month() == self.first.month()
    }
}
