//! Attendance status values.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Where a member was on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// In the office.
    Present,
    /// Not working; also the reading for a day with no row.
    Absent,
    /// On leave.
    Leave,
    /// Working from home.
    #[serde(rename = "WFH")]
    Wfh,
    /// Public or company holiday.
    Holiday,
}

impl AttendanceStatus {
    /// Every status in display order.
    pub const ALL: [Self; 5] = [
        Self::Present,
        Self::Absent,
        Self::Leave,
        Self::Wfh,
        Self::Holiday,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
            Self::Leave => "Leave",
            Self::Wfh => "WFH",
            Self::Holiday => "Holiday",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned while parsing an attendance status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown attendance status: {0}")]
pub struct ParseAttendanceStatusError(pub String);

impl TryFrom<&str> for AttendanceStatus {
    type Error = ParseAttendanceStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ParseAttendanceStatusError(value.to_owned()))
    }
}
