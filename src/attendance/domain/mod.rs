//! Domain model for attendance.

mod record;
mod report;
mod status;
mod summary;

pub use record::{AttendanceRecord, MarkAttendanceRequest, MarkedAttendance};
pub use report::{personal_report_csv, summary_report_csv};
pub use status::{AttendanceStatus, ParseAttendanceStatusError};
pub use summary::{AttendanceSummary, MonthRange, attendance_percentage};
