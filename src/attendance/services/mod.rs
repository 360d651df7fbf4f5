//! Attendance orchestration services.

mod recorder;

pub use recorder::{
    AttendanceService, AttendanceServiceError, AttendanceServiceResult, DEFAULT_HISTORY_DAYS,
};
